use rstest::rstest;

use super::*;

/// Lexes `input` the way a driver would, replaying number terminators.
fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new();
    let mut tokens = Vec::new();
    for c in input.chars() {
        while lexer.feed(c)? == Feed::Replay {
            tokens.extend(lexer.take_token());
        }
        tokens.extend(lexer.take_token());
    }
    lexer.finish()?;
    tokens.extend(lexer.take_token());
    Ok(tokens)
}

#[test]
fn punctuators_are_emitted_immediately() {
    let mut lexer = Lexer::new();
    for (c, expected) in [
        ('{', Token::BeginObject),
        ('}', Token::EndObject),
        ('[', Token::BeginArray),
        (']', Token::EndArray),
        (':', Token::KeyValueSeparator),
        (',', Token::ValueSeparator),
    ] {
        assert_eq!(lexer.feed(c), Ok(Feed::Consumed));
        assert!(lexer.has_token());
        assert_eq!(lexer.take_token(), Some(expected));
        assert!(!lexer.has_token());
    }
}

#[test]
fn whitespace_produces_nothing() {
    let mut lexer = Lexer::new();
    for c in [' ', '\t', '\n', '\r'] {
        assert_eq!(lexer.feed(c), Ok(Feed::Consumed));
        assert!(!lexer.has_token());
        assert!(lexer.is_idle());
    }
}

#[test]
fn object_with_literals() {
    assert_eq!(
        tokenize(r#"{"a":true,"b":false,"c":null}"#).unwrap(),
        [
            Token::BeginObject,
            Token::String("a".into()),
            Token::KeyValueSeparator,
            Token::Boolean(true),
            Token::ValueSeparator,
            Token::String("b".into()),
            Token::KeyValueSeparator,
            Token::Boolean(false),
            Token::ValueSeparator,
            Token::String("c".into()),
            Token::KeyValueSeparator,
            Token::Null,
            Token::EndObject,
        ]
    );
}

#[test]
fn single_quoted_strings_and_spaced_numbers() {
    assert_eq!(
        tokenize("{ 'a': true, 'd': -12.22e2 }").unwrap(),
        [
            Token::BeginObject,
            Token::String("a".into()),
            Token::KeyValueSeparator,
            Token::Boolean(true),
            Token::ValueSeparator,
            Token::String("d".into()),
            Token::KeyValueSeparator,
            Token::Number(-1222.0),
            Token::EndObject,
        ]
    );
}

#[rstest]
#[case("[1]", 1.0, Token::EndArray)]
#[case("[1,", 1.0, Token::ValueSeparator)]
#[case("{\"a\":2}", 2.0, Token::EndObject)]
fn number_terminator_is_replayed(#[case] input: &str, #[case] number: f64, #[case] after: Token) {
    let tokens = tokenize(input).unwrap();
    let at = tokens.iter().position(|t| *t == Token::Number(number)).unwrap();
    assert_eq!(tokens[at + 1], after);
}

#[test]
fn replay_leaves_character_unconsumed() {
    let mut lexer = Lexer::new();
    assert_eq!(lexer.feed('7'), Ok(Feed::Consumed));
    assert_eq!(lexer.state(), LexState::InNumber);
    assert!(!lexer.has_token());

    assert_eq!(lexer.feed(']'), Ok(Feed::Replay));
    assert_eq!(lexer.state(), LexState::Start);
    // Still not taken, so the lexer refuses to look at anything new.
    assert_eq!(lexer.feed(']'), Ok(Feed::Replay));
    assert_eq!(lexer.take_token(), Some(Token::Number(7.0)));

    assert_eq!(lexer.feed(']'), Ok(Feed::Consumed));
    assert_eq!(lexer.take_token(), Some(Token::EndArray));
}

#[test]
fn bare_number_needs_finish() {
    let mut lexer = Lexer::new();
    for c in "42".chars() {
        assert_eq!(lexer.feed(c), Ok(Feed::Consumed));
    }
    assert!(!lexer.has_token());
    assert!(!lexer.is_idle());
    lexer.finish().unwrap();
    assert_eq!(lexer.take_token(), Some(Token::Number(42.0)));
    assert!(lexer.is_idle());
}

#[rstest]
#[case("tru", LexState::InTrue)]
#[case("fa", LexState::InFalse)]
#[case("n", LexState::InNull)]
#[case("\"abc", LexState::InString)]
#[case("'abc\\'", LexState::InString)]
fn unterminated_input_is_detectable(#[case] input: &str, #[case] state: LexState) {
    let mut lexer = Lexer::new();
    for c in input.chars() {
        assert_eq!(lexer.feed(c), Ok(Feed::Consumed));
    }
    assert!(!lexer.has_token());
    assert!(!lexer.is_idle());
    assert_eq!(lexer.state(), state);
    assert_eq!(
        lexer.finish(),
        Err(LexError::UnexpectedEndOfInput { state })
    );
    assert_eq!(lexer.state(), LexState::Failed);
}

#[rstest]
#[case("x", LexError::UnexpectedCharacter { ch: 'x', state: LexState::Start })]
#[case("/", LexError::UnexpectedCharacter { ch: '/', state: LexState::Start })]
#[case("+1", LexError::UnexpectedCharacter { ch: '+', state: LexState::Start })]
#[case("tru!", LexError::UnexpectedCharacter { ch: '!', state: LexState::InTrue })]
#[case("fals", LexError::UnexpectedEndOfInput { state: LexState::InFalse })]
#[case("nul ", LexError::UnexpectedCharacter { ch: ' ', state: LexState::InNull })]
#[case("1a", LexError::UnexpectedCharacter { ch: 'a', state: LexState::InNumber })]
#[case("[1:", LexError::UnexpectedCharacter { ch: ':', state: LexState::InNumber })]
#[case("1-", LexError::UnexpectedCharacter { ch: '-', state: LexState::InNumber })]
#[case("1e ", LexError::InvalidNumber("expected a digit in the exponent"))]
#[case("-]", LexError::InvalidNumber("expected a digit after '-'"))]
#[case("\"\\q\"", LexError::UnsupportedEscape('q'))]
#[case("\"\\u00z0\"", LexError::InvalidUnicodeEscape('z'))]
fn rejects(#[case] input: &str, #[case] expected: LexError) {
    assert_eq!(tokenize(input), Err(expected));
}

#[test]
fn errors_are_terminal() {
    let mut lexer = Lexer::new();
    assert!(lexer.feed('?').is_err());
    assert_eq!(lexer.state(), LexState::Failed);
    assert_eq!(lexer.feed(' '), Err(LexError::Failed));
    assert_eq!(lexer.finish(), Err(LexError::Failed));
}

#[test]
fn single_quotes_can_be_disabled() {
    let mut lexer = Lexer::with_options(ParserOptions {
        allow_single_quotes: false,
        ..ParserOptions::default()
    });
    assert_eq!(lexer.feed('\''), Err(LexError::SingleQuotesDisabled));

    let mut lexer = Lexer::new();
    assert_eq!(lexer.feed('\''), Ok(Feed::Consumed));
    assert_eq!(lexer.state(), LexState::InString);
}

#[test]
fn strings_may_contain_structural_characters() {
    assert_eq!(
        tokenize(r#"["{[,:]}", "a\u0020b"]"#).unwrap(),
        [
            Token::BeginArray,
            Token::String("{[,:]}".into()),
            Token::ValueSeparator,
            Token::String("a b".into()),
            Token::EndArray,
        ]
    );
}
