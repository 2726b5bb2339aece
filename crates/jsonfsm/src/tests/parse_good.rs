use rstest::rstest;

use crate::{Map, Parser, ParserOptions, Value, parse};

fn object(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    Value::Object(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect::<Map>())
}

#[test]
fn object_of_literals() {
    let value = parse(r#"{"a":true,"b":false,"c":null}"#).unwrap();
    assert_eq!(
        value,
        object([
            ("a", Value::Boolean(true)),
            ("b", Value::Boolean(false)),
            ("c", Value::Null),
        ])
    );
}

#[test]
fn array_of_numbers() {
    let value = parse("[1,2,3]").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![1.0.into(), 2.0.into(), 3.0.into()])
    );
}

#[rstest]
#[case(r#""hello""#, Value::String("hello".into()))]
#[case("'hello'", Value::String("hello".into()))]
#[case("42", Value::Number(42.0))]
#[case("-0.5", Value::Number(-0.5))]
#[case("true", Value::Boolean(true))]
#[case("false", Value::Boolean(false))]
#[case("null", Value::Null)]
#[case(" \r\n\t 7 \n", Value::Number(7.0))]
fn bare_scalars(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(parse(input), Ok(expected));
}

#[test]
fn nested_object_and_array() {
    let value = parse(r#"{"x":{"y":[1,"z"]}}"#).unwrap();
    assert_eq!(
        value,
        object([(
            "x",
            object([("y", Value::Array(vec![1.0.into(), "z".into()]))])
        )])
    );
    assert_eq!(value["x"]["y"][0], Value::Number(1.0));
    assert_eq!(value["x"]["y"][1], Value::String("z".into()));
}

#[rstest]
#[case("{}", Value::Object(Map::new()))]
#[case("[]", Value::Array(vec![]))]
#[case("[ ]", Value::Array(vec![]))]
#[case("{ \n }", Value::Object(Map::new()))]
#[case("[[],{}]", Value::Array(vec![Value::Array(vec![]), Value::Object(Map::new())]))]
fn empty_containers(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(parse(input), Ok(expected));
}

#[test]
fn array_elements_are_typed() {
    let value = parse(r#"[true, 1.5, null, "s", false, -3]"#).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            true.into(),
            1.5.into(),
            Value::Null,
            "s".into(),
            false.into(),
            (-3.0).into(),
        ])
    );
}

#[rstest]
#[case("0", 0.0)]
#[case("3", 3.0)]
#[case("-12.22e-2", -0.1222)]
#[case("[1e3]", 1000.0)]
#[case("[2E-2 ]", 0.02)]
#[case("{\"n\":10}", 10.0)]
fn numbers(#[case] input: &str, #[case] expected: f64) {
    let value = parse(input).unwrap();
    let n = match &value {
        Value::Number(n) => *n,
        Value::Array(items) => items[0].as_f64().unwrap(),
        Value::Object(map) => map["n"].as_f64().unwrap(),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(n, expected);
}

#[rstest]
#[case(r#""a\"b""#, "a\"b")]
#[case(r#""\\ \/ \b \f \n \r \t""#, "\\ / \u{8} \u{c} \n \r \t")]
#[case(r#""\u0041\u00e9""#, "A\u{e9}")]
#[case(r#""\uD83D\uDE00""#, "\u{1f600}")]
#[case(r"'it\'s'", "it's")]
#[case(r#"'say "hi"'"#, "say \"hi\"")]
#[case(r#""{[,:]}""#, "{[,:]}")]
#[case("\"caf\u{e9} \u{2603}\"", "caf\u{e9} \u{2603}")]
fn strings(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse(input), Ok(Value::String(expected.into())));
}

#[test]
fn chunks_split_anywhere() {
    let input = r#"{"key": [12.5e1, "va\u0041lue", true], "n": null}"#;
    let expected = parse(input).unwrap();

    for split in 0..=input.len() {
        if !input.is_char_boundary(split) {
            continue;
        }
        let mut parser = Parser::default();
        parser.feed(&input[..split]).unwrap();
        parser.feed(&input[split..]).unwrap();
        assert_eq!(parser.finish().unwrap(), expected, "split at {split}");
    }
}

#[test]
fn one_character_at_a_time() {
    let input = "[1,-2,{\"a\":[3]},4]";
    let mut parser = Parser::default();
    let mut buf = [0u8; 4];
    for c in input.chars() {
        parser.feed(c.encode_utf8(&mut buf)).unwrap();
    }
    assert_eq!(parser.finish(), parse(input));
}

#[test]
fn deep_nesting_does_not_recurse() {
    const DEPTH: usize = 10_000;
    let input = format!("{}{}", "[".repeat(DEPTH), "]".repeat(DEPTH));

    let mut parser = Parser::default();
    parser.feed(&input[..DEPTH]).unwrap();
    assert_eq!(parser.composer().depth(), DEPTH);
    parser.feed(&input[DEPTH..]).unwrap();
    assert_eq!(parser.composer().depth(), 1);

    let value = parser.finish().unwrap();
    let mut levels = 1;
    let mut current = &value;
    while let Some(inner) = current.get_index(0) {
        current = inner;
        levels += 1;
    }
    assert_eq!(levels, DEPTH);
    assert!(current.is_empty());
}

#[test]
fn deep_documents_parse_and_drop_on_a_small_stack() {
    const DEPTH: usize = 200_000;

    std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(|| {
            let mut input = String::with_capacity(DEPTH * 8);
            for _ in 0..DEPTH / 2 {
                input.push_str(r#"{"a":["#);
            }
            for _ in 0..DEPTH / 2 {
                input.push_str("]}");
            }

            let value = parse(&input).unwrap();
            assert_eq!(value["a"][0]["a"].len(), 1);
            drop(value);
        })
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn depth_limit_allows_exactly_the_limit() {
    let options = ParserOptions {
        max_depth: Some(3),
        ..ParserOptions::default()
    };
    let mut parser = Parser::new(options);
    parser.feed("[[[1]]]").unwrap();
    assert!(parser.finish().is_ok());
}

#[test]
fn duplicate_keys_take_the_last_value() {
    let value = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    assert_eq!(value, object([("a", 3.0.into()), ("b", 2.0.into())]));
}

#[test]
fn parses_via_from_str() {
    let value: Value = "[true, [1, 2], false]".parse().unwrap();
    assert_eq!(value.len(), 3);
    assert_eq!(value[1][1].as_f64(), Some(2.0));
}

#[test]
fn agrees_with_serde_json() {
    let input = r#"
        {
            "name": "jsonfsm",
            "tags": ["lexer", "composer"],
            "nested": {"pi": 3.141592653589793, "neg": -1e-7, "big": 1.5E300},
            "empty": {"a": [], "o": {}},
            "escapes": "line\nbreak é 𝄞"
        }
    "#;
    let ours = parse(input).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
    assert_eq!(serde_json::to_value(&ours).unwrap(), theirs);
}
