#![no_main]

use arbitrary::Arbitrary;
use jsonfsm::{Parser, ParserOptions, Value};
use libfuzzer_sys::fuzz_target;
use serde_json::Map;

#[derive(Debug)]
struct ArbitraryValue(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => serde_json::Value::Null,
            1 => serde_json::Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                serde_json::Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => serde_json::Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                serde_json::Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                serde_json::Value::Object(m.into_iter().map(|(k, v)| (k, v.0)).collect::<Map<_, _>>())
            }
        };
        Ok(ArbitraryValue(value))
    }
}

#[derive(Arbitrary, Debug)]
enum Document {
    /// Arbitrary text, mostly invalid.
    Raw(String),
    /// A valid document, pretty-printed or compact.
    Structured { value: ArbitraryValue, pretty: bool },
}

#[derive(Arbitrary, Debug)]
struct Input {
    document: Document,
    split_seed: u64,
    allow_single_quotes: bool,
}

fuzz_target!(|input: Input| run(input));

fn run(input: Input) {
    let text = match input.document {
        Document::Raw(text) => text,
        Document::Structured { value, pretty } => {
            let text = if pretty {
                serde_json::to_string_pretty(&value.0)
            } else {
                serde_json::to_string(&value.0)
            };
            text.expect("serde_json::Value always serializes")
        }
    };
    let options = ParserOptions {
        allow_single_quotes: input.allow_single_quotes,
        ..ParserOptions::default()
    };

    let whole = parse_chunks(&[text.as_str()], options);
    let chunked = parse_chunks(&split_into_safe_chunks(&text, input.split_seed), options);
    assert_eq!(whole, chunked, "chunking changed the result for {text:?}");

    // Anything serde_json accepts must be accepted with the same value.
    if let Ok(theirs) = serde_json::from_str::<serde_json::Value>(&text) {
        let ours = whole.unwrap_or_else(|err| panic!("rejected {text:?}: {err}"));
        assert!(same(&ours, &theirs), "{ours:?} != {theirs:?} for {text:?}");
    }
}

fn parse_chunks(chunks: &[&str], options: ParserOptions) -> Result<Value, jsonfsm::ParseError> {
    let mut parser = Parser::new(options);
    for chunk in chunks {
        parser.feed(chunk)?;
    }
    parser.finish()
}

/// Structural equality, comparing all numbers as `f64`.
fn same(ours: &Value, theirs: &serde_json::Value) -> bool {
    match (ours, theirs) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Boolean(a), serde_json::Value::Bool(b)) => a == b,
        (Value::Number(a), serde_json::Value::Number(b)) => b.as_f64() == Some(*a),
        (Value::String(a), serde_json::Value::String(b)) => a == b,
        (Value::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same(a, b))
        }
        (Value::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, v)| b.get(k).is_some_and(|theirs| same(v, theirs)))
        }
        _ => false,
    }
}

/// Split a UTF-8 `&str` into boundary-safe chunks, with sizes derived from
/// `split_seed`.
fn split_into_safe_chunks(text: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = text.len();
    let mut seed = split_seed;

    while start < len {
        let remaining = len - start;
        let mut size = usize::try_from(seed % remaining as u64).unwrap_or(0) + 1;

        while start + size < len && !text.is_char_boundary(start + size) {
            size += 1;
        }

        chunks.push(&text[start..start + size]);
        start += size;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9_7F4A_7C15;
    }

    chunks
}
