use quickcheck::QuickCheck;

use crate::{Value, parse};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: re-serializing a parsed value with a conforming encoder yields
/// text that parses back to an equal value.
#[test]
fn serde_json_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let Ok(src) = serde_json::to_string(&value) else {
            return false;
        };
        parse(&src) == Ok(value)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: pretty-printed output, with its newlines and indentation, parses
/// to the same value as the compact form.
#[test]
fn whitespace_is_insignificant_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let (Ok(compact), Ok(pretty)) = (
            serde_json::to_string(&value),
            serde_json::to_string_pretty(&value),
        ) else {
            return false;
        };
        parse(&compact) == parse(&pretty)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: anything serde_json accepts, we accept with the same value.
#[test]
fn agrees_with_serde_json_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let Ok(src) = serde_json::to_string(&value) else {
            return false;
        };
        let Ok(theirs) = serde_json::from_str::<serde_json::Value>(&src) else {
            return false;
        };
        match parse(&src) {
            Ok(ours) => serde_json::to_value(&ours).is_ok_and(|ours| ours == theirs),
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value) -> bool);
}
