//! Internal module for validating JSON number and literal tokens

/// Whether the token is a valid JSON number, for example `-12.5e+3`
///
/// Leading and trailing whitespace is not allowed.
pub(crate) fn is_valid_json_number(token: &str) -> bool {
    #[derive(PartialEq, Clone, Copy)]
    enum State {
        Start,
        Minus,
        IntZero,
        IntNonZero,
        DecimalPoint,
        DecimalDigit,
        ExpE,
        ExpSign,
        ExpDigit,
    }

    let mut state = State::Start;
    for byte in token.bytes() {
        state = match (state, byte) {
            (State::Start, b'-') => State::Minus,
            (State::ExpE, b'-' | b'+') => State::ExpSign,

            (State::Start | State::Minus, b'0') => State::IntZero,
            (State::Start | State::Minus, b'1'..=b'9') => State::IntNonZero,
            (State::IntNonZero, b'0'..=b'9') => State::IntNonZero,

            (State::IntZero | State::IntNonZero, b'.') => State::DecimalPoint,
            (State::DecimalPoint | State::DecimalDigit, b'0'..=b'9') => State::DecimalDigit,

            (State::IntZero | State::IntNonZero | State::DecimalDigit, b'e' | b'E') => State::ExpE,
            (State::ExpE | State::ExpSign | State::ExpDigit, b'0'..=b'9') => State::ExpDigit,

            // Includes leading 0s such as `01`, which are not allowed
            _ => return false,
        };
    }

    matches!(
        state,
        State::IntZero | State::IntNonZero | State::DecimalDigit | State::ExpDigit
    )
}

/// Whether the token can be written as unquoted JSON scalar: `true`, `false` or a number
///
/// `null` is not included because it is represented by its own value variant.
pub(crate) fn is_valid_scalar(token: &str) -> bool {
    matches!(token, "true" | "false") || is_valid_json_number(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_numbers() {
        for number in [
            "0", "-0", "1", "-9", "123", "56.0030", "-0.1", "1e5", "1.01e+03", "-4.50E-40", "0e0",
        ] {
            assert!(is_valid_json_number(number), "should be valid: {number}");
        }
    }

    #[test]
    fn invalid_numbers() {
        for number in [
            "", "-", "01", "-01", "+1", ".5", "1.", "1e", "1e+", "1.e3", "0x10", "NaN", "inf",
            " 1", "1 ", "1_000", "--1",
        ] {
            assert!(!is_valid_json_number(number), "should be invalid: {number}");
        }
    }

    #[test]
    fn scalars() {
        assert!(is_valid_scalar("true"));
        assert!(is_valid_scalar("false"));
        assert!(is_valid_scalar("12"));
        assert!(!is_valid_scalar("null"));
        assert!(!is_valid_scalar("True"));
        assert!(!is_valid_scalar("yes"));
    }
}
