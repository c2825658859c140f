use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::{Number, Value};

/// Parses decimal or scientific notation without rounding.
pub fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(is_number_byte) {
        return None;
    }
    BigDecimal::from_str(trimmed).ok()
}

fn is_number_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')
}

pub fn number_to_decimal(number: &Number) -> Option<BigDecimal> {
    parse_decimal(&number.to_string())
}

/// Numeric reading of a scalar: numbers as-is, numeric strings parsed.
pub fn decimal_of(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Number(number) => number_to_decimal(number),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[rstest::rstest]
    #[case("12", "12")]
    #[case(" 12.50 ", "12.50")]
    #[case("-0.001", "-0.001")]
    #[case("1.5e3", "1500")]
    #[case("2e-2", "0.02")]
    fn parses_decimals(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(
            parse_decimal(raw),
            Some(BigDecimal::from_str(expected).unwrap())
        );
    }

    #[rstest::rstest]
    #[case("")]
    #[case("twelve")]
    #[case("1,5")]
    #[case("1_000")]
    fn rejects_non_numeric(#[case] raw: &str) {
        assert_eq!(parse_decimal(raw), None);
    }

    #[rstest::rstest]
    #[case("123456789012345678901234567890123456789")]
    #[case("79228162514264337593543950336")]
    #[case("0.0000000000000000000000000000000001")]
    fn keeps_digits_past_machine_precision(#[case] raw: &str) {
        let parsed = parse_decimal(raw).unwrap();
        assert_ne!(parsed, BigDecimal::from(0));
        assert_eq!(parsed, BigDecimal::from_str(raw).unwrap());
    }

    #[rstest::rstest]
    fn reads_numbers_and_numeric_strings() {
        assert_eq!(decimal_of(&json!(3)), Some(BigDecimal::from(3)));
        assert_eq!(decimal_of(&json!("3")), Some(BigDecimal::from(3)));
        assert_eq!(decimal_of(&json!(true)), None);
    }
}
