use bigdecimal::BigDecimal;
use serde_json::Value;

use crate::num::decimal_of;
use crate::types::FieldValue;

use super::FieldShape;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberField {
    pub value: BigDecimal,
    pub editable: Option<String>,
}

impl FieldShape for NumberField {
    const SHAPE: &'static str = "number";

    fn reify(value: &FieldValue) -> Option<Self> {
        Some(NumberField {
            value: decimal_of(value.inner())?,
            editable: value.editable(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxField {
    pub value: bool,
    pub editable: Option<String>,
}

impl FieldShape for CheckboxField {
    const SHAPE: &'static str = "checkbox";

    fn reify(value: &FieldValue) -> Option<Self> {
        Some(CheckboxField {
            value: flag_of(value.inner())?,
            editable: value.editable(),
        })
    }
}

fn flag_of(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Null => Some(false),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Some(true),
            "" | "0" | "false" => Some(false),
            _ => None,
        },
        Value::Number(number) => match number.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[rstest::rstest]
    #[case(json!({"value": 12.5}), "12.5")]
    #[case(json!({"value": "12.50"}), "12.50")]
    #[case(json!(7), "7")]
    #[case(json!({"value": "-3e2"}), "-300")]
    fn reads_numbers(#[case] raw: Value, #[case] expected: &str) {
        let field = NumberField::reify(&FieldValue::new(raw)).unwrap();
        assert_eq!(field.value, BigDecimal::from_str(expected).unwrap());
    }

    #[rstest::rstest]
    fn keeps_full_precision() {
        let mut cursor = crate::decode::Cursor::new(r#"{"value": 1234567890123.456789012345678}"#);
        let raw = crate::decode::read_value(&mut cursor).unwrap();
        let field = NumberField::reify(&FieldValue::new(raw)).unwrap();
        assert_eq!(
            field.value,
            BigDecimal::from_str("1234567890123.456789012345678").unwrap()
        );
        assert_ne!(field.value, BigDecimal::from_str("1234567890123.45678901234568").unwrap());
    }

    #[rstest::rstest]
    #[case(json!({"value": "abc"}))]
    #[case(json!({"value": ""}))]
    #[case(json!({"value": true}))]
    fn rejects_non_numbers(#[case] raw: Value) {
        assert_eq!(NumberField::reify(&FieldValue::new(raw)), None);
    }

    #[rstest::rstest]
    #[case(json!({"value": true}), Some(true))]
    #[case(json!({"value": "1"}), Some(true))]
    #[case(json!({"value": "True"}), Some(true))]
    #[case(json!({"value": "0"}), Some(false))]
    #[case(json!({"value": ""}), Some(false))]
    #[case(json!({"value": null}), Some(false))]
    #[case(json!(1), Some(true))]
    #[case(json!({"value": "yes"}), None)]
    #[case(json!({"value": 2}), None)]
    fn reads_checkboxes(#[case] raw: Value, #[case] expected: Option<bool>) {
        let field = CheckboxField::reify(&FieldValue::new(raw)).map(|field| field.value);
        assert_eq!(field, expected);
    }
}
