use std::collections::HashMap;

use serde_json::Value;
use smallvec::SmallVec;
use smol_str::SmolStr;
use tracing::debug;

use super::fields::parse_fields;
use super::placeholder::parse_placeholder_map_from;
use super::scanner::{Cursor, Token};
use super::value::{for_each_entry, read_value, read_value_from};
use crate::constants::{keys, string_property, SCRATCH_FIELDS, SCRATCH_PLACEHOLDERS};
use crate::options::ParseOptions;
use crate::text::{is_blank, stringify_value};
use crate::types::{FieldSet, PlaceholderMap};
use crate::Result;

/// One buffered property of a feature or route object.
#[derive(Debug, Clone, PartialEq)]
pub enum ScratchValue {
    Text(String),
    Fields(FieldSet),
    Placeholders(PlaceholderMap),
    Pairs(HashMap<String, String>),
    Raw(Value),
}

/// Direct properties of one object, in source order, waiting to be classified.
///
/// Recognised properties are stored under their canonical names (`Fields`,
/// `Placeholders`, `params`, `componentName`, ...); anything else keeps the
/// name it had in the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scratch {
    entries: SmallVec<[(SmolStr, ScratchValue); 8]>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing an earlier property of the same name.
    pub fn insert(&mut self, name: impl Into<SmolStr>, value: ScratchValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScratchValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScratchValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ScratchValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn take(&mut self, name: &str) -> Option<ScratchValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.take(name)? {
            ScratchValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn take_fields(&mut self) -> FieldSet {
        match self.take(SCRATCH_FIELDS) {
            Some(ScratchValue::Fields(fields)) => fields,
            _ => FieldSet::new(),
        }
    }

    pub fn take_placeholders(&mut self) -> PlaceholderMap {
        match self.take(SCRATCH_PLACEHOLDERS) {
            Some(ScratchValue::Placeholders(placeholders)) => placeholders,
            _ => PlaceholderMap::new(),
        }
    }

    pub fn take_pairs(&mut self, name: &str) -> HashMap<String, String> {
        match self.take(name) {
            Some(ScratchValue::Pairs(pairs)) => pairs,
            _ => HashMap::new(),
        }
    }
}

/// Buffers the direct properties of an object whose `{` has already been consumed.
///
/// `fields` and `placeholders` are decoded on the spot, recursing into the
/// field and placeholder parsers; nothing is classified here.
pub fn buffer_object(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<Scratch> {
    let mut scratch = Scratch::new();
    for_each_entry(cursor, |cursor, name| {
        if is_blank(&name) {
            debug!(line = cursor.location().line, "skipping property with a blank name");
            read_value(cursor)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case(keys::FIELDS) {
            let fields = parse_fields(cursor)?;
            scratch.insert(SCRATCH_FIELDS, ScratchValue::Fields(fields));
        } else if name.eq_ignore_ascii_case(keys::PLACEHOLDERS) {
            let placeholders = match cursor.next_token()? {
                Token::Null => PlaceholderMap::new(),
                Token::LeftBrace => parse_placeholder_map_from(cursor, options)?,
                other => return Err(cursor.unexpected("object start", &other)),
            };
            scratch.insert(SCRATCH_PLACEHOLDERS, ScratchValue::Placeholders(placeholders));
        } else if name.eq_ignore_ascii_case(keys::PARAMS) {
            scratch.insert(keys::PARAMS, ScratchValue::Pairs(parse_string_pairs(cursor)?));
        } else if name.eq_ignore_ascii_case(keys::ATTRIBUTES) {
            scratch.insert(keys::ATTRIBUTES, ScratchValue::Pairs(parse_string_pairs(cursor)?));
        } else if let Some(canonical) = string_property(&name) {
            match read_value(cursor)? {
                Value::Null => {}
                Value::String(text) => scratch.insert(canonical, ScratchValue::Text(text)),
                raw @ (Value::Array(_) | Value::Object(_)) => {
                    scratch.insert(canonical, ScratchValue::Raw(raw))
                }
                scalar => scratch.insert(canonical, ScratchValue::Text(stringify_value(&scalar))),
            }
        } else {
            scratch.insert(name, ScratchValue::Raw(read_value(cursor)?));
        }
        Ok(())
    })?;
    Ok(scratch)
}

/// Reads a flat `string -> string` object such as `params` or `attributes`.
///
/// Non-string values are flattened with [`stringify_value`]; `null` in place
/// of the object yields an empty map.
pub fn parse_string_pairs(cursor: &mut Cursor<'_>) -> Result<HashMap<String, String>> {
    let mut pairs = HashMap::new();
    match cursor.next_token()? {
        Token::Null => {}
        Token::LeftBrace => {
            for_each_entry(cursor, |cursor, name| {
                let token = cursor.next_token()?;
                let value = match token {
                    Token::String(text) => text,
                    other => stringify_value(&read_value_from(cursor, other)?),
                };
                pairs.insert(name, value);
                Ok(())
            })?;
        }
        other => return Err(cursor.unexpected("object start", &other)),
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    fn buffer(input: &str) -> Result<Scratch> {
        let mut cursor = Cursor::new(input);
        assert_eq!(cursor.next_token().unwrap(), Token::LeftBrace);
        buffer_object(&mut cursor, &ParseOptions::default())
    }

    #[rstest::rstest]
    fn buffers_recognised_properties_under_canonical_names() {
        let scratch = buffer(
            r#"{"ID": "a", "DataSource": "{1}", "params": {"n": 1, "s": "x", "z": null}, "fields": {"T": 1}, "placeholders": {"main": []}}"#,
        )
        .unwrap();
        assert_eq!(scratch.text(keys::ID), Some("a"));
        assert_eq!(scratch.text(keys::DATASOURCE), Some("{1}"));
        match scratch.get(keys::PARAMS) {
            Some(ScratchValue::Pairs(pairs)) => {
                assert_eq!(pairs["n"], "1");
                assert_eq!(pairs["s"], "x");
                assert_eq!(pairs["z"], "");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(scratch.get(SCRATCH_FIELDS), Some(ScratchValue::Fields(f)) if f.len() == 1));
        assert!(matches!(
            scratch.get(SCRATCH_PLACEHOLDERS),
            Some(ScratchValue::Placeholders(map)) if map.contains_key("main")
        ));
    }

    #[rstest::rstest]
    fn keeps_unknown_properties_and_skips_blank_names() {
        let scratch = buffer(r#"{"": 1, "  ": {"deep": [1]}, "experimental": {"a": [1, 2]}}"#).unwrap();
        assert_eq!(scratch.len(), 1);
        assert_eq!(
            scratch.get("experimental"),
            Some(&ScratchValue::Raw(json!({"a": [1, 2]})))
        );
    }

    #[rstest::rstest]
    fn later_properties_replace_earlier_ones() {
        let mut scratch = buffer(r#"{"name": "first", "Name": "second", "id": null}"#).unwrap();
        assert_eq!(scratch.len(), 1);
        assert_eq!(scratch.take_text(keys::NAME).as_deref(), Some("second"));
        assert!(scratch.is_empty());
    }

    #[rstest::rstest]
    fn non_string_scalars_become_text() {
        let scratch = buffer(r#"{"itemVersion": 3, "id": true}"#).unwrap();
        assert_eq!(scratch.text(keys::ITEM_VERSION), Some("3"));
        assert_eq!(scratch.text(keys::ID), Some("true"));
    }

    #[rstest::rstest]
    #[case(r#"{"placeholders": []}"#, "expected object start, found array start")]
    #[case(r#"{"params": "x"}"#, "expected object start")]
    #[case(r#"{"fields": {"T": 1}"#, "unterminated object")]
    fn reports_malformed_properties(#[case] input: &str, #[case] message: &str) {
        let err = buffer(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLayout);
        assert!(err.to_string().contains(message), "{err}");
    }
}
