use tracing::debug;

use super::scanner::{Cursor, Token};
use super::value::{for_each_entry, read_value, read_value_from};
use crate::constants::CUSTOM_CONTENT_KEY;
use crate::types::{FieldSet, FieldValue};
use crate::Result;

/// Decodes the value of a `fields` property.
///
/// An object yields one entry per property, captured verbatim. Any other
/// value, `null` included, is kept whole under `CustomContent`. Only a
/// malformed token stream is an error.
pub fn parse_fields(cursor: &mut Cursor<'_>) -> Result<FieldSet> {
    let token = cursor.next_token()?;
    parse_fields_from(cursor, token)
}

pub(crate) fn parse_fields_from(cursor: &mut Cursor<'_>, token: Token) -> Result<FieldSet> {
    match token {
        Token::LeftBrace => {
            let mut fields = FieldSet::new();
            for_each_entry(cursor, |cursor, name| {
                let value = read_value(cursor)?;
                fields.insert(name, FieldValue::new(value));
                Ok(())
            })?;
            Ok(fields)
        }
        other => {
            let value = read_value_from(cursor, other)?;
            debug!(
                key = CUSTOM_CONTENT_KEY,
                "wrapping non-object fields payload"
            );
            Ok(FieldSet::custom_content(FieldValue::new(value)))
        }
    }
}
