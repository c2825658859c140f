use tracing::trace;

use super::classify::classify;
use super::feature::buffer_object;
use super::scanner::{Cursor, Token};
use super::value::{for_each_element, for_each_entry};
use crate::options::ParseOptions;
use crate::types::{Placeholder, PlaceholderMap};
use crate::Result;

/// Decodes a placeholder array; the next token must be `[`.
///
/// Every element must be an object and yields exactly one feature, in
/// source order. Nesting is limited by `options.max_depth`.
pub fn parse_placeholder(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<Placeholder> {
    cursor.set_max_depth(options.max_depth);
    match cursor.next_token()? {
        Token::LeftBracket => parse_placeholder_from(cursor, options),
        other => Err(cursor.unexpected("array start", &other)),
    }
}

/// Decodes a placeholder map; the next token must be `{`.
pub fn parse_placeholder_map(
    cursor: &mut Cursor<'_>,
    options: &ParseOptions,
) -> Result<PlaceholderMap> {
    cursor.set_max_depth(options.max_depth);
    match cursor.next_token()? {
        Token::LeftBrace => parse_placeholder_map_from(cursor, options),
        other => Err(cursor.unexpected("object start", &other)),
    }
}

pub(crate) fn parse_placeholder_from(
    cursor: &mut Cursor<'_>,
    options: &ParseOptions,
) -> Result<Placeholder> {
    let mut placeholder = Placeholder::new();
    for_each_element(cursor, |cursor, token| {
        if token != Token::LeftBrace {
            return Err(cursor.unexpected("object start", &token));
        }
        let scratch = buffer_object(cursor, options)?;
        placeholder.push(classify(scratch, options));
        Ok(())
    })?;
    Ok(placeholder)
}

pub(crate) fn parse_placeholder_map_from(
    cursor: &mut Cursor<'_>,
    options: &ParseOptions,
) -> Result<PlaceholderMap> {
    let mut placeholders = PlaceholderMap::new();
    for_each_entry(cursor, |cursor, key| {
        let placeholder = match cursor.next_token()? {
            Token::LeftBracket => parse_placeholder_from(cursor, options)?,
            Token::Null => Placeholder::new(),
            other => return Err(cursor.unexpected("array start", &other)),
        };
        trace!(placeholder = %key, features = placeholder.len(), "decoded placeholder");
        placeholders.insert(key, placeholder);
        Ok(())
    })?;
    Ok(placeholders)
}
