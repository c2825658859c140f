use serde_json::{Map, Value};

use super::scanner::{Cursor, Token};
use crate::Result;

pub fn read_value(cursor: &mut Cursor<'_>) -> Result<Value> {
    let token = cursor.next_token()?;
    read_value_from(cursor, token)
}

/// Captures the JSON value that begins with `token` verbatim.
pub fn read_value_from(cursor: &mut Cursor<'_>, token: Token) -> Result<Value> {
    match token {
        Token::LeftBrace => {
            let mut map = Map::new();
            for_each_entry(cursor, |cursor, key| {
                let value = read_value(cursor)?;
                map.insert(key, value);
                Ok(())
            })?;
            Ok(Value::Object(map))
        }
        Token::LeftBracket => {
            let mut items = Vec::new();
            for_each_element(cursor, |cursor, token| {
                items.push(read_value_from(cursor, token)?);
                Ok(())
            })?;
            Ok(Value::Array(items))
        }
        Token::String(value) => Ok(Value::String(value)),
        Token::Number(value) => Ok(Value::Number(value)),
        Token::Bool(value) => Ok(Value::Bool(value)),
        Token::Null => Ok(Value::Null),
        other => Err(cursor.unexpected("a value", &other)),
    }
}

/// Walks the members of an object whose `{` has already been consumed.
///
/// `on_entry` receives each property name and must consume exactly one value.
pub(crate) fn for_each_entry<'a, F>(cursor: &mut Cursor<'a>, mut on_entry: F) -> Result<()>
where
    F: FnMut(&mut Cursor<'a>, String) -> Result<()>,
{
    cursor.enter()?;
    let mut token = cursor.next_token()?;
    if token == Token::RightBrace {
        cursor.leave();
        return Ok(());
    }
    loop {
        let key = match token {
            Token::String(key) => key,
            Token::Eof => return Err(cursor.error("unterminated object")),
            other => return Err(cursor.unexpected("property name", &other)),
        };
        match cursor.next_token()? {
            Token::Colon => {}
            other => return Err(cursor.unexpected("`:`", &other)),
        }
        on_entry(cursor, key)?;
        match cursor.next_token()? {
            Token::Comma => token = cursor.next_token()?,
            Token::RightBrace => break,
            Token::Eof => return Err(cursor.error("unterminated object")),
            other => return Err(cursor.unexpected("`,` or object end", &other)),
        }
    }
    cursor.leave();
    Ok(())
}

/// Walks the elements of an array whose `[` has already been consumed.
///
/// `on_element` receives the first token of each element.
pub(crate) fn for_each_element<'a, F>(cursor: &mut Cursor<'a>, mut on_element: F) -> Result<()>
where
    F: FnMut(&mut Cursor<'a>, Token) -> Result<()>,
{
    cursor.enter()?;
    let mut token = cursor.next_token()?;
    if token == Token::RightBracket {
        cursor.leave();
        return Ok(());
    }
    loop {
        if token == Token::Eof {
            return Err(cursor.error("unterminated array"));
        }
        on_element(cursor, token)?;
        match cursor.next_token()? {
            Token::Comma => token = cursor.next_token()?,
            Token::RightBracket => break,
            Token::Eof => return Err(cursor.error("unterminated array")),
            other => return Err(cursor.unexpected("`,` or array end", &other)),
        }
    }
    cursor.leave();
    Ok(())
}
