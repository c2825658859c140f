use memchr::memchr2;
use serde_json::Number;

use crate::constants::DEFAULT_MAX_DEPTH;
use crate::{Error, Location, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Colon,
    Comma,
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    Eof,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::LeftBracket => "array start".to_string(),
            Token::RightBracket => "array end".to_string(),
            Token::LeftBrace => "object start".to_string(),
            Token::RightBrace => "object end".to_string(),
            Token::Colon => "`:`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::String(value) => format!("string {value:?}"),
            Token::Number(value) => format!("number {value}"),
            Token::Bool(value) => format!("`{value}`"),
            Token::Null => "`null`".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Forward-only JSON token cursor over an in-memory document.
///
/// Tokens are produced one at a time and are never pushed back; every parser
/// in this crate decides what to do with a token as soon as it has read it.
/// The cursor also owns the nesting budget so that deeply recursive layouts
/// fail with an error instead of exhausting the stack.
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    token_start: Location,
    depth: usize,
    max_depth: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(input: &'a str, max_depth: usize) -> Self {
        let start = Location {
            offset: 0,
            line: 1,
            column: 1,
        };
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
            token_start: start,
            depth: 0,
            max_depth,
        }
    }

    /// Position where the most recently returned token began.
    pub fn location(&self) -> Location {
        self.token_start
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Replaces the nesting budget; public parsers set it from `ParseOptions::max_depth`.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::malformed(message, self.token_start)
    }

    pub fn unexpected(&self, expected: &str, found: &Token) -> Error {
        self.error(format!("expected {expected}, found {}", found.describe()))
    }

    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!(
                "nesting depth exceeds the limit of {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn expect_end(&mut self) -> Result<()> {
        match self.next_token()? {
            Token::Eof => Ok(()),
            other => Err(self.error(format!(
                "unexpected trailing content: {}",
                other.describe()
            ))),
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.token_start = self.here();

        let Some(byte) = self.peek_byte() else {
            return Ok(Token::Eof);
        };
        match byte {
            b'[' => self.single(Token::LeftBracket),
            b']' => self.single(Token::RightBracket),
            b'{' => self.single(Token::LeftBrace),
            b'}' => self.single(Token::RightBrace),
            b':' => self.single(Token::Colon),
            b',' => self.single(Token::Comma),
            b'"' => self.scan_string(),
            b'-' | b'0'..=b'9' => self.scan_number(),
            b't' => self.scan_literal("true", Token::Bool(true)),
            b'f' => self.scan_literal("false", Token::Bool(false)),
            b'n' => self.scan_literal("null", Token::Null),
            _ => {
                let ch = self.input[self.position..].chars().next().unwrap_or('\u{fffd}');
                Err(self.error(format!("unexpected character `{ch}`")))
            }
        }
    }

    fn here(&self) -> Location {
        Location {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        Error::malformed(message, self.here())
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    // Only for ASCII bytes that are not newlines.
    fn bump(&mut self) {
        self.position += 1;
        self.column += 1;
    }

    fn single(&mut self, token: Token) -> Result<Token> {
        self.bump();
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek_byte() {
            match byte {
                b' ' | b'\t' | b'\r' => self.bump(),
                b'\n' => {
                    self.position += 1;
                    self.line += 1;
                    self.column = 1;
                }
                _ => break,
            }
        }
    }

    fn scan_literal(&mut self, literal: &str, token: Token) -> Result<Token> {
        if self.input[self.position..].starts_with(literal) {
            self.position += literal.len();
            self.column += literal.len();
            return Ok(token);
        }
        Err(self.error(format!("invalid literal, expected `{literal}`")))
    }

    fn scan_string(&mut self) -> Result<Token> {
        self.bump();
        let mut value = String::new();

        loop {
            let bytes = self.input.as_bytes();
            let Some(idx) = memchr2(b'"', b'\\', &bytes[self.position..]) else {
                return Err(self.error("unterminated string"));
            };
            let chunk = &self.input[self.position..self.position + idx];
            if let Some(bad) = chunk.bytes().position(|byte| byte < 0x20) {
                self.column += chunk[..bad].chars().count();
                self.position += bad;
                return Err(self.error_here("control character in string"));
            }
            value.push_str(chunk);
            self.column += chunk.chars().count();
            self.position += idx;

            let terminator = bytes[self.position];
            self.bump();
            if terminator == b'"' {
                return Ok(Token::String(value));
            }
            self.scan_escape(&mut value)?;
        }
    }

    fn scan_escape(&mut self, value: &mut String) -> Result<()> {
        let Some(byte) = self.peek_byte() else {
            return Err(self.error("unterminated string"));
        };
        match byte {
            b'"' => value.push('"'),
            b'\\' => value.push('\\'),
            b'/' => value.push('/'),
            b'b' => value.push('\u{8}'),
            b'f' => value.push('\u{c}'),
            b'n' => value.push('\n'),
            b'r' => value.push('\r'),
            b't' => value.push('\t'),
            b'u' => {
                self.bump();
                let ch = self.scan_unicode_escape()?;
                value.push(ch);
                return Ok(());
            }
            _ => {
                let ch = self.input[self.position..].chars().next().unwrap_or('\u{fffd}');
                return Err(self.error_here(format!("invalid escape sequence `\\{ch}`")));
            }
        }
        self.bump();
        Ok(())
    }

    fn scan_unicode_escape(&mut self) -> Result<char> {
        let first = self.scan_hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if !self.input[self.position..].starts_with("\\u") {
                    return Err(self.error_here("unpaired surrogate in unicode escape"));
                }
                self.bump();
                self.bump();
                let second = self.scan_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.error_here("invalid low surrogate in unicode escape"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(self.error_here("unpaired surrogate in unicode escape"));
            }
            other => other,
        };
        char::from_u32(code).ok_or_else(|| self.error_here("invalid unicode escape"))
    }

    fn scan_hex4(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .peek_byte()
                .and_then(|byte| (byte as char).to_digit(16))
                .ok_or_else(|| self.error_here("invalid unicode escape"))?;
            code = (code << 4) | digit;
            self.bump();
        }
        Ok(code)
    }

    fn scan_number(&mut self) -> Result<Token> {
        let bytes = self.input.as_bytes();
        let start = self.position;
        let mut idx = start;

        if bytes.get(idx) == Some(&b'-') {
            idx += 1;
        }
        match bytes.get(idx) {
            Some(b'0') => idx += 1,
            Some(b'1'..=b'9') => idx = skip_digits(bytes, idx),
            _ => return Err(self.error("invalid number")),
        }
        if bytes.get(idx) == Some(&b'.') {
            let end = skip_digits(bytes, idx + 1);
            if end == idx + 1 {
                return Err(self.error("invalid number: missing fraction digits"));
            }
            idx = end;
        }
        if matches!(bytes.get(idx), Some(b'e' | b'E')) {
            idx += 1;
            if matches!(bytes.get(idx), Some(b'+' | b'-')) {
                idx += 1;
            }
            let end = skip_digits(bytes, idx);
            if end == idx {
                return Err(self.error("invalid number: missing exponent digits"));
            }
            idx = end;
        }

        let raw = &self.input[start..idx];
        self.column += idx - start;
        self.position = idx;
        raw.parse::<Number>()
            .map(Token::Number)
            .map_err(|err| self.error(format!("invalid number `{raw}`: {err}")))
    }
}

fn skip_digits(bytes: &[u8], mut idx: usize) -> usize {
    while matches!(bytes.get(idx), Some(b'0'..=b'9')) {
        idx += 1;
    }
    idx
}
