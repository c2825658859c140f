//! Single-pass decoding of layout documents.
//!
//! Everything here works on a forward-only [`Cursor`]: feature objects are
//! buffered property by property ([`buffer_object`]) and only classified
//! once their closing brace has been read ([`classify`]). Placeholder and
//! field parsing recurse into each other through the same cursor.

mod classify;
mod feature;
mod fields;
mod placeholder;
mod response;
mod scanner;
mod value;

pub use classify::classify;
pub use feature::{buffer_object, parse_string_pairs, Scratch, ScratchValue};
pub use fields::parse_fields;
pub use placeholder::{parse_placeholder, parse_placeholder_map};
pub use response::{parse_response, parse_route};
pub use scanner::{Cursor, Token};
pub use value::{read_value, read_value_from};

use crate::options::ParseOptions;
use crate::types::{LayoutResponse, Placeholder, PlaceholderMap, Route};
use crate::Result;

pub fn response_from_str(input: &str, options: &ParseOptions) -> Result<LayoutResponse> {
    decode_document(input, options, parse_response)
}

pub fn route_from_str(input: &str, options: &ParseOptions) -> Result<Route> {
    decode_document(input, options, parse_route)
}

pub fn placeholder_from_str(input: &str, options: &ParseOptions) -> Result<Placeholder> {
    decode_document(input, options, parse_placeholder)
}

pub fn placeholder_map_from_str(input: &str, options: &ParseOptions) -> Result<PlaceholderMap> {
    decode_document(input, options, parse_placeholder_map)
}

fn decode_document<'a, T, F>(input: &'a str, options: &ParseOptions, parse: F) -> Result<T>
where
    F: FnOnce(&mut Cursor<'a>, &ParseOptions) -> Result<T>,
{
    let mut cursor = Cursor::with_max_depth(input, options.max_depth);
    let decoded = parse(&mut cursor, options)?;
    if options.strict {
        cursor.expect_end()?;
    }
    Ok(decoded)
}
