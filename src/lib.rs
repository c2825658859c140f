pub mod constants;
pub mod decode;
pub mod error;
pub mod fields;
pub mod num;
pub mod options;
pub mod text;
pub mod types;

use std::io::Read;

pub use crate::constants::{
    CHROME_TYPE, CUSTOM_CONTENT_KEY, DEFAULT_CHROME_NAME, DEFAULT_MAX_DEPTH,
    DISCONNECTED_DATASOURCE,
};
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::fields::{FieldShape, FromFieldSet, ShapeRegistry};
pub use crate::options::{DatasourceMode, ParseOptions};
pub use crate::types::{
    Component, Context, EditableChrome, FieldKind, FieldSet, FieldValue, LayoutResponse,
    PageState, Placeholder, PlaceholderFeature, PlaceholderMap, Route, Site,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Decodes a complete layout-service response body.
pub fn from_str(input: &str) -> Result<LayoutResponse> {
    from_str_with_options(input, &ParseOptions::default())
}

pub fn from_str_with_options(input: &str, options: &ParseOptions) -> Result<LayoutResponse> {
    decode::response_from_str(input, options)
}

pub fn from_slice(input: &[u8]) -> Result<LayoutResponse> {
    from_slice_with_options(input, &ParseOptions::default())
}

pub fn from_slice_with_options(input: &[u8], options: &ParseOptions) -> Result<LayoutResponse> {
    from_str_with_options(utf8(input)?, options)
}

pub fn from_reader<R: Read>(reader: R) -> Result<LayoutResponse> {
    from_reader_with_options(reader, &ParseOptions::default())
}

pub fn from_reader_with_options<R: Read>(
    mut reader: R,
    options: &ParseOptions,
) -> Result<LayoutResponse> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|err| Error::malformed(format!("read failed: {err}"), Location::default()))?;
    from_slice_with_options(&buf, options)
}

pub fn route_from_str(input: &str) -> Result<Route> {
    route_from_str_with_options(input, &ParseOptions::default())
}

pub fn route_from_str_with_options(input: &str, options: &ParseOptions) -> Result<Route> {
    decode::route_from_str(input, options)
}

/// Decodes a bare placeholder array such as `[{"componentName": "Hero"}]`.
pub fn placeholder_from_str(input: &str) -> Result<Placeholder> {
    placeholder_from_str_with_options(input, &ParseOptions::default())
}

pub fn placeholder_from_str_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<Placeholder> {
    decode::placeholder_from_str(input, options)
}

pub fn placeholder_map_from_str(input: &str) -> Result<PlaceholderMap> {
    placeholder_map_from_str_with_options(input, &ParseOptions::default())
}

pub fn placeholder_map_from_str_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<PlaceholderMap> {
    decode::placeholder_map_from_str(input, options)
}

fn utf8(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input).map_err(|err| {
        let valid = &input[..err.valid_up_to()];
        let line = valid.iter().filter(|byte| **byte == b'\n').count() + 1;
        let line_start = valid
            .iter()
            .rposition(|byte| *byte == b'\n')
            .map_or(0, |idx| idx + 1);
        let column = String::from_utf8_lossy(&valid[line_start..]).chars().count() + 1;
        Error::malformed(
            format!("invalid utf-8: {err}"),
            Location {
                offset: err.valid_up_to(),
                line,
                column,
            },
        )
    })
}
