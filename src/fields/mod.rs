//! Field shapes and the conversions that produce them.
//!
//! A [`FieldValue`] stays untyped until a caller asks for a shape. Every
//! built-in shape accepts both the wrapped producer form (`{"value": …}`)
//! and the bare payload, and reports `None` when the payload cannot be
//! converted. [`ShapeRegistry`] maps caller types to conversions at runtime
//! and [`FromFieldSet`] (usually generated by [`field_model!`](crate::field_model))
//! fills a whole caller model in one call.

pub mod date;
pub mod item_link;
pub mod media;
pub mod model;
pub mod number;
pub mod registry;
pub mod text;

use serde_json::Value;

use crate::text::scalar_text;
use crate::types::field_value::property;
use crate::types::FieldValue;

pub use date::DateField;
pub use item_link::{ItemLinkField, ItemLinkListField};
pub use media::{File, FileField, HyperLink, HyperLinkField, Image, ImageField};
pub use model::FromFieldSet;
pub use number::{CheckboxField, NumberField};
pub use registry::ShapeRegistry;
pub use text::{RichTextEncoding, RichTextField, TextField};

/// A strongly typed reading of a field.
pub trait FieldShape: Sized {
    /// Name reported in [`Error::FieldRead`](crate::Error::FieldRead).
    const SHAPE: &'static str;

    fn reify(value: &FieldValue) -> Option<Self>;
}

impl FieldShape for FieldValue {
    const SHAPE: &'static str = "raw value";

    fn reify(value: &FieldValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// String property of a nested record; missing or non-scalar members read as empty.
pub(crate) fn member(object: &Value, name: &str) -> String {
    property(object, name)
        .and_then(scalar_text)
        .unwrap_or_default()
}

pub(crate) fn optional_member(value: &FieldValue, name: &str) -> Option<String> {
    value
        .property(name)
        .and_then(Value::as_str)
        .map(str::to_string)
}
