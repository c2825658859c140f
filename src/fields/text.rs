use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::text::scalar_text;
use crate::types::FieldValue;

use super::FieldShape;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub editable: Option<String>,
}

impl FieldShape for TextField {
    const SHAPE: &'static str = "text";

    fn reify(value: &FieldValue) -> Option<Self> {
        Some(TextField {
            value: text_of(value.inner())?,
            editable: value.editable(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RichTextEncoding {
    #[default]
    Plain,
    /// Markup arrives percent-encoded and is decoded on read.
    Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichTextField {
    pub value: String,
    pub editable: Option<String>,
}

impl RichTextField {
    pub fn reify_with(value: &FieldValue, encoding: RichTextEncoding) -> Option<Self> {
        let raw = text_of(value.inner())?;
        let markup = match encoding {
            RichTextEncoding::Plain => raw,
            RichTextEncoding::Percent => percent_decode_str(&raw).decode_utf8().ok()?.into_owned(),
        };
        Some(RichTextField {
            value: markup,
            editable: value.editable(),
        })
    }
}

impl FieldShape for RichTextField {
    const SHAPE: &'static str = "rich text";

    fn reify(value: &FieldValue) -> Option<Self> {
        Self::reify_with(value, RichTextEncoding::Plain)
    }
}

// `null` reads as empty text; containers are not text.
fn text_of(value: &Value) -> Option<String> {
    scalar_text(value)
}
