use serde_json::Value;

use crate::types::FieldValue;

use super::{member, optional_member, FieldShape};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub width: String,
    pub height: String,
    pub class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageField {
    pub value: Image,
    pub editable: Option<String>,
}

impl FieldShape for ImageField {
    const SHAPE: &'static str = "image";

    fn reify(value: &FieldValue) -> Option<Self> {
        let object = record(value.inner())?;
        Some(ImageField {
            value: Image {
                src: member(object, "src"),
                alt: member(object, "alt"),
                title: member(object, "title"),
                width: member(object, "width"),
                height: member(object, "height"),
                class: member(object, "class"),
            },
            editable: value.editable(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub src: String,
    pub name: String,
    pub display_name: String,
    pub title: String,
    pub description: String,
    pub extension: String,
    pub mime_type: String,
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileField {
    pub value: File,
}

impl FieldShape for FileField {
    const SHAPE: &'static str = "file";

    fn reify(value: &FieldValue) -> Option<Self> {
        let object = record(value.inner())?;
        Some(FileField {
            value: File {
                src: member(object, "src"),
                name: member(object, "name"),
                display_name: member(object, "displayName"),
                title: member(object, "title"),
                description: member(object, "description"),
                extension: member(object, "extension"),
                mime_type: member(object, "mimeType"),
                size: member(object, "size"),
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperLink {
    pub href: String,
    pub text: String,
    pub target: String,
    pub title: String,
    pub link_type: String,
    pub url: String,
    pub anchor: String,
    pub query_string: String,
    pub id: String,
    pub class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperLinkField {
    pub value: HyperLink,
    pub editable_first_part: Option<String>,
    pub editable_last_part: Option<String>,
}

impl FieldShape for HyperLinkField {
    const SHAPE: &'static str = "hyperlink";

    fn reify(value: &FieldValue) -> Option<Self> {
        let link = match value.inner() {
            Value::String(href) => HyperLink {
                href: href.clone(),
                ..HyperLink::default()
            },
            inner => {
                let object = record(inner)?;
                HyperLink {
                    href: member(object, "href"),
                    text: member(object, "text"),
                    target: member(object, "target"),
                    title: member(object, "title"),
                    link_type: member(object, "linktype"),
                    url: member(object, "url"),
                    anchor: member(object, "anchor"),
                    query_string: member(object, "querystring"),
                    id: member(object, "id"),
                    class: member(object, "class"),
                }
            }
        };
        Some(HyperLinkField {
            value: link,
            editable_first_part: optional_member(value, "editableFirstPart"),
            editable_last_part: optional_member(value, "editableLastPart"),
        })
    }
}

// Records are objects; `null` stands for an empty record.
fn record(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) | Value::Null => Some(value),
        _ => None,
    }
}
