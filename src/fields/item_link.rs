use serde_json::Value;

use crate::types::field_value::property;
use crate::types::{FieldSet, FieldValue};

use super::{member, FieldShape};

/// Reference to another content item, carrying that item's own fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemLinkField {
    pub id: String,
    pub url: String,
    pub name: String,
    pub display_name: String,
    pub fields: FieldSet,
}

impl ItemLinkField {
    fn from_object(object: &Value) -> Option<Self> {
        if !object.is_object() {
            return None;
        }
        let fields = property(object, "fields")
            .filter(|fields| !fields.is_null())
            .cloned()
            .map(FieldSet::from_json)
            .unwrap_or_default();
        Some(ItemLinkField {
            id: member(object, "id"),
            url: member(object, "url"),
            name: member(object, "name"),
            display_name: member(object, "displayName"),
            fields,
        })
    }
}

impl FieldShape for ItemLinkField {
    const SHAPE: &'static str = "item link";

    fn reify(value: &FieldValue) -> Option<Self> {
        Self::from_object(value.inner())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemLinkListField {
    pub items: Vec<ItemLinkField>,
}

impl ItemLinkListField {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemLinkField> {
        self.items.iter()
    }
}

impl FieldShape for ItemLinkListField {
    const SHAPE: &'static str = "item link list";

    fn reify(value: &FieldValue) -> Option<Self> {
        match value.inner() {
            Value::Array(items) => items
                .iter()
                .map(ItemLinkField::from_object)
                .collect::<Option<Vec<_>>>()
                .map(|items| ItemLinkListField { items }),
            Value::Null => Some(ItemLinkListField::default()),
            _ => None,
        }
    }
}
