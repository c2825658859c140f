use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use smol_str::SmolStr;

use crate::constants::CUSTOM_CONTENT_KEY;
use crate::fields::{FieldShape, FromFieldSet, RichTextEncoding, RichTextField, ShapeRegistry};
use crate::text::fold_key;
use crate::{Error, Result};

use super::FieldValue;

#[derive(Debug, Clone, PartialEq)]
struct FieldEntry {
    name: SmolStr,
    value: FieldValue,
}

/// Named fields of a component, route or linked item.
///
/// Names are matched case-insensitively: `Title`, `title` and `TITLE` address
/// the same entry. A set is filled once while its owner is decoded and is
/// read-only afterwards.
#[derive(Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: HashMap<SmolStr, FieldEntry>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single unstructured payload under `CustomContent`.
    pub fn custom_content(value: FieldValue) -> Self {
        let mut set = Self::new();
        set.insert(CUSTOM_CONTENT_KEY, value);
        set
    }

    /// Builds a set from an already captured `fields` payload.
    ///
    /// Objects contribute one entry per property. Any other value, `null`
    /// included, is kept whole under `CustomContent`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| (name, FieldValue::new(value)))
                .collect(),
            other => Self::custom_content(FieldValue::new(other)),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<SmolStr>, value: FieldValue) {
        let name = name.into();
        self.entries.insert(fold_key(&name), FieldEntry { name, value });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold_key(name))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(&fold_key(name)).map(|entry| &entry.value)
    }

    /// Fields with the names they were written under, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), &entry.value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }

    pub fn custom(&self) -> Option<&FieldValue> {
        self.get(CUSTOM_CONTENT_KEY)
    }

    /// Reads `name` as `S`; a missing field and an unconvertible one both give `None`.
    pub fn try_read<S: FieldShape>(&self, name: &str) -> Option<S> {
        self.get(name).and_then(S::reify)
    }

    pub fn read<S: FieldShape>(&self, name: &str) -> Result<S> {
        self.try_read(name)
            .ok_or_else(|| Error::field_read(S::SHAPE, name))
    }

    pub fn read_rich_text(&self, name: &str, encoding: RichTextEncoding) -> Option<RichTextField> {
        self.get(name)
            .and_then(|value| RichTextField::reify_with(value, encoding))
    }

    /// Reads `name` through a conversion registered for `T`.
    pub fn try_read_with<T: 'static>(&self, registry: &ShapeRegistry, name: &str) -> Option<T> {
        self.get(name).and_then(|value| registry.reify::<T>(value))
    }

    pub fn read_with<T: 'static>(&self, registry: &ShapeRegistry, name: &str) -> Result<T> {
        self.try_read_with(registry, name).ok_or_else(|| {
            Error::field_read(registry.shape_name::<T>().unwrap_or("unregistered shape"), name)
        })
    }

    /// Deserializes the raw payload of `name` into any serde type.
    pub fn deserialize<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(FieldValue::deserialize)
    }

    /// Populates a caller model; members without a matching field keep their defaults.
    pub fn reify_all<M: FromFieldSet>(&self) -> M {
        M::from_field_set(self)
    }
}

impl<K: Into<SmolStr>> FromIterator<(K, FieldValue)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|left, right| left.0.cmp(right.0));
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
