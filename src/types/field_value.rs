use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::fields::FieldShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

/// One field's JSON payload, kept exactly as it appeared in the layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldValue(Value);

impl FieldValue {
    pub fn new(value: Value) -> Self {
        FieldValue(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }

    pub fn kind(&self) -> FieldKind {
        match &self.0 {
            Value::Null => FieldKind::Null,
            Value::Bool(_) => FieldKind::Bool,
            Value::Number(_) => FieldKind::Number,
            Value::String(_) => FieldKind::String,
            Value::Array(_) => FieldKind::Array,
            Value::Object(_) => FieldKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Object property lookup ignoring ASCII case; exact matches win.
    pub fn property(&self, name: &str) -> Option<&Value> {
        property(&self.0, name)
    }

    /// The payload of a `{"value": …}` wrapper, or the whole value when unwrapped.
    pub fn inner(&self) -> &Value {
        self.property("value").unwrap_or(&self.0)
    }

    /// Editing markup attached to the field, when the producer emitted it.
    pub fn editable(&self) -> Option<String> {
        self.property("editable")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn reify<S: FieldShape>(&self) -> Option<S> {
        S::reify(self)
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Option<T> {
        self.try_deserialize().ok()
    }

    pub fn try_deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue(value)
    }
}

pub(crate) fn property<'v>(value: &'v Value, name: &str) -> Option<&'v Value> {
    let map = value.as_object()?;
    map.get(name).or_else(|| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}
