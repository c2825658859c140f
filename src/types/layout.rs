use std::collections::HashMap;

use serde::Serialize;

use crate::constants::{CHROME_TYPE, DEFAULT_CHROME_NAME};
use crate::text::guid::new_guid;

use super::FieldSet;

/// Placeholders of a component or route, keyed by placeholder name (case-sensitive).
pub type PlaceholderMap = HashMap<String, Placeholder>;

/// Ordered contents of one placeholder, in rendering order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Placeholder {
    features: Vec<PlaceholderFeature>,
}

impl Placeholder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, feature: PlaceholderFeature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaceholderFeature> {
        self.features.get(index)
    }

    pub fn features(&self) -> &[PlaceholderFeature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlaceholderFeature> {
        self.features.iter()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.features.iter().filter_map(PlaceholderFeature::as_component)
    }

    pub fn chromes(&self) -> impl Iterator<Item = &EditableChrome> {
        self.features.iter().filter_map(PlaceholderFeature::as_chrome)
    }
}

impl From<Vec<PlaceholderFeature>> for Placeholder {
    fn from(features: Vec<PlaceholderFeature>) -> Self {
        Placeholder { features }
    }
}

impl<'p> IntoIterator for &'p Placeholder {
    type Item = &'p PlaceholderFeature;
    type IntoIter = std::slice::Iter<'p, PlaceholderFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl IntoIterator for Placeholder {
    type Item = PlaceholderFeature;
    type IntoIter = std::vec::IntoIter<PlaceholderFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlaceholderFeature {
    Component(Component),
    Chrome(EditableChrome),
}

impl PlaceholderFeature {
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            PlaceholderFeature::Component(component) => Some(component),
            PlaceholderFeature::Chrome(_) => None,
        }
    }

    pub fn as_chrome(&self) -> Option<&EditableChrome> {
        match self {
            PlaceholderFeature::Chrome(chrome) => Some(chrome),
            PlaceholderFeature::Component(_) => None,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, PlaceholderFeature::Component(_))
    }

    pub fn is_chrome(&self) -> bool {
        matches!(self, PlaceholderFeature::Chrome(_))
    }
}

impl From<Component> for PlaceholderFeature {
    fn from(component: Component) -> Self {
        PlaceholderFeature::Component(component)
    }
}

impl From<EditableChrome> for PlaceholderFeature {
    fn from(chrome: EditableChrome) -> Self {
        PlaceholderFeature::Chrome(chrome)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: String,
    pub datasource: String,
    pub parameters: HashMap<String, String>,
    pub fields: FieldSet,
    pub placeholders: PlaceholderMap,
}

impl Component {
    /// An empty component with a freshly generated identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_guid(),
            name: name.into(),
            datasource: String::new(),
            parameters: HashMap::new(),
            fields: FieldSet::new(),
            placeholders: PlaceholderMap::new(),
        }
    }

    pub fn placeholder(&self, key: &str) -> Option<&Placeholder> {
        self.placeholders.get(key)
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

/// Authoring annotation emitted between components for page editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableChrome {
    pub name: String,
    #[serde(rename = "type")]
    pub chrome_type: String,
    pub content: String,
    pub attributes: HashMap<String, String>,
}

impl EditableChrome {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `chrometype` attribute, e.g. `placeholder`, `rendering` or `field`.
    pub fn chrome_kind(&self) -> Option<&str> {
        self.attribute("chrometype")
    }
}

impl Default for EditableChrome {
    fn default() -> Self {
        Self {
            name: DEFAULT_CHROME_NAME.to_string(),
            chrome_type: CHROME_TYPE.to_string(),
            content: String::new(),
            attributes: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[rstest::rstest]
    fn placeholder_filters_by_variant() {
        let placeholder = Placeholder::from(vec![
            Component::new("Hero").into(),
            EditableChrome::default().into(),
            Component::new("Footer").into(),
        ]);
        assert_eq!(placeholder.len(), 3);
        let names: Vec<_> = placeholder.components().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Hero", "Footer"]);
        assert_eq!(placeholder.chromes().count(), 1);
        assert!(placeholder.get(1).unwrap().is_chrome());
    }

    #[rstest::rstest]
    fn new_components_get_distinct_ids() {
        let first = Component::new("A");
        let second = Component::new("A");
        assert_ne!(first.id, second.id);
        assert!(first.datasource.is_empty());
    }

    #[rstest::rstest]
    fn chrome_serializes_with_kind_tag() {
        let mut chrome = EditableChrome::default();
        chrome.content = "x".to_string();
        let json = serde_json::to_value(PlaceholderFeature::from(chrome)).unwrap();
        assert_eq!(
            json,
            json!({"kind": "chrome", "name": "code", "type": "text/sitecore", "content": "x", "attributes": {}})
        );
    }
}
