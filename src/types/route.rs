use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::keys;
use crate::text::scalar_text;

use super::field_value::property;
use super::{FieldSet, Placeholder, PlaceholderMap};

/// The requested page: fields and placeholders like a component, plus item metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub name: String,
    pub display_name: String,
    pub database_name: String,
    pub device_id: String,
    pub item_id: String,
    pub item_language: String,
    pub item_version: Option<i64>,
    pub layout_id: String,
    pub template_id: String,
    pub template_name: String,
    pub fields: FieldSet,
    pub placeholders: PlaceholderMap,
}

impl Route {
    pub fn placeholder(&self, key: &str) -> Option<&Placeholder> {
        self.placeholders.get(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageState {
    #[default]
    Normal,
    Edit,
    Preview,
}

impl PageState {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(PageState::Normal),
            "edit" => Some(PageState::Edit),
            "preview" => Some(PageState::Preview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Site {
    pub name: String,
}

/// Request-level context sent alongside the route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub page_editing: bool,
    pub site: Option<Site>,
    pub page_state: PageState,
    pub language: String,
    /// Every other context property, untouched.
    pub extra: Map<String, Value>,
}

impl Context {
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let page_editing = take(&mut map, keys::PAGE_EDITING)
            .map(|value| match value {
                Value::Bool(flag) => flag,
                Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
                _ => false,
            })
            .unwrap_or_default();
        let site = take(&mut map, keys::SITE).and_then(|value| match value {
            Value::Object(_) => Some(Site {
                name: property(&value, keys::NAME)
                    .and_then(scalar_text)
                    .unwrap_or_default(),
            }),
            _ => None,
        });
        let page_state = take(&mut map, keys::PAGE_STATE)
            .and_then(|value| value.as_str().and_then(PageState::parse))
            .unwrap_or_default();
        let language = take(&mut map, keys::LANGUAGE)
            .and_then(|value| scalar_text(&value))
            .unwrap_or_default();
        Self {
            page_editing,
            site,
            page_state,
            language,
            extra: map,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.page_editing || self.page_state == PageState::Edit
    }
}

fn take(map: &mut Map<String, Value>, name: &str) -> Option<Value> {
    if let Some(value) = map.remove(name) {
        return Some(value);
    }
    let key = map
        .keys()
        .find(|key| key.eq_ignore_ascii_case(name))
        .cloned()?;
    map.remove(&key)
}

/// A decoded layout-service response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResponse {
    pub context: Context,
    pub route: Option<Route>,
}
