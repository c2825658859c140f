pub mod field_set;
pub mod field_value;
pub mod layout;
pub mod route;

pub use field_set::FieldSet;
pub use field_value::{FieldKind, FieldValue};
pub use layout::{Component, EditableChrome, Placeholder, PlaceholderFeature, PlaceholderMap};
pub use route::{Context, LayoutResponse, PageState, Route, Site};
