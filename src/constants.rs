pub const DEFAULT_MAX_DEPTH: usize = 256;

pub const CHROME_TYPE: &str = "text/sitecore";

pub const DEFAULT_CHROME_NAME: &str = "code";

pub const DISCONNECTED_DATASOURCE: &str = "available-in-connected-mode";

/// Field name that holds a `fields` payload which was not a name/value object.
pub const CUSTOM_CONTENT_KEY: &str = "CustomContent";

pub(crate) const SCRATCH_FIELDS: &str = "Fields";
pub(crate) const SCRATCH_PLACEHOLDERS: &str = "Placeholders";

pub(crate) mod keys {
    pub const FIELDS: &str = "fields";
    pub const PLACEHOLDERS: &str = "placeholders";
    pub const PARAMS: &str = "params";
    pub const ATTRIBUTES: &str = "attributes";
    pub const ID: &str = "id";
    pub const UID: &str = "uid";
    pub const COMPONENT_NAME: &str = "componentName";
    pub const NAME: &str = "name";
    pub const DATASOURCE: &str = "dataSource";
    pub const TYPE: &str = "type";
    pub const CONTENTS: &str = "contents";

    pub const DISPLAY_NAME: &str = "displayName";
    pub const DATABASE_NAME: &str = "databaseName";
    pub const DEVICE_ID: &str = "deviceId";
    pub const ITEM_ID: &str = "itemId";
    pub const ITEM_LANGUAGE: &str = "itemLanguage";
    pub const ITEM_VERSION: &str = "itemVersion";
    pub const LAYOUT_ID: &str = "layoutId";
    pub const TEMPLATE_ID: &str = "templateId";
    pub const TEMPLATE_NAME: &str = "templateName";

    pub const SITECORE: &str = "sitecore";
    pub const CONTEXT: &str = "context";
    pub const ROUTE: &str = "route";
    pub const PAGE_EDITING: &str = "pageEditing";
    pub const SITE: &str = "site";
    pub const PAGE_STATE: &str = "pageState";
    pub const LANGUAGE: &str = "language";
}

/// Properties captured as plain strings while buffering a feature or route object.
pub(crate) const STRING_PROPERTIES: &[&str] = &[
    keys::ID,
    keys::UID,
    keys::COMPONENT_NAME,
    keys::NAME,
    keys::DATASOURCE,
    keys::TYPE,
    keys::CONTENTS,
    keys::DISPLAY_NAME,
    keys::DATABASE_NAME,
    keys::DEVICE_ID,
    keys::ITEM_ID,
    keys::ITEM_LANGUAGE,
    keys::ITEM_VERSION,
    keys::LAYOUT_ID,
    keys::TEMPLATE_ID,
    keys::TEMPLATE_NAME,
];

/// Canonical spelling of a recognised string property, matched ignoring ASCII case.
#[inline]
pub(crate) fn string_property(name: &str) -> Option<&'static str> {
    STRING_PROPERTIES
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
}
