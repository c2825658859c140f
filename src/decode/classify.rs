use tracing::{debug, trace};

use super::feature::Scratch;
use crate::constants::{keys, CHROME_TYPE, DEFAULT_CHROME_NAME};
use crate::options::ParseOptions;
use crate::text::guid::new_guid;
use crate::text::is_blank;
use crate::types::{Component, EditableChrome, PlaceholderFeature};

/// Decides what a buffered feature object is and builds it.
///
/// An object whose `type` equals the chrome marker (`text/sitecore` unless
/// configured otherwise, ignoring case and surrounding blanks) is editing
/// chrome; every other object is a component.
pub fn classify(mut scratch: Scratch, options: &ParseOptions) -> PlaceholderFeature {
    if is_chrome(&scratch, options) {
        let chrome = EditableChrome {
            name: scratch
                .take_text(keys::NAME)
                .unwrap_or_else(|| DEFAULT_CHROME_NAME.to_string()),
            chrome_type: scratch
                .take_text(keys::TYPE)
                .unwrap_or_else(|| CHROME_TYPE.to_string()),
            content: scratch.take_text(keys::CONTENTS).unwrap_or_default(),
            attributes: scratch.take_pairs(keys::ATTRIBUTES),
        };
        trace!(kind = ?chrome.chrome_kind(), "classified editing chrome");
        return PlaceholderFeature::Chrome(chrome);
    }

    let id = match [keys::ID, keys::UID]
        .into_iter()
        .filter_map(|key| scratch.take_text(key))
        .find(|id| !is_blank(id))
    {
        Some(id) => id,
        None => {
            let id = new_guid();
            debug!(%id, "component has no id, generated one");
            id
        }
    };
    let name = scratch
        .take_text(keys::COMPONENT_NAME)
        .or_else(|| scratch.take_text(keys::NAME))
        .unwrap_or_default();
    let datasource = scratch
        .take_text(keys::DATASOURCE)
        .unwrap_or_else(|| options.datasource_mode.default_datasource().to_string());
    PlaceholderFeature::Component(Component {
        id,
        name,
        datasource,
        parameters: scratch.take_pairs(keys::PARAMS),
        fields: scratch.take_fields(),
        placeholders: scratch.take_placeholders(),
    })
}

fn is_chrome(scratch: &Scratch, options: &ParseOptions) -> bool {
    scratch
        .text(keys::TYPE)
        .is_some_and(|kind| kind.trim().eq_ignore_ascii_case(&options.chrome_type))
}
