use serde_json::Value;
use tracing::debug;

use super::feature::{buffer_object, Scratch};
use super::scanner::{Cursor, Token};
use super::value::{for_each_entry, read_value, read_value_from};
use crate::constants::keys;
use crate::options::ParseOptions;
use crate::types::{Context, LayoutResponse, Route};
use crate::Result;

/// Decodes a route object; the next token must be `{`.
pub fn parse_route(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<Route> {
    cursor.set_max_depth(options.max_depth);
    match cursor.next_token()? {
        Token::LeftBrace => parse_route_from(cursor, options),
        other => Err(cursor.unexpected("object start", &other)),
    }
}

pub(crate) fn parse_route_from(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<Route> {
    let scratch = buffer_object(cursor, options)?;
    Ok(build_route(scratch))
}

fn build_route(mut scratch: Scratch) -> Route {
    let mut text = |name: &str| scratch.take_text(name).unwrap_or_default();
    let name = text(keys::NAME);
    let display_name = text(keys::DISPLAY_NAME);
    let database_name = text(keys::DATABASE_NAME);
    let device_id = text(keys::DEVICE_ID);
    let item_id = text(keys::ITEM_ID);
    let item_language = text(keys::ITEM_LANGUAGE);
    let item_version = text(keys::ITEM_VERSION).trim().parse::<i64>().ok();
    let layout_id = text(keys::LAYOUT_ID);
    let template_id = text(keys::TEMPLATE_ID);
    let template_name = text(keys::TEMPLATE_NAME);
    Route {
        name,
        display_name,
        database_name,
        device_id,
        item_id,
        item_language,
        item_version,
        layout_id,
        template_id,
        template_name,
        fields: scratch.take_fields(),
        placeholders: scratch.take_placeholders(),
    }
}

/// Decodes a layout-service response body: `{"sitecore": {"context": …, "route": …}}`.
///
/// Properties outside `sitecore` are skipped; a missing `sitecore` object is an error.
pub fn parse_response(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<LayoutResponse> {
    cursor.set_max_depth(options.max_depth);
    match cursor.next_token()? {
        Token::LeftBrace => {}
        other => return Err(cursor.unexpected("object start", &other)),
    }
    let mut response = None;
    for_each_entry(cursor, |cursor, name| {
        if name.eq_ignore_ascii_case(keys::SITECORE) {
            response = Some(parse_sitecore(cursor, options)?);
        } else {
            debug!(property = %name, "skipping response property");
            read_value(cursor)?;
        }
        Ok(())
    })?;
    response.ok_or_else(|| cursor.error("missing `sitecore` property"))
}

fn parse_sitecore(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<LayoutResponse> {
    match cursor.next_token()? {
        Token::LeftBrace => {}
        other => return Err(cursor.unexpected("object start", &other)),
    }
    let mut response = LayoutResponse::default();
    for_each_entry(cursor, |cursor, name| {
        if name.eq_ignore_ascii_case(keys::CONTEXT) {
            response.context = match cursor.next_token()? {
                Token::Null => Context::default(),
                Token::LeftBrace => match read_value_from(cursor, Token::LeftBrace)? {
                    Value::Object(map) => Context::from_map(map),
                    _ => Context::default(),
                },
                other => return Err(cursor.unexpected("object start", &other)),
            };
        } else if name.eq_ignore_ascii_case(keys::ROUTE) {
            response.route = match cursor.next_token()? {
                Token::Null => None,
                Token::LeftBrace => Some(parse_route_from(cursor, options)?),
                other => return Err(cursor.unexpected("object start", &other)),
            };
        } else {
            debug!(property = %name, "skipping sitecore property");
            read_value(cursor)?;
        }
        Ok(())
    })?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fields::TextField;
    use crate::types::PageState;
    use crate::ErrorKind;

    const RESPONSE: &str = r#"{
        "sitecore": {
            "context": {"pageEditing": false, "site": {"name": "website"}, "pageState": "normal", "language": "en"},
            "route": {
                "name": "home",
                "displayName": "Home",
                "fields": {"pageTitle": {"value": "Welcome"}},
                "databaseName": "web",
                "deviceId": "fe5d7fdf",
                "itemId": "110d559f",
                "itemLanguage": "en",
                "itemVersion": 1,
                "layoutId": "14030e9f",
                "templateId": "76036f5e",
                "templateName": "App Route",
                "placeholders": {
                    "main": [{"uid": "2c4a53cc", "componentName": "ContentBlock", "dataSource": "{585596CA}", "fields": {"heading": {"value": "Hello"}}}]
                }
            }
        }
    }"#;

    #[rstest::rstest]
    fn decodes_full_response() {
        let response = parse_response(&mut Cursor::new(RESPONSE), &ParseOptions::default()).unwrap();
        assert_eq!(response.context.language, "en");
        assert_eq!(response.context.page_state, PageState::Normal);
        let route = response.route.unwrap();
        assert_eq!(route.name, "home");
        assert_eq!(route.display_name, "Home");
        assert_eq!(route.item_version, Some(1));
        assert_eq!(route.template_name, "App Route");
        assert_eq!(route.fields.read::<TextField>("PageTitle").unwrap().value, "Welcome");
        let block = route.placeholder("main").unwrap().components().next().unwrap();
        assert_eq!(block.name, "ContentBlock");
        assert_eq!(block.id, "2c4a53cc");
        assert_eq!(block.datasource, "{585596CA}");
    }

    #[rstest::rstest]
    fn route_may_be_null() {
        let input = r#"{"sitecore": {"context": {"pageEditing": true, "extra": [1]}, "route": null}}"#;
        let response = parse_response(&mut Cursor::new(input), &ParseOptions::default()).unwrap();
        assert!(response.route.is_none());
        assert!(response.context.page_editing);
        assert_eq!(response.context.extra["extra"], json!([1]));
    }

    #[rstest::rstest]
    fn unversioned_routes() {
        let route = parse_route(
            &mut Cursor::new(r#"{"name": "x", "itemVersion": "latest"}"#),
            &ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(route.item_version, None);
        assert!(route.placeholders.is_empty());
    }

    #[rstest::rstest]
    #[case(r#"{"other": 1}"#, "missing `sitecore` property")]
    #[case(r#"{"sitecore": []}"#, "expected object start")]
    #[case(r#"{"sitecore": {"route": 3}}"#, "expected object start")]
    #[case(r#"[]"#, "expected object start")]
    fn rejects_malformed_responses(#[case] input: &str, #[case] message: &str) {
        let err = parse_response(&mut Cursor::new(input), &ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLayout);
        assert!(err.to_string().contains(message), "{err}");
    }
}
