use rstest::rstest;
use sitecore_layout::{
    from_str, placeholder_from_str, placeholder_from_str_with_options, placeholder_map_from_str,
    ErrorKind, ParseOptions,
};

#[rstest]
#[case::object_instead_of_array("{}", "expected array start, found object start")]
#[case::scalar_feature("[\"Hero\"]", "expected object start")]
#[case::unterminated_array("[{\"componentName\": \"Hero\"}", "unterminated array")]
#[case::unterminated_feature("[{\"componentName\": \"Hero\"", "unterminated object")]
#[case::truncated_fields("[{\"fields\": {\"Title\": {\"value\": \"Hi\"}}", "unterminated object")]
#[case::placeholders_array("[{\"placeholders\": []}]", "expected object start, found array start")]
#[case::placeholder_value("[{\"placeholders\": {\"main\": {}}}]", "expected array start")]
#[case::params_scalar("[{\"params\": 4}]", "expected object start")]
#[case::missing_colon("[{\"id\" \"A\"}]", "expected `:`")]
#[case::bad_literal("[{\"id\": nope}]", "invalid literal")]
#[case::empty("", "expected array start, found end of input")]
fn structural_errors_abort_the_parse(#[case] input: &str, #[case] message: &str) {
    let err = placeholder_from_str(input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLayout);
    assert!(err.to_string().contains(message), "{err}");
}

#[rstest]
fn fields_true_where_placeholders_are_expected() {
    let err = placeholder_map_from_str(r#"{"fields": true}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLayout);
    assert!(err.to_string().contains("expected array start"), "{err}");
}

#[rstest]
fn errors_point_at_the_offending_token() {
    let err = placeholder_from_str("[\n  {\"componentName\": \"Hero\"},\n  42\n]").unwrap_err();
    let location = err.location().unwrap();
    assert_eq!((location.line, location.column), (3, 3));
}

#[rstest]
fn depth_limit_is_an_error_not_a_crash() {
    let input = format!("{}{}", "[{\"placeholders\": {\"p\": ".repeat(400), "[]");
    let err = placeholder_from_str(&input).unwrap_err();
    assert!(err.to_string().contains("nesting depth exceeds the limit of 256"), "{err}");

    let shallow = ParseOptions::new().with_max_depth(2);
    let err = placeholder_from_str_with_options(r#"[{"fields": {"a": 1}}]"#, &shallow).unwrap_err();
    assert!(err.to_string().contains("limit of 2"), "{err}");
}

#[rstest]
#[case("{}", "missing `sitecore` property")]
#[case("[]", "expected object start")]
#[case(r#"{"sitecore": {"route": []}}"#, "expected object start")]
#[case(r#"{"sitecore": {"context": null, "route": null}} {}"#, "unexpected trailing content")]
fn response_errors(#[case] input: &str, #[case] message: &str) {
    let err = from_str(input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLayout);
    assert!(err.to_string().contains(message), "{err}");
}

#[rstest]
fn option_depth_limit_reaches_cursor_level_parsers() {
    use sitecore_layout::decode::{parse_placeholder, Cursor};

    let options = ParseOptions::new().with_max_depth(3);
    let input = r#"[{"placeholders": {"p": [{}]}}]"#;
    let err = parse_placeholder(&mut Cursor::new(input), &options).unwrap_err();
    assert!(err.to_string().contains("limit of 3"), "{err}");
}
