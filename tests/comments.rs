use jsonc_tree::ErrorKind;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_line_comments_inside_array() {
    let input = "[1, // first\n 2, // second\n 3]";
    assert_eq!(jsonc_tree::to_json(input).unwrap(), json!([1, 2, 3]));
}

#[rstest]
fn test_block_comments_inside_array() {
    let input = "[1, /* one */ 2 /* two */, 3]";
    assert_eq!(jsonc_tree::to_json(input).unwrap(), json!([1, 2, 3]));
}

#[rstest]
fn test_multiline_block_comment() {
    let input = "[\n  /* spans\n     several\n     lines */\n  true\n]";
    assert_eq!(jsonc_tree::to_json(input).unwrap(), json!([true]));
}

#[rstest]
fn test_comments_around_object_keys_and_colons() {
    let input = r#"{
        // before the key
        "a" /* after the key */ : /* after the colon */ 1,
        "b": 2 // after the value
    }"#;
    assert_eq!(jsonc_tree::to_json(input).unwrap(), json!({"a": 1, "b": 2}));
}

#[rstest]
fn test_line_comment_at_end_of_input() {
    // No trailing newline after the comment.
    let input = "[1 // last";
    let err = jsonc_tree::parse_str(input).unwrap_err();
    // The comment swallows the rest, so the array is left open.
    assert_eq!(err.kind, ErrorKind::UnterminatedArray);
}

#[rstest]
#[case("[1, // c\n 2]", "[1, \n 2]")]
#[case("[/* a */ 1]", "[ 1]")]
#[case("{\"k\": /* v */ [1, 2] /* w */}", "{\"k\":  [1, 2] }")]
#[case("[\"/* not a comment */\"]", "[\"/* not a comment */\"]")]
fn test_stripping_comments_is_equivalent(#[case] commented: &str, #[case] stripped: &str) {
    assert_eq!(
        jsonc_tree::to_json(commented).unwrap(),
        jsonc_tree::to_json(stripped).unwrap()
    );
}

#[rstest]
fn test_comment_markers_inside_strings_are_content() {
    let doc = jsonc_tree::parse_str(r#"["a // b", "c /* d */ e"]"#).unwrap();
    let root = doc.root();
    assert_eq!(root.get_index(0).unwrap().as_str(), Some("a // b"));
    assert_eq!(root.get_index(1).unwrap().as_str(), Some("c /* d */ e"));
}

#[rstest]
fn test_leading_comment_before_top_level_value_rejected() {
    // Comments are only recognized inside arrays and objects, so a
    // document that opens with one fails at the first '/'.
    let err = jsonc_tree::parse_str("// banner\n{\"a\": 1}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
    assert_eq!((err.row(), err.col()), (Some(1), Some(1)));
}

#[rstest]
fn test_trailing_comment_after_top_level_value_rejected() {
    let err = jsonc_tree::parse_str("{\"a\": 1} // done").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    assert_eq!((err.row(), err.col()), (Some(1), Some(10)));
}

#[rstest]
fn test_unclosed_block_comment() {
    let err = jsonc_tree::parse_str("[1, /* never closed").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnclosedComment);
    // Reported at the comment opener.
    assert_eq!((err.row(), err.col()), (Some(1), Some(5)));
}

#[rstest]
fn test_lone_slash_is_not_a_comment() {
    let err = jsonc_tree::parse_str("[1, / 2]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedCharacter);
    assert_eq!((err.row(), err.col()), (Some(1), Some(5)));
}

#[rstest]
fn test_positions_survive_multiline_comments() {
    // The stray comma sits on row 2 after the comment closes there.
    let err = jsonc_tree::parse_str("[1, /*\n*/ ,]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyElement);
    assert_eq!((err.row(), err.col()), (Some(2), Some(4)));
}
