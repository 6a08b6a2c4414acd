//! Unit tests for the bookmark composer: canonical block ordering and the
//! Notion wire shape of the emitted JSON.

use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;

use notemark::services::composer::compose_entry;
use notemark::types::bookmark::BookmarkDraft;

fn at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
}

#[test]
fn test_minimal_compose_is_separator_timestamp_link() {
    let blocks = compose_entry(&BookmarkDraft::new("https://example.com"), at());

    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].is_separator());
    assert_eq!(blocks[1].as_text(), Some("2024-03-15T09:00:00Z"));
    assert_eq!(blocks[2].as_bookmark_url(), Some("https://example.com"));
}

#[test]
fn test_full_compose_is_five_blocks_in_canonical_order() {
    let draft = BookmarkDraft::new("https://example.com")
        .with_title("T")
        .with_notes("N");
    let blocks = compose_entry(&draft, at());

    assert_eq!(blocks.len(), 5);
    assert!(blocks[0].is_separator());
    assert!(blocks[1].as_text().is_some());
    assert_eq!(blocks[2].as_text(), Some("T"));
    assert_eq!(blocks[3].as_bookmark_url(), Some("https://example.com"));
    assert_eq!(blocks[4].as_text(), Some("N"));
}

/// The link block always sits immediately after the optional title and
/// before the optional notes, whichever fields are present.
#[rstest]
#[case(None, None, 3, 2)]
#[case(Some("T"), None, 4, 3)]
#[case(None, Some("N"), 4, 2)]
#[case(Some("T"), Some("N"), 5, 3)]
fn test_link_position_per_field_combination(
    #[case] title: Option<&str>,
    #[case] notes: Option<&str>,
    #[case] expected_len: usize,
    #[case] link_index: usize,
) {
    let mut draft = BookmarkDraft::new("https://example.com/x");
    draft.title = title.map(str::to_string);
    draft.notes = notes.map(str::to_string);

    let blocks = compose_entry(&draft, at());
    assert_eq!(blocks.len(), expected_len);
    assert_eq!(blocks[link_index].as_bookmark_url(), Some("https://example.com/x"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n ")]
fn test_blank_fields_count_as_absent(#[case] blank: &str) {
    let draft = BookmarkDraft::new("https://example.com")
        .with_title(blank)
        .with_notes(blank);
    assert_eq!(compose_entry(&draft, at()).len(), 3);
}

#[test]
fn test_blocks_serialize_to_notion_wire_shape() {
    let draft = BookmarkDraft::new("https://example.com").with_title("Docs");
    let blocks = compose_entry(&draft, at());

    let wire = serde_json::to_value(&blocks).unwrap();
    assert_eq!(
        wire[0],
        json!({"type": "paragraph", "paragraph": {"rich_text": []}})
    );
    assert_eq!(
        wire[2],
        json!({
            "type": "paragraph",
            "paragraph": {"rich_text": [{"type": "text", "text": {"content": "Docs"}}]}
        })
    );
    assert_eq!(
        wire[3],
        json!({"type": "bookmark", "bookmark": {"url": "https://example.com"}})
    );
}
