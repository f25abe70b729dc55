//! Model-level unit tests for draft normalization.

use super::draft::{SnippetDraft, TagInput};
use super::snippet::SubSnippet;

#[test]
fn normalize_fills_every_field_from_empty_input() {
    let snippet = SnippetDraft::default().normalize();

    assert!(snippet.id.is_empty());
    assert!(snippet.title.is_empty());
    assert_eq!(snippet.categories, vec!["Uncategorized".to_string()]);
    assert_eq!(snippet.category, "Uncategorized");
    assert!(snippet.tags.is_empty());
    assert!(!snippet.is_favorite);
    assert!(!snippet.created_at.is_empty());
    assert!(!snippet.updated_at.is_empty());
}

#[test]
fn normalize_never_leaves_categories_empty() {
    let from_empty_list = SnippetDraft {
        categories: Some(vec![]),
        ..Default::default()
    }
    .normalize();
    assert_eq!(from_empty_list.categories, vec!["Uncategorized".to_string()]);

    let from_blank_legacy = SnippetDraft {
        category: Some("   ".into()),
        ..Default::default()
    }
    .normalize();
    assert_eq!(from_blank_legacy.categories, vec!["Uncategorized".to_string()]);

    let from_blank_entries = SnippetDraft {
        categories: Some(vec!["".into(), "  ".into()]),
        category: Some("CMD".into()),
        ..Default::default()
    }
    .normalize();
    assert_eq!(from_blank_entries.categories, vec!["CMD".to_string()]);
    assert_eq!(from_blank_entries.category, "CMD");
}

#[test]
fn normalize_dedups_tags_case_insensitively_keeping_first_casing() {
    let snippet = SnippetDraft {
        tags: Some(TagInput::Raw("A, a, B, b".into())),
        ..Default::default()
    }
    .normalize();
    assert_eq!(snippet.tags, vec!["A".to_string(), "B".to_string()]);

    let from_list = SnippetDraft {
        tags: Some(TagInput::List(vec![
            "Rust".into(),
            "rust".into(),
            "".into(),
            " cli ".into(),
            "CLI".into(),
        ])),
        ..Default::default()
    }
    .normalize();
    assert_eq!(from_list.tags, vec!["Rust".to_string(), "cli".to_string()]);
}

#[test]
fn normalize_prefers_multi_snippet_form_over_code() {
    let snippet = SnippetDraft {
        code: Some("echo setup".into()),
        snippets: Some(vec![SubSnippet {
            code: "echo usage".into(),
            description: "usage".into(),
            language: "bash".into(),
        }]),
        ..Default::default()
    }
    .normalize();
    assert!(snippet.code.is_empty());
    assert_eq!(snippet.snippets.len(), 1);
}

#[test]
fn normalize_preserves_existing_timestamps() {
    let snippet = SnippetDraft {
        created_at: Some("2024-01-01T00:00:00.000Z".into()),
        updated_at: Some("2024-02-01T00:00:00.000Z".into()),
        ..Default::default()
    }
    .normalize();
    assert_eq!(snippet.created_at, "2024-01-01T00:00:00.000Z");
    assert_eq!(snippet.updated_at, "2024-02-01T00:00:00.000Z");
}

#[test]
fn draft_deserializes_tags_from_either_shape() {
    let from_list: SnippetDraft =
        serde_json::from_str(r#"{"title":"t","tags":["a","b"]}"#).expect("list");
    assert_eq!(from_list.normalize().tags, vec!["a".to_string(), "b".to_string()]);

    let from_raw: SnippetDraft =
        serde_json::from_str(r#"{"title":"t","tags":"a, b"}"#).expect("raw");
    assert_eq!(from_raw.normalize().tags, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn draft_ignores_unknown_fields() {
    let draft: SnippetDraft = serde_json::from_str(
        r#"{"title":"t","bogus":42,"nested":{"x":1},"isFavorite":true}"#,
    )
    .expect("parse");
    let snippet = draft.normalize();
    assert_eq!(snippet.title, "t");
    assert!(snippet.is_favorite);
}
