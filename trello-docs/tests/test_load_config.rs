use std::fs::write;
use tempfile::NamedTempFile;

use trello_docs::load_config::{build_config, load_config};
use trello_docs_core::config::{ListRef, LogoPosition};

fn config_file(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), contents).unwrap();
    file
}

/// A YAML file with a preset: the file's own fields win over the preset.
#[test]
fn test_load_config_yaml_with_preset() {
    let file = config_file(
        r#"
preset: detailed
boardId: board-1
boardName: Support
selectedLists:
  - id: l1
    name: Refunds
  - id: l2
    name: Shipping
cardsPerPrintPage: 4
logo:
  enabled: true
  url: https://example.com/logo.png
  position: cover
"#,
    );

    let loaded = load_config(file.path()).expect("Config should load");
    assert_eq!(loaded.preset.as_deref(), Some("detailed"));

    let config = build_config(&loaded, None).expect("Config should build");
    assert_eq!(config.board_id.as_deref(), Some("board-1"));
    assert_eq!(
        config.selected_lists,
        vec![ListRef::new("l1", "Refunds"), ListRef::new("l2", "Shipping")]
    );
    assert!(config.enable_print_pagination, "from the preset");
    assert_eq!(config.cards_per_print_page, 4, "file overrides preset");
    assert_eq!(config.title, "Detailed Documentation");
    assert!(config.logo.enabled);
    assert_eq!(config.logo.position, LogoPosition::Cover);
    assert_eq!(config.logo.width, 200);
    assert!(config.validate().is_ok());
}

#[test]
fn test_preset_flag_wins_over_file_preset() {
    let file = config_file("preset: detailed\nboardId: b1\n");
    let loaded = load_config(file.path()).unwrap();

    let config = build_config(&loaded, Some("simple")).unwrap();
    assert!(!config.include_comments);
    assert!(!config.show_attachments);
    assert_eq!(config.title, "Simple Documentation");
}

#[test]
fn test_json_config_is_accepted() {
    let file = config_file(
        r#"{"boardId": "b1", "selectedLists": [{"id": "l1", "name": "Refunds"}],
            "title": "Handbook", "outputFileName": "handbook.html", "customCSS": "h1 { color: red; }"}"#,
    );
    let config = build_config(&load_config(file.path()).unwrap(), None).unwrap();
    assert_eq!(config.title, "Handbook");
    assert_eq!(config.output_file_name, "handbook.html");
    assert_eq!(config.custom_css, "h1 { color: red; }");
    assert!(config.include_comments, "default kept");
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = config_file("");
    let config = build_config(&load_config(file.path()).unwrap(), None).unwrap();
    assert_eq!(config.title, "Documentation");
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Board ID is required"));
}

#[test]
fn test_unknown_preset_is_reported() {
    let file = config_file("preset: glossy\n");
    let err = build_config(&load_config(file.path()).unwrap(), None).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("glossy"), "got: {msg}");
    assert!(msg.contains("Unknown preset"), "got: {msg}");
}

#[test]
fn test_load_config_errors_for_invalid_file() {
    let file = config_file("not-yaml: [:::");
    let err = load_config(file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
fn test_load_config_errors_for_missing_file() {
    let err = load_config("definitely/not/here.yaml").unwrap_err();
    assert!(
        err.to_string().contains("Failed to read config file"),
        "got: {err}"
    );
}
