use trello_docs_core::config::{
    apply_preset, create_config, validate_config, ConfigOverrides, CoverLetterOverrides,
    GeneratorConfig, ListRef, LogoOverrides, LogoPosition, Preset,
};
use trello_docs_core::DocsError;

fn valid_config() -> GeneratorConfig {
    create_config(&ConfigOverrides {
        board_id: Some("b1".into()),
        board_name: Some("Policies".into()),
        selected_lists: Some(vec![ListRef::new("l1", "Refunds")]),
        ..Default::default()
    })
}

#[test]
fn defaults_match_documented_values() {
    let config = GeneratorConfig::default();
    assert_eq!(config.board_id, None);
    assert!(config.selected_lists.is_empty());
    assert!(config.include_comments);
    assert!(config.show_attachments);
    assert!(!config.exclude_empty_cards);
    assert!(!config.enable_print_pagination);
    assert_eq!(config.cards_per_print_page, 3);
    assert!(!config.one_card_per_print_page);
    assert!(config.show_card_numbers);
    assert!(!config.logo.enabled);
    assert_eq!(config.logo.width, 200);
    assert_eq!(config.logo.position, LogoPosition::Header);
    assert!(!config.cover_letter.enabled);
    assert!(config.cover_letter.show_on_separate_page);
    assert_eq!(config.output_file_name, "documentation.html");
    assert_eq!(config.title, "Documentation");
}

#[test]
fn defaults_alone_fail_with_board_and_list_errors() {
    let errors = validate_config(&GeneratorConfig::default());
    assert_eq!(
        errors,
        vec![
            "Board ID is required".to_string(),
            "At least one list must be selected".to_string(),
        ]
    );
}

#[test]
fn complete_config_is_valid() {
    let config = valid_config();
    assert!(validate_config(&config).is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn blank_board_id_is_rejected() {
    let mut config = valid_config();
    config.board_id = Some("   ".into());
    assert_eq!(validate_config(&config), vec!["Board ID is required"]);
}

#[test]
fn zero_cards_per_page_only_matters_with_pagination() {
    let mut config = valid_config();
    config.cards_per_print_page = 0;
    assert!(validate_config(&config).is_empty());

    config.enable_print_pagination = true;
    assert_eq!(
        validate_config(&config),
        vec!["Cards per print page must be greater than 0"]
    );
}

#[test]
fn blank_title_is_rejected() {
    let mut config = valid_config();
    config.title = " ".into();
    assert_eq!(validate_config(&config), vec!["Title is required"]);
}

#[test]
fn validate_returns_configuration_error_with_every_message() {
    let err = GeneratorConfig::default()
        .validate()
        .expect_err("defaults are not a complete configuration");
    assert!(err.is_validation());
    match &err {
        DocsError::Configuration(errors) => assert_eq!(errors.len(), 2),
        other => panic!("expected configuration error, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("Board ID is required"), "got: {message}");
    assert!(
        message.contains("At least one list must be selected"),
        "got: {message}"
    );
}

#[test]
fn overrides_replace_only_the_fields_they_set() {
    let config = create_config(&ConfigOverrides {
        title: Some("Handbook".into()),
        include_comments: Some(false),
        ..Default::default()
    });
    assert_eq!(config.title, "Handbook");
    assert!(!config.include_comments);
    assert!(config.show_attachments, "untouched field keeps its default");
    assert_eq!(config.cards_per_print_page, 3);
}

#[test]
fn nested_options_merge_field_by_field() {
    let config = create_config(&ConfigOverrides {
        logo: Some(LogoOverrides {
            enabled: Some(true),
            url: Some("https://example.com/logo.png".into()),
            ..Default::default()
        }),
        cover_letter: Some(CoverLetterOverrides {
            title: Some("Welcome".into()),
            ..Default::default()
        }),
        ..Default::default()
    });
    assert!(config.logo.enabled);
    assert_eq!(config.logo.width, 200, "width keeps its default");
    assert_eq!(config.logo.position, LogoPosition::Header);
    assert_eq!(config.cover_letter.title, "Welcome");
    assert!(config.cover_letter.show_on_separate_page);
}

#[test]
fn simple_preset_disables_comments_and_attachments() {
    let config = apply_preset(valid_config(), "simple").unwrap();
    assert!(!config.include_comments);
    assert!(!config.show_attachments);
    assert!(!config.enable_print_pagination);
    assert_eq!(config.title, "Simple Documentation");
    assert_eq!(config.board_id.as_deref(), Some("b1"), "selection survives");
}

#[test]
fn detailed_preset_paginates_two_per_page() {
    let config = apply_preset(valid_config(), "detailed").unwrap();
    assert!(config.include_comments);
    assert!(config.enable_print_pagination);
    assert_eq!(config.cards_per_print_page, 2);
}

#[test]
fn print_ready_preset_accepts_several_spellings() {
    for name in ["printReady", "print-ready", "print_ready", "PRINTREADY"] {
        let config = apply_preset(valid_config(), name).unwrap();
        assert!(config.enable_print_pagination, "{name}");
        assert_eq!(config.cards_per_print_page, 3, "{name}");
        assert_eq!(config.title, "Print-Ready Documentation", "{name}");
    }
}

#[test]
fn one_per_page_preset_sets_one_card_per_page() {
    let config = apply_preset(valid_config(), "onePerPage").unwrap();
    assert!(config.one_card_per_print_page);
    assert_eq!(config.title, "One Card Per Page");
}

#[test]
fn unknown_preset_is_a_validation_error() {
    let err = apply_preset(valid_config(), "fancy").unwrap_err();
    assert!(matches!(err, DocsError::UnknownPreset(ref name) if name == "fancy"));
    assert!(err.is_validation());
}

#[test]
fn preset_names_round_trip_through_display() {
    for preset in Preset::ALL {
        let parsed: Preset = preset.to_string().parse().unwrap();
        assert_eq!(parsed, preset);
    }
}

#[test]
fn camel_case_json_deserialises_with_defaults() {
    let json = r##"{
        "boardId": "b1",
        "selectedLists": [{"id": "l1", "name": "Refunds"}],
        "oneCardPerPrintPage": true,
        "logo": {"enabled": true, "url": "https://x/logo.png", "position": "footer"},
        "customCSS": "body { color: red; }"
    }"##;
    let config: GeneratorConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.board_id.as_deref(), Some("b1"));
    assert_eq!(config.selected_lists, vec![ListRef::new("l1", "Refunds")]);
    assert!(config.one_card_per_print_page);
    assert_eq!(config.logo.position, LogoPosition::Footer);
    assert_eq!(config.logo.width, 200);
    assert_eq!(config.custom_css, "body { color: red; }");
    assert_eq!(config.title, "Documentation");
}
