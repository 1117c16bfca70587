use chrono::{TimeZone, Utc};

use trello_docs_core::config::{GeneratorConfig, ListRef};
use trello_docs_core::contract::{fetch_cards_from_lists, MockBoardSource};
use trello_docs_core::generate::generate;
use trello_docs_core::model::{Badges, Board, Card, Comment, RawAttachment};
use trello_docs_core::DocsError;

fn config(lists: &[(&str, &str)]) -> GeneratorConfig {
    GeneratorConfig {
        board_id: Some("board-1".into()),
        board_name: "Support".into(),
        selected_lists: lists
            .iter()
            .map(|(id, name)| ListRef::new(*id, *name))
            .collect(),
        ..Default::default()
    }
}

fn card(id: &str, name: &str, desc: &str, comments: u32) -> Card {
    Card {
        id: id.into(),
        name: name.into(),
        desc: desc.into(),
        badges: Badges { comments },
        ..Default::default()
    }
}

fn comment(text: &str) -> Comment {
    Comment {
        author: "Dana".into(),
        date: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
        text: text.into(),
    }
}

#[tokio::test]
async fn test_fetch_cards_sets_source_list_in_order() {
    let mut source = MockBoardSource::new();
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "A")
        .times(1)
        .returning(|_, _| Ok(vec![card("c1", "One", "", 0)]));
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "B")
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                Card {
                    id_list: "stale".into(),
                    ..card("c2", "Two", "", 0)
                },
                card("c3", "Three", "", 0),
            ])
        });

    let cards = fetch_cards_from_lists(&source, &["A".to_string(), "B".to_string()], false)
        .await
        .expect("fetch should succeed");

    let placed: Vec<(&str, &str)> = cards
        .iter()
        .map(|c| (c.id.as_str(), c.id_list.as_str()))
        .collect();
    assert_eq!(placed, vec![("c1", "A"), ("c2", "B"), ("c3", "B")]);
}

#[tokio::test]
async fn test_list_failure_aborts_without_partial_result() {
    let mut source = MockBoardSource::new();
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "A")
        .returning(|_, _| Ok(vec![card("c1", "One", "", 0)]));
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "B")
        .returning(|_, _| {
            Err(DocsError::Http {
                endpoint: "/lists/B/cards".into(),
                status: 404,
                body: "not found".into(),
            })
        });
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "C")
        .never();

    let lists = ["A", "B", "C"].map(String::from);
    let err = fetch_cards_from_lists(&source, &lists, true)
        .await
        .expect_err("second list fails");
    assert!(matches!(err, DocsError::Http { status: 404, .. }));

    let mut source = MockBoardSource::new();
    source.expect_fetch_list_cards().returning(|_, _| {
        Err(DocsError::Http {
            endpoint: "/lists/A/cards".into(),
            status: 500,
            body: String::new(),
        })
    });
    source.expect_fetch_card_comments().never();
    let result = generate(&config(&[("A", "Refunds")]), &source).await;
    assert!(result.is_err(), "generation must fail when a list fails");
}

#[tokio::test]
async fn test_invalid_config_never_touches_the_source() {
    let mut source = MockBoardSource::new();
    source.expect_fetch_list_cards().never();
    source.expect_fetch_card_comments().never();

    let err = generate(&GeneratorConfig::default(), &source)
        .await
        .expect_err("defaults are invalid");
    assert!(err.is_validation());
    assert!(err.to_string().contains("Board ID is required"));
}

#[tokio::test]
async fn test_comments_fetched_only_for_cards_with_comment_badges() {
    let mut source = MockBoardSource::new();
    source.expect_fetch_list_cards().returning(|_, _| {
        Ok(vec![
            card("quiet", "Quiet", "nothing to discuss", 0),
            card("busy", "Busy", "lots to discuss", 2),
        ])
    });
    source
        .expect_fetch_card_comments()
        .withf(|card_id| card_id == "busy")
        .times(1)
        .returning(|_| Ok(vec![comment("first"), comment("second")]));

    let report = generate(&config(&[("A", "Refunds")]), &source)
        .await
        .expect("generation should succeed");

    assert_eq!(report.card_count, 2);
    assert_eq!(report.comment_count, 2);
    assert!(report.html.contains("Comments (2)"));
    assert!(report.html.contains("2024-01-02 at 03:04 UTC"));
}

#[tokio::test]
async fn test_comments_skipped_entirely_when_disabled() {
    let mut source = MockBoardSource::new();
    source
        .expect_fetch_list_cards()
        .returning(|_, _| Ok(vec![card("busy", "Busy", "desc", 5)]));
    source.expect_fetch_card_comments().never();

    let mut cfg = config(&[("A", "Refunds")]);
    cfg.include_comments = false;
    let report = generate(&cfg, &source).await.expect("generation should succeed");
    assert_eq!(report.comment_count, 0);
}

#[tokio::test]
async fn test_comment_failure_is_not_fatal() {
    let mut source = MockBoardSource::new();
    source.expect_fetch_list_cards().returning(|_, _| {
        Ok(vec![
            card("c1", "Broken", "desc one", 1),
            card("c2", "Fine", "desc two", 1),
        ])
    });
    source
        .expect_fetch_card_comments()
        .withf(|card_id| card_id == "c1")
        .returning(|_| {
            Err(DocsError::Http {
                endpoint: "/cards/c1/actions".into(),
                status: 500,
                body: "boom".into(),
            })
        });
    source
        .expect_fetch_card_comments()
        .withf(|card_id| card_id == "c2")
        .returning(|_| Ok(vec![comment("kept")]));

    let report = generate(&config(&[("A", "Refunds")]), &source)
        .await
        .expect("a failed comment fetch must not abort generation");

    assert_eq!(report.card_count, 2);
    assert_eq!(report.comment_count, 1);
    assert!(report.html.contains(">Broken<") || report.html.contains("Broken</"));
    assert!(report.html.contains("kept"));
}

#[tokio::test]
async fn test_attachments_requested_and_filtered_to_uploaded_images() {
    let mut source = MockBoardSource::new();
    source
        .expect_fetch_list_cards()
        .withf(|_, include_attachments| *include_attachments)
        .returning(|_, _| {
            let mut c = card("c1", "With files", "desc", 0);
            c.raw_attachments = vec![
                RawAttachment {
                    id: "a1".into(),
                    name: "photo.png".into(),
                    url: "https://x/photo.png".into(),
                    mime_type: Some("image/png".into()),
                    bytes: Some(3072),
                    is_upload: true,
                    ..Default::default()
                },
                RawAttachment {
                    id: "a2".into(),
                    name: "terms.pdf".into(),
                    url: "https://x/terms.pdf".into(),
                    mime_type: Some("application/pdf".into()),
                    is_upload: true,
                    ..Default::default()
                },
                RawAttachment {
                    id: "a3".into(),
                    name: "linked.png".into(),
                    url: "https://x/linked.png".into(),
                    mime_type: Some("image/png".into()),
                    is_upload: false,
                    ..Default::default()
                },
            ];
            Ok(vec![c])
        });

    let report = generate(&config(&[("A", "Refunds")]), &source)
        .await
        .expect("generation should succeed");

    assert!(report.html.contains("Image attachments (1)"));
    assert!(report.html.contains("photo.png"));
    assert!(report.html.contains("(3KB)"));
    assert!(!report.html.contains("terms.pdf"));
    assert!(!report.html.contains("linked.png"));
}

#[tokio::test]
async fn test_card_count_reflects_empty_card_exclusion() {
    let mut source = MockBoardSource::new();
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "A")
        .returning(|_, _| Ok(vec![card("c1", "Empty", "", 0), card("c2", "Full", "x", 0)]));
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "B")
        .returning(|_, _| Ok(vec![card("c3", "Also empty", " ", 0)]));

    let mut cfg = config(&[("A", "Refunds"), ("B", "Shipping")]);
    cfg.exclude_empty_cards = true;
    let report = generate(&cfg, &source).await.expect("generation should succeed");

    assert_eq!(report.fetched_count, 3);
    assert_eq!(report.card_count, 1);
    assert_eq!(report.section_count, 1);
    assert!(!report.html.contains("Shipping <span"));
}

#[tokio::test]
async fn test_list_selected_twice_keeps_every_card_once() {
    let mut source = MockBoardSource::new();
    source
        .expect_fetch_list_cards()
        .withf(|list_id, _| list_id == "A")
        .times(2)
        .returning(|_, _| {
            Ok(vec![
                card("c1", "Window", "14 days", 0),
                card("c2", "Process", "ticket", 0),
            ])
        });

    let report = generate(&config(&[("A", "Refunds"), ("A", "Refunds")]), &source)
        .await
        .expect("generation should succeed");

    assert_eq!(report.fetched_count, 4);
    assert_eq!(report.card_count, 4);
    assert_eq!(report.section_count, 2);
    assert!(report.html.contains(r#"id="card-2-2""#));
    assert!(!report.html.contains(r#"id="card-1-3""#));
}

#[tokio::test]
async fn test_blank_board_name_is_fetched_from_the_board() {
    let mut source = MockBoardSource::new();
    source
        .expect_fetch_board()
        .withf(|board_id| board_id == "board-1")
        .times(1)
        .returning(|id| {
            Ok(Board {
                id: id.to_string(),
                name: "Policies".into(),
                url: String::new(),
                closed: false,
            })
        });
    source
        .expect_fetch_list_cards()
        .returning(|_, _| Ok(vec![card("c1", "One", "desc", 0)]));

    let mut cfg = config(&[("A", "Refunds")]);
    cfg.board_name = "  ".into();
    let report = generate(&cfg, &source).await.expect("generation should succeed");
    assert!(report.html.contains("Generated from Trello Board: Policies"));
}

#[tokio::test]
async fn test_board_name_lookup_failure_is_not_fatal() {
    let mut source = MockBoardSource::new();
    source.expect_fetch_board().times(1).returning(|_| {
        Err(DocsError::Http {
            endpoint: "/boards/board-1".into(),
            status: 404,
            body: "not found".into(),
        })
    });
    source
        .expect_fetch_list_cards()
        .returning(|_, _| Ok(vec![card("c1", "One", "desc", 0)]));

    let mut cfg = config(&[("A", "Refunds")]);
    cfg.board_name = String::new();
    let report = generate(&cfg, &source)
        .await
        .expect("a failed board lookup must not abort generation");
    assert_eq!(report.card_count, 1);
}

#[tokio::test]
async fn test_configured_board_name_skips_the_lookup() {
    let mut source = MockBoardSource::new();
    source.expect_fetch_board().never();
    source
        .expect_fetch_list_cards()
        .returning(|_, _| Ok(vec![card("c1", "One", "desc", 0)]));

    let report = generate(&config(&[("A", "Refunds")]), &source)
        .await
        .expect("generation should succeed");
    assert!(report.html.contains("Generated from Trello Board: Support"));
}
