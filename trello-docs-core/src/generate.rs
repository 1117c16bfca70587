//! High-level pipeline: validate → fetch → enrich → assemble.
//!
//! This module provides the top-level orchestration for one document
//! generation run:
//!   - Validates the [`GeneratorConfig`]; invalid configurations never reach the network
//!   - Looks up the board's name when the configuration leaves it blank
//!   - Fetches the cards of every selected list, one list at a time
//!   - Enriches each card with its image attachments and, when requested, its comments
//!   - Assembles the HTML document and reports what went into it
//!
//! # Error Handling
//! Configuration, credential and card-fetch failures abort the run. A failed
//! comment fetch is logged and the card is rendered without comments.
//!
//! # Navigation
//! - Main entrypoint: [`generate`]
//! - Output: [`GenerationReport`]

use tracing::{debug, info, warn};

use crate::assemble::assemble;
use crate::attachments;
use crate::config::GeneratorConfig;
use crate::contract::{fetch_cards_from_lists, BoardSource};
use crate::error::DocsError;
use crate::model::Card;

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub html: String,
    /// Cards in the document, after empty-card exclusion.
    pub card_count: usize,
    /// Cards fetched before exclusion.
    pub fetched_count: usize,
    pub comment_count: usize,
    pub section_count: usize,
}

pub async fn generate<S>(
    config: &GeneratorConfig,
    source: &S,
) -> Result<GenerationReport, DocsError>
where
    S: BoardSource + ?Sized,
{
    info!(
        board_id = config.board_id.as_deref().unwrap_or(""),
        lists = config.selected_lists.len(),
        "[GENERATE] Starting document generation"
    );
    config.validate()?;

    let named;
    let config = match resolve_board_name(config, source).await {
        Some(name) => {
            named = GeneratorConfig {
                board_name: name,
                ..config.clone()
            };
            &named
        }
        None => config,
    };

    let list_ids = config.selected_list_ids();
    let mut cards = fetch_cards_from_lists(source, &list_ids, config.show_attachments).await?;
    let fetched_count = cards.len();
    info!(cards = fetched_count, "[GENERATE] Processing cards");

    for (i, card) in cards.iter_mut().enumerate() {
        debug!(
            position = i + 1,
            total = fetched_count,
            card = %card.name,
            "[GENERATE] Processing card"
        );
        enrich_card(card, config, source).await;
    }

    let comment_count: usize = cards.iter().map(|c| c.comments.len()).sum();
    let document = assemble(&cards, config);

    info!(
        cards = document.card_count,
        sections = document.section_count,
        comments = comment_count,
        "[GENERATE] Document generated"
    );
    Ok(GenerationReport {
        html: document.html,
        card_count: document.card_count,
        fetched_count,
        comment_count,
        section_count: document.section_count,
    })
}

/// The board's name from the source when the configuration leaves it blank.
/// A failed lookup only costs the name in the document footer.
async fn resolve_board_name<S>(config: &GeneratorConfig, source: &S) -> Option<String>
where
    S: BoardSource + ?Sized,
{
    if !config.board_name.trim().is_empty() {
        return None;
    }
    let board_id = config.board_id.as_deref()?;
    match source.fetch_board(board_id).await {
        Ok(board) => {
            debug!(board_id, name = %board.name, "[GENERATE] Resolved board name");
            Some(board.name)
        }
        Err(e) => {
            warn!(board_id, error = %e, "[GENERATE] Could not fetch board name, continuing without it");
            None
        }
    }
}

/// Attach processed image attachments and, when the configuration asks for
/// them and the card has any, its comments.
async fn enrich_card<S>(card: &mut Card, config: &GeneratorConfig, source: &S)
where
    S: BoardSource + ?Sized,
{
    card.attachments = if config.show_attachments {
        attachments::process(&card.raw_attachments)
    } else {
        Vec::new()
    };

    card.comments = if config.include_comments && card.badges.comments > 0 {
        match source.fetch_card_comments(&card.id).await {
            Ok(comments) => {
                debug!(card_id = %card.id, count = comments.len(), "[GENERATE] Found comments");
                comments
            }
            Err(e) => {
                warn!(card_id = %card.id, card = %card.name, error = %e, "[GENERATE] Could not fetch comments, continuing without them");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };
}
