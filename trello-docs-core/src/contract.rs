//! # contract: the remote data interface
//!
//! This module defines the [`BoardSource`] trait, the single seam between the
//! generation pipeline and the project-management API that holds boards,
//! lists, cards and comments.
//!
//! ## Interface & Extensibility
//! - [`crate::client::TrelloClient`] is the production implementation.
//! - All methods are async and return [`crate::error::DocsError`].
//! - Implementations are pure request/response: no caching, no retries.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; `MockBoardSource` is exported when
//!   the `test-export-mocks` feature is enabled so integration tests can drive
//!   the pipeline without network access.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, error, info};

use crate::error::DocsError;
use crate::model::{Board, BoardList, Card, Comment};

#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// All boards the credentials can see.
    async fn fetch_user_boards(&self) -> Result<Vec<Board>, DocsError>;

    /// A single board by id.
    async fn fetch_board(&self, board_id: &str) -> Result<Board, DocsError>;

    /// The lists of a board, in board order.
    async fn fetch_lists_by_board_id(&self, board_id: &str) -> Result<Vec<BoardList>, DocsError>;

    /// The cards of one list, optionally with their attachment records.
    async fn fetch_list_cards(
        &self,
        list_id: &str,
        include_attachments: bool,
    ) -> Result<Vec<Card>, DocsError>;

    /// Comment actions on a card, newest first as the API returns them.
    async fn fetch_card_comments(&self, card_id: &str) -> Result<Vec<Comment>, DocsError>;
}

/// Fetch the cards of several lists, one list at a time in the given order.
///
/// Each card's `id_list` is set to the list it was fetched through. The first
/// failing list aborts the whole operation; no partial result is returned.
pub async fn fetch_cards_from_lists<S>(
    source: &S,
    list_ids: &[String],
    include_attachments: bool,
) -> Result<Vec<Card>, DocsError>
where
    S: BoardSource + ?Sized,
{
    let mut all_cards = Vec::new();
    for list_id in list_ids {
        let cards = match source.fetch_list_cards(list_id, include_attachments).await {
            Ok(cards) => cards,
            Err(e) => {
                error!(list_id = %list_id, error = %e, "Failed to fetch cards for list");
                return Err(e);
            }
        };
        debug!(list_id = %list_id, count = cards.len(), "Fetched cards for list");
        all_cards.extend(cards.into_iter().map(|mut card| {
            card.id_list = list_id.clone();
            card
        }));
    }
    info!(
        lists = list_ids.len(),
        cards = all_cards.len(),
        "Fetched cards from selected lists"
    );
    Ok(all_cards)
}
