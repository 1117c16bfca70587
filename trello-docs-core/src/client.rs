//! Trello REST client: the production [`BoardSource`].
//!
//! - Construct [`Credentials`] explicitly or with [`Credentials::from_env`]
//!   (`TRELLO_API_KEY`, `TRELLO_TOKEN`).
//! - [`TrelloClient::with_credentials`] returns a new client; an existing
//!   client's credentials never change, so one client can be shared across
//!   concurrent generations.
//! - The key and token travel as query parameters and are never logged or
//!   included in error messages.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::contract::BoardSource;
use crate::error::DocsError;
use crate::model::{Board, BoardList, Card, Comment, CommentAction};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub token: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token: token.into(),
        }
    }

    /// Reads `TRELLO_API_KEY` and `TRELLO_TOKEN`. Blank values count as missing.
    pub fn from_env() -> Result<Self, DocsError> {
        let read = |name: &str| {
            env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        match (read("TRELLO_API_KEY"), read("TRELLO_TOKEN")) {
            (Some(api_key), Some(token)) => {
                info!("Trello credentials found in environment");
                Ok(Self { api_key, token })
            }
            (None, _) => {
                error!("TRELLO_API_KEY missing in environment");
                Err(DocsError::Credential(
                    "TRELLO_API_KEY environment variable not set".into(),
                ))
            }
            (_, None) => {
                error!("TRELLO_TOKEN missing in environment");
                Err(DocsError::Credential(
                    "TRELLO_TOKEN environment variable not set".into(),
                ))
            }
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl TrelloClient {
    pub fn new(credentials: Credentials) -> Result<Self, DocsError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
        })
    }

    pub fn new_from_env() -> Result<Self, DocsError> {
        Self::new(Credentials::from_env()?)
    }

    /// Same client pointed at another API root (no trailing slash needed).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// A new client using `credentials`; `self` is left untouched.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks the credentials against `/members/me`.
    ///
    /// `Ok(false)` means the API rejected them; other failures are errors.
    pub async fn verify_credentials(&self) -> Result<bool, DocsError> {
        match self.get_json::<serde_json::Value>("/members/me", &[]).await {
            Ok(_) => {
                info!("Trello credentials verified");
                Ok(true)
            }
            Err(DocsError::Credential(reason)) => {
                info!(reason = %reason, "Trello credentials rejected");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, DocsError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint = %endpoint, "Requesting Trello API");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("token", self.credentials.token.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!(endpoint = %endpoint, error = %e, "Trello request failed");
                DocsError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
            error!(endpoint = %endpoint, status = %status, "Trello API returned error. Response body: {body}");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    DocsError::Credential(format!("HTTP {}: {}", status.as_u16(), body.trim()))
                }
                _ => DocsError::Http {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    body,
                },
            });
        }

        response.json::<T>().await.map_err(|e| {
            let e = e.without_url();
            error!(endpoint = %endpoint, error = %e, "Failed to parse Trello response JSON");
            DocsError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl BoardSource for TrelloClient {
    async fn fetch_user_boards(&self) -> Result<Vec<Board>, DocsError> {
        let boards: Vec<Board> = self.get_json("/members/me/boards", &[]).await?;
        info!(count = boards.len(), "Fetched boards for member");
        Ok(boards)
    }

    async fn fetch_board(&self, board_id: &str) -> Result<Board, DocsError> {
        let board: Board = self.get_json(&format!("/boards/{board_id}"), &[]).await?;
        info!(board_id = %board.id, name = %board.name, "Fetched board");
        Ok(board)
    }

    async fn fetch_lists_by_board_id(&self, board_id: &str) -> Result<Vec<BoardList>, DocsError> {
        let lists: Vec<BoardList> = self
            .get_json(&format!("/boards/{board_id}/lists"), &[])
            .await?;
        info!(board_id = %board_id, count = lists.len(), "Fetched lists for board");
        Ok(lists)
    }

    async fn fetch_list_cards(
        &self,
        list_id: &str,
        include_attachments: bool,
    ) -> Result<Vec<Card>, DocsError> {
        let params: &[(&str, &str)] = if include_attachments {
            &[("attachments", "true")]
        } else {
            &[]
        };
        self.get_json(&format!("/lists/{list_id}/cards"), params)
            .await
    }

    async fn fetch_card_comments(&self, card_id: &str) -> Result<Vec<Comment>, DocsError> {
        let actions: Vec<CommentAction> = self
            .get_json(
                &format!("/cards/{card_id}/actions"),
                &[("filter", "commentCard")],
            )
            .await?;
        debug!(card_id = %card_id, count = actions.len(), "Fetched comments for card");
        Ok(actions.into_iter().map(Comment::from).collect())
    }
}
