//! Data types for the Trello records this crate consumes.
//!
//! Only the fields that are actually used are modelled; serde ignores the
//! rest of each API response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub closed: bool,
}

/// A column of cards on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: String,
    /// Trello colour name (`green`, `sky`, ...). Null for colourless labels.
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Badges {
    #[serde(default)]
    pub comments: u32,
}

/// Attachment record exactly as the API returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttachment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub is_upload: bool,
}

/// Display record built by [`crate::attachments::process`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub bytes: Option<u64>,
    pub size_text: String,
    pub date: Option<String>,
    pub is_upload: bool,
    /// Image bytes are never fetched, so this is always false.
    pub embedded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub author: String,
    pub date: Option<DateTime<Utc>>,
    pub text: String,
}

/// A `commentCard` action as returned by `/cards/{id}/actions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAction {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub member_creator: Option<MemberCreator>,
    #[serde(default)]
    pub data: CommentData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreator {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentData {
    #[serde(default)]
    pub text: String,
}

impl From<CommentAction> for Comment {
    fn from(action: CommentAction) -> Self {
        let author = action
            .member_creator
            .and_then(|m| m.full_name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        Comment {
            author,
            date: action.date,
            text: action.data.text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub id_short: u64,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Source list. Overwritten with the list the card was fetched through.
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub badges: Badges,
    #[serde(default, rename = "attachments")]
    pub raw_attachments: Vec<RawAttachment>,

    /// Filled in by the generation pipeline.
    #[serde(skip)]
    pub attachments: Vec<Attachment>,
    #[serde(skip)]
    pub comments: Vec<Comment>,
}

impl Card {
    /// A card with nothing to show beyond its title.
    pub fn is_empty(&self) -> bool {
        self.desc.trim().is_empty()
            && self.attachments.is_empty()
            && self.comments.is_empty()
            && self.labels.is_empty()
    }
}
