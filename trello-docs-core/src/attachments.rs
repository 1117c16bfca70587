//! Image attachment filtering. Link-only: bytes are never downloaded.

use tracing::debug;

use crate::model::{Attachment, RawAttachment};

/// Keep uploaded images and build their display records.
///
/// Links, non-image uploads and records without a mime type are dropped.
pub fn process(raw: &[RawAttachment]) -> Vec<Attachment> {
    let processed: Vec<Attachment> = raw
        .iter()
        .filter(|att| att.is_upload)
        .filter_map(|att| {
            let mime_type = att.mime_type.as_deref()?;
            if !mime_type.starts_with("image/") {
                return None;
            }
            Some(Attachment {
                id: att.id.clone(),
                name: att.name.clone(),
                url: att.url.clone(),
                mime_type: mime_type.to_string(),
                bytes: att.bytes,
                size_text: size_text(att.bytes),
                date: att.date.clone(),
                is_upload: true,
                embedded: false,
            })
        })
        .collect();
    debug!(
        total = raw.len(),
        images = processed.len(),
        "Processed card attachments"
    );
    processed
}

/// Rounded kilobytes, e.g. `"12KB"`.
pub fn size_text(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) if b > 0 => format!("{}KB", (b as f64 / 1024.0).round() as u64),
        _ => "Unknown size".to_string(),
    }
}
