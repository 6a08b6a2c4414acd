//! Bookmark entry composition for Notemark.
//!
//! Pure mapping from a capture to the ordered block sequence appended to the
//! target. No I/O here; the sync engine supplies the timestamp and submits
//! the result.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::blocks::Block;
use crate::types::bookmark::BookmarkDraft;

/// Composes the canonical block sequence for one bookmark entry:
///
/// 1. blank separator paragraph
/// 2. timestamp paragraph (ISO-8601 instant, UTC)
/// 3. title paragraph, only when the trimmed title is non-empty
/// 4. bookmark block with the URL verbatim
/// 5. notes paragraph, only when the trimmed notes are non-empty
///
/// The ordering never varies with which optional fields are present; the
/// minimum output is the 3-block `[separator, timestamp, link]` sequence.
pub fn compose_entry(draft: &BookmarkDraft, now: DateTime<Utc>) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(5);
    blocks.push(Block::separator());
    blocks.push(Block::text(now.to_rfc3339_opts(SecondsFormat::Secs, true)));

    if let Some(title) = trimmed(draft.title.as_deref()) {
        blocks.push(Block::text(title));
    }

    blocks.push(Block::bookmark_link(draft.url.clone()));

    if let Some(notes) = trimmed(draft.notes.as_deref()) {
        blocks.push(Block::text(notes));
    }

    blocks
}

/// Empty-after-trim is treated the same as absent.
fn trimmed(field: Option<&str>) -> Option<&str> {
    match field {
        Some(s) => {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t)
            }
        }
        None => None,
    }
}
