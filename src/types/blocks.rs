//! Notion block JSON shapes.
//!
//! Models exactly the subset of the Notion block API that bookmark entries
//! use: paragraph blocks carrying rich text, and bookmark (link) blocks.

use serde::{Deserialize, Serialize};

/// One unit of remote content composed into a bookmark entry.
///
/// Serializes to the Notion wire shape, e.g.
/// `{"type":"paragraph","paragraph":{"rich_text":[...]}}` or
/// `{"type":"bookmark","bookmark":{"url":"..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph { paragraph: ParagraphBody },
    Bookmark { bookmark: BookmarkBody },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphBody {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkBody {
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RichText {
    Text { text: TextContent },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        RichText::Text {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

impl Block {
    /// Blank paragraph used to visually separate consecutive entries.
    pub fn separator() -> Self {
        Block::Paragraph {
            paragraph: ParagraphBody::default(),
        }
    }

    /// Paragraph block with a single plain-text run.
    pub fn text(content: impl Into<String>) -> Self {
        Block::Paragraph {
            paragraph: ParagraphBody {
                rich_text: vec![RichText::plain(content)],
            },
        }
    }

    /// Bookmark block carrying the URL verbatim, with no caption.
    pub fn bookmark_link(url: impl Into<String>) -> Self {
        Block::Bookmark {
            bookmark: BookmarkBody {
                url: url.into(),
                caption: Vec::new(),
            },
        }
    }

    /// The text content of a single-run paragraph block, if this block is
    /// one. Separators (empty rich text) and bookmark blocks report `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Block::Paragraph { paragraph } => match paragraph.rich_text.as_slice() {
                [RichText::Text { text }] => Some(&text.content),
                _ => None,
            },
            Block::Bookmark { .. } => None,
        }
    }

    /// The URL of a bookmark block, if this block is one.
    pub fn as_bookmark_url(&self) -> Option<&str> {
        match self {
            Block::Bookmark { bookmark } => Some(&bookmark.url),
            Block::Paragraph { .. } => None,
        }
    }

    /// Whether this block is the blank-paragraph separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, Block::Paragraph { paragraph } if paragraph.rich_text.is_empty())
    }
}
