use std::fmt;

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::my_clippings::{metadata::Metadata, title_author::TitleAuthor};

pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Highlight,
    Bookmark,
    Note,
    Unknown,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Highlight, Kind::Bookmark, Kind::Note, Kind::Unknown];

    pub fn of(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "highlight" => Ok(Self::Highlight),
            "bookmark" => Ok(Self::Bookmark),
            "note" => Ok(Self::Note),
            "unknown" => Ok(Self::Unknown),
            _ => bail!("Unknown kind: {}", name),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Highlight => "Highlight",
            Self::Bookmark => "Bookmark",
            Self::Note => "Note",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// One highlight, bookmark or note. Never modified after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    source_title: String,
    author: String,
    kind: Kind,
    location: String,
    page: Option<String>,
    created_at: NaiveDateTime,
    content: String,
}

impl Record {
    pub fn new(title_author: TitleAuthor, metadata: Metadata, content: String) -> Self {
        Record {
            source_title: title_author.title,
            author: title_author.author,
            kind: metadata.kind,
            location: metadata.location,
            page: metadata.page,
            created_at: metadata.created_at,
            content,
        }
    }

    // Raw title; the grouping key.
    pub fn source_title(&self) -> &str {
        &self.source_title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
