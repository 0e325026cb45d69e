use serde::{Deserialize, Serialize};

use super::CatalogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MangaStatus {
    Ongoing,
    Completed,
    Licensed,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MangaDetail {
    /// Path relative to the source's base url
    pub url: String,
    pub title: String,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub genres: Vec<String>,
    pub description: String,
    pub status: MangaStatus,
    pub thumbnail: Option<String>,
}

impl MangaDetail {
    /// Detail record for `entry` with nothing parsed yet.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            url: entry.url.clone(),
            title: entry.title.clone(),
            author: None,
            artist: None,
            genres: vec![],
            description: String::new(),
            status: MangaStatus::Unknown,
            thumbnail: entry.thumbnail.clone(),
        }
    }
}
