use serde::{Deserialize, Serialize};

/// One tile of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Path relative to the source's base url
    pub url: String,
    pub title: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    pub has_next_page: bool,
}
