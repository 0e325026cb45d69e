use async_trait::async_trait;
use reqwest::Url;

use crate::{model::*, parse_error::Result};

/// What a host needs from one site: listings, details, chapters and pages.
///
/// The host calls these in order (list -> details -> chapters -> pages -> image),
/// feeding the output of one step into the next.
#[async_trait]
pub trait Source {
    fn id(&self) -> i64;
    fn name(&self) -> &'static str;
    fn lang(&self) -> &'static str;
    fn base_url(&self) -> &Url;
    fn supports_latest(&self) -> bool;
    /// Requests this source lets start per rate period
    fn rate_limit(&self) -> u32;

    async fn popular(&self, page: u32) -> Result<CatalogPage>;
    async fn latest(&self, page: u32) -> Result<CatalogPage>;
    async fn search(&self, page: u32, query: &str, filters: &FilterList) -> Result<CatalogPage>;
    async fn manga_details(&self, manga: &CatalogEntry) -> Result<MangaDetail>;
    async fn chapters(&self, manga: &MangaDetail) -> Result<Vec<Chapter>>;
    async fn pages(&self, chapter: &Chapter) -> Result<Vec<Page>>;
    async fn image(&self, page: &Page) -> Result<Vec<u8>>;
    fn filter_list(&self) -> FilterList;
}
