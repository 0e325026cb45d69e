use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    header::{REFERER, USER_AGENT},
    Client, Request, Response, StatusCode, Url,
};
use scraper::{ElementRef, Html, Selector};

use crate::{
    config::SourceConfig,
    model::*,
    parse_error::{ParseError, Result},
    rate_limit::RateLimiter,
    source::Source,
    util,
};

mod filters;

pub use filters::filter_list;

const ID: i64 = 6;
const NAME: &str = "Mintmanga";
const LANG: &str = "ru";
const PAGE_SIZE: u32 = 70;
const IMAGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; WOW64)";
const CHAPTER_TRACKING_QUERY: &str = "?mtr=1";

const HIDDEN_WARNING_ONGOING: &str = "<b>Перевод:</b> продолжается";
const HIDDEN_WARNING_SINGLE: &str = "<h1 class=\"names\"> Сингл";
const HIDDEN_WARNING_COMPLETED: &str = "<b>Перевод:</b> завершен";
const COPYRIGHT_PROHIBITED: &str = "<h3>Запрещена публикация произведения по копирайту</h3>";

lazy_static! {
    // Listing
    static ref TILE: Selector = Selector::parse("div.tile").unwrap();
    static ref TILE_THUMBNAIL: Selector = Selector::parse("img.lazy").unwrap();
    static ref TILE_LINK: Selector = Selector::parse("h3 > a").unwrap();
    static ref NEXT_PAGE: Selector = Selector::parse("a.nextLink").unwrap();
    // Details
    static ref INFO: Selector = Selector::parse("div.leftContent").unwrap();
    static ref AUTHOR: Selector = Selector::parse("span.elem_author").unwrap();
    static ref ARTIST: Selector = Selector::parse("span.elem_illustrator").unwrap();
    static ref GENRE: Selector = Selector::parse("span.elem_genre").unwrap();
    static ref DESCRIPTION: Selector = Selector::parse("div.manga-description").unwrap();
    static ref IMAGE: Selector = Selector::parse("img").unwrap();
    static ref HIDDEN_WARNING: Selector = Selector::parse("span.hide > h3").unwrap();
    // Chapters
    static ref CHAPTER_ROW: Selector = Selector::parse("div.chapters-link > table > tbody > tr").unwrap();
    static ref CHAPTER_ROW_LINK: Selector = Selector::parse("td > a").unwrap();
    static ref LINK: Selector = Selector::parse("a").unwrap();
    static ref CHAPTER_DATE: Selector = Selector::parse("td.hidden-xxs").unwrap();
}

pub struct Mintmanga {
    config: SourceConfig,
    client: Client,
    limiter: Arc<RateLimiter>,
}

impl Mintmanga {
    pub fn new() -> Self {
        Self::with_config(SourceConfig::default())
    }

    pub fn with_config(config: SourceConfig) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit, config.rate_period));
        Self::with_client(config, Client::new(), limiter)
    }

    /// Use a client and rate limiter owned by the host.
    pub fn with_client(config: SourceConfig, client: Client, limiter: Arc<RateLimiter>) -> Self {
        Self {
            config,
            client,
            limiter,
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn listing_request(&self, sort_type: &str, page: u32) -> Result<Url> {
        let offset = u64::from(PAGE_SIZE) * (u64::from(page.max(1)) - 1);
        let mut url = util::absolute_url(&self.config.base_url, "/list")?;
        url.query_pairs_mut()
            .append_pair("sortType", sort_type)
            .append_pair("offset", &offset.to_string())
            .append_pair("max", &PAGE_SIZE.to_string());

        Ok(url)
    }

    pub fn popular_request(&self, page: u32) -> Result<Url> {
        self.listing_request("rate", page)
    }

    pub fn latest_request(&self, page: u32) -> Result<Url> {
        self.listing_request("updated", page)
    }

    ///
    /// Advanced search url for `query` and the non ignored `filters`
    ///
    /// An empty filter list falls back to [filter_list].
    /// The site has no paging for search, so `page` is not part of the url.
    pub fn search_request(&self, _page: u32, query: &str, filters: &FilterList) -> Result<Url> {
        let mut url = util::absolute_url(&self.config.base_url, "/search/advanced")?;

        let defaults;
        let filters = if filters.is_empty() {
            defaults = filter_list();
            &defaults
        } else {
            filters
        };

        let mut pairs: Vec<(&str, &str)> = filters
            .active()
            .map(|option| (option.id.as_str(), option.state.token()))
            .collect();
        if !query.is_empty() {
            pairs.push(("q", query));
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        // The encoder escapes the `=` of the state tokens
        let url = url.to_string().replace("=%3D", "=");
        Url::parse(&url).map_err(|_| ParseError::InvalidSearchUrl(url))
    }

    pub fn image_request(&self, page: &Page) -> Result<Request> {
        let request = self
            .client
            .get(&page.image_url)
            .header(USER_AGENT, IMAGE_USER_AGENT)
            .header(REFERER, self.config.base())
            .build()?;

        Ok(request)
    }

    /// Image urls embedded in the reader initializer script of a chapter page.
    pub fn page_list_parse(&self, body: &str) -> Result<Vec<Page>> {
        let base = self.config.base();
        let pages = util::reader_image_parts(body)?
            .into_iter()
            .enumerate()
            .map(|(index, (server, path, file))| Page {
                index,
                image_url: util::resolve_image_url(base, &server, &path, &file),
            })
            .collect();

        Ok(pages)
    }

    async fn send(&self, request: Request) -> Result<Response> {
        self.limiter.acquire().await;
        debug!("[{}] {} {}", NAME, request.method(), request.url());

        let response = self.client.execute(request).await?;

        if response.status() == StatusCode::FORBIDDEN {
            return Err(ParseError::CloudflareIUAM);
        }
        if !response.status().is_success() {
            return Err(ParseError::NetworkError(response.status()));
        }

        Ok(response)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let request = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(REFERER, self.config.base())
            .build()?;

        let response = self.send(request).await?;
        response.text().await.map_err(|_| ParseError::BadHTML)
    }
}

impl Default for Mintmanga {
    fn default() -> Self {
        Self::new()
    }
}

/// Tiles of a popular, latest or search listing.
pub fn catalog_parse(html: &str) -> Result<CatalogPage> {
    let document = Html::parse_document(html);

    let entries = document
        .select(&TILE)
        .map(|tile| entry_from_element(&tile))
        .collect::<Result<Vec<CatalogEntry>>>()?;
    let has_next_page = document.select(&NEXT_PAGE).next().is_some();

    Ok(CatalogPage {
        entries,
        has_next_page,
    })
}

fn entry_from_element(tile: &ElementRef) -> Result<CatalogEntry> {
    let thumbnail = tile
        .select(&TILE_THUMBNAIL)
        .next()
        .and_then(|img| img.value().attr("data-original"))
        .map(String::from);

    let link = tile
        .select(&TILE_LINK)
        .next()
        .ok_or(ParseError::MissingSearchHref)?;
    let href = link
        .value()
        .attr("href")
        .ok_or(ParseError::MissingSearchHref)?;

    let title = link
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(String::from)
        .unwrap_or_else(|| util::text(&link));
    if title.is_empty() {
        return Err(ParseError::MissingMangaTitle);
    }

    Ok(CatalogEntry {
        url: util::url_without_domain(href),
        title,
        thumbnail,
    })
}

/// Details of `manga` from its page.
pub fn details_parse(html: &str, manga: &CatalogEntry) -> Result<MangaDetail> {
    let document = Html::parse_document(html);
    let info = document.select(&INFO).next().ok_or(ParseError::BadHTML)?;

    let first_text = |selector: &Selector| {
        info.select(selector)
            .next()
            .map(|element| util::text(&element))
            .filter(|text| !text.is_empty())
    };

    let genre = info
        .select(&GENRE)
        .map(|element| util::text(&element))
        .collect::<Vec<String>>()
        .join(" ")
        .replace(" ,", ",");
    let genres = genre
        .split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(String::from)
        .collect();

    let description = info
        .select(&DESCRIPTION)
        .map(|element| util::text(&element))
        .collect::<Vec<String>>()
        .join(" ");

    let thumbnail = info
        .select(&IMAGE)
        .find_map(|img| img.value().attr("data-full"))
        .map(String::from)
        .or_else(|| manga.thumbnail.clone());

    Ok(MangaDetail {
        author: first_text(&AUTHOR),
        artist: first_text(&ARTIST),
        genres,
        description,
        status: parse_status(&info),
        thumbnail,
        ..MangaDetail::from_entry(manga)
    })
}

fn parse_status(info: &ElementRef) -> MangaStatus {
    let has_hidden_warning = info.select(&HIDDEN_WARNING).next().is_some();
    status_from_html(&info.inner_html(), has_hidden_warning)
}

///
/// Status of a manga from the html of its info container
///
/// The translation phrases are only meaningful on pages carrying the hidden
/// warning, every other page has them in its template.
pub fn status_from_html(html: &str, has_hidden_warning: bool) -> MangaStatus {
    if has_hidden_warning {
        if html.contains(HIDDEN_WARNING_ONGOING) {
            MangaStatus::Ongoing
        } else if html.contains(HIDDEN_WARNING_SINGLE) || html.contains(HIDDEN_WARNING_COMPLETED) {
            MangaStatus::Completed
        } else {
            MangaStatus::Unknown
        }
    } else if html.contains(COPYRIGHT_PROHIBITED) {
        MangaStatus::Licensed
    } else {
        MangaStatus::Unknown
    }
}

/// Chapters listed on the page of the manga titled `manga_title`.
pub fn chapter_list_parse(html: &str, manga_title: &str) -> Result<Vec<Chapter>> {
    let document = Html::parse_document(html);

    document
        .select(&CHAPTER_ROW)
        .filter(|row| row.select(&CHAPTER_ROW_LINK).next().is_some())
        .map(|row| chapter_from_element(&row, manga_title).map(prepare_chapter))
        .collect()
}

fn chapter_from_element(row: &ElementRef, manga_title: &str) -> Result<Chapter> {
    let link = row.select(&LINK).next().ok_or(ParseError::MissingChapterHref)?;
    let href = link
        .value()
        .attr("href")
        .ok_or(ParseError::MissingChapterHref)?;

    let date_upload = row
        .select(&CHAPTER_DATE)
        .last()
        .map(|cell| util::parse_chapter_date(&util::text(&cell)))
        .unwrap_or(0);

    Ok(Chapter {
        url: util::url_without_domain(&format!("{}{}", href, CHAPTER_TRACKING_QUERY)),
        name: util::clean_chapter_name(&util::text(&link), manga_title),
        date_upload,
        number: None,
    })
}

/// Fill in the chapter number from the cleaned name.
pub fn prepare_chapter(mut chapter: Chapter) -> Chapter {
    chapter.number = util::chapter_number(&chapter.name);
    chapter
}

#[async_trait]
impl Source for Mintmanga {
    fn id(&self) -> i64 {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn lang(&self) -> &'static str {
        LANG
    }

    fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    fn supports_latest(&self) -> bool {
        true
    }

    fn rate_limit(&self) -> u32 {
        self.limiter.permits()
    }

    async fn popular(&self, page: u32) -> Result<CatalogPage> {
        let url = self.popular_request(page)?;
        let html = self.get_text(url).await?;
        catalog_parse(&html)
    }

    async fn latest(&self, page: u32) -> Result<CatalogPage> {
        let url = self.latest_request(page)?;
        let html = self.get_text(url).await?;
        catalog_parse(&html)
    }

    async fn search(&self, page: u32, query: &str, filters: &FilterList) -> Result<CatalogPage> {
        let url = self.search_request(page, query, filters)?;
        let html = self.get_text(url).await?;
        let mut result = catalog_parse(&html)?;
        // Search is capped at 200 results on one page
        result.has_next_page = false;
        debug!("[{}] {} results for '{}'", NAME, result.entries.len(), query);

        Ok(result)
    }

    async fn manga_details(&self, manga: &CatalogEntry) -> Result<MangaDetail> {
        let url = util::absolute_url(&self.config.base_url, &manga.url)?;
        let html = self.get_text(url).await?;
        details_parse(&html, manga)
    }

    async fn chapters(&self, manga: &MangaDetail) -> Result<Vec<Chapter>> {
        if manga.status == MangaStatus::Licensed {
            return Err(ParseError::Licensed);
        }

        let url = util::absolute_url(&self.config.base_url, &manga.url)?;
        let html = self.get_text(url).await?;
        let chapters = chapter_list_parse(&html, &manga.title)?;
        debug!("[{}] {} chapters for {}", NAME, chapters.len(), manga.url);

        Ok(chapters)
    }

    async fn pages(&self, chapter: &Chapter) -> Result<Vec<Page>> {
        let url = util::absolute_url(&self.config.base_url, &chapter.url)?;
        let body = self.get_text(url).await?;
        let pages = self.page_list_parse(&body)?;
        if pages.is_empty() {
            warn!("[{}] No pages found in {}", NAME, chapter.url);
        }

        Ok(pages)
    }

    async fn image(&self, page: &Page) -> Result<Vec<u8>> {
        let request = self.image_request(page)?;
        let response = self.send(request).await?;

        Ok(response.bytes().await?.to_vec())
    }

    fn filter_list(&self) -> FilterList {
        filter_list()
    }
}
