use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Network error, status = {0}")]
    NetworkError(reqwest::StatusCode),
    #[error(transparent)]
    NetworkErrorUnknown(#[from] reqwest::Error),
    #[error("Cloudflare's I'm Under Attack Mode")]
    CloudflareIUAM,
    #[error("HTML could not be parsed")]
    BadHTML,
    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    // Manga
    #[error("Missing manga title")]
    MissingMangaTitle,

    // Chapters
    #[error("Licensed - No chapters to show")]
    Licensed,
    #[error("Missing chapter href")]
    MissingChapterHref,

    // Images
    #[error("No images")]
    MissingImages,

    // Search
    #[error("Missing search href")]
    MissingSearchHref,
    #[error("Invalid search url: {0}")]
    InvalidSearchUrl(String),
}

pub type Result<T> = core::result::Result<T, ParseError>;
