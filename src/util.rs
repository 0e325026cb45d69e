use chrono::NaiveDate;
use regex::Regex;
use reqwest::Url;
use scraper::ElementRef;

use crate::parse_error::{ParseError, Result};

lazy_static! {
    static ref CHAPTER_RANGE: Regex = Regex::new(r"\s*([0-9]+)(\s-\s)([0-9]+)\s*").unwrap();
    static ref CHAPTER_EXTRA: Regex = Regex::new(r"\s*([0-9]+\sЭкстра)\s*").unwrap();
    static ref CHAPTER_SINGLE: Regex = Regex::new(r"\s*Сингл\s*").unwrap();
    static ref IMAGE_PARTS: Regex = Regex::new(r#"'.*?','.*?',".*?""#).unwrap();
    static ref QUOTES: Regex = Regex::new(r#"["']+"#).unwrap();
}

const NEW_CHAPTER_MARKER: &str = " новое";
const LONG_TITLE: usize = 25;
const ELLIPSIS: char = '…';

const CHAPTER_DATE_FORMATS: [&str; 2] = [
    // 15.03.21
    "%d.%m.%y",
    // 15/03/21
    "%d/%m/%y",
];

const READER_INIT_START: &str = "rm_h.init( [";
const READER_INIT_END: &str = "], 0, false);";
const STATIC_ASSET_PREFIX: &str = "/static/";
const MANGA_PATH_SUFFIX: &str = "/manga/";

/// Text of an element with whitespace collapsed, the way a browser renders it.
pub fn text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

///
/// Drop scheme and host from `href`, keeping path, query and fragment
///
/// Relative hrefs are returned unchanged
pub fn url_without_domain(href: &str) -> String {
    match Url::parse(href) {
        Ok(url) => {
            let mut path = url.path().to_owned();
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(query);
            }
            if let Some(fragment) = url.fragment() {
                path.push('#');
                path.push_str(fragment);
            }
            path
        }
        Err(_) => href.to_owned(),
    }
}

///
/// Resolve a stored path against the site base
///
/// Paths are always taken relative to the base, so a base with a path
/// (`https://host/mirror`) keeps its path for every request.
pub fn absolute_url(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|_| ParseError::InvalidUrl(path.to_owned()))
}

pub fn strip_new_marker(name: &str) -> String {
    name.strip_suffix(NEW_CHAPTER_MARKER)
        .unwrap_or(name)
        .trim()
        .to_owned()
}

///
/// Remove the words of a long manga title from the start of a chapter name
///
/// # Example
/// title = "Моя жизнь в качестве героини отомэ-игры"
/// name = "Моя жизнь в качестве героини отомэ-игры 1 - 5"
/// will return "1 - 5"
///
/// Titles of 25 characters or less are left alone.
/// Every title word is stripped once, so a name that repeats a leading
/// title word ("в в 1 - 5") keeps the repetition until the next call.
pub fn strip_title_words(name: &str, manga_title: &str) -> String {
    let mut name = name.trim();
    if manga_title.chars().count() > LONG_TITLE {
        for word in manga_title.split(' ') {
            name = name.strip_prefix(word).unwrap_or(name).trim();
        }
    }
    name.to_owned()
}

/// Cut a truncated series name like "Длинное назв… 3 - 12" down to "3 - 12".
pub fn strip_ellipsis_prefix(name: &str) -> String {
    let dots = name.find(ELLIPSIS);
    let numbers = name.find(|c: char| c.is_ascii_digit()).unwrap_or(0);

    match dots {
        Some(dots) if dots < numbers => name[dots + ELLIPSIS.len_utf8()..].trim().to_owned(),
        _ => name.to_owned(),
    }
}

/// Full cleanup of a chapter link text.
pub fn clean_chapter_name(link_text: &str, manga_title: &str) -> String {
    let name = strip_new_marker(link_text);
    let name = strip_title_words(&name, manga_title);
    strip_ellipsis_prefix(&name)
}

/// Epoch millis of a chapter date, `0` when neither format matches.
pub fn parse_chapter_date(date: &str) -> i64 {
    let date = date.trim();
    for format in CHAPTER_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|datetime| datetime.and_utc().timestamp_millis())
                .unwrap_or(0);
        }
    }
    warn!("Could not parse chapter date '{}'", date);
    0
}

///
/// Chapter number derived from a cleaned chapter name
///
/// - "12 - 34" -> 34
/// - "5 Экстра" -> -2, extras have no place in the reading order
/// - "Сингл" -> 1, oneshots and doujinshi
pub fn chapter_number(name: &str) -> Option<f32> {
    if let Some(captures) = CHAPTER_RANGE.captures(name) {
        return captures.get(3).and_then(|number| number.as_str().parse().ok());
    }
    if CHAPTER_EXTRA.is_match(name) {
        return Some(-2.0);
    }
    if CHAPTER_SINGLE.is_match(name) {
        return Some(1.0);
    }
    None
}

/// The `(server, path, file)` triples of the reader initializer, in script order.
pub fn reader_image_parts(body: &str) -> Result<Vec<(String, String, String)>> {
    let begin = body.find(READER_INIT_START).ok_or(ParseError::MissingImages)?;
    let end = body[begin..]
        .find(READER_INIT_END)
        .map(|end| begin + end)
        .ok_or(ParseError::MissingImages)?;
    let arguments = &body[begin..end];

    let parts = IMAGE_PARTS
        .find_iter(arguments)
        .filter_map(|found| {
            let unquoted = QUOTES.replace_all(found.as_str(), "");
            let mut split = unquoted.split(',');
            let server = split.next()?.to_owned();
            let path = split.next()?.to_owned();
            let file = split.next()?.to_owned();
            Some((server, path, file))
        })
        .collect();

    Ok(parts)
}

/// Image url of one reader triple.
pub fn resolve_image_url(base: &str, server: &str, path: &str, file: &str) -> String {
    if path.is_empty() && file.starts_with(STATIC_ASSET_PREFIX) {
        format!("{}{}", base, file)
    } else if path.ends_with(MANGA_PATH_SUFFIX) {
        format!("{}{}", server, file)
    } else {
        format!("{}{}{}", path, server, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_TITLE: &str = "Моя жизнь в качестве героини отомэ-игры";

    #[test]
    fn domain_is_dropped() {
        assert_eq!(
            url_without_domain("https://mintmanga.live/berserk/vol1/1?mtr=1"),
            "/berserk/vol1/1?mtr=1"
        );
        assert_eq!(url_without_domain("/berserk"), "/berserk");
        assert_eq!(url_without_domain("/berserk/vol1/1?mtr=1"), "/berserk/vol1/1?mtr=1");
    }

    #[test]
    fn relative_to_base() {
        let base = Url::parse("https://mintmanga.live").unwrap();
        assert_eq!(
            absolute_url(&base, "/berserk/vol1/1?mtr=1").unwrap().as_str(),
            "https://mintmanga.live/berserk/vol1/1?mtr=1"
        );

        let mirror = Url::parse("https://host.example/mirror").unwrap();
        assert_eq!(
            absolute_url(&mirror, "/berserk").unwrap().as_str(),
            "https://host.example/mirror/berserk"
        );
        let mirror = Url::parse("https://host.example/mirror/").unwrap();
        assert_eq!(
            absolute_url(&mirror, "berserk").unwrap().as_str(),
            "https://host.example/mirror/berserk"
        );
    }

    #[test]
    fn new_marker() {
        assert_eq!(strip_new_marker("  1 - 5 новое"), "1 - 5");
        assert_eq!(strip_new_marker("1 - 5"), "1 - 5");
    }

    #[test]
    fn title_words() {
        let name = format!("{} 1 - 5", LONG_TITLE);
        assert_eq!(strip_title_words(&name, LONG_TITLE), "1 - 5");

        // Short titles are kept
        assert_eq!(strip_title_words("Берсерк 1 - 5", "Берсерк"), "Берсерк 1 - 5");
    }

    #[test]
    fn title_words_repeated_word() {
        let title = "в поисках утраченного времени и пространства";
        let once = strip_title_words("в в 1 - 5", title);
        assert_eq!(once, "в 1 - 5");
        assert_eq!(strip_title_words(&once, title), "1 - 5");
    }

    // Holds for names that do not repeat a leading title word
    #[test]
    fn title_words_idempotent() {
        let names = [
            format!("{} 1 - 5", LONG_TITLE),
            format!("{} 2 - 10 Экстра", LONG_TITLE),
            String::from("3 - 12"),
            String::from("Сингл"),
        ];
        for name in names {
            let once = strip_title_words(&name, LONG_TITLE);
            let twice = strip_title_words(&once, LONG_TITLE);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn ellipsis() {
        assert_eq!(strip_ellipsis_prefix("Длинное назв… 3 - 12"), "3 - 12");
        // Ellipsis after the first digit is part of the name
        assert_eq!(strip_ellipsis_prefix("3 - 12 Продолжение…"), "3 - 12 Продолжение…");
        // No digits at all
        assert_eq!(strip_ellipsis_prefix("Сингл…"), "Сингл…");
        assert_eq!(strip_ellipsis_prefix("1 - 1"), "1 - 1");
    }

    #[test]
    fn ellipsis_remnant_never_survives() {
        let names = ["Назва… 1 - 2", "Очень длинное… Название… 4 - 8", "А…Б 10 - 100"];
        for name in names {
            let cleaned = strip_ellipsis_prefix(name);
            let remnant = &name[..name.find(ELLIPSIS).unwrap()];
            assert!(!cleaned.starts_with(remnant), "{} kept {}", cleaned, remnant);
        }
    }

    #[test]
    fn clean_name() {
        let text = format!("{} 2 - 14 новое", LONG_TITLE);
        assert_eq!(clean_chapter_name(&text, LONG_TITLE), "2 - 14");
        assert_eq!(clean_chapter_name("Очень длинное… 3 - 12", "Берсерк"), "3 - 12");
    }

    #[test]
    fn chapter_date() {
        let dotted = parse_chapter_date("15.03.21");
        let slashed = parse_chapter_date("15/03/21");
        assert_eq!(dotted, slashed);
        assert_eq!(dotted, 1_615_766_400_000);
        assert_eq!(parse_chapter_date(" 01.01.20 "), 1_577_836_800_000);
        assert_eq!(parse_chapter_date("not-a-date"), 0);
        assert_eq!(parse_chapter_date(""), 0);
    }

    #[test]
    fn number() {
        assert_eq!(chapter_number("12 - 34"), Some(34.0));
        assert_eq!(chapter_number("Том 2 - 7.5"), Some(7.0));
        assert_eq!(chapter_number("5 Экстра"), Some(-2.0));
        assert_eq!(chapter_number("Сингл"), Some(1.0));
        assert_eq!(chapter_number("Vol 3"), None);
        assert_eq!(chapter_number("12-34"), None);
    }

    #[test]
    fn image_urls() {
        let base = "https://mintmanga.live";
        assert_eq!(
            resolve_image_url(base, "http://img.example/", "", "/static/foo.jpg"),
            "https://mintmanga.live/static/foo.jpg"
        );
        assert_eq!(
            resolve_image_url(base, "http://s1/", "http://x/manga/", "bar.jpg"),
            "http://s1/bar.jpg"
        );
        assert_eq!(resolve_image_url(base, "a", "b", "c"), "bac");
    }

    #[test]
    fn image_parts() {
        let body = r#"<script>
            rm_h.init( [['https://h1.rmr.rocks/','auto/15/58/12/',"01.png_res.jpg",1100,1600],['','',"/static/02.jpg",1100,1600]], 0, false);
        </script>"#;
        let parts = reader_image_parts(body).unwrap();
        assert_eq!(
            parts,
            vec![
                (
                    String::from("https://h1.rmr.rocks/"),
                    String::from("auto/15/58/12/"),
                    String::from("01.png_res.jpg")
                ),
                (String::new(), String::new(), String::from("/static/02.jpg")),
            ]
        );
    }

    #[test]
    fn image_parts_missing_init() {
        assert!(matches!(
            reader_image_parts("<html></html>"),
            Err(ParseError::MissingImages)
        ));
        assert!(matches!(
            reader_image_parts("rm_h.init( [['a','b',\"c\"]"),
            Err(ParseError::MissingImages)
        ));
    }
}
