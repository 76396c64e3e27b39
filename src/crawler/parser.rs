//! HTML parsers for listing and detail pages
//!
//! Listing pages yield the detail page URLs of the movies they show; detail
//! pages yield one `MovieRecord`. Every field of a detail page is extracted
//! independently, so a missing element only blanks its own field.

use crate::movie::MovieRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Marker text ("released") carried by the info line holding the release date
const RELEASED_MARKER: &str = "上映";

/// Name-link anchors inside movie cards on a listing page
const DETAIL_LINK_SELECTOR: &str = ".el-card .name";

/// Lazy sequence of absolute detail page URLs found on a listing page
///
/// The document is parsed up front and only the raw `href` values are kept,
/// so the iterator can be held across awaits. URLs are resolved one at a time
/// in document order; hrefs that do not resolve are skipped.
#[derive(Debug)]
pub struct DetailUrls {
    hrefs: std::vec::IntoIter<String>,
    base_url: Url,
}

impl Iterator for DetailUrls {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for href in self.hrefs.by_ref() {
            match self.base_url.join(&href) {
                Ok(detail_url) => {
                    tracing::info!("Get detail url {}", detail_url);
                    return Some(detail_url.to_string());
                }
                Err(e) => {
                    tracing::debug!("Skipping unresolvable href {:?}: {}", href, e);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.hrefs.size_hint().1)
    }
}

/// Parses a listing page into the detail page URLs it links to
///
/// # Arguments
///
/// * `html` - The listing page body
/// * `base_url` - The site base URL that hrefs are resolved against
///
/// # Example
///
/// ```
/// use cinescrape::crawler::parse_index;
/// use url::Url;
///
/// let html = r#"<div class="el-card"><a class="name" href="/detail/1">A</a></div>"#;
/// let base = Url::parse("https://example.com").unwrap();
/// let urls: Vec<String> = parse_index(html, &base).collect();
/// assert_eq!(urls, vec!["https://example.com/detail/1".to_string()]);
/// ```
pub fn parse_index(html: &str, base_url: &Url) -> DetailUrls {
    let document = Html::parse_document(html);

    let hrefs: Vec<String> = match Selector::parse(DETAIL_LINK_SELECTOR) {
        Ok(selector) => document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .collect(),
        Err(_) => Vec::new(),
    };

    DetailUrls {
        hrefs: hrefs.into_iter(),
        base_url: base_url.clone(),
    }
}

/// Parses a detail page into a movie record
///
/// # Field Extraction Rules
///
/// | Field | Source | When missing |
/// |-------|--------|--------------|
/// | cover | `src` of `img.cover` | `None` |
/// | name | text of `a > h2` | empty |
/// | categories | text of each `.categories button span` | empty |
/// | published_time | first `YYYY-MM-DD` in the `.info` element marked as released | `None` |
/// | drama | text of `.drama p` | empty |
/// | score | `p.score` parsed as a number | `None` |
pub fn parse_detail(html: &str) -> MovieRecord {
    let document = Html::parse_document(html);

    MovieRecord {
        cover: extract_cover(&document),
        name: select_text(&document, "a > h2").unwrap_or_default(),
        categories: extract_categories(&document),
        published_time: extract_published_time(&document),
        drama: select_text(&document, ".drama p").unwrap_or_default(),
        score: extract_score(&document),
    }
}

fn extract_cover(document: &Html) -> Option<String> {
    let selector = Selector::parse("img.cover").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("src"))
        .map(str::to_string)
}

fn extract_categories(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(".categories button span") else {
        return Vec::new();
    };

    document.select(&selector).map(element_text).collect()
}

fn extract_published_time(document: &Html) -> Option<String> {
    static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

    let selector = Selector::parse(".info").ok()?;

    let released = join_texts(
        document
            .select(&selector)
            .map(element_text)
            .filter(|text| text.contains(RELEASED_MARKER)),
    )?;

    DATE.find(&released).map(|m| m.as_str().to_string())
}

fn extract_score(document: &Html) -> Option<f64> {
    let text = select_text(document, "p.score")?;
    if text.is_empty() {
        return None;
    }

    match text.parse::<f64>() {
        Ok(score) => Some(score),
        Err(e) => {
            tracing::warn!("Ignoring non-numeric score {:?}: {}", text, e);
            None
        }
    }
}

/// Text of every element matching `selector`, joined with single spaces
///
/// Returns `None` when nothing matches.
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    join_texts(document.select(&selector).map(element_text))
}

fn join_texts(texts: impl Iterator<Item = String>) -> Option<String> {
    let mut matched = false;
    let mut parts = Vec::new();
    for text in texts {
        matched = true;
        if !text.is_empty() {
            parts.push(text);
        }
    }

    matched.then(|| parts.join(" "))
}

/// Element text with whitespace runs collapsed and the ends trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
