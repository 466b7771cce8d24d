//! Detail-page field extraction.
//!
//! All extraction is scoped to the page's schema.org Book article. Each
//! field has its own extractor returning success-or-absent; only a missing
//! block or title fails the parse as a whole.

use scraper::{ElementRef, Html, Selector};

use crate::error::LookupError;
use crate::record::{BookRecord, SeriesEntry};
use crate::search::collapse_ws;

const BOOK_BLOCK: &str = r#"article[itemtype="http://schema.org/Book"]"#;

/// Parse one detail page into a [`BookRecord`].
pub fn parse_detail_page(html: &str) -> Result<BookRecord, LookupError> {
    let document = Html::parse_document(html);
    let block_selector =
        Selector::parse(BOOK_BLOCK).map_err(|e| LookupError::Parse(e.to_string()))?;
    let block = document
        .select(&block_selector)
        .next()
        .ok_or_else(|| LookupError::Parse("detail page has no book block".to_string()))?;

    let title = extract_title(block)
        .ok_or_else(|| LookupError::Parse("detail page has no title".to_string()))?;

    Ok(BookRecord {
        title,
        subtitle: extract_text(block, "span.subtitle"),
        authors: extract_authors(block),
        series: extract_series(block),
        description: extract_description(block),
        cover_url: extract_cover(block),
        genres: extract_links(block, "#mc-fs-genre a"),
        tags: extract_links(block, r#"[itemprop="keywords"] a"#),
        publish_year: extract_text(block, r#"[itemprop="dateCreated"]"#),
        publisher: extract_publisher(block),
        language: extract_text(block, r#"[itemprop="locationCreated"]"#),
        duration_secs: extract_duration(block),
    })
}

fn sel(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// First non-empty text node directly under `h1.title`. The subtitle span
/// is a child element, so its text does not leak into the title.
fn extract_title(block: ElementRef) -> Option<String> {
    let selector = sel("h1.title")?;
    let h1 = block.select(&selector).next()?;
    h1.children()
        .filter_map(|node| node.value().as_text())
        .map(|text| collapse_ws(text))
        .find(|t| !t.is_empty())
}

fn extract_text(block: ElementRef, selector: &str) -> Option<String> {
    let selector = sel(selector)?;
    let el = block.select(&selector).next()?;
    let text = collapse_ws(&el.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn extract_links(block: ElementRef, selector: &str) -> Vec<String> {
    let Some(selector) = sel(selector) else {
        return Vec::new();
    };
    block
        .select(&selector)
        .map(|a| collapse_ws(&a.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Author names are usually anchors inside the itemprop span; some pages
/// annotate the name element directly.
fn extract_authors(block: ElementRef) -> Vec<String> {
    let nested = extract_links(block, r#"[itemprop="author"] a"#);
    if !nested.is_empty() {
        return nested;
    }
    extract_links(block, r#"[itemprop="author"]"#)
}

fn extract_series(block: ElementRef) -> Option<SeriesEntry> {
    let text = extract_text(block, "#mc-fs-series a")?;
    Some(split_series(&text))
}

/// "Name #3" splits into name and sequence; without a `#` (or with nothing
/// after it) the whole text is the name.
fn split_series(text: &str) -> SeriesEntry {
    if let Some((name, seq)) = text.rsplit_once('#') {
        let name = name.trim();
        let seq = seq.trim();
        if !name.is_empty() && !seq.is_empty() {
            return SeriesEntry {
                name: name.to_string(),
                sequence: Some(seq.to_string()),
            };
        }
    }
    SeriesEntry {
        name: text.trim().to_string(),
        sequence: None,
    }
}

/// Text fragments of the description block joined with newlines, matching
/// the paragraph structure of the page. Entities are already decoded by the
/// HTML parser.
fn extract_description(block: ElementRef) -> Option<String> {
    let selector = sel(r#"[itemprop="description"]"#)?;
    let el = block.select(&selector).next()?;
    let text = el
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    (!text.is_empty()).then_some(text)
}

/// The cover is an inline `background-image: url(...)` on the poster figure.
fn extract_cover(block: ElementRef) -> Option<String> {
    let selector = sel(".poster figure.cover")?;
    let style = block.select(&selector).next()?.value().attr("style")?;
    let re = regex::Regex::new(r"url\(([^)]*)\)").ok()?;
    let url = re
        .captures(style)?
        .get(1)?
        .as_str()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    (!url.is_empty()).then(|| url.to_string())
}

fn extract_publisher(block: ElementRef) -> Option<String> {
    let publishers = extract_links(block, "span.publishers_list span a");
    (!publishers.is_empty()).then(|| publishers.join(", "))
}

/// `timeRequired` carries an ISO-8601 duration; the site only writes whole
/// hours ("PT164H").
fn extract_duration(block: ElementRef) -> Option<u64> {
    let selector = sel(r#"[itemprop="timeRequired"]"#)?;
    let content = block.select(&selector).next()?.value().attr("content")?;
    let re = regex::Regex::new(r"^PT(\d+)H").ok()?;
    let hours: u64 = re.captures(content)?.get(1)?.as_str().parse().ok()?;
    Some(hours * 3600)
}
