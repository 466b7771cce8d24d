//! Search-results parsing and candidate selection.

use scraper::{Html, Selector};
use unicode_normalization::UnicodeNormalization;

use crate::error::LookupError;

/// One entry from the search listing: display title plus detail-page link.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

/// Extract title/link pairs from a search-results page. Entries without a
/// usable link or title are skipped.
pub fn parse_search_results(html: &str) -> Result<Vec<SearchHit>, LookupError> {
    let document = Html::parse_document(html);
    let article_selector =
        Selector::parse("#dle-content article.block.story.shortstory.mod-poster")
            .map_err(|e| LookupError::Parse(e.to_string()))?;
    let link_selector =
        Selector::parse("h2.title a").map_err(|e| LookupError::Parse(e.to_string()))?;

    let mut hits = Vec::new();
    for article in document.select(&article_selector) {
        let Some(link) = article.select(&link_selector).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let title = collapse_ws(&link.text().collect::<String>());
        if href.is_empty() || title.is_empty() {
            continue;
        }
        hits.push(SearchHit {
            title,
            url: href.to_string(),
        });
    }
    Ok(hits)
}

/// Pick the best candidate for a title query.
///
/// Exact (case-insensitive, NFC-folded) equality wins; otherwise substring
/// containment in either direction, ranked by Jaro-Winkler similarity
/// against the query; otherwise the first listed result. An empty listing
/// is "no match".
pub fn select_best_match<'a>(title: &str, hits: &'a [SearchHit]) -> Option<&'a SearchHit> {
    let wanted = normalize(title);
    if wanted.is_empty() {
        return hits.first();
    }

    if let Some(hit) = hits.iter().find(|h| normalize(&h.title) == wanted) {
        return Some(hit);
    }

    let mut best: Option<(&'a SearchHit, f64)> = None;
    for hit in hits {
        let have = normalize(&hit.title);
        if have.contains(&wanted) || wanted.contains(&have) {
            let score = strsim::jaro_winkler(&wanted, &have);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((hit, score));
            }
        }
    }

    best.map(|(hit, _)| hit).or_else(|| hits.first())
}

/// Case-fold and NFC-normalize a title, collapsing runs of whitespace.
fn normalize(s: &str) -> String {
    collapse_ws(&s.nfc().collect::<String>().to_lowercase())
}

/// Trim and collapse internal whitespace runs to single spaces.
pub(crate) fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
