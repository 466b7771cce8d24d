//! Typed metadata records produced by the detail-page parser.

/// A lookup request from the host: free-text title, optional author.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataQuery {
    pub title: String,
    pub author: Option<String>,
}

impl MetadataQuery {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
        }
    }

    /// The text sent to the site's search endpoint.
    pub fn search_text(&self) -> String {
        match &self.author {
            Some(author) if !author.trim().is_empty() => {
                format!("{} {}", self.title.trim(), author.trim())
            }
            _ => self.title.trim().to_string(),
        }
    }
}

/// Series membership parsed from a detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    pub name: String,
    /// Position within the series, kept as the site's own text ("1", "3.5").
    pub sequence: Option<String>,
}

/// Everything extractable from one detail page. A record exists only if the
/// page parsed and a title was found; every other field degrades to absent
/// independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub series: Option<SeriesEntry>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub publish_year: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub duration_secs: Option<u64>,
}
