//! Host-facing wire schema (Audiobookshelf custom metadata provider).
//!
//! Field names and shapes follow the host contract exactly; absent values
//! serialize as `null` / empty lists. The site never exposes narrator,
//! ISBN, or ASIN, so those stay `null` for schema parity.

use serde::{Deserialize, Serialize};

use crate::record::{BookRecord, SeriesEntry};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesMatch {
    pub series: String,
    pub sequence: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookMatch {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub narrator: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<String>,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub isbn: Option<String>,
    pub asin: Option<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub series: Vec<SeriesMatch>,
    pub language: Option<String>,
    pub duration: Option<u64>,
}

impl From<SeriesEntry> for SeriesMatch {
    fn from(entry: SeriesEntry) -> Self {
        Self {
            series: entry.name,
            sequence: entry.sequence,
        }
    }
}

impl From<BookRecord> for BookMatch {
    fn from(record: BookRecord) -> Self {
        let author = if record.authors.is_empty() {
            None
        } else {
            Some(record.authors.join(", "))
        };
        Self {
            title: record.title,
            subtitle: record.subtitle,
            author,
            narrator: None,
            publisher: record.publisher,
            published_year: record.publish_year,
            description: record.description,
            cover: record.cover_url,
            isbn: None,
            asin: None,
            genres: record.genres,
            tags: record.tags,
            series: record.series.into_iter().map(SeriesMatch::from).collect(),
            language: record.language,
            duration: record.duration_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BookRecord {
        BookRecord {
            title: "Shadow Slave".to_string(),
            subtitle: Some("Web Novel".to_string()),
            authors: vec!["Guiltythree".to_string(), "Cocollab".to_string()],
            series: Some(SeriesEntry {
                name: "Shadow Slave".to_string(),
                sequence: Some("1".to_string()),
            }),
            description: Some("Growing up in poverty.".to_string()),
            cover_url: Some("/uploads/p.jpg".to_string()),
            genres: vec!["Fantasy".to_string()],
            tags: vec!["Dungeons".to_string()],
            publish_year: Some("2022".to_string()),
            publisher: Some("Webnovel".to_string()),
            language: Some("English".to_string()),
            duration_secs: Some(590400),
        }
    }

    #[test]
    fn test_wire_field_names_match_host_schema() {
        let json = serde_json::to_value(BookMatch::from(sample_record())).unwrap();
        assert_eq!(json["title"], "Shadow Slave");
        assert_eq!(json["author"], "Guiltythree, Cocollab");
        assert_eq!(json["publishedYear"], "2022");
        assert_eq!(json["series"][0]["series"], "Shadow Slave");
        assert_eq!(json["series"][0]["sequence"], "1");
        assert_eq!(json["duration"], 590400);
        // Unfillable fields are present as null, not dropped.
        assert!(json["narrator"].is_null());
        assert!(json["isbn"].is_null());
        assert!(json["asin"].is_null());
    }

    #[test]
    fn test_wire_round_trips() {
        let sent = BookMatch::from(sample_record());
        let body = serde_json::to_string(&sent).unwrap();
        let received: BookMatch = serde_json::from_str(&body).unwrap();
        assert_eq!(received, sent);
    }

    #[test]
    fn test_no_authors_serializes_null_author() {
        let mut record = sample_record();
        record.authors.clear();
        let json = serde_json::to_value(BookMatch::from(record)).unwrap();
        assert!(json["author"].is_null());
    }
}
