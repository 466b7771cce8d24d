//! The lookup façade: search, select, fetch, parse.

use crate::client::SiteClient;
use crate::config::SessionConfig;
use crate::error::{LookupError, ProviderError};
use crate::record::{BookRecord, MetadataQuery};
use crate::{detail, search};

/// One provider instance per session. Holds only immutable settings and
/// the HTTP client; lookups share no mutable state.
pub struct RanobesProvider {
    client: SiteClient,
}

impl RanobesProvider {
    pub fn new(config: &SessionConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: SiteClient::new(config)?,
        })
    }

    /// Run one lookup: search the site, pick the best candidate by title,
    /// fetch its detail page, and extract the record. `Ok(None)` means the
    /// search produced no candidates.
    pub async fn lookup(&self, query: &MetadataQuery) -> Result<Option<BookRecord>, LookupError> {
        let listing = self.client.search_page(&query.search_text()).await?;
        let hits = search::parse_search_results(&listing)?;

        let Some(hit) = search::select_best_match(&query.title, &hits) else {
            tracing::info!(query = %query.title, "no search results");
            return Ok(None);
        };
        tracing::debug!(title = %hit.title, url = %hit.url, "selected candidate");

        let page = self.client.fetch_page(&hit.url).await?;
        let record = detail::parse_detail_page(&page)?;
        tracing::info!(query = %query.title, matched = %record.title, "lookup complete");
        Ok(Some(record))
    }
}
