//! Pagination over `search_read`
//!
//! Walks a result set page by page, advancing the offset by exactly the
//! number of records the previous page returned and stopping on the first
//! empty page. The pager holds no state beyond the current offset, so every
//! fresh pager restarts from zero with fresh round trips.

use futures::stream::{self, Stream, TryStreamExt};
use odoo_domain::{Domain, Result};
use serde_json::Value;

use crate::client::{OdooClient, SearchReadOptions};

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Field selection, ordering and page size for a paginated read.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Fields to return; `None` means all readable fields
    pub fields: Option<Vec<String>>,
    /// Server-side ordering clause
    pub order: Option<String>,
    /// Records requested per round trip
    pub page_size: u64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { fields: None, order: None, page_size: DEFAULT_PAGE_SIZE }
    }
}

/// Lazy page-walker over `search_read` results.
pub struct SearchReadPager<'a> {
    client: &'a OdooClient,
    model: String,
    domain: Domain,
    options: PageOptions,
    offset: u64,
    exhausted: bool,
}

impl<'a> SearchReadPager<'a> {
    pub(crate) fn new(
        client: &'a OdooClient,
        model: impl Into<String>,
        domain: Domain,
        options: PageOptions,
    ) -> Self {
        Self { client, model: model.into(), domain, options, offset: 0, exhausted: false }
    }

    /// Offset the next page will be requested at.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Fetch the next page of records.
    ///
    /// Returns an empty list once the sequence is exhausted; subsequent
    /// calls issue no further round trips.
    pub async fn next_page(&mut self) -> Result<Vec<Value>> {
        if self.exhausted {
            return Ok(Vec::new());
        }

        let options = SearchReadOptions {
            fields: self.options.fields.clone(),
            offset: self.offset,
            limit: Some(self.options.page_size),
            order: self.options.order.clone(),
        };
        let records = self.client.search_read(&self.model, self.domain.clone(), &options).await?;

        if records.is_empty() {
            self.exhausted = true;
        } else {
            // advance by exactly what came back, not by the page size
            self.offset += records.len() as u64;
        }
        Ok(records)
    }

    /// Flatten the pages into a stream of records.
    pub fn into_stream(self) -> impl Stream<Item = Result<Value>> + 'a {
        stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            if page.is_empty() {
                Ok::<_, odoo_domain::OdooError>(None)
            } else {
                Ok(Some((page, pager)))
            }
        })
        .map_ok(|page| stream::iter(page.into_iter().map(Ok::<Value, odoo_domain::OdooError>)))
        .try_flatten()
    }

    /// Drain every remaining page into one list.
    pub async fn collect_all(mut self) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        loop {
            let page = self.next_page().await?;
            if page.is_empty() {
                return Ok(records);
            }
            records.extend(page);
        }
    }
}

impl OdooClient {
    /// Iterate `search_read` results page by page without exposing
    /// offset/limit bookkeeping to the caller.
    pub fn iter_search_read(
        &self,
        model: &str,
        domain: Domain,
        options: PageOptions,
    ) -> SearchReadPager<'_> {
        SearchReadPager::new(self, model, domain, options)
    }
}
