//! Paged collection cursor
//!
//! Walks a `{count, results}` listing one item at a time, fetching pages of
//! `limit` items on demand. The latest server `count` is always trusted:
//!
//! - a growing count extends the buffer and later pages fill it
//! - a shrinking count truncates the buffer and clamps `offset` and `next`
//!   to the new end, dropping items past it
//! - a slot the server never filled (short page) yields a decode error once
//!   and the cursor moves past it
//!
//! A cursor is single-owner; it borrows the client for its whole life.

use nordigen_domain::constants::{LIMIT_PARAM, OFFSET_PARAM};
use nordigen_domain::{NordigenError, Page, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::client::Nordigen;
use crate::ports::HttpTransport;
use crate::rest::{GenericResource, QueryParams};

struct Source<'a, T> {
    client: &'a Nordigen<T>,
    path: String,
    filters: QueryParams,
}

/// Cursor over a paged listing of `R`.
pub struct CollectionCursor<'a, R, T> {
    source: Option<Source<'a, T>>,
    count: usize,
    limit: usize,
    offset: usize,
    next: usize,
    results: Vec<Option<R>>,
    fetched: bool,
}

impl<'a, R, T> CollectionCursor<'a, R, T>
where
    R: DeserializeOwned,
    T: HttpTransport,
{
    /// Build a cursor over `path` and fetch the first page.
    ///
    /// # Errors
    /// Returns whatever the first page fetch returns.
    pub fn open(
        client: &'a Nordigen<T>,
        path: String,
        filters: QueryParams,
        limit: usize,
    ) -> Result<Self> {
        let mut cursor = Self {
            source: Some(Source { client, path, filters }),
            count: 0,
            limit: limit.max(1),
            offset: 0,
            next: 0,
            results: Vec::new(),
            fetched: false,
        };
        cursor.fetch()?;
        Ok(cursor)
    }

    /// A cursor with nothing behind it; `next` is immediately exhausted.
    pub fn empty() -> Self {
        Self {
            source: None,
            count: 0,
            limit: 0,
            offset: 0,
            next: 0,
            results: Vec::new(),
            fetched: false,
        }
    }

    /// Total reported by the server on the last fetch, `0` before any.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Items requested per page.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index of the item the next call to [`next`](Self::next) returns.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Whether every item has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.source.is_none() || (self.fetched && self.next >= self.count)
    }

    /// Next item, or `Ok(None)` once every item has been handed out.
    ///
    /// # Errors
    /// Propagates a failed page fetch; the cursor does not advance and the
    /// same item can be requested again.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<R>> {
        if self.source.is_none() {
            return Ok(None);
        }

        if self.fetched && self.next >= self.count {
            return Ok(None);
        }

        if !self.fetched || self.next >= self.offset {
            self.fetch()?;
            if self.next >= self.count {
                return Ok(None);
            }
        }

        let index = self.next;
        self.next += 1;

        match self.results.get_mut(index).and_then(Option::take) {
            Some(item) => Ok(Some(item)),
            None => Err(NordigenError::Decode(format!(
                "listing {} has no item at index {index} of {}",
                self.source.as_ref().map_or("", |source| source.path.as_str()),
                self.count
            ))),
        }
    }

    /// Borrowing iterator over the remaining items.
    pub fn items(&mut self) -> Items<'_, 'a, R, T> {
        Items { cursor: self }
    }

    #[instrument(skip_all, fields(offset = self.offset, limit = self.limit))]
    fn fetch(&mut self) -> Result<()> {
        let Some(source) = &self.source else {
            return Ok(());
        };

        let mut query = source.filters.clone();
        query.set(LIMIT_PARAM, self.limit.to_string()).set(OFFSET_PARAM, self.offset.to_string());

        let resource = GenericResource::new(source.client.rest(), source.path.as_str());
        let page: Page<R> = source.client.with_reauth(|| resource.page(&query))?;

        self.apply(page);
        Ok(())
    }

    fn apply(&mut self, page: Page<R>) {
        let start = self.offset;

        if self.results.len() != page.count {
            if page.count < self.results.len() {
                warn!(
                    previous = self.results.len(),
                    count = page.count,
                    "listing shrank between pages, truncating"
                );
            }
            self.results.resize_with(page.count, || None);
        }

        let received = page.results.len();
        for (slot, item) in self.results.iter_mut().skip(start).zip(page.results) {
            *slot = Some(item);
        }

        self.count = page.count;
        self.offset = start.saturating_add(self.limit).min(self.count);
        self.next = self.next.min(self.count);
        self.fetched = true;

        debug!(count = self.count, received, offset = self.offset, "page fetched");
    }
}

/// Iterator returned by [`CollectionCursor::items`].
pub struct Items<'c, 'a, R, T> {
    cursor: &'c mut CollectionCursor<'a, R, T>,
}

impl<R, T> Iterator for Items<'_, '_, R, T>
where
    R: DeserializeOwned,
    T: HttpTransport,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{HttpRequest, HttpResponse};

    struct Unreachable;

    impl HttpTransport for Unreachable {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse> {
            Err(NordigenError::Transport("unreachable".to_string()))
        }
    }

    fn detached(limit: usize) -> CollectionCursor<'static, u32, Unreachable> {
        let mut cursor = CollectionCursor::empty();
        cursor.limit = limit;
        cursor
    }

    #[test]
    fn test_empty_cursor_is_exhausted() {
        let mut cursor: CollectionCursor<'_, u32, Unreachable> = CollectionCursor::empty();

        assert_eq!(cursor.next().unwrap(), None);
        assert_eq!(cursor.count(), 0);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.items().count(), 0);
    }

    #[test]
    fn test_apply_fills_from_offset() {
        let mut cursor = detached(2);

        cursor.apply(Page { count: 5, results: vec![1, 2] });
        cursor.apply(Page { count: 5, results: vec![3, 4] });

        assert_eq!(cursor.count, 5);
        assert_eq!(cursor.offset, 4);
        assert_eq!(cursor.results, vec![Some(1), Some(2), Some(3), Some(4), None]);
    }

    #[test]
    fn test_apply_growing_count_keeps_fetched_items() {
        let mut cursor = detached(2);

        cursor.apply(Page { count: 2, results: vec![1, 2] });
        cursor.apply(Page { count: 4, results: vec![3, 4] });

        assert_eq!(cursor.results, vec![Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(cursor.offset, 4);
    }

    #[test]
    fn test_apply_shrinking_count_clamps() {
        let mut cursor = detached(2);
        cursor.apply(Page { count: 6, results: vec![1, 2] });
        cursor.apply(Page { count: 6, results: vec![3, 4] });
        cursor.next = 4;

        cursor.apply(Page { count: 3, results: vec![5, 6] });

        assert_eq!(cursor.count, 3);
        assert_eq!(cursor.results, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(cursor.offset, 3);
        assert_eq!(cursor.next, 3);
    }

    #[test]
    fn test_apply_ignores_items_past_count() {
        let mut cursor = detached(4);

        cursor.apply(Page { count: 2, results: vec![1, 2, 3, 4] });

        assert_eq!(cursor.results, vec![Some(1), Some(2)]);
        assert_eq!(cursor.offset, 2);
    }
}
