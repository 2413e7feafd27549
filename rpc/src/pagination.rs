//! Cursor-based pagination over the node's range queries.
//!
//! A [`PageManager`] walks one range `[start, end]` in pages of `limit`
//! entries. Each successful forward fetch that returns a last key appends a
//! continuation page starting at that key, so the page list only ever grows
//! and earlier pages can be re-fetched with [`PageManager::prev`]. Nothing is
//! cached: every move issues a fresh remote call.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::RpcError;

/// Default page size when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Clamp a requested page size to `[1, MAX_PAGE_SIZE]`.
pub fn effective_limit(requested: u32) -> u32 {
    requested.clamp(1, MAX_PAGE_SIZE)
}

/// One request window of a range query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<K> {
    pub start: K,
    pub end: K,
    pub limit: u32,
    /// Key of the last entry already seen; the node resumes after it.
    pub last_order: Option<K>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page out of range")]
    OutOfRange,

    #[error("range exhausted")]
    RangeExhausted,

    #[error("page fetch failed: {0}")]
    Fetch(#[from] RpcError),
}

/// Fetches one page: the entries plus the key of the last entry, if any.
pub type FetchFn<K, R> = Box<dyn FnMut(&Page<K>) -> Result<(Vec<R>, Option<K>), RpcError> + Send>;

/// A pagination session over one range.
///
/// Invariant: `current`, once set, is a valid index into `pages`.
pub struct PageManager<K, R> {
    pages: Vec<Page<K>>,
    current: Option<usize>,
    end: K,
    fetch: FetchFn<K, R>,
}

impl<K: Clone, R> PageManager<K, R> {
    /// Open a session over `[start, end]` with one initial page and no cursor.
    pub fn new<F>(start: K, end: K, limit: u32, fetch: F) -> Self
    where
        F: FnMut(&Page<K>) -> Result<(Vec<R>, Option<K>), RpcError> + Send + 'static,
    {
        let first = Page {
            start,
            end: end.clone(),
            limit: effective_limit(limit),
            last_order: None,
        };
        Self {
            pages: vec![first],
            current: None,
            end,
            fetch: Box::new(fetch),
        }
    }

    /// Fetch the page after the current one.
    pub fn next(&mut self) -> Result<Vec<R>, PageError> {
        let index = self.current.map_or(0, |c| c + 1);
        let page = self.pages.get(index).ok_or(PageError::OutOfRange)?;

        let limit = page.limit;

        debug!(page = index, limit, "fetching next page");
        let (items, last_key) = (self.fetch)(page)?;
        if items.is_empty() {
            return Err(PageError::RangeExhausted);
        }

        if index + 1 == self.pages.len() {
            if let Some(key) = last_key {
                let continuation = Page {
                    start: key.clone(),
                    end: self.end.clone(),
                    limit,
                    last_order: Some(key),
                };
                self.pages.push(continuation);
            }
        }
        self.current = Some(index);
        Ok(items)
    }

    /// Re-fetch the page before the current one. Forward pages are kept.
    pub fn prev(&mut self) -> Result<Vec<R>, PageError> {
        let index = match self.current {
            Some(c) if c > 0 => c - 1,
            _ => return Err(PageError::OutOfRange),
        };
        let page = &self.pages[index];

        debug!(page = index, "fetching previous page");
        let (items, _) = (self.fetch)(page)?;
        if items.is_empty() {
            return Err(PageError::RangeExhausted);
        }
        self.current = Some(index);
        Ok(items)
    }

    /// Index of the page last returned, `None` before the first fetch.
    pub fn current_page(&self) -> Option<usize> {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page<K>> {
        self.pages.get(index)
    }
}

impl<K: std::fmt::Debug, R> std::fmt::Debug for PageManager<K, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageManager")
            .field("pages", &self.pages)
            .field("current", &self.current)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

/// Split a fetched list into entries and the key of its last entry.
pub fn with_last_key<R, K>(items: Vec<R>, key_of: impl Fn(&R) -> K) -> (Vec<R>, Option<K>) {
    let last = items.last().map(key_of);
    (items, last)
}
