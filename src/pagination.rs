//! Skip/top pagination for Insightly list endpoints.

use std::future::Future;

use serde::Serialize;

use crate::error::Result;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 10_000;

/// A page of results from a `GetAll` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Offset of the first item on this page.
    pub skip: u32,
    /// Requested page size.
    pub top: u32,
    /// Whether another request could return more items.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and the request's skip/top.
    ///
    /// A page that is empty or shorter than `top` is the last one.
    #[must_use]
    pub fn new(items: Vec<T>, skip: u32, top: u32) -> Self {
        let has_more = !items.is_empty() && items.len() >= top as usize;
        Self {
            items,
            skip,
            top,
            has_more,
        }
    }

    /// Offset for the request after this one.
    #[must_use]
    pub fn next_skip(&self) -> u32 {
        self.skip.saturating_add(self.top)
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            skip: self.skip,
            top: self.top,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Query parameters for paginated requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaginationParams {
    /// Number of items to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Maximum number of items to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
}

impl PaginationParams {
    /// Create pagination params for a specific window.
    #[must_use]
    pub fn window(skip: u32, top: u32) -> Self {
        Self {
            skip: Some(skip),
            top: Some(top),
        }
    }
}

/// Fetch pages with an increasing `skip` until a short or empty page.
///
/// `fetch_page` is called with `(skip, top)`. Given N items in total and a
/// page size of `top`, this issues `N / top + 1` requests.
pub async fn collect_all<T, F, Fut>(top: u32, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let top = top.max(1);
    let mut all_items = Vec::new();
    let mut skip = 0;
    let mut pages = 0;

    loop {
        let page = fetch_page(skip, top).await?;
        let has_more = page.has_more;
        skip = page.next_skip();
        all_items.extend(page.items);
        pages += 1;

        if !has_more {
            break;
        }

        // Safety limit to prevent infinite loops
        if pages >= MAX_PAGES {
            tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
            break;
        }
    }

    Ok(all_items)
}
