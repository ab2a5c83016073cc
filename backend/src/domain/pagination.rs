//! Page-number pagination for collection reads.

use serde::Serialize;
use thiserror::Error;

/// Items returned per page.
pub const PAGE_SIZE: u32 = 30;

/// Requested page number was zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page must be at least 1")]
pub struct InvalidPage;

/// One-based page selection.
///
/// ```
/// use tenant_directory::domain::PageRequest;
///
/// let page = PageRequest::new(2).expect("valid page");
/// assert_eq!(page.offset(), 30);
/// assert_eq!(page.limit(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
}

impl PageRequest {
    /// Select `page`, rejecting zero.
    ///
    /// # Errors
    /// [`InvalidPage`] when `page == 0`.
    pub const fn new(page: u32) -> Result<Self, InvalidPage> {
        if page == 0 {
            return Err(InvalidPage);
        }
        Ok(Self { page })
    }

    /// First page.
    #[must_use]
    pub const fn first() -> Self {
        Self { page: 1 }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * PAGE_SIZE as u64
    }

    /// Rows to take.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        PAGE_SIZE
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of a collection plus the collection size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: u32,
    /// Maximum rows per page.
    pub per_page: u32,
    /// Rows visible across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `request`.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            per_page: PAGE_SIZE,
            total,
        }
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn page_zero_is_rejected() {
        assert_eq!(PageRequest::new(0), Err(InvalidPage));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 30)]
    #[case(5, 120)]
    fn offset_skips_whole_pages(#[case] page: u32, #[case] offset: u64) {
        let request = PageRequest::new(page).expect("non-zero page");
        assert_eq!(request.offset(), offset);
    }

    #[test]
    fn largest_page_does_not_overflow() {
        let request = PageRequest::new(u32::MAX).expect("non-zero page");
        assert_eq!(request.offset(), (u64::from(u32::MAX) - 1) * 30);
    }

    #[test]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::first(), 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!((page.page, page.per_page, page.total), (1, 30, 2));
    }
}
