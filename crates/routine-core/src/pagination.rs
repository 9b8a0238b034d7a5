//! Offset pagination types for list operations.
//!
//! Pages are 1-indexed. A page beyond the last one is not an error: it
//! comes back empty while its metadata still reports the real totals.

use crate::{RoutineError, RoutineResult};
use serde::{Deserialize, Serialize};

/// Page size bounds applied to client requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Size used when the client does not ask for one.
    pub default_size: u32,
    /// Upper clamp for client supplied sizes.
    pub max_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: PageRequest::DEFAULT_SIZE,
            max_size: PageRequest::MAX_SIZE,
        }
    }
}

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page_number: u32,
    /// The number of items per page.
    pub page_size: u32,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: u32 = 5;
    /// The maximum allowed page size.
    pub const MAX_SIZE: u32 = 20;

    /// Creates a new page request, clamping the size into `1..=MAX_SIZE`.
    #[must_use]
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Builds a page request from raw query values.
    ///
    /// Missing values fall back to page 1 and the default size; sizes above
    /// the maximum are clamped. Values below 1 are rejected.
    pub fn from_query(
        page_number: Option<i64>,
        page_size: Option<i64>,
        limits: PageLimits,
    ) -> RoutineResult<Self> {
        let page_number = page_number.unwrap_or(1);
        if page_number < 1 {
            return Err(RoutineError::invalid_query(format!(
                "pageNumber must be at least 1, got {}",
                page_number
            )));
        }

        let page_size = page_size.unwrap_or_else(|| i64::from(limits.default_size));
        if page_size < 1 {
            return Err(RoutineError::invalid_query(format!(
                "pageSize must be at least 1, got {}",
                page_size
            )));
        }

        Ok(Self {
            page_number: u32::try_from(page_number).unwrap_or(u32::MAX),
            page_size: u32::try_from(page_size)
                .unwrap_or(u32::MAX)
                .min(limits.max_size.max(1)),
        })
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page_number as u64).saturating_sub(1) * self.page_size as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Pagination summary sent alongside a page, outside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Items across all pages.
    pub total_count: u64,
    /// Items per page.
    pub page_size: u32,
    /// Current page (1-indexed).
    pub current_page: u32,
    /// Number of pages.
    pub total_pages: u64,
}

/// One page of a filtered and sorted result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedList<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The total number of items across all pages.
    pub total_count: u64,
    /// The number of items per page.
    pub page_size: u32,
    /// The current page number (1-indexed).
    pub current_page: u32,
    /// The total number of pages, zero when there are no items.
    pub total_pages: u64,
}

impl<T> PagedList<T> {
    /// Wraps an already fetched window of items.
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        let page_size = request.page_size.max(1);
        Self {
            items,
            total_count,
            page_size,
            current_page: request.page_number,
            total_pages: total_count.div_ceil(u64::from(page_size)),
        }
    }

    /// Counts the whole source, then takes the requested window of it.
    #[must_use]
    pub fn create<I>(source: I, request: PageRequest) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let source = source.into_iter();
        let total_count = source.len() as u64;
        let items = source
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.page_size as usize)
            .collect();
        Self::new(items, total_count, request)
    }

    /// Returns true if there is a page before this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if there is a page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.current_page as u64) < self.total_pages
    }

    /// Returns true if the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the pagination summary.
    #[must_use]
    pub const fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset_calculation() {
        assert_eq!(PageRequest::new(1, 5).offset(), 0);
        assert_eq!(PageRequest::new(2, 5).offset(), 5);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
        assert_eq!(PageRequest::new(3, 20).limit(), 20);
    }

    #[test]
    fn test_page_request_max_size() {
        let req = PageRequest::new(1, 1000);
        assert_eq!(req.page_size, PageRequest::MAX_SIZE);
    }

    #[test]
    fn test_page_request_first() {
        let req = PageRequest::first();
        assert_eq!(req.page_number, 1);
        assert_eq!(req.page_size, 5);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_from_query_defaults() {
        let req = PageRequest::from_query(None, None, PageLimits::default()).unwrap();
        assert_eq!(req, PageRequest::new(1, 5));
    }

    #[test]
    fn test_from_query_clamps_size() {
        let req = PageRequest::from_query(Some(2), Some(50), PageLimits::default()).unwrap();
        assert_eq!(req.page_number, 2);
        assert_eq!(req.page_size, 20);

        let limits = PageLimits {
            default_size: 3,
            max_size: 10,
        };
        let req = PageRequest::from_query(None, None, limits).unwrap();
        assert_eq!(req.page_size, 3);
        let req = PageRequest::from_query(None, Some(11), limits).unwrap();
        assert_eq!(req.page_size, 10);
    }

    #[test]
    fn test_from_query_rejects_values_below_one() {
        let err = PageRequest::from_query(Some(0), None, PageLimits::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        let err = PageRequest::from_query(Some(1), Some(0), PageLimits::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(PageRequest::from_query(Some(-3), None, PageLimits::default()).is_err());
    }

    #[test]
    fn test_paged_list_metadata_grid() {
        for total_count in [0u64, 1, 19, 20, 21] {
            for page_size in [1u32, 5, 20] {
                for current_page in [1u32, 2, 100] {
                    let source: Vec<u64> = (0..total_count).collect();
                    let page = PagedList::create(source, PageRequest::new(current_page, page_size));

                    let expected_pages = total_count.div_ceil(u64::from(page_size));
                    assert_eq!(page.total_pages, expected_pages);
                    assert_eq!(page.total_count, total_count);
                    assert_eq!(page.has_next(), u64::from(current_page) < expected_pages);
                    assert_eq!(page.has_previous(), current_page > 1);

                    let skipped = u64::from(current_page - 1) * u64::from(page_size);
                    let expected_len = total_count.saturating_sub(skipped).min(u64::from(page_size));
                    assert_eq!(page.len() as u64, expected_len);
                    if let Some(first) = page.items.first() {
                        assert_eq!(*first, skipped);
                    }
                }
            }
        }
    }

    #[test]
    fn test_twenty_three_companies_third_page() {
        let page = PagedList::create(0..23, PageRequest::new(3, 5));
        assert_eq!(page.len(), 5);
        assert_eq!(page.total_pages, 5);
        assert!(page.has_previous());
        assert!(page.has_next());
        assert_eq!(page.items, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_empty_source_has_zero_pages() {
        let page = PagedList::create(Vec::<i32>::new(), PageRequest::first());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_out_of_range_page_is_empty_with_honest_metadata() {
        let page = PagedList::create(0..7, PageRequest::new(9, 5));
        assert!(page.is_empty());
        assert_eq!(page.total_count, 7);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let page = PagedList::new(vec!["a"], 11, PageRequest::new(2, 5));
        let json = serde_json::to_value(page.metadata()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"totalCount": 11, "pageSize": 5, "currentPage": 2, "totalPages": 3})
        );
    }
}
