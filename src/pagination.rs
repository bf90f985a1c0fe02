use serde::Serialize;

/// Items shown per page on storefront and back-office listings.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Page selection applied to a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page, 1-based.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

impl Pagination {
    /// Offset of the first item on the page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.per_page
    }
}

/// A single page of results together with paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }

    /// Page an already-materialized list, used when ranking happens in
    /// memory after retrieval.
    pub fn from_vec(items: Vec<T>, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total_pages = items.len().div_ceil(per_page);
        let paged = items
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();
        Self::new(paged, page, total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_pages_in_memory() {
        let paged = Paginated::from_vec((1..=25).collect::<Vec<_>>(), 2, 10);
        assert_eq!(paged.page, 2);
        assert_eq!(paged.total_pages, 3);
        assert_eq!(paged.items, (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn from_vec_clamps_page_to_one() {
        let paged = Paginated::from_vec(vec![1, 2, 3], 0, 2);
        assert_eq!(paged.page, 1);
        assert_eq!(paged.items, vec![1, 2]);
    }
}
