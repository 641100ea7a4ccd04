use serde::Serialize;

/// Upper bound on page size accepted from callers.
pub const MAX_PER_PAGE: usize = 100;

/// One page of an ordered result list. Page numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slices `items` into the requested page.
///
/// `per_page` is clamped to `1..=MAX_PER_PAGE` and `page` to
/// `1..=total_pages`, so an out-of-range request returns the nearest real
/// page instead of an empty one. An empty input yields page 1 of 1 with no
/// items.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

impl<T> Page<T> {
    /// Converts the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_middle_last_pages() {
        let items: Vec<u32> = (1..=25).collect();
        let first = paginate(&items, 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 25);

        let last = paginate(&items, 3, 10);
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(paginate(&items, 0, 2).page, 1);
        let beyond = paginate(&items, 99, 2);
        assert_eq!(beyond.page, 3);
        assert_eq!(beyond.items, vec![5]);
    }

    #[test]
    fn per_page_is_clamped() {
        let items: Vec<u32> = (1..=300).collect();
        assert_eq!(paginate(&items, 1, 0).per_page, 1);
        assert_eq!(paginate(&items, 1, 1_000).items.len(), MAX_PER_PAGE);
    }

    #[test]
    fn empty_input_is_single_empty_page() {
        let page = paginate::<u32>(&[], 4, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn map_keeps_metadata() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 2, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_items, 3);
    }
}
