//! Fixed-size pagination

use std::num::NonZeroUsize;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// Number of pages for `total` rows; never less than one
pub fn total_pages(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get()).max(1)
}

/// Clamp a 1-based page number into `[1, total_pages]`
pub fn clamp_page(page: usize, total: usize, page_size: NonZeroUsize) -> usize {
    page.clamp(1, total_pages(total, page_size))
}

/// Index range of `page` (1-based) clipped to `total`
pub fn page_range(total: usize, page_size: NonZeroUsize, page: usize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);
    start..end
}

/// Metadata describing one page of a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: NonZeroUsize,
    pub total_pages: usize,
    pub total_rows: usize,
}

impl PageInfo {
    pub fn new(total_rows: usize, page_size: NonZeroUsize, page: usize) -> Self {
        Self {
            page: clamp_page(page, total_rows, page_size),
            page_size,
            total_pages: total_pages(total_rows, page_size),
            total_rows,
        }
    }

    pub fn range(&self) -> Range<usize> {
        page_range(self.total_rows, self.page_size, self.page)
    }

    /// 1-based position of the first row shown, 0 when empty
    pub fn first_row(&self) -> usize {
        let range = self.range();
        if range.is_empty() {
            0
        } else {
            range.start + 1
        }
    }

    /// 1-based position of the last row shown
    pub fn last_row(&self) -> usize {
        self.range().end
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pager controls are only shown when there is more than one page
    pub fn shows_pager(&self) -> bool {
        self.total_pages > 1
    }
}

/// Pager controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Prev,
    Next,
    Last,
}

impl PageNav {
    pub fn is_enabled(self, info: &PageInfo) -> bool {
        match self {
            Self::First | Self::Prev => info.has_prev(),
            Self::Next | Self::Last => info.has_next(),
        }
    }

    /// Page reached by this control, `None` when it is disabled
    pub fn target(self, info: &PageInfo) -> Option<usize> {
        if !self.is_enabled(info) {
            return None;
        }
        Some(match self {
            Self::First => 1,
            Self::Prev => info.page - 1,
            Self::Next => info.page + 1,
            Self::Last => info.total_pages,
        })
    }
}

/// Slice a page out of an ordered sequence
pub fn paginate<'a, T>(items: &'a [T], info: &PageInfo) -> &'a [T] {
    let range = info.range();
    &items[range.start.min(items.len())..range.end.min(items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn twenty_five_rows_make_three_pages() {
        let rows: Vec<usize> = (1..=25).collect();

        let first = PageInfo::new(rows.len(), size(10), 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(paginate(&rows, &first), (1..=10).collect::<Vec<_>>().as_slice());
        assert!(!PageNav::Prev.is_enabled(&first));
        assert!(!PageNav::First.is_enabled(&first));
        assert!(PageNav::Next.is_enabled(&first));

        let last = PageInfo::new(rows.len(), size(10), 3);
        assert_eq!(paginate(&rows, &last), &[21, 22, 23, 24, 25]);
        assert!(!PageNav::Next.is_enabled(&last));
        assert!(!PageNav::Last.is_enabled(&last));
        assert_eq!((last.first_row(), last.last_row()), (21, 25));
    }

    #[test]
    fn empty_set_has_one_page() {
        let info = PageInfo::new(0, DEFAULT_PAGE_SIZE, 1);
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.page, 1);
        assert_eq!(info.first_row(), 0);
        assert!(paginate::<u8>(&[], &info).is_empty());
        assert!(!info.shows_pager());
    }

    #[test]
    fn out_of_range_pages_clamp() {
        assert_eq!(PageInfo::new(25, size(10), 9).page, 3);
        assert_eq!(PageInfo::new(25, size(10), 0).page, 1);
    }

    #[test]
    fn nav_targets() {
        let mid = PageInfo::new(50, size(10), 3);
        assert_eq!(PageNav::First.target(&mid), Some(1));
        assert_eq!(PageNav::Prev.target(&mid), Some(2));
        assert_eq!(PageNav::Next.target(&mid), Some(4));
        assert_eq!(PageNav::Last.target(&mid), Some(5));

        let first = PageInfo::new(50, size(10), 1);
        assert_eq!(PageNav::Prev.target(&first), None);
    }

    proptest! {
        #[test]
        fn prop_pages_concatenate_to_whole(total in 0usize..200, page_size in 1usize..25) {
            let items: Vec<usize> = (0..total).collect();
            let page_size = size(page_size);
            let pages = total_pages(total, page_size);

            let mut joined = Vec::new();
            for page in 1..=pages {
                let info = PageInfo::new(total, page_size, page);
                let slice = paginate(&items, &info);
                prop_assert!(slice.len() <= page_size.get());
                if page < pages {
                    prop_assert_eq!(slice.len(), page_size.get());
                }
                joined.extend_from_slice(slice);
            }
            prop_assert_eq!(joined, items);
        }
    }
}
