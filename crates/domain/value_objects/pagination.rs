use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// 1-based page window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Pages below 1 fall back to the first page; non-positive sizes fall back to the default.
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_page_size: i64) -> Self {
        let default_page_size = if default_page_size >= 1 {
            default_page_size
        } else {
            DEFAULT_PAGE_SIZE
        };

        Self {
            page: page.filter(|page| *page >= 1).unwrap_or(1),
            page_size: page_size
                .filter(|size| *size >= 1)
                .unwrap_or(default_page_size),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Pages an already materialised, already ordered result set.
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let total_count = items.len() as i64;
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);

        Page {
            items: items.into_iter().skip(offset).take(limit).collect(),
            total_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}
