use serde::{Deserialize, Serialize};
use validator::Validate;

/// Page window accepted by every listing endpoint. Pages are 1-based;
/// there is no upper bound on `page` — a window past the last row simply
/// comes back empty with `total`/`pages` still correct.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 1))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub size: Option<i64>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            size: Some(10),
        }
    }
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.size()
    }
}

/// Listing envelope: one page of items plus the filtered row count.
/// `total` is counted with the listing's filter applied, so it reflects
/// matching rows, not the whole collection.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, params: &PageParams) -> Self {
        let size = params.size();
        Self {
            items,
            total,
            page: params.page(),
            size,
            pages: (total + size - 1) / size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            pages: self.pages,
        }
    }
}
