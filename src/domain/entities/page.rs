use serde::{Deserialize, Serialize};

/// One page/filter window of a server collection plus pagination metadata.
/// Invariant: `pages == ceil(total / limit)` and `items.len() <= limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    pub fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            limit,
            pages: 0,
        }
    }

    pub fn compute_pages(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(limit as u64) as u32
    }

    /// Recompute `pages` after a local total adjustment.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.pages = Self::compute_pages(total, self.limit);
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(10)
    }
}
