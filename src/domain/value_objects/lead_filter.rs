use crate::domain::entities::lead::LeadStatus;
use serde::{Deserialize, Serialize};

/// Query window for the lead list. Changing anything other than the page
/// number resets the page to 1, since the old offset no longer means
/// anything under the new filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadFilter {
    pub page: u32,
    pub limit: u32,
    pub status: Option<LeadStatus>,
    pub search: Option<String>,
}

impl Default for LeadFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            search: None,
        }
    }
}

impl LeadFilter {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self.page = 1;
        self
    }

    pub fn with_status(mut self, status: Option<LeadStatus>) -> Self {
        self.status = status;
        self.page = 1;
        self
    }

    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self.page = 1;
        self
    }
}
