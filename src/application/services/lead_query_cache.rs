use crate::application::ports::RestClient;
use crate::domain::entities::{Lead, Page};
use crate::domain::value_objects::LeadFilter;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

struct QueryState {
    window: Page<Lead>,
    filter: LeadFilter,
    loaded: bool,
    stale: bool,
}

/// Local mirror of the current page/filter window of the lead list.
///
/// Updates merge by identity only. List-level create/delete push events
/// refetch the window with the stored filter instead of splicing, because
/// insertion position depends on server-side sort semantics the client
/// does not know.
pub struct LeadQueryCache {
    rest: Arc<dyn RestClient>,
    state: RwLock<QueryState>,
}

impl LeadQueryCache {
    pub fn new(rest: Arc<dyn RestClient>, default_limit: u32) -> Self {
        Self {
            rest,
            state: RwLock::new(QueryState {
                window: Page::empty(default_limit),
                filter: LeadFilter {
                    limit: default_limit,
                    ..LeadFilter::default()
                },
                loaded: false,
                stale: false,
            }),
        }
    }

    /// Always issues a fresh fetch; a window cached under one filter says
    /// nothing about another. On error the prior window is kept.
    pub async fn load(&self, filter: LeadFilter) -> Result<Page<Lead>, AppError> {
        let window = self.rest.list_leads(&filter).await?;
        let mut state = self.state.write().await;
        state.window = window.clone();
        state.filter = filter;
        state.loaded = true;
        state.stale = false;
        Ok(window)
    }

    /// Refetches the current window with the stored filter.
    pub async fn reload(&self) -> Result<Page<Lead>, AppError> {
        let filter = self.state.read().await.filter.clone();
        self.load(filter).await
    }

    pub async fn window(&self) -> Page<Lead> {
        self.state.read().await.window.clone()
    }

    pub async fn filter(&self) -> LeadFilter {
        self.state.read().await.filter.clone()
    }

    pub async fn is_stale(&self) -> bool {
        self.state.read().await.stale
    }

    /// Identity-matched replace. An id outside the current window belongs
    /// to a page not being shown; ignoring it is correct, not an error.
    pub async fn apply_updated(&self, lead: &Lead) -> bool {
        let mut state = self.state.write().await;
        match state.window.items.iter().position(|l| l.id == lead.id) {
            Some(pos) => {
                state.window.items[pos] = lead.clone();
                true
            }
            None => {
                debug!(lead_id = lead.id, "Update outside current window; ignored");
                false
            }
        }
    }

    /// A create from another actor invalidates the window; refetch rather
    /// than guess the insertion position.
    pub async fn apply_created(&self, lead: &Lead) {
        debug!(lead_id = lead.id, "Remote create; refetching window");
        self.refetch_window().await;
    }

    /// A remote delete likewise invalidates the window.
    pub async fn apply_deleted(&self, id: i64) {
        debug!(lead_id = id, "Remote delete; refetching window");
        self.refetch_window().await;
    }

    /// Prepends a server-confirmed local create. The window cap and the
    /// pages invariant are maintained locally until the next fetch.
    pub async fn apply_local_created(&self, lead: Lead) {
        let mut state = self.state.write().await;
        if state.window.items.iter().any(|l| l.id == lead.id) {
            return;
        }
        state.window.items.insert(0, lead);
        let limit = state.window.limit as usize;
        state.window.items.truncate(limit);
        let total = state.window.total + 1;
        state.window.set_total(total);
    }

    /// Removes a server-confirmed local delete by identity.
    pub async fn apply_local_deleted(&self, id: i64) {
        let mut state = self.state.write().await;
        let before = state.window.items.len();
        state.window.items.retain(|l| l.id != id);
        if state.window.items.len() < before {
            let total = state.window.total.saturating_sub(1);
            state.window.set_total(total);
        }
    }

    async fn refetch_window(&self) {
        let filter = {
            let state = self.state.read().await;
            if !state.loaded {
                return;
            }
            state.filter.clone()
        };
        match self.rest.list_leads(&filter).await {
            Ok(window) => {
                let mut state = self.state.write().await;
                state.window = window;
                state.stale = false;
            }
            Err(err) => {
                warn!("Window refetch failed; marking stale: {}", err);
                self.state.write().await.stale = true;
            }
        }
    }
}
