use crate::application::ports::RestClient;
use crate::application::services::transport_session::TransportSession;
use crate::domain::entities::{Activity, Lead};
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Unfocused,
    Loading(i64),
    Focused(i64),
}

impl FocusState {
    pub fn lead_id(&self) -> Option<i64> {
        match self {
            FocusState::Unfocused => None,
            FocusState::Loading(id) | FocusState::Focused(id) => Some(*id),
        }
    }
}

struct DetailState {
    focus: FocusState,
    epoch: u64,
    lead: Option<Lead>,
    activities: Vec<Activity>,
}

/// Holds the single focused lead and its activity timeline, and owns the
/// push subscription for that lead.
///
/// Every focus transition bumps an epoch counter; fetch continuations
/// re-check it before applying, so a response that arrives after the
/// context moved on is discarded instead of clobbering the newer focus.
pub struct LeadDetailCache {
    rest: Arc<dyn RestClient>,
    session: Arc<TransportSession>,
    state: RwLock<DetailState>,
}

impl LeadDetailCache {
    pub fn new(rest: Arc<dyn RestClient>, session: Arc<TransportSession>) -> Self {
        Self {
            rest,
            session,
            state: RwLock::new(DetailState {
                focus: FocusState::Unfocused,
                epoch: 0,
                lead: None,
                activities: Vec::new(),
            }),
        }
    }

    /// Fetches the lead and its activities and opens the subscription for
    /// `id`, releasing the previous one first. A fetch failure with a
    /// still-current epoch reverts to Unfocused and surfaces the error.
    pub async fn focus(&self, id: i64) -> Result<(), AppError> {
        let (epoch, prev) = {
            let mut state = self.state.write().await;
            let prev = state.focus.lead_id();
            state.epoch += 1;
            state.focus = FocusState::Loading(id);
            state.lead = None;
            state.activities.clear();
            (state.epoch, prev)
        };

        match prev {
            Some(prev_id) if prev_id != id => {
                self.session.unsubscribe_lead(prev_id).await;
                self.session.subscribe_lead(id).await;
            }
            Some(_) => {}
            None => self.session.subscribe_lead(id).await,
        }

        let lead = match self.rest.get_lead(id).await {
            Ok(lead) => lead,
            Err(err) => {
                self.abort_focus(epoch, id).await;
                return Err(err);
            }
        };
        let activities = match self.rest.list_activities(id).await {
            Ok(activities) => activities,
            Err(err) => {
                self.abort_focus(epoch, id).await;
                return Err(err);
            }
        };

        let mut state = self.state.write().await;
        if state.epoch != epoch {
            debug!(lead_id = id, "Discarding stale focus fetch");
            return Ok(());
        }
        state.focus = FocusState::Focused(id);
        state.lead = Some(lead);
        state.activities = activities;
        info!(lead_id = id, "Lead focused");
        Ok(())
    }

    /// Releases the subscription and clears local detail state.
    pub async fn unfocus(&self) {
        let prev = {
            let mut state = self.state.write().await;
            let prev = state.focus.lead_id();
            state.epoch += 1;
            state.focus = FocusState::Unfocused;
            state.lead = None;
            state.activities.clear();
            prev
        };
        if let Some(id) = prev {
            self.session.unsubscribe_lead(id).await;
        }
    }

    /// Identity-matched replace, only while `lead.id` is the focused id.
    pub async fn apply_record_updated(&self, lead: Lead) -> bool {
        let mut state = self.state.write().await;
        if state.focus == FocusState::Focused(lead.id) {
            state.lead = Some(lead);
            true
        } else {
            false
        }
    }

    /// Prepends the activity when it belongs to the focused lead. A
    /// redelivered activity replaces its existing entry in place, keeping
    /// the operation idempotent.
    pub async fn apply_activity_created(&self, activity: Activity) -> bool {
        let mut state = self.state.write().await;
        if state.focus != FocusState::Focused(activity.lead_id) {
            return false;
        }
        match state.activities.iter().position(|a| a.id == activity.id) {
            Some(pos) => state.activities[pos] = activity,
            None => state.activities.insert(0, activity),
        }
        true
    }

    /// Clears the detail view when the focused lead was deleted remotely
    /// or by a confirmed local action.
    pub async fn apply_record_deleted(&self, id: i64) -> bool {
        let cleared = {
            let mut state = self.state.write().await;
            if state.focus.lead_id() != Some(id) {
                return false;
            }
            state.epoch += 1;
            state.focus = FocusState::Unfocused;
            state.lead = None;
            state.activities.clear();
            true
        };
        if cleared {
            info!(lead_id = id, "Focused lead deleted; clearing detail view");
            self.session.unsubscribe_lead(id).await;
        }
        cleared
    }

    pub async fn focus_state(&self) -> FocusState {
        self.state.read().await.focus
    }

    pub async fn current_lead(&self) -> Option<Lead> {
        self.state.read().await.lead.clone()
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.state.read().await.activities.clone()
    }

    // A failed fetch only reverts state if no newer focus has started.
    async fn abort_focus(&self, epoch: u64, id: i64) {
        let reverted = {
            let mut state = self.state.write().await;
            if state.epoch != epoch {
                return;
            }
            state.focus = FocusState::Unfocused;
            state.lead = None;
            state.activities.clear();
            true
        };
        if reverted {
            self.session.unsubscribe_lead(id).await;
        }
    }
}
