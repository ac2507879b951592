use crate::application::ports::RestClient;
use crate::domain::entities::AggregateSnapshot;
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct DashboardState {
    snapshot: AggregateSnapshot,
    stale: bool,
}

/// Read-only dashboard rollups, refreshed wholesale. Push events that may
/// affect aggregates only mark the snapshot stale; recomputing them would
/// need server-side aggregation the client cannot replicate from partial
/// events.
pub struct DashboardCache {
    rest: Arc<dyn RestClient>,
    state: RwLock<DashboardState>,
}

impl DashboardCache {
    pub fn new(rest: Arc<dyn RestClient>) -> Self {
        Self {
            rest,
            state: RwLock::new(DashboardState {
                snapshot: AggregateSnapshot::default(),
                stale: false,
            }),
        }
    }

    /// Replaces the whole snapshot from the stats and performance
    /// endpoints. On error the prior snapshot is kept and stays stale.
    pub async fn refresh(&self) -> Result<AggregateSnapshot, AppError> {
        let stats = self.rest.dashboard_stats().await?;
        let performance = self.rest.team_performance().await?;
        let snapshot = AggregateSnapshot {
            stats: Some(stats),
            performance,
        };
        let mut state = self.state.write().await;
        state.snapshot = snapshot.clone();
        state.stale = false;
        Ok(snapshot)
    }

    pub async fn mark_stale(&self) {
        debug!("Dashboard snapshot marked stale");
        self.state.write().await.stale = true;
    }

    pub async fn is_stale(&self) -> bool {
        self.state.read().await.stale
    }

    pub async fn snapshot(&self) -> AggregateSnapshot {
        self.state.read().await.snapshot.clone()
    }
}
