use async_trait::async_trait;
use mockall::mock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use swiftcrm_client::application::ports::{
    PushConnection, PushConnector, PushSink, RestClient, TransportEvent,
};
use swiftcrm_client::domain::entities::{
    Activity, ActivityDraft, DashboardStats, Lead, LeadDraft, Page, PerformanceRow,
};
use swiftcrm_client::domain::events::OutboundMessage;
use swiftcrm_client::domain::value_objects::LeadFilter;
use swiftcrm_client::shared::error::AppError;

mock! {
    pub RestClientPort {}

    #[async_trait]
    impl RestClient for RestClientPort {
        async fn list_leads(&self, filter: &LeadFilter) -> Result<Page<Lead>, AppError>;
        async fn get_lead(&self, id: i64) -> Result<Lead, AppError>;
        async fn create_lead(&self, draft: &LeadDraft) -> Result<Lead, AppError>;
        async fn update_lead(&self, id: i64, draft: &LeadDraft) -> Result<Lead, AppError>;
        async fn delete_lead(&self, id: i64) -> Result<(), AppError>;
        async fn list_activities(&self, lead_id: i64) -> Result<Vec<Activity>, AppError>;
        async fn create_activity(&self, draft: &ActivityDraft) -> Result<Activity, AppError>;
        async fn dashboard_stats(&self) -> Result<DashboardStats, AppError>;
        async fn team_performance(&self) -> Result<Vec<PerformanceRow>, AppError>;
    }
}

pub type MockRestClient = MockRestClientPort;

/// In-memory stand-in for the CRM server. Leads are stored newest-first,
/// matching the server's default sort.
pub struct FakeBackend {
    leads: Mutex<Vec<Lead>>,
    activities: Mutex<Vec<Activity>>,
    performance: Mutex<Vec<PerformanceRow>>,
    next_id: AtomicI64,
    pub list_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    fail_lists: AtomicBool,
    fail_gets: AtomicBool,
    reject_writes: AtomicBool,
    get_delays_ms: Mutex<HashMap<i64, u64>>,
    canned_update: Mutex<Option<Lead>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            leads: Mutex::new(Vec::new()),
            activities: Mutex::new(Vec::new()),
            performance: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
            list_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
            fail_lists: AtomicBool::new(false),
            fail_gets: AtomicBool::new(false),
            reject_writes: AtomicBool::new(false),
            get_delays_ms: Mutex::new(HashMap::new()),
            canned_update: Mutex::new(None),
        }
    }

    pub fn seed_leads(&self, leads: Vec<Lead>) {
        *self.leads.lock().unwrap() = leads;
    }

    pub fn seed_activities(&self, activities: Vec<Activity>) {
        *self.activities.lock().unwrap() = activities;
    }

    pub fn seed_performance(&self, rows: Vec<PerformanceRow>) {
        *self.performance.lock().unwrap() = rows;
    }

    pub fn server_leads(&self) -> Vec<Lead> {
        self.leads.lock().unwrap().clone()
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Delays subsequent `get_lead(id)` responses, for stale-response races.
    pub fn delay_get(&self, id: i64, millis: u64) {
        self.get_delays_ms.lock().unwrap().insert(id, millis);
    }

    /// The canonical record the server returns for the next update,
    /// regardless of the submitted draft.
    pub fn set_canned_update(&self, lead: Lead) {
        *self.canned_update.lock().unwrap() = Some(lead);
    }

    fn matches(lead: &Lead, filter: &LeadFilter) -> bool {
        if let Some(status) = filter.status {
            if lead.status != status {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            let in_name = lead.name.to_lowercase().contains(&needle);
            let in_company = lead
                .company
                .as_deref()
                .map(|c| c.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !in_name && !in_company {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl RestClient for FakeBackend {
    async fn list_leads(&self, filter: &LeadFilter) -> Result<Page<Lead>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(AppError::Fetch("list endpoint unavailable".to_string()));
        }
        let filtered: Vec<Lead> = self
            .leads
            .lock()
            .unwrap()
            .iter()
            .filter(|lead| Self::matches(lead, filter))
            .cloned()
            .collect();
        let total = filtered.len() as u64;
        let start = ((filter.page - 1) * filter.limit) as usize;
        let items: Vec<Lead> = filtered
            .into_iter()
            .skip(start)
            .take(filter.limit as usize)
            .collect();
        Ok(Page {
            items,
            total,
            page: filter.page,
            limit: filter.limit,
            pages: Page::<Lead>::compute_pages(total, filter.limit),
        })
    }

    async fn get_lead(&self, id: i64) -> Result<Lead, AppError> {
        let delay = self.get_delays_ms.lock().unwrap().get(&id).copied();
        if let Some(millis) = delay {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(AppError::Fetch("lead endpoint unavailable".to_string()));
        }
        self.leads
            .lock()
            .unwrap()
            .iter()
            .find(|lead| lead.id == id)
            .cloned()
            .ok_or_else(|| AppError::Fetch(format!("Lead {id} not found")))
    }

    async fn create_lead(&self, draft: &LeadDraft) -> Result<Lead, AppError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::ActionRejected("validation failed".to_string()));
        }
        let now = chrono::Utc::now();
        let lead = Lead {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            company: draft.company.clone(),
            status: draft
                .status
                .unwrap_or(swiftcrm_client::domain::entities::LeadStatus::New),
            source: draft.source.clone(),
            estimated_value: draft.estimated_value.unwrap_or(0.0),
            assigned_to: None,
            created_by: None,
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.leads.lock().unwrap().insert(0, lead.clone());
        Ok(lead)
    }

    async fn update_lead(&self, id: i64, draft: &LeadDraft) -> Result<Lead, AppError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::ActionRejected("validation failed".to_string()));
        }
        if let Some(canned) = self.canned_update.lock().unwrap().take() {
            let mut leads = self.leads.lock().unwrap();
            if let Some(pos) = leads.iter().position(|l| l.id == canned.id) {
                leads[pos] = canned.clone();
            }
            return Ok(canned);
        }
        let mut leads = self.leads.lock().unwrap();
        let lead = leads
            .iter_mut()
            .find(|lead| lead.id == id)
            .ok_or_else(|| AppError::Fetch(format!("Lead {id} not found")))?;
        lead.name = draft.name.clone();
        if let Some(status) = draft.status {
            lead.status = status;
        }
        if let Some(value) = draft.estimated_value {
            lead.estimated_value = value;
        }
        lead.notes = draft.notes.clone();
        lead.updated_at = chrono::Utc::now();
        Ok(lead.clone())
    }

    async fn delete_lead(&self, id: i64) -> Result<(), AppError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::ActionRejected("delete not allowed".to_string()));
        }
        self.leads.lock().unwrap().retain(|lead| lead.id != id);
        Ok(())
    }

    async fn list_activities(&self, lead_id: i64) -> Result<Vec<Activity>, AppError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(AppError::Fetch("activity endpoint unavailable".to_string()));
        }
        Ok(self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|activity| activity.lead_id == lead_id)
            .cloned()
            .collect())
    }

    async fn create_activity(&self, draft: &ActivityDraft) -> Result<Activity, AppError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::ActionRejected("validation failed".to_string()));
        }
        let activity = Activity {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            lead_id: draft.lead_id,
            kind: draft.kind,
            title: draft.title.clone(),
            description: draft.description.clone(),
            user: None,
            created_at: chrono::Utc::now(),
        };
        self.activities.lock().unwrap().insert(0, activity.clone());
        Ok(activity)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let leads = self.leads.lock().unwrap();
        Ok(DashboardStats {
            total_leads: leads.len() as u64,
            total_value: leads.iter().map(|l| l.estimated_value).sum(),
            conversion_rate: 0.0,
            leads_by_status: HashMap::new(),
            leads_by_source: Vec::new(),
            monthly_trend: Vec::new(),
            recent_activities: Vec::new(),
        })
    }

    async fn team_performance(&self) -> Result<Vec<PerformanceRow>, AppError> {
        Ok(self.performance.lock().unwrap().clone())
    }
}

/// One scripted push connection: tests emit transport events through
/// `events` and observe outbound messages in `sent`.
#[derive(Clone)]
pub struct FakeLink {
    pub events: mpsc::UnboundedSender<TransportEvent>,
    pub sent: Arc<Mutex<Vec<OutboundMessage>>>,
    pub closed: Arc<AtomicBool>,
}

impl FakeLink {
    pub fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear_sent(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

struct FakeSink {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl PushSink for FakeSink {
    async fn send(&self, message: OutboundMessage) -> Result<(), AppError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(AppError::Transport("connection closed".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub struct FakeConnector {
    links: Mutex<Vec<FakeLink>>,
    fail_connect: AtomicBool,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            fail_connect: AtomicBool::new(false),
        }
    }

    pub fn fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    pub fn link_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn link(&self, index: usize) -> FakeLink {
        self.links.lock().unwrap()[index].clone()
    }

    pub fn last_link(&self) -> FakeLink {
        self.links.lock().unwrap().last().cloned().expect("no link")
    }
}

#[async_trait]
impl PushConnector for FakeConnector {
    async fn connect(&self, _token: &str) -> Result<PushConnection, AppError> {
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(AppError::Transport("handshake refused".to_string()));
        }
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        self.links.lock().unwrap().push(FakeLink {
            events: events_tx,
            sent: sent.clone(),
            closed: closed.clone(),
        });
        Ok(PushConnection {
            sink: Arc::new(FakeSink { sent, closed }),
            events: events_rx,
        })
    }
}
