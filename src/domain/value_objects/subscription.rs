use std::collections::HashSet;

/// Per-session record of which lead ids hold an active server-side interest
/// registration. At most one entry per id. The server keeps no subscription
/// state across connection loss, so the whole set is replayed on reconnect.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    ids: HashSet<i64>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the id was newly registered.
    pub fn add(&mut self, id: i64) -> bool {
        self.ids.insert(id)
    }

    /// Returns true if the id was registered.
    pub fn remove(&mut self, id: i64) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Ids to replay after (re)connect, in stable order for test visibility.
    pub fn replay_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
