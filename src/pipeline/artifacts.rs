//! In-memory, request-keyed chart artifact store.

use crate::types::ChartArtifact;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Bounded store of rendered chart artifacts, keyed by request id.
///
/// Keys are per-request UUIDs, never timeframe labels, so concurrent
/// requests for the same timeframe cannot observe each other's charts.
/// Oldest artifacts are evicted once the capacity is reached.
pub struct ArtifactStore {
    charts: DashMap<Uuid, Arc<ChartArtifact>>,
    order: Mutex<VecDeque<Uuid>>,
    capacity: usize,
}

impl ArtifactStore {
    /// Create a new store retaining at most `capacity` artifacts.
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            charts: DashMap::new(),
            order: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        })
    }

    /// Insert an artifact under its request id, evicting the oldest
    /// entries if needed.
    pub fn insert(&self, request_id: Uuid, artifact: Arc<ChartArtifact>) {
        self.charts.insert(request_id, artifact);

        let mut order = self.order.lock().expect("artifact order lock poisoned");
        order.push_back(request_id);
        while order.len() > self.capacity {
            if let Some(evicted) = order.pop_front() {
                self.charts.remove(&evicted);
            }
        }
    }

    pub fn get(&self, request_id: &Uuid) -> Option<Arc<ChartArtifact>> {
        self.charts.get(request_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(tag: u8) -> Arc<ChartArtifact> {
        Arc::new(ChartArtifact {
            bytes: vec![tag; 4],
            content_type: "image/png",
        })
    }

    #[test]
    fn test_insert_and_get() {
        let store = ArtifactStore::new(8);
        let id = Uuid::new_v4();

        store.insert(id, artifact(1));

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.bytes, vec![1; 4]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_unknown_id() {
        let store = ArtifactStore::new(8);
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = ArtifactStore::new(2);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

        for (i, id) in ids.iter().enumerate() {
            store.insert(*id, artifact(i as u8));
        }

        assert_eq!(store.len(), 2);
        assert!(store.get(&ids[0]).is_none());
        assert!(store.get(&ids[1]).is_some());
        assert!(store.get(&ids[2]).is_some());
    }

    #[test]
    fn test_distinct_requests_distinct_keys() {
        let store = ArtifactStore::new(8);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.insert(a, artifact(1));
        store.insert(b, artifact(2));

        assert_eq!(store.get(&a).unwrap().bytes, vec![1; 4]);
        assert_eq!(store.get(&b).unwrap().bytes, vec![2; 4]);
    }
}
