//! Bounded FIFO cache for forward-geocode lookups.

use std::collections::{HashMap, VecDeque};

use crate::map::GeoCandidate;

/// Maps a free-text query to its resolved candidates.
///
/// Insertion past capacity evicts the oldest *inserted* entry (FIFO, not
/// LRU: reads do not refresh an entry's position). Empty results are
/// cached too, so a failing query is not retried within a session.
#[derive(Debug)]
pub struct GeocodeCache {
    capacity: usize,
    entries: HashMap<String, Vec<GeoCandidate>>,
    order: VecDeque<String>,
}

impl GeocodeCache {
    /// A cache holding at most `capacity` queries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn get(&self, query: &str) -> Option<&[GeoCandidate]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    /// Stores candidates for a query, evicting the oldest entry when the
    /// cache is full. Re-inserting an existing query replaces its value
    /// without affecting eviction order.
    pub fn insert(&mut self, query: String, candidates: Vec<GeoCandidate>) {
        if self.entries.insert(query.clone(), candidates).is_some() {
            return;
        }
        self.order.push_back(query);
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
