//! In-memory pickup point index.

use std::collections::HashMap;

use pickpoint_core::{normalize_point_id, Point};

/// Id-addressable set of pickup points.
///
/// Rebuilt wholesale on every load; there is no partial state. Iteration
/// preserves listing order so markers render in a stable order.
#[derive(Debug, Default)]
pub struct PointIndex {
    points: HashMap<String, Point>,
    order: Vec<String>,
}

impl PointIndex {
    /// Atomically replaces the index contents.
    pub fn rebuild(&mut self, points: Vec<Point>) {
        self.points.clear();
        self.order.clear();
        for point in points {
            let id = point.id.clone();
            if self.points.insert(id.clone(), point).is_none() {
                self.order.push(id);
            }
        }
    }

    /// Looks a point up by id; ids missing the namespace prefix are
    /// normalized before the lookup.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Point> {
        self.points.get(&normalize_point_id(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Points in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.order.iter().filter_map(|id| self.points.get(id))
    }
}
