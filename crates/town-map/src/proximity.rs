//! Per-tick proximity index.
//!
//! An R-tree (via `rstar`) over one snapshot of agent positions answers
//! "which agents stand within `r` of this point".  The index is rebuilt from
//! scratch each tick with `bulk_load`; positions never move inside it.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use town_core::{AgentId, Point};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct AgentEntry {
    point: [f32; 2],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ProximityIndex ────────────────────────────────────────────────────────────

/// Spatial index over a fixed set of `(AgentId, Point)` pairs.
pub struct ProximityIndex {
    tree: RTree<AgentEntry>,
}

impl ProximityIndex {
    pub fn build(positions: impl IntoIterator<Item = (AgentId, Point)>) -> Self {
        let entries = positions
            .into_iter()
            .map(|(id, p)| AgentEntry { point: [p.x, p.y], id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Agents strictly closer than `radius` to `center`, excluding `exclude`,
    /// in ascending id order.
    pub fn within(&self, center: Point, radius: f32, exclude: AgentId) -> Vec<AgentId> {
        let r2 = radius * radius;
        let query = [center.x, center.y];
        let mut hits: Vec<AgentId> = self
            .tree
            .locate_within_distance(query, r2)
            .filter(|e| e.id != exclude && e.distance_2(&query) < r2)
            .map(|e| e.id)
            .collect();
        hits.sort_unstable();
        hits
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
