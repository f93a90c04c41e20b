use glam::DVec3;
use rustc_hash::FxHashMap;

/// Default merge distance for vertex welding, in planet units.
///
/// Shared-edge midpoints computed from opposite directions differ by a few
/// ulps, far below this; genuinely distinct vertices at the deepest
/// subdivision of a planet-sized sphere sit far above it.
pub const WELD_EPSILON: f64 = 1e-4;

/// Position-keyed index map with epsilon-tolerant equality.
///
/// Positions are quantized to an epsilon-sized grid; a lookup probes the
/// position's own cell and its 26 neighbors and accepts a candidate only
/// within epsilon distance. Two positions within epsilon of each other
/// always resolve to the same index no matter where the cell boundaries
/// fall, and positions farther apart than epsilon never do.
pub struct VertexWelder {
    cells: FxHashMap<(i64, i64, i64), Vec<(DVec3, u32)>>,
    epsilon: f64,
    len: usize,
}

impl Default for VertexWelder {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexWelder {
    pub fn new() -> Self {
        Self::with_epsilon(WELD_EPSILON)
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            cells: FxHashMap::default(),
            epsilon,
            len: 0,
        }
    }

    fn cell_of(&self, position: DVec3) -> (i64, i64, i64) {
        (
            (position.x / self.epsilon).round() as i64,
            (position.y / self.epsilon).round() as i64,
            (position.z / self.epsilon).round() as i64,
        )
    }

    /// Looks up the index of a previously inserted position within epsilon.
    pub fn find(&self, position: DVec3) -> Option<u32> {
        let (cx, cy, cz) = self.cell_of(position);
        let limit_sq = self.epsilon * self.epsilon;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(entries) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &(recorded, index) in entries {
                        if recorded.distance_squared(position) <= limit_sq {
                            return Some(index);
                        }
                    }
                }
            }
        }
        None
    }

    /// Records a position under its own cell. The caller has already pushed
    /// the vertex and owns the index assignment.
    pub fn insert(&mut self, position: DVec3, index: u32) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push((position, index));
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }
}
