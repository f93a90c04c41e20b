use glam::DVec3;
use rustc_hash::FxHashMap;

use tellus_math::{DAabb, triangle_centroid, uv_from_unit};

/// Default number of grid cells along each UV axis.
pub const DEFAULT_GRID_RESOLUTION: u32 = 64;

/// Integer grid coordinate of one collision chunk, derived from the
/// equirectangular UV of a triangle centroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkKey {
    pub i: i32,
    pub j: i32,
}

/// One spatial bucket of terrain geometry: a bounding box plus the displaced
/// vertex positions of every triangle whose centroid landed in the cell.
#[derive(Clone, Debug)]
pub struct ColliderChunk {
    pub bounds: DAabb,
    pub positions: Vec<DVec3>,
}

impl ColliderChunk {
    fn from_triangle(corners: [DVec3; 3]) -> Self {
        let mut bounds = DAabb::new(corners[0], corners[0]);
        bounds.expand_to(corners[1]);
        bounds.expand_to(corners[2]);
        Self {
            bounds,
            positions: corners.to_vec(),
        }
    }

    fn accumulate(&mut self, corners: [DVec3; 3]) {
        for p in corners {
            self.bounds.expand_to(p);
            self.positions.push(p);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Collision chunks for one generation pass, keyed by grid coordinate.
///
/// Built by the worker alongside the mesh buffers and swapped wholesale into
/// the live physics state. The grid is a fixed-resolution projection of the
/// sphere through its equirectangular UV, so bucketing is a pure function of
/// the triangle centroid and never depends on insertion order.
#[derive(Clone, Debug)]
pub struct ColliderChunkMap {
    chunks: FxHashMap<ChunkKey, ColliderChunk>,
    resolution: u32,
}

impl Default for ColliderChunkMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ColliderChunkMap {
    pub fn new() -> Self {
        Self::with_resolution(DEFAULT_GRID_RESOLUTION)
    }

    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            chunks: FxHashMap::default(),
            resolution: resolution.max(1),
        }
    }

    /// Grid coordinate for a triangle centroid. The centroid is renormalized
    /// onto the unit sphere before the UV projection so displacement cannot
    /// shift a triangle into a different cell than its undisplaced twin.
    pub fn key_of(&self, centroid: DVec3) -> ChunkKey {
        let uv = uv_from_unit(centroid.normalize());
        let res = f64::from(self.resolution);
        ChunkKey {
            i: ((uv.x * res) as i32).min(self.resolution as i32 - 1),
            j: ((uv.y * res) as i32).min(self.resolution as i32 - 1),
        }
    }

    /// Buckets one leaf triangle (displaced planet-local corners) into the
    /// chunk its centroid falls in, growing that chunk's bounding box.
    pub fn insert_triangle(&mut self, corners: [DVec3; 3]) -> ChunkKey {
        let key = self.key_of(triangle_centroid(corners[0], corners[1], corners[2]));
        match self.chunks.get_mut(&key) {
            Some(chunk) => chunk.accumulate(corners),
            None => {
                self.chunks.insert(key, ColliderChunk::from_triangle(corners));
            }
        }
        key
    }

    pub fn chunk(&self, key: &ChunkKey) -> Option<&ColliderChunk> {
        self.chunks.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkKey, &ColliderChunk)> {
        self.chunks.iter()
    }

    /// Chunks whose bounding box overlaps the query box; the broad-phase
    /// entry point for the physics collaborator.
    pub fn query_overlapping<'a>(
        &'a self,
        query: &'a DAabb,
    ) -> impl Iterator<Item = (&'a ChunkKey, &'a ColliderChunk)> {
        self.chunks
            .iter()
            .filter(move |(_, chunk)| chunk.bounds.intersects(query))
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.chunks.values().map(ColliderChunk::triangle_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}
