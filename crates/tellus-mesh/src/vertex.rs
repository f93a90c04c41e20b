use glam::{DVec2, DVec3};

/// A single mesh vertex in CPU memory, 32 bytes, ready for upload by
/// whichever rendering backend consumes it.
///
/// Layout (32 bytes total):
///   - `[0..12]`  position `[f32; 3]` — planet-local coordinates
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` uv `[f32; 2]` — equirectangular surface coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(CpuVertex, [u8; 32]);

impl CpuVertex {
    /// Narrow f64 working precision down to the f32 buffer format.
    pub fn new(position: DVec3, normal: DVec3, uv: DVec2) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
            uv: uv.as_vec2().to_array(),
        }
    }
}

/// One generation pass's mesh output: a flat vertex buffer plus a u32
/// triangle-list index buffer. Double-buffered by the generator (build side
/// and render side swap wholesale).
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
    pub vertices: Vec<CpuVertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}
