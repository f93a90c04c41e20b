use std::time::Duration;

/// Per-pass statistics the worker stores alongside the buffers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub vertices: usize,
    pub indices: usize,
    pub triangles: usize,
    pub leaves: usize,
    pub culled_nodes: usize,
    pub collider_chunks: usize,
    pub elapsed: Duration,
}

/// Failure of a background generation pass, surfaced from
/// [`PlanetGenerator::poll`](crate::PlanetGenerator::poll) instead of
/// propagating unobserved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The worker panicked; the payload message is preserved for the log.
    #[error("generation worker panicked: {0}")]
    WorkerPanicked(String),
}

/// What one completed pass amounted to: statistics on success, the captured
/// failure otherwise.
pub type PassReport = Result<GenerationStats, GenerationError>;
