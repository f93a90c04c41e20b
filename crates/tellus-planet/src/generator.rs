//! Per-planet background generation scheduling and buffer handoff.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use glam::DMat4;

use tellus_collider::{ColliderChunkMap, DEFAULT_GRID_RESOLUTION};
use tellus_lod::LodTables;
use tellus_mesh::MeshBuffers;

use crate::pipeline::generate_pass;
use crate::report::{GenerationError, PassReport};
use crate::view::ViewState;
use crate::PlanetConfig;

/// Tuning knobs that sit outside [`PlanetConfig`] because they belong to the
/// generator, not the planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorOptions {
    /// Desired on-screen patch edge length in pixels; smaller demands more
    /// subdivision.
    pub target_edge_px: f64,
    /// Collision grid cells along each UV axis.
    pub collider_resolution: u32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            target_edge_px: 48.0,
            collider_resolution: DEFAULT_GRID_RESOLUTION,
        }
    }
}

/// Everything the LOD tables are derived from; a change in any field marks
/// them dirty.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TableInputs {
    radius: f64,
    max_altitude: f64,
    fov_y: f64,
    viewport_width: f64,
    target_edge_px: f64,
}

/// State shared between the main thread and the worker. The two mutexes plus
/// the two flags are the entire synchronization surface.
struct Shared {
    /// Geometry mutex: the worker's build-side mesh buffers.
    build_mesh: Mutex<MeshBuffers>,
    /// Collider mutex: the worker's build-side chunk map.
    build_colliders: Mutex<ColliderChunkMap>,
    report: Mutex<Option<PassReport>>,
    /// A completed pass awaits swap.
    ready: AtomicBool,
    /// A pass is running on the worker.
    in_flight: AtomicBool,
    #[cfg(test)]
    fail_next_pass: AtomicBool,
}

impl Shared {
    fn new(collider_resolution: u32) -> Self {
        Self {
            build_mesh: Mutex::new(MeshBuffers::new()),
            build_colliders: Mutex::new(ColliderChunkMap::with_resolution(collider_resolution)),
            report: Mutex::new(None),
            ready: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
            #[cfg(test)]
            fail_next_pass: AtomicBool::new(false),
        }
    }
}

/// One planet's asynchronous terrain generator.
///
/// Owns its worker handle, mutexes, and double-buffered state outright, so
/// any number of planets regenerate independently. The main thread drives it
/// with two non-blocking calls per frame: [`request_regeneration`] to maybe
/// start a pass, [`poll`] to maybe swap a finished one in. At most one pass
/// is ever in flight; requests arriving while one runs (or while a finished
/// one awaits its swap) are dropped and the next frame retries.
///
/// [`request_regeneration`]: Self::request_regeneration
/// [`poll`]: Self::poll
pub struct PlanetGenerator {
    config: PlanetConfig,
    options: GeneratorOptions,
    world_from_planet: DMat4,
    tables: Option<(TableInputs, Arc<LodTables>)>,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
    render_mesh: MeshBuffers,
    collider_chunks: ColliderChunkMap,
}

impl PlanetGenerator {
    pub fn new(config: PlanetConfig) -> Self {
        Self::with_options(config, GeneratorOptions::default())
    }

    pub fn with_options(config: PlanetConfig, options: GeneratorOptions) -> Self {
        Self {
            config,
            options,
            world_from_planet: DMat4::IDENTITY,
            tables: None,
            shared: Arc::new(Shared::new(options.collider_resolution)),
            worker: None,
            render_mesh: MeshBuffers::new(),
            collider_chunks: ColliderChunkMap::with_resolution(options.collider_resolution),
        }
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Replaces the planet description. The in-flight pass, if any, finishes
    /// with the old values; the LOD tables rebuild lazily on the next
    /// request if a table input changed.
    pub fn set_config(&mut self, config: PlanetConfig) {
        self.config = config;
    }

    pub fn set_world_from_planet(&mut self, world_from_planet: DMat4) {
        self.world_from_planet = world_from_planet;
    }

    /// The mesh most recently swapped in. Exclusively main-thread data.
    pub fn render_mesh(&self) -> &MeshBuffers {
        &self.render_mesh
    }

    /// The collider chunks most recently swapped in.
    pub fn collider_chunks(&self) -> &ColliderChunkMap {
        &self.collider_chunks
    }

    pub fn is_generating(&self) -> bool {
        self.shared.in_flight.load(Ordering::Acquire)
    }

    /// Starts a background pass for the given view unless one is already in
    /// flight or finished-but-unswapped. Returns whether a pass was started;
    /// a dropped request is not an error, the caller simply retries next
    /// frame.
    pub fn request_regeneration(&mut self, view: &ViewState) -> bool {
        if self.shared.in_flight.load(Ordering::Acquire)
            || self.shared.ready.load(Ordering::Acquire)
        {
            return false;
        }
        // The previous worker, if any, has finished and been consumed by
        // poll(); reap the handle before spawning the next one.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        let tables = self.tables_for(view);
        let shared = Arc::clone(&self.shared);
        let config = self.config.clone();
        let view = view.clone();
        let world_from_planet = self.world_from_planet;
        let collider_resolution = self.options.collider_resolution;

        self.shared.in_flight.store(true, Ordering::Release);
        let spawned = std::thread::Builder::new()
            .name("planet-gen".into())
            .spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    #[cfg(test)]
                    if shared.fail_next_pass.swap(false, Ordering::AcqRel) {
                        panic!("forced pass failure");
                    }
                    generate_pass(
                        &config,
                        &view,
                        &world_from_planet,
                        &tables,
                        collider_resolution,
                    )
                }));

                match result {
                    Ok(output) => {
                        tracing::info!(
                            vertices = output.stats.vertices,
                            triangles = output.stats.triangles,
                            leaves = output.stats.leaves,
                            culled = output.stats.culled_nodes,
                            collider_chunks = output.stats.collider_chunks,
                            elapsed_ms = output.stats.elapsed.as_millis() as u64,
                            "terrain pass complete"
                        );
                        *lock(&shared.build_mesh) = output.mesh;
                        *lock(&shared.build_colliders) = output.colliders;
                        *lock(&shared.report) = Some(Ok(output.stats));
                    }
                    Err(payload) => {
                        let message = panic_message(payload);
                        tracing::error!(error = %message, "terrain pass panicked");
                        *lock(&shared.report) =
                            Some(Err(GenerationError::WorkerPanicked(message)));
                    }
                }

                // Ready goes up before in-flight goes down so the request
                // guard never sees both flags clear mid-handoff.
                shared.ready.store(true, Ordering::Release);
                shared.in_flight.store(false, Ordering::Release);
            });

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                true
            }
            Err(err) => {
                self.shared.in_flight.store(false, Ordering::Release);
                tracing::error!(error = %err, "failed to spawn terrain worker");
                false
            }
        }
    }

    /// Swaps a finished pass into the live render/physics state and returns
    /// its report. Non-blocking; returns `None` while no pass has completed
    /// since the last call. A failed pass leaves the live buffers untouched.
    pub fn poll(&mut self) -> Option<PassReport> {
        if !self.shared.ready.load(Ordering::Acquire) {
            return None;
        }

        let report = lock(&self.shared.report).take();
        if matches!(report, Some(Ok(_))) {
            {
                let mut build = lock(&self.shared.build_mesh);
                std::mem::swap(&mut self.render_mesh, &mut *build);
            }
            {
                let mut build = lock(&self.shared.build_colliders);
                std::mem::swap(&mut self.collider_chunks, &mut *build);
            }
        }
        self.shared.ready.store(false, Ordering::Release);

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        report
    }

    /// Returns the tables for the current config and view, rebuilding them
    /// only when an input changed; never per frame.
    fn tables_for(&mut self, view: &ViewState) -> Arc<LodTables> {
        let inputs = TableInputs {
            radius: self.config.radius,
            max_altitude: self.config.max_altitude,
            fov_y: view.lens.fov_y,
            viewport_width: view.viewport_width,
            target_edge_px: self.options.target_edge_px,
        };
        match &self.tables {
            Some((cached, tables)) if *cached == inputs => Arc::clone(tables),
            _ => {
                tracing::info!(
                    radius = inputs.radius,
                    fov_y = inputs.fov_y,
                    viewport_width = inputs.viewport_width,
                    "rebuilding LOD tables"
                );
                let tables = Arc::new(LodTables::build(
                    inputs.radius,
                    inputs.max_altitude,
                    inputs.fov_y,
                    inputs.viewport_width,
                    inputs.target_edge_px,
                ));
                self.tables = Some((inputs, Arc::clone(&tables)));
                tables
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn fail_next_pass(&self) {
        self.shared.fail_next_pass.store(true, Ordering::Release);
    }
}

impl Drop for PlanetGenerator {
    fn drop(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

/// A poisoned lock only means a previous worker panicked mid-write; the next
/// pass overwrites the data wholesale, so the poison carries no information.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
