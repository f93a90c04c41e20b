//! Multi-octave fractal Brownian motion (fBm) altitude field over the sphere.
//!
//! Samples 3D simplex noise at unit-sphere directions, so the field is
//! seam-free and every traversal path that reaches the same direction gets
//! the same altitude back. Vertex welding depends on that.

use glam::DVec3;
use noise::{NoiseFn, Simplex};

/// Configuration for the multi-octave fBm altitude field.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightfieldParams {
    /// Seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves to composite. More octaves add finer surface
    /// detail at additional sampling cost.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave, in cycles across the unit sphere.
    /// Controls the spatial scale of the broadest terrain features.
    pub base_frequency: f64,
    /// Amplitude of the first octave, in planet units of altitude.
    pub amplitude: f64,
}

impl Default for HeightfieldParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 2.0,
            amplitude: 8.0,
        }
    }
}

/// Altitude field over unit-sphere directions.
///
/// A pure function of (direction, params): no interior mutability, no
/// dependence on sampling order. The theoretical output range is
/// `[-max_amplitude, +max_amplitude]`.
pub struct Heightfield {
    noise: Simplex,
    params: HeightfieldParams,
}

impl Heightfield {
    pub fn new(params: HeightfieldParams) -> Self {
        let noise = Simplex::new(params.seed as u32);
        Self { noise, params }
    }

    /// Sample the altitude at a unit-sphere direction.
    pub fn sample(&self, dir: DVec3) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            let nx = dir.x * frequency;
            let ny = dir.y * frequency;
            let nz = dir.z * frequency;
            total += self.noise.get([nx, ny, nz]) * amplitude;

            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Theoretical maximum absolute altitude (geometric series sum of the
    /// octave amplitudes). Bounds the output of `sample`.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    pub fn params(&self) -> &HeightfieldParams {
        &self.params
    }
}
