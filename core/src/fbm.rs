use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;

/// Octave layout for one fractal (fBm) evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FbmParams {
    pub frequency: f64,   // base frequency of the first octave
    pub octaves: u32,     // number of octaves to sum
    pub persistence: f64, // amplitude scaling per octave
    pub lacunarity: f64,  // frequency scaling per octave
}

impl FbmParams {
    pub fn new(frequency: f64, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            frequency,
            octaves,
            persistence,
            lacunarity,
        }
    }
}

// Sum `octaves` layers of `noise`, then divide by the total amplitude so the
// result stays near [-1, 1] whatever the octave count or persistence.
pub fn fbm<N: NoiseGenerator + ?Sized>(noise: &N, x: f64, y: f64, params: &FbmParams) -> f64 {
    let mut amplitude = 1.0; // Weight of the current octave
    let mut freq = params.frequency;
    let mut total = 0.0;
    let mut max_amp = 0.0; // Maximum possible amplitude to normalize the result

    for _ in 0..params.octaves {
        total += noise.raw(x, y, freq) * amplitude;
        max_amp += amplitude;
        amplitude *= params.persistence;
        freq *= params.lacunarity;
    }

    if max_amp == 0.0 {
        return 0.0;
    }
    total / max_amp
}
