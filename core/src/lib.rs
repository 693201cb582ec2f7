// core holds the island generation engine: gradient noise, fBm, flow warp,
// height field assembly and Poisson-disk POI sampling
pub mod config;
pub mod domain_warp;
pub mod error;
pub mod fbm;
pub mod grid;
pub mod heightfield;
pub mod perlin2;
pub mod permutation;
pub mod poisson;
pub mod terrain;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

pub use config::GenerationConfig;
pub use domain_warp::DomainWarp2D;
pub use error::{ConfigError, SampleError};
pub use fbm::FbmParams;
pub use grid::{Point, SpatialGrid};
pub use heightfield::HeightField;
pub use perlin2::Perlin2D;
pub use permutation::PermutationTable;
pub use poisson::PoissonSampler;
pub use terrain::{TerrainGenerator, generate_height_field};

// Coherent 2D noise source.
// Implementors provide `raw`; fractal layering and flow come for free.
pub trait NoiseGenerator: Send + Sync {
    // Single sample at (x * freq, y * freq), roughly in [-1, 1]
    fn raw(&self, x: f64, y: f64, freq: f64) -> f64;

    // `raw` mapped to [0, 1]
    fn normalized(&self, x: f64, y: f64, freq: f64) -> f64 {
        (self.raw(x, y, freq) + 1.0) * 0.5
    }

    // Fractal Brownian motion, roughly in [-1, 1]
    fn fbm(&self, x: f64, y: f64, params: &FbmParams) -> f64 {
        fbm::fbm(self, x, y, params)
    }

    // `fbm` mapped to [0, 1]
    fn fbm_normalized(&self, x: f64, y: f64, params: &FbmParams) -> f64 {
        (self.fbm(x, y, params) + 1.0) * 0.5
    }

    // Signed displacement vector for domain warping
    fn flow(&self, x: f64, y: f64, freq: f64) -> (f64, f64) {
        domain_warp::flow(self, x, y, freq)
    }
}

/// Output of one generation run.
///
/// The height field is always present; `points` carries the sampling
/// stage's own failure so that an all-ocean world is still viewable.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub heights: HeightField,
    pub points: Result<Vec<Point>, SampleError>,
}

impl World {
    /// Accepted points, empty when sampling failed.
    pub fn points(&self) -> &[Point] {
        self.points.as_deref().unwrap_or(&[])
    }
}

/// Run the whole pipeline for `config`.
///
/// Invalid parameters are reported before any work is done. The POI sampler
/// draws from its own `ChaCha8Rng` seeded with `config.seed`, so POI placement
/// only depends on the configuration.
pub fn generate(config: &GenerationConfig) -> Result<World, ConfigError> {
    let heights = generate_height_field(config)?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let points =
        PoissonSampler::new(config.min_distance, config.land_threshold).sample(&heights, &mut rng);

    match &points {
        Ok(p) => info!(
            seed = config.seed,
            points = p.len(),
            land_fraction = heights.fraction_at_or_above(config.land_threshold),
            "world generated"
        ),
        Err(e) => warn!(seed = config.seed, error = %e, "world generated without points"),
    }

    Ok(World { heights, points })
}

#[cfg(test)]
mod tests {
    use super::{GenerationConfig, NoiseGenerator, Perlin2D, generate};

    #[test]
    fn fbm_normalized_maps_fbm() {
        let p = Perlin2D::new(6);
        let params = GenerationConfig::default().detail();
        let raw = p.fbm(100.0, 200.0, &params);
        let n = p.fbm_normalized(100.0, 200.0, &params);
        assert!((n - (raw + 1.0) * 0.5).abs() < 1e-15);
    }

    #[test]
    fn generate_small_world() {
        let c = GenerationConfig::default().with_size(128, 128).with_seed(42);
        let world = generate(&c).unwrap();
        assert_eq!(world.heights.len(), 128 * 128);
        if let Ok(points) = &world.points {
            assert_eq!(world.points(), points.as_slice());
        } else {
            assert!(world.points().is_empty());
        }
    }
}
