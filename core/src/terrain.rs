use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::config::GenerationConfig;
use crate::domain_warp::DomainWarp2D;
use crate::error::ConfigError;
use crate::fbm::FbmParams;
use crate::heightfield::HeightField;
use crate::{NoiseGenerator, Perlin2D};

// Island height field: warped detail fBm blended with a continental fBm mask,
// minus a radial falloff towards the raster edges
pub struct TerrainGenerator<'a> {
    noise: &'a dyn NoiseGenerator,
    width: usize,
    height: usize,
    detail: FbmParams,
    continent: FbmParams,
    continent_weight: f64,
    falloff_exponent: f64,
    falloff_weight: f64,
    warp: DomainWarp2D<'a>,
    center: (f64, f64),
    max_distance: f64, // center to corner
}

impl<'a> TerrainGenerator<'a> {
    pub fn new(noise: &'a dyn NoiseGenerator, config: &GenerationConfig) -> Self {
        let cx = config.width as f64 / 2.0;
        let cy = config.height as f64 / 2.0;
        Self {
            noise,
            width: config.width,
            height: config.height,
            detail: config.detail(),
            continent: config.continent(),
            continent_weight: config.continent_weight,
            falloff_exponent: config.falloff_exponent,
            falloff_weight: config.falloff_weight,
            warp: DomainWarp2D::new(noise, config.flow_scale, config.flow_strength),
            center: (cx, cy),
            max_distance: cx.hypot(cy),
        }
    }

    // Radial mask subtracted from the blended height, 0 at the center
    pub fn falloff(&self, x: f64, y: f64) -> f64 {
        if self.max_distance == 0.0 {
            return 0.0;
        }
        let dist = (x - self.center.0).hypot(y - self.center.1);
        (dist / self.max_distance).powf(self.falloff_exponent) * self.falloff_weight
    }

    // Final height at one raster coordinate, in [0, 1]
    pub fn height_at(&self, x: usize, y: usize) -> f32 {
        let (x, y) = (x as f64, y as f64);
        let (px, py) = self.warp.apply(x, y);

        // local detail follows the flow field, the continental mask does not
        let local = self.noise.fbm(px, py, &self.detail);
        let continent = self.noise.fbm(x, y, &self.continent);

        let combined_raw = local * (1.0 - self.continent_weight) + continent * self.continent_weight;
        let combined = (combined_raw + 1.0) * 0.5;

        let h = combined - self.falloff(x, y);
        // NaN can only come from pathological finite inputs such as 0 · ∞
        if h.is_nan() { 0.0 } else { h.clamp(0.0, 1.0) as f32 }
    }

    // Evaluate every coordinate; rows are filled in parallel
    pub fn generate(&self) -> HeightField {
        if self.width == 0 || self.height == 0 {
            return HeightField::from_vec(self.width, self.height, Vec::new());
        }
        let start = Instant::now();
        let mut data = vec![0.0f32; self.width * self.height];
        data.par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = self.height_at(x, y);
                }
            });

        let field = HeightField::from_vec(self.width, self.height, data);
        let (lo, hi) = field.min_max().unwrap_or_default();
        debug!(
            width = self.width,
            height = self.height,
            min = lo,
            max = hi,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "height field assembled"
        );
        field
    }
}

// Build the gradient noise for `config.seed` and assemble the full field
pub fn generate_height_field(config: &GenerationConfig) -> Result<HeightField, ConfigError> {
    config.validate()?;
    let perlin = Perlin2D::new(config.seed);
    Ok(TerrainGenerator::new(&perlin, config).generate())
}

#[cfg(test)]
mod tests {
    use super::{TerrainGenerator, generate_height_field};
    use crate::config::GenerationConfig;
    use crate::{NoiseGenerator, Perlin2D};

    fn small() -> GenerationConfig {
        GenerationConfig::default().with_size(96, 64)
    }

    #[test]
    fn terrain_dimensions() {
        let f = generate_height_field(&small()).unwrap();
        assert_eq!(f.width(), 96);
        assert_eq!(f.height(), 64);
        assert_eq!(f.len(), 96 * 64);
    }

    #[test]
    fn terrain_range() {
        for seed in [0, 1, 99, 12345] {
            let f = generate_height_field(&small().with_seed(seed)).unwrap();
            for &v in f.as_slice() {
                assert!((0.0..=1.0).contains(&v), "{} out of range", v);
            }
        }
    }

    #[test]
    fn terrain_determinism() {
        let c = small().with_seed(31337);
        assert_eq!(
            generate_height_field(&c).unwrap(),
            generate_height_field(&c).unwrap()
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let c = GenerationConfig {
            octaves: 0,
            ..small()
        };
        assert!(generate_height_field(&c).is_err());
    }

    #[test]
    fn parallel_matches_pointwise() {
        let c = small().with_seed(4);
        let perlin = Perlin2D::new(c.seed);
        let generator = TerrainGenerator::new(&perlin, &c);
        let f = generator.generate();
        for &(x, y) in &[(0, 0), (95, 63), (48, 32), (17, 50)] {
            assert_eq!(f.get(x, y), generator.height_at(x, y));
        }
    }

    #[test]
    fn falloff_is_zero_at_center_and_full_at_corner() {
        let c = GenerationConfig {
            falloff_exponent: 2.0,
            falloff_weight: 0.6,
            ..small()
        };
        let perlin = Perlin2D::new(1);
        let g = TerrainGenerator::new(&perlin, &c);
        assert_eq!(g.falloff(48.0, 32.0), 0.0);
        assert!((g.falloff(0.0, 0.0) - 0.6).abs() < 1e-12);
        assert!(g.falloff(10.0, 10.0) > g.falloff(40.0, 30.0));
    }

    #[test]
    fn height_matches_manual_blend() {
        let c = small().with_seed(77);
        let perlin = Perlin2D::new(c.seed);
        let g = TerrainGenerator::new(&perlin, &c);
        let (x, y) = (20.0, 30.0);
        let (dx, dy) = perlin.flow(x, y, c.flow_scale);
        let local = perlin.fbm(x + dx * c.flow_strength, y + dy * c.flow_strength, &c.detail());
        let continent = perlin.fbm(x, y, &c.continent());
        let combined = ((local * 0.4 + continent * 0.6) + 1.0) * 0.5;
        let expected = (combined - g.falloff(x, y)).clamp(0.0, 1.0) as f32;
        let got = g.height_at(20, 30);
        assert!((got - expected).abs() < 1e-6, "{} vs {}", got, expected);
    }

    #[test]
    fn no_falloff_no_warp_is_blended_noise() {
        let c = GenerationConfig {
            falloff_weight: 0.0,
            flow_strength: 0.0,
            continent_weight: 0.0,
            ..small()
        };
        let perlin = Perlin2D::new(c.seed);
        let g = TerrainGenerator::new(&perlin, &c);
        let expected = ((perlin.fbm(5.0, 6.0, &c.detail()) + 1.0) * 0.5).clamp(0.0, 1.0) as f32;
        assert_eq!(g.height_at(5, 6), expected);
    }
}
