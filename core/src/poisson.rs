//! Poisson-disk sampling of points of interest over the land part of a
//! [`HeightField`].
//!
//! A variant of Bridson's algorithm where candidates must also satisfy
//! `height(p) >= land_threshold`. Every pair of accepted points is at least
//! `min_distance` apart.

use std::f64::consts::TAU;

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::error::{ConfigError, SampleError};
use crate::grid::{Point, SpatialGrid};
use crate::heightfield::HeightField;

/// Candidates tried around an active point before it is retired.
pub const CANDIDATE_ATTEMPTS: usize = 30;

/// Random probes per raster cell allowed when looking for the first point.
pub const DEFAULT_SEED_ATTEMPTS_PER_CELL: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonSampler {
    min_distance: u32,
    land_threshold: f64,
    seed_attempts: Option<usize>,
}

impl PoissonSampler {
    pub fn new(min_distance: u32, land_threshold: f64) -> Self {
        Self {
            min_distance,
            land_threshold,
            seed_attempts: None,
        }
    }

    /// Cap the number of random probes of the initial land search.
    pub fn with_seed_attempts(mut self, attempts: usize) -> Self {
        self.seed_attempts = Some(attempts);
        self
    }

    fn validate(&self, field: &HeightField) -> Result<(), ConfigError> {
        if self.min_distance == 0 {
            return Err(ConfigError::ZeroMinDistance);
        }
        if !(0.0..=1.0).contains(&self.land_threshold) {
            return Err(ConfigError::LandThresholdOutOfRange(self.land_threshold));
        }
        if field.is_empty() {
            return Err(ConfigError::EmptyRaster {
                width: field.width(),
                height: field.height(),
            });
        }
        Ok(())
    }

    #[inline]
    fn is_land(&self, field: &HeightField, p: Point) -> bool {
        field
            .get_point(p)
            .is_some_and(|h| f64::from(h) >= self.land_threshold)
    }

    /// Place points over `field`, drawing all randomness from `rng`.
    ///
    /// The returned points are in discovery order. Fails with
    /// [`SampleError::ExhaustedSearch`] when no start point on land is found.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        field: &HeightField,
        rng: &mut R,
    ) -> Result<Vec<Point>, SampleError> {
        self.validate(field)?;

        let width = field.width();
        let height = field.height();
        let min_distance = f64::from(self.min_distance);
        let mut grid = SpatialGrid::new(width, height, min_distance);

        let start = self.find_start(field, rng)?;
        let mut points = vec![start];
        let mut active = vec![start];
        grid.insert(start);

        while !active.is_empty() {
            let index = rng.gen_range(0..active.len());
            let p = active[index];

            let mut found = false;
            for _ in 0..CANDIDATE_ATTEMPTS {
                // Candidate in the annulus [r, 2r) around p
                let angle = rng.gen_range(0.0..TAU);
                let dist = rng.gen_range(min_distance..2.0 * min_distance);
                let candidate = Point::new(
                    (f64::from(p.x) + angle.cos() * dist).round() as i32,
                    (f64::from(p.y) + angle.sin() * dist).round() as i32,
                );

                if !self.is_land(field, candidate) {
                    continue;
                }
                if grid.has_neighbour_within(candidate, min_distance) {
                    continue;
                }

                points.push(candidate);
                active.push(candidate);
                grid.insert(candidate);
                found = true;
                break;
            }

            if !found {
                // Saturated neighbourhood: stop spawning from p, keep it accepted
                active.swap_remove(index);
            }
        }

        let (cols, rows) = grid.dimensions();
        debug!(
            points = points.len(),
            min_distance = self.min_distance,
            grid_cols = cols,
            grid_rows = rows,
            "poisson sampling finished"
        );
        Ok(points)
    }

    // Uniform random probing for the first land point, bounded
    fn find_start<R: Rng + ?Sized>(
        &self,
        field: &HeightField,
        rng: &mut R,
    ) -> Result<Point, SampleError> {
        if !field.any_at_or_above(self.land_threshold) {
            warn!(
                threshold = self.land_threshold,
                "no cell reaches the land threshold"
            );
            return Err(SampleError::ExhaustedSearch {
                attempts: 0,
                threshold: self.land_threshold,
            });
        }

        let budget = self
            .seed_attempts
            .unwrap_or_else(|| field.len().saturating_mul(DEFAULT_SEED_ATTEMPTS_PER_CELL));
        for attempt in 0..budget {
            let p = Point::new(
                rng.gen_range(0..field.width()) as i32,
                rng.gen_range(0..field.height()) as i32,
            );
            if self.is_land(field, p) {
                trace!(x = p.x, y = p.y, attempts = attempt + 1, "found start point");
                return Ok(p);
            }
        }

        warn!(
            attempts = budget,
            threshold = self.land_threshold,
            "initial land search exhausted"
        );
        Err(SampleError::ExhaustedSearch {
            attempts: budget,
            threshold: self.land_threshold,
        })
    }
}
