use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fbm::FbmParams;

// Continental mask octave layout is fixed
pub const CONTINENT_PERSISTENCE: f64 = 0.5;
pub const CONTINENT_LACUNARITY: f64 = 2.0;

// POIs are only placed this far above sea level
pub const LAND_MARGIN: f64 = 0.05;

/// Everything one generation run depends on.
///
/// Passed by reference into [`generate`](crate::generate); nothing in the
/// engine keeps its own copy of these values between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: u64,
    pub width: usize,
    pub height: usize,

    // local detail fBm
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,

    // continental mask fBm
    pub continent_freq: f64,
    pub continent_octaves: u32,
    pub continent_weight: f64,

    // radial falloff
    pub falloff_exponent: f64,
    pub falloff_weight: f64,

    /// Only used by consumers to classify water and land.
    pub sea_level: f64,
    pub min_distance: u32,

    // domain warp
    pub flow_scale: f64,
    pub flow_strength: f64,

    pub land_threshold: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let sea_level = 0.45;
        Self {
            seed: 12345,
            width: 512,
            height: 512,
            scale: 0.006,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            continent_freq: 0.004,
            continent_octaves: 3,
            continent_weight: 0.6,
            falloff_exponent: 1.8,
            falloff_weight: 0.6,
            sea_level,
            min_distance: 25,
            flow_scale: 0.002,
            flow_strength: 15.0,
            land_threshold: land_threshold_for(sea_level),
        }
    }
}

/// Threshold at which POIs count as being on land for a given sea level.
pub fn land_threshold_for(sea_level: f64) -> f64 {
    (sea_level + LAND_MARGIN).clamp(0.0, 1.0)
}

impl GenerationConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn detail(&self) -> FbmParams {
        FbmParams::new(self.scale, self.octaves, self.persistence, self.lacunarity)
    }

    pub fn continent(&self) -> FbmParams {
        FbmParams::new(
            self.continent_freq,
            self.continent_octaves,
            CONTINENT_PERSISTENCE,
            CONTINENT_LACUNARITY,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyRaster {
                width: self.width,
                height: self.height,
            });
        }
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves { field: "octaves" });
        }
        if self.continent_octaves == 0 {
            return Err(ConfigError::ZeroOctaves {
                field: "continent_octaves",
            });
        }
        if self.min_distance == 0 {
            return Err(ConfigError::ZeroMinDistance);
        }

        let floats = [
            ("scale", self.scale),
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("continent_freq", self.continent_freq),
            ("continent_weight", self.continent_weight),
            ("falloff_exponent", self.falloff_exponent),
            ("falloff_weight", self.falloff_weight),
            ("sea_level", self.sea_level),
            ("flow_scale", self.flow_scale),
            ("flow_strength", self.flow_strength),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.land_threshold) {
            return Err(ConfigError::LandThresholdOutOfRange(self.land_threshold));
        }
        Ok(())
    }
}
