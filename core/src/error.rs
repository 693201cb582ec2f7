use thiserror::Error;

/// A structurally invalid generation parameter.
///
/// Raised by [`GenerationConfig::validate`](crate::GenerationConfig::validate)
/// before any computation starts, so no partial output ever exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("raster dimensions must be positive (got {width}x{height})")]
    EmptyRaster { width: usize, height: usize },
    /// An octave count is zero.
    #[error("{field} must be at least 1")]
    ZeroOctaves { field: &'static str },
    /// The Poisson minimum distance is zero.
    #[error("min_distance must be positive")]
    ZeroMinDistance,
    /// The land threshold is outside [0, 1].
    #[error("land_threshold {0} is outside [0, 1]")]
    LandThresholdOutOfRange(f64),
    /// A floating point parameter is NaN or infinite.
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
}

/// Failure of the Poisson-disk sampling stage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("invalid sampler input: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// No qualifying start coordinate was found.
    /// `attempts` is 0 when the field has no qualifying cell at all.
    #[error("no coordinate at or above {threshold} found after {attempts} random probes")]
    ExhaustedSearch { attempts: usize, threshold: f64 },
}
