//! Blend engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Construction-time configuration for a
/// [`ScatteredBiomeBlender`](crate::ScatteredBiomeBlender).
///
/// Fixed for the lifetime of the engine. The kernel radius is not set
/// directly: the engine derives it from `min_blend_radius`, the gatherer's
/// coverage bound, and `sampling_frequency`, so that every column is
/// guaranteed at least one in-range sample point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendConfig {
    /// Scatter density passed through to the point gatherer, in points per
    /// world unit of lattice scale. Halving it doubles point spacing.
    pub sampling_frequency: f64,
    /// Smallest blend radius the caller wants guaranteed, in world units.
    /// Larger values widen biome transitions.
    pub min_blend_radius: f64,
    /// Columns per chunk side; one chunk covers `chunk_width²` columns.
    pub chunk_width: u32,
}

impl BlendConfig {
    /// Check that every field is usable before any chunk work starts.
    pub const fn validate(&self) -> Result<(), BlendConfigError> {
        if self.chunk_width == 0 {
            return Err(BlendConfigError::ZeroChunkWidth);
        }
        if !(self.sampling_frequency.is_finite() && self.sampling_frequency > 0.0) {
            return Err(BlendConfigError::InvalidSamplingFrequency(
                self.sampling_frequency,
            ));
        }
        if !(self.min_blend_radius.is_finite() && self.min_blend_radius >= 0.0) {
            return Err(BlendConfigError::InvalidMinBlendRadius(
                self.min_blend_radius,
            ));
        }
        Ok(())
    }
}

/// An error describing an unusable [`BlendConfig`] value.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BlendConfigError {
    /// Chunk width of zero; such a chunk has no columns.
    #[error("chunk width must be at least 1")]
    ZeroChunkWidth,
    /// Sampling frequency that is zero, negative, NaN, or infinite.
    #[error("sampling frequency must be positive and finite, got {0}")]
    InvalidSamplingFrequency(f64),
    /// Minimum blend radius that is negative, NaN, or infinite.
    #[error("minimum blend radius must be non-negative and finite, got {0}")]
    InvalidMinBlendRadius(f64),
}
