//! Scattered-sample biome blending for chunk-based terrain generation.
//!
//! Hard edges between biomes look wrong in generated terrain. This crate
//! smooths them by evaluating biome classification at sparse scatter points
//! around each chunk and spreading every point's influence over nearby
//! columns with a quartic falloff kernel. Each column ends up with a small
//! set of biome weights summing to 1.0, ready to drive height, surface, or
//! color interpolation.
//!
//! The crate provides:
//!
//! - [`ScatteredBiomeBlender`] - the per-chunk blend engine
//! - [`BlendConfig`] - construction-time tuning (validated fail-fast)
//! - [`PointGatherer`] - seam for the scatter point source
//! - [`BiomeClassifier`] - seam for biome lookup (any `Fn(f64, f64) -> BiomeId`)
//! - [`ChunkBlend`] - the per-chunk result, one weight layer per biome
//!
//! Classification runs once per sample point instead of once per column, so
//! an expensive classifier (noise stacks, climate lookups) is what this
//! design exists to amortize.

mod biome;
mod blender;
mod config;
mod point;
mod weights;

pub use biome::{BiomeClassifier, BiomeId};
pub use blender::ScatteredBiomeBlender;
pub use config::{BlendConfig, BlendConfigError};
pub use point::{PointGatherer, SamplePoint};
pub use weights::{BiomeWeightLayer, ChunkBlend};
