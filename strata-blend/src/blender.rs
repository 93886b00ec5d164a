//! The scattered-sample blend engine.
//!
//! Blends sparse biome samples into per-column weight layers, one chunk at a
//! time. The classifier runs once per sample point rather than once per
//! column, so the cost of an expensive biome lookup is amortized across the
//! whole chunk while transitions still come out smooth at column resolution.

use crate::biome::BiomeClassifier;
use crate::config::{BlendConfig, BlendConfigError};
use crate::point::PointGatherer;
use crate::weights::ChunkBlend;

/// A gathered point with its classification resolved to a weight layer index.
struct EvaluatedPoint {
    x: f64,
    z: f64,
    layer: usize,
}

/// Scattered-sample biome blender.
///
/// Gathers sample points around each chunk, classifies each point through the
/// caller's [`BiomeClassifier`], and accumulates per-column weights with a
/// quartic distance kernel. Every column of the result carries a convex
/// combination of the biomes in range: weights are non-negative and sum
/// to 1.0.
///
/// The blender is immutable after construction. All methods take `&self`, so
/// one instance can be shared across worker threads generating different
/// chunks concurrently (it is `Sync` whenever the gatherer and classifier
/// are). A call does bounded synchronous CPU work proportional to gathered
/// points times chunk columns and keeps no state between chunks.
pub struct ScatteredBiomeBlender<G, C> {
    chunk_width: u32,
    blend_kernel_radius: f64,
    blend_kernel_radius_sq: f64,
    gatherer: G,
    classifier: C,
}

impl<G: PointGatherer, C: BiomeClassifier> ScatteredBiomeBlender<G, C> {
    /// Create a blender from a validated configuration.
    ///
    /// The kernel radius is derived here rather than configured directly:
    /// `min_blend_radius` plus the gatherer's worst-case point distance at
    /// the configured sampling frequency. With a gatherer that honors its
    /// coverage bound, that sum guarantees every column of every chunk has
    /// at least one sample point in kernel range.
    pub fn new(config: BlendConfig, gatherer: G, classifier: C) -> Result<Self, BlendConfigError> {
        config.validate()?;
        let blend_kernel_radius = config.min_blend_radius
            + gatherer.max_gridscale_distance_to_closest_point() / config.sampling_frequency;
        Ok(Self {
            chunk_width: config.chunk_width,
            blend_kernel_radius,
            blend_kernel_radius_sq: blend_kernel_radius * blend_kernel_radius,
            gatherer,
            classifier,
        })
    }

    /// Chunk side length, in columns.
    #[must_use]
    pub const fn chunk_width(&self) -> u32 {
        self.chunk_width
    }

    /// Derived kernel radius in world units. Sample points farther than this
    /// from a column contribute nothing to it.
    #[must_use]
    pub const fn blend_kernel_radius(&self) -> f64 {
        self.blend_kernel_radius
    }

    /// Compute the biome weight layers for one chunk.
    ///
    /// `chunk_base_x` and `chunk_base_z` are the world coordinates of the
    /// chunk's lowest-coordinate column. The call is deterministic: the same
    /// seed and origin always produce bit-identical layers.
    #[must_use]
    #[tracing::instrument(level = "trace", skip(self), name = "blend_for_chunk")]
    pub fn blend_for_chunk(&self, seed: u64, chunk_base_x: i32, chunk_base_z: i32) -> ChunkBlend {
        let points = self.gatherer.gather_points(
            seed,
            chunk_base_x,
            chunk_base_z,
            self.chunk_width,
            self.blend_kernel_radius,
        );

        // Classify every point exactly once, resolving its weight layer up
        // front so the kernel loop can index layers directly.
        let mut blend = ChunkBlend::new(self.chunk_width);
        let mut evaluated = Vec::with_capacity(points.len());
        for point in points {
            let biome = self.classifier.biome_at(point.x, point.z);
            let layer = blend.layer_index_or_insert(biome);
            evaluated.push(EvaluatedPoint {
                x: point.x,
                z: point.z,
                layer,
            });
        }

        // No points at all means the gatherer broke its coverage contract.
        // Return the empty blend instead of inventing weights.
        if blend.is_empty() {
            return blend;
        }

        // Only one biome in range, so every column is fully that biome and
        // the kernel pass can be skipped.
        if blend.layers().len() == 1 {
            for weight in blend.layers_mut()[0].weights_mut() {
                *weight = 1.0;
            }
            return blend;
        }

        // Z-distance terms only change per row; compute them once per row and
        // reuse them for every column in it.
        let mut row_dz_sq = vec![0.0_f64; evaluated.len()];

        for zi in 0..self.chunk_width {
            let z = f64::from(chunk_base_z + zi as i32);
            for (dz_sq, point) in row_dz_sq.iter_mut().zip(&evaluated) {
                let dz = point.z - z;
                *dz_sq = dz * dz;
            }

            for xi in 0..self.chunk_width {
                let x = f64::from(chunk_base_x + xi as i32);
                let column = (zi * self.chunk_width + xi) as usize;

                // Accumulate the kernel weight of every point in range of
                // this column.
                let mut column_total_weight = 0.0;
                for (point, &dz_sq) in evaluated.iter().zip(&row_dz_sq) {
                    let dx = point.x - x;
                    let dist_sq = dx * dx + dz_sq;
                    if dist_sq < self.blend_kernel_radius_sq {
                        let weight = contribution_weight(self.blend_kernel_radius_sq, dist_sq);
                        blend.layers_mut()[point.layer].weights_mut()[column] += weight;
                        column_total_weight += weight;
                    }
                }

                // Normalize the column so its weights sum to 1. A zero total
                // means no point reached this column; the resulting NaN
                // weights are left to surface the misconfiguration rather
                // than being clamped to something plausible.
                let inverse_total_weight = 1.0 / column_total_weight;
                for layer in blend.layers_mut() {
                    layer.weights_mut()[column] *= inverse_total_weight;
                }
            }
        }

        blend
    }
}

/// Kernel falloff for a sample point at squared distance `dist_sq` from a
/// column.
///
/// `(radius_sq - dist_sq)^2` strictly inside the radius, 0.0 at and beyond
/// it. The squared difference peaks at distance zero and fades out with zero
/// slope at the radius boundary, so a point dropping out of range never
/// produces a visible seam between neighboring columns.
#[inline]
#[must_use]
fn contribution_weight(radius_sq: f64, dist_sq: f64) -> f64 {
    if dist_sq >= radius_sq {
        return 0.0;
    }
    let weight = radius_sq - dist_sq;
    weight * weight
}
