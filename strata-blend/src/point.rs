//! Scatter points and the point gatherer seam.

/// A scatter point in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// World-space X coordinate.
    pub x: f64,
    /// World-space Z coordinate.
    pub z: f64,
}

impl SamplePoint {
    /// Create a sample point at the given world coordinates.
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// Source of scatter points for chunk blending.
///
/// Implementations place sparse points across the world, spaced by the
/// sampling frequency the blender was configured with. Two contracts matter
/// to the blender:
///
/// - **Determinism**: the same `(seed, chunk_base_x, chunk_base_z)` must
///   always produce the same points, so chunk generation is reproducible.
/// - **Coverage**: every location lies within
///   [`max_gridscale_distance_to_closest_point`](PointGatherer::max_gridscale_distance_to_closest_point)
///   divided by the sampling frequency of some point. The blender sizes its
///   kernel radius from this bound; a gatherer that under-reports it produces
///   columns no point reaches, which surface as NaN weights.
pub trait PointGatherer {
    /// Worst-case distance from any location to its nearest point, measured
    /// in grid-scale units (world distance is this divided by the sampling
    /// frequency).
    fn max_gridscale_distance_to_closest_point(&self) -> f64;

    /// Collect every point within `max_contribution_radius` of the chunk's
    /// footprint, the `chunk_width` by `chunk_width` column square starting
    /// at `(chunk_base_x, chunk_base_z)`.
    ///
    /// Points outside the footprint still influence columns near the chunk
    /// edge, so they must be included. Returning extra points beyond the
    /// radius is allowed; the blender distance-tests every point anyway.
    fn gather_points(
        &self,
        seed: u64,
        chunk_base_x: i32,
        chunk_base_z: i32,
        chunk_width: u32,
        max_contribution_radius: f64,
    ) -> Vec<SamplePoint>;
}
