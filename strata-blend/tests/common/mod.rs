//! Shared gatherers and classifiers for the integration tests.

use strata_blend::{BiomeId, ChunkBlend, PointGatherer, SamplePoint};

/// Gatherer stub that returns the same hand-placed points for every chunk.
pub struct FixedPointGatherer {
    /// Coverage bound reported to the blender.
    pub max_gridscale_distance: f64,
    /// Points returned verbatim by every gather call.
    pub points: Vec<SamplePoint>,
}

impl PointGatherer for FixedPointGatherer {
    fn max_gridscale_distance_to_closest_point(&self) -> f64 {
        self.max_gridscale_distance
    }

    fn gather_points(
        &self,
        _seed: u64,
        _chunk_base_x: i32,
        _chunk_base_z: i32,
        _chunk_width: u32,
        _max_contribution_radius: f64,
    ) -> Vec<SamplePoint> {
        self.points.clone()
    }
}

/// Hash-jittered square lattice gatherer.
///
/// One point per lattice cell, displaced up to a quarter cell per axis by a
/// seeded hash. Simple enough to reason about the coverage bound exactly: a
/// location is at most `sqrt(2) / 2` lattice units from its cell center, and
/// the cell's point at most `sqrt(2) / 4` from that center.
pub struct JitterGridGatherer {
    frequency: f64,
}

impl JitterGridGatherer {
    /// Create a lattice with the given sampling frequency (cells per world
    /// unit). Must match the frequency the blender was configured with.
    #[must_use]
    pub const fn new(frequency: f64) -> Self {
        Self { frequency }
    }

    fn cell_point(&self, seed: u64, cell_x: i64, cell_z: i64) -> SamplePoint {
        let jitter_x = unit_float(hash_cell(seed, cell_x, cell_z, JITTER_X_SALT)) - 0.5;
        let jitter_z = unit_float(hash_cell(seed, cell_x, cell_z, JITTER_Z_SALT)) - 0.5;
        let cell_size = 1.0 / self.frequency;
        let grid_x = cell_x as f64 + 0.5 + jitter_x * 0.5;
        let grid_z = cell_z as f64 + 0.5 + jitter_z * 0.5;
        SamplePoint::new(grid_x * cell_size, grid_z * cell_size)
    }
}

impl PointGatherer for JitterGridGatherer {
    fn max_gridscale_distance_to_closest_point(&self) -> f64 {
        // sqrt(2) / 2 to the cell center plus sqrt(2) / 4 of jitter.
        0.75 * std::f64::consts::SQRT_2
    }

    fn gather_points(
        &self,
        seed: u64,
        chunk_base_x: i32,
        chunk_base_z: i32,
        chunk_width: u32,
        max_contribution_radius: f64,
    ) -> Vec<SamplePoint> {
        let min_x = f64::from(chunk_base_x) - max_contribution_radius;
        let max_x = f64::from(chunk_base_x) + f64::from(chunk_width) + max_contribution_radius;
        let min_z = f64::from(chunk_base_z) - max_contribution_radius;
        let max_z = f64::from(chunk_base_z) + f64::from(chunk_width) + max_contribution_radius;

        // One cell of slop on each side; the blender distance-tests anyway.
        let cell_min_x = (min_x * self.frequency).floor() as i64 - 1;
        let cell_max_x = (max_x * self.frequency).floor() as i64 + 1;
        let cell_min_z = (min_z * self.frequency).floor() as i64 - 1;
        let cell_max_z = (max_z * self.frequency).floor() as i64 + 1;

        let mut points = Vec::new();
        for cell_z in cell_min_z..=cell_max_z {
            for cell_x in cell_min_x..=cell_max_x {
                points.push(self.cell_point(seed, cell_x, cell_z));
            }
        }
        points
    }
}

const JITTER_X_SALT: u64 = 0x517C_C1B7_2722_0A95;
const JITTER_Z_SALT: u64 = 0x2545_F491_4F6C_DD1D;

/// Mix a seed and lattice cell into a uniform 64-bit hash.
fn hash_cell(seed: u64, cell_x: i64, cell_z: i64, salt: u64) -> u64 {
    let mut hash = seed ^ salt;
    hash = hash
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(cell_x as u64);
    hash = hash
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(cell_z as u64);
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94D0_49BB_1331_11EB);
    hash ^ (hash >> 31)
}

/// Top 53 bits of a hash as a float in `[0, 1)`.
fn unit_float(hash: u64) -> f64 {
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

/// Classifier assigning one of `biome_count` biomes to each square region of
/// `region_size` world units, by hash. Deterministic across instances.
pub fn region_classifier(region_size: f64, biome_count: u32) -> impl Fn(f64, f64) -> BiomeId {
    move |x: f64, z: f64| {
        let cell_x = (x / region_size).floor() as i64;
        let cell_z = (z / region_size).floor() as i64;
        let hash = hash_cell(0xA076_1D64_78BD_642F, cell_x, cell_z, 0);
        BiomeId((hash % u64::from(biome_count)) as u32)
    }
}

/// Per-column sums of all layer weights, flattened row-major.
pub fn column_weight_sums(blend: &ChunkBlend) -> Vec<f64> {
    let mut sums = vec![0.0; blend.column_count()];
    for layer in blend.layers() {
        for (sum, weight) in sums.iter_mut().zip(layer.weights()) {
            *sum += *weight;
        }
    }
    sums
}

/// MD5 digest over layer biomes and weight bits, for run-to-run comparisons.
pub fn blend_digest(blend: &ChunkBlend) -> String {
    let mut ctx = md5::Context::new();
    for layer in blend.layers() {
        ctx.consume(layer.biome().0.to_le_bytes());
        for weight in layer.weights() {
            ctx.consume(weight.to_le_bytes());
        }
    }
    format!("{:x}", ctx.finalize())
}
