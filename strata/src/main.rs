//! Terrain blend preview tool.
//!
//! Blends a span of chunks with a jittered-lattice gatherer and a hashed
//! region classifier, then renders the result as a truecolor map in the
//! terminal. Every cell's color is the weight-convex mix of its biomes'
//! display colors, so smooth gradients between regions mean the blender is
//! doing its job.
//!
//! Usage: `strata [seed] [span]` where `seed` is an integer or an arbitrary
//! string to hash, and `span` is the number of chunks per map side.

use std::fmt::Write as _;
use std::time::Instant;

use rayon::prelude::*;
use strata_blend::{
    BiomeId, BlendConfig, ChunkBlend, PointGatherer, SamplePoint, ScatteredBiomeBlender,
};

const CHUNK_WIDTH: u32 = 16;
const SAMPLING_FREQUENCY: f64 = 1.0 / 12.0;
const MIN_BLEND_RADIUS: f64 = 5.0;
const REGION_SIZE: f64 = 40.0;
const DEFAULT_SPAN: u32 = 4;
const MAX_SPAN: u32 = 12;

/// Demo biome palette: name and display color per id.
const DEMO_BIOMES: [(&str, [u8; 3]); 6] = [
    ("ocean", [38, 68, 160]),
    ("plains", [120, 176, 92]),
    ("forest", [52, 120, 60]),
    ("desert", [214, 196, 120]),
    ("taiga", [94, 118, 106]),
    ("snowcap", [232, 238, 242]),
];

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().map_or(0, |raw| parse_seed(&raw));
    let span = args
        .next()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_SPAN)
        .clamp(1, MAX_SPAN);

    let config = BlendConfig {
        sampling_frequency: SAMPLING_FREQUENCY,
        min_blend_radius: MIN_BLEND_RADIUS,
        chunk_width: CHUNK_WIDTH,
    };
    let engine = ScatteredBiomeBlender::new(
        config,
        OffsetGridGatherer::new(SAMPLING_FREQUENCY),
        region_biome,
    )
    .expect("demo blend config should be valid");

    log::info!(
        "Blending {span}x{span} chunks with seed {seed} (kernel radius {:.2})",
        engine.blend_kernel_radius()
    );

    // The engine is shared read-only; every chunk is independent work.
    let origin = -((span * CHUNK_WIDTH) as i32) / 2;
    let coords: Vec<(u32, u32)> = (0..span)
        .flat_map(|cz| (0..span).map(move |cx| (cx, cz)))
        .collect();

    let start = Instant::now();
    let blends: Vec<ChunkBlend> = coords
        .par_iter()
        .map(|&(cx, cz)| {
            let blend = engine.blend_for_chunk(
                seed,
                origin + (cx * CHUNK_WIDTH) as i32,
                origin + (cz * CHUNK_WIDTH) as i32,
            );
            log::debug!("chunk ({cx}, {cz}): {} biome layers", blend.layers().len());
            blend
        })
        .collect();
    log::info!("Blended {} chunks in {:?}", blends.len(), start.elapsed());

    render_map(&blends, span);
    print_dominance(&blends, span);
}

/// Parse a seed argument: a plain integer, or any other string hashed the
/// same way world seeds are traditionally hashed (wrapping `* 31 + byte`).
fn parse_seed(raw: &str) -> u64 {
    raw.parse().unwrap_or_else(|_| {
        let mut hash: u64 = 0;
        for byte in raw.bytes() {
            hash = hash.wrapping_mul(31).wrapping_add(u64::from(byte));
        }
        hash
    })
}

/// Region-hash classifier for the demo: every `REGION_SIZE` square of world
/// space gets one biome from the palette.
fn region_biome(x: f64, z: f64) -> BiomeId {
    let cell_x = (x / REGION_SIZE).floor() as i64;
    let cell_z = (z / REGION_SIZE).floor() as i64;
    let hash = mix(0x93C4_67E3_7DB0_C7A4, cell_x, cell_z, 0);
    BiomeId((hash % DEMO_BIOMES.len() as u64) as u32)
}

fn render_map(blends: &[ChunkBlend], span: u32) {
    let side = span * CHUNK_WIDTH;
    let mut line = String::new();
    for z in 0..side {
        line.clear();
        for x in 0..side {
            let blend = &blends[((z / CHUNK_WIDTH) * span + x / CHUNK_WIDTH) as usize];
            let [r, g, b] = column_color(blend, x % CHUNK_WIDTH, z % CHUNK_WIDTH);
            let _ = write!(line, "\x1b[48;2;{r};{g};{b}m  ");
        }
        line.push_str("\x1b[0m");
        println!("{line}");
    }
}

/// Weight-convex mix of the biome display colors at one column.
///
/// Non-finite weights (a gatherer breaking its coverage bound) render as
/// magenta so the failure is impossible to miss.
fn column_color(blend: &ChunkBlend, xi: u32, zi: u32) -> [u8; 3] {
    let mut mixed = [0.0_f64; 3];
    for (biome, weight) in blend.weights_at(xi, zi) {
        let color = DEMO_BIOMES[biome.0 as usize % DEMO_BIOMES.len()].1;
        for (channel, component) in mixed.iter_mut().zip(color) {
            *channel += weight * f64::from(component);
        }
    }
    if mixed.iter().any(|channel| !channel.is_finite()) {
        log::warn!("non-finite blend weight; sample coverage is broken");
        return [255, 0, 255];
    }
    [
        mixed[0].round().clamp(0.0, 255.0) as u8,
        mixed[1].round().clamp(0.0, 255.0) as u8,
        mixed[2].round().clamp(0.0, 255.0) as u8,
    ]
}

fn print_dominance(blends: &[ChunkBlend], span: u32) {
    let mut dominance = [0_usize; DEMO_BIOMES.len()];
    let side = span * CHUNK_WIDTH;
    for z in 0..side {
        for x in 0..side {
            let blend = &blends[((z / CHUNK_WIDTH) * span + x / CHUNK_WIDTH) as usize];
            if let Some(biome) = blend.dominant_biome_at(x % CHUNK_WIDTH, z % CHUNK_WIDTH) {
                dominance[biome.0 as usize % DEMO_BIOMES.len()] += 1;
            }
        }
    }

    let total = u64::from(side) * u64::from(side);
    for (index, count) in dominance.iter().enumerate() {
        if *count > 0 {
            let (name, _) = DEMO_BIOMES[index];
            let percent = 100.0 * *count as f64 / total as f64;
            log::info!("{name}: {count} columns ({percent:.1}%)");
        }
    }
}

/// Jittered point lattice with every odd row offset by half a cell, so the
/// scatter looks less grid-like than a plain square lattice.
struct OffsetGridGatherer {
    frequency: f64,
}

impl OffsetGridGatherer {
    const fn new(frequency: f64) -> Self {
        Self { frequency }
    }
}

impl PointGatherer for OffsetGridGatherer {
    fn max_gridscale_distance_to_closest_point(&self) -> f64 {
        // At most sqrt(2) / 2 from the containing cell's center, and the
        // jitter displaces a point at most a quarter cell per axis.
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
        let cell_size = 1.0 / self.frequency;
        let min_x = (f64::from(chunk_base_x) - max_contribution_radius) * self.frequency;
        let max_x = (f64::from(chunk_base_x) + f64::from(chunk_width) + max_contribution_radius)
            * self.frequency;
        let min_z = (f64::from(chunk_base_z) - max_contribution_radius) * self.frequency;
        let max_z = (f64::from(chunk_base_z) + f64::from(chunk_width) + max_contribution_radius)
            * self.frequency;

        let mut points = Vec::new();
        for row in (min_z.floor() as i64 - 1)..=(max_z.floor() as i64 + 1) {
            let row_offset = if row.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
            for cell in (min_x.floor() as i64 - 1)..=(max_x.floor() as i64 + 1) {
                let jitter_x = unit_float(mix(seed, cell, row, 0x8864_0E35_B5A7_12C1)) - 0.5;
                let jitter_z = unit_float(mix(seed, cell, row, 0x41C6_4E6D_9C2B_5F71)) - 0.5;
                let grid_x = cell as f64 + 0.5 + row_offset + jitter_x * 0.5;
                let grid_z = row as f64 + 0.5 + jitter_z * 0.5;
                points.push(SamplePoint::new(grid_x * cell_size, grid_z * cell_size));
            }
        }
        points
    }
}

/// Mix a seed and lattice cell into a uniform 64-bit hash.
fn mix(seed: u64, cell_x: i64, cell_z: i64, salt: u64) -> u64 {
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
