//! Per-chunk biome weight layers.

use smallvec::SmallVec;

use crate::biome::BiomeId;

/// Inline capacity of the layer list. Chunks near a biome junction rarely see
/// more than a handful of distinct biomes, so the common case stays heapless.
const INLINE_LAYERS: usize = 8;

/// Blend weights for one biome across every column of a chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeWeightLayer {
    biome: BiomeId,
    weights: Box<[f64]>,
}

impl BiomeWeightLayer {
    fn new(biome: BiomeId, column_count: usize) -> Self {
        Self {
            biome,
            weights: vec![0.0; column_count].into_boxed_slice(),
        }
    }

    /// The biome this layer carries weights for.
    #[must_use]
    pub const fn biome(&self) -> BiomeId {
        self.biome
    }

    /// Per-column weights, flattened row-major (`zi * chunk_width + xi`).
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }
}

/// Blended biome weights for one chunk.
///
/// Layers appear in the order their biomes were first encountered among the
/// gathered sample points. For every column, the weights across all layers
/// sum to 1.0 up to floating-point rounding; a single layer carrying a 0.0
/// at some column simply means that biome has no influence there.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkBlend {
    chunk_width: u32,
    layers: SmallVec<[BiomeWeightLayer; INLINE_LAYERS]>,
}

impl ChunkBlend {
    pub(crate) fn new(chunk_width: u32) -> Self {
        Self {
            chunk_width,
            layers: SmallVec::new(),
        }
    }

    /// Index of the layer for `biome`, creating it at the tail if absent.
    ///
    /// The linear scan is deliberate: the layer count stays small enough that
    /// a map would cost more than it saves, and scanning preserves
    /// first-encounter order.
    pub(crate) fn layer_index_or_insert(&mut self, biome: BiomeId) -> usize {
        if let Some(index) = self.layers.iter().position(|layer| layer.biome == biome) {
            return index;
        }
        let column_count = self.column_count();
        self.layers.push(BiomeWeightLayer::new(biome, column_count));
        self.layers.len() - 1
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [BiomeWeightLayer] {
        &mut self.layers
    }

    /// Chunk side length this blend was computed for, in columns.
    #[must_use]
    pub const fn chunk_width(&self) -> u32 {
        self.chunk_width
    }

    /// Total number of columns, `chunk_width²`.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        (self.chunk_width as usize) * (self.chunk_width as usize)
    }

    /// Whether no biome layer is present. Only happens when the gatherer
    /// returned no points at all, which violates its coverage contract.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All weight layers, in first-encounter order.
    #[must_use]
    pub fn layers(&self) -> &[BiomeWeightLayer] {
        &self.layers
    }

    /// Flattened index of the column at local offsets `(xi, zi)`.
    #[must_use]
    pub const fn column_index(&self, xi: u32, zi: u32) -> usize {
        (zi * self.chunk_width + xi) as usize
    }

    /// Iterate `(biome, weight)` pairs for the column at `(xi, zi)`, in layer
    /// order.
    pub fn weights_at(&self, xi: u32, zi: u32) -> impl Iterator<Item = (BiomeId, f64)> + '_ {
        let index = self.column_index(xi, zi);
        self.layers
            .iter()
            .map(move |layer| (layer.biome, layer.weights[index]))
    }

    /// The biome with the highest weight at `(xi, zi)`, or `None` for an
    /// empty blend.
    #[must_use]
    pub fn dominant_biome_at(&self, xi: u32, zi: u32) -> Option<BiomeId> {
        let index = self.column_index(xi, zi);
        self.layers
            .iter()
            .max_by(|a, b| a.weights[index].total_cmp(&b.weights[index]))
            .map(|layer| layer.biome)
    }
}
