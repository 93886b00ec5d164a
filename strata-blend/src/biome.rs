//! Biome identity and the classification seam.

/// Opaque biome identifier.
///
/// The blender never interprets the value; it only groups sample points by it.
/// Callers typically store a registry index or palette id here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u32);

/// Resolves world-space columns to biomes.
///
/// Called once per gathered sample point, at the point's exact (possibly
/// fractional) coordinates. Implementations must be pure for the duration of
/// one blend call: the blender assumes two queries at the same position
/// return the same biome.
pub trait BiomeClassifier {
    /// The biome at the given world-space position.
    fn biome_at(&self, x: f64, z: f64) -> BiomeId;
}

impl<F> BiomeClassifier for F
where
    F: Fn(f64, f64) -> BiomeId,
{
    #[inline]
    fn biome_at(&self, x: f64, z: f64) -> BiomeId {
        self(x, z)
    }
}
