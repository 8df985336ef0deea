//! # Policy Primitives
//!
//! Default constants for the Sentinet network engine.
//!
//! These are visualization-tuning defaults, not correctness requirements.
//! Every one of them can be overridden through `SizingPolicy` or `LayoutConfig`.

// =============================================================================
// NODE SIZING
// =============================================================================

/// Size added per record an energy keyword occurs in.
pub const SCALE_ENERGY: f64 = 150.0;

/// Smallest size an energy node is drawn with.
pub const MIN_SIZE_ENERGY: f64 = 200.0;

/// Fixed size of every category node, regardless of frequency.
pub const CATEGORY_SIZE: f64 = 600.0;

/// Size added per record a sentiment word occurs in.
pub const SCALE_SENTIMENT: f64 = 100.0;

/// Smallest size a sentiment node is drawn with.
pub const MIN_SIZE_SENTIMENT: f64 = 150.0;

// =============================================================================
// LAYOUT
// =============================================================================

/// Default optimal node distance `k` of the spring model.
pub const DEFAULT_K: f64 = 1.2;

/// Default layout seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default iteration budget.
pub const DEFAULT_ITERATIONS: usize = 50;

/// Mean per-node displacement under which the simulation counts as converged.
pub const DEFAULT_THRESHOLD: f64 = 1e-4;

/// Largest absolute coordinate after the final rescale.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Distance floor used by the force computations.
///
/// Keeps `k² / d` finite when two nodes get very close.
pub const MIN_DISTANCE: f64 = 0.01;

/// Initial temperature as a fraction of the initial spread.
pub const INITIAL_TEMPERATURE_RATIO: f64 = 0.1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of keywords accepted per group.
pub const MAX_KEYWORDS_PER_GROUP: usize = 1024;

/// Maximum keyword length in bytes.
pub const MAX_KEYWORD_LENGTH: usize = 128;

/// Upper bound on the layout iteration budget.
///
/// The simulation is O(iterations * n²); this bounds the worst case.
pub const MAX_ITERATIONS: usize = 10_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizing_floors_exceed_single_occurrence() {
        assert!(MIN_SIZE_ENERGY > SCALE_ENERGY);
        assert!(MIN_SIZE_SENTIMENT > SCALE_SENTIMENT);
    }

    #[test]
    fn distance_floor_is_positive() {
        assert!(MIN_DISTANCE > 0.0);
    }
}
