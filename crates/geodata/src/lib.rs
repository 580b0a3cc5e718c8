pub mod anchor;
pub mod feature;
pub mod geometry;

// Geodata crate: feature and geometry primitives only.
pub use anchor::*;
pub use feature::*;
pub use geometry::*;
