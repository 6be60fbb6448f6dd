//! Scene-side data the core shares with the renderer.
//!
//! - [`Transform`]: TRS with an on-demand matrix
//! - [`BoundingBox`]: axis-aligned bounds reported by the asset loader

pub mod bounds;
pub mod transform;

pub use bounds::BoundingBox;
pub use transform::Transform;
