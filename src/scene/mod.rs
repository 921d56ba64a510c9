//! Scene graph: layers of primitives, paint ordering, and hit targets.

pub mod hit;
pub mod layer;
pub mod manager;

pub use hit::{HitOverlay, HitRegion, HitTarget};
pub use layer::CanvasLayer;
pub use manager::CanvasLayerManager;

use thiserror::Error;

/// Rejected scene edits. These are caller mistakes, reported and recoverable;
/// the scene is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("layer id '{0}' is already in the scene")]
    DuplicateLayerId(String),

    #[error("hit target id '{0}' is already registered")]
    DuplicateHitTargetId(String),
}
