//! Ordered layer storage with constant-time id lookup.

use std::collections::HashMap;

use log::{debug, warn};

use super::SceneError;
use super::hit::HitTarget;
use super::layer::CanvasLayer;
use crate::geometry::Rect;
use crate::render::DrawTarget;

/// Owns the scene's layers in paint order, plus the hit-target registry.
///
/// Layers live in a dense vector: position 0 paints first (bottom), the last
/// position paints on top, and there are never gaps. A side map from layer id
/// to position gives O(1) lookups; insert and remove shift positions and cost
/// O(n). The vector and the map are updated together through one reindex
/// routine, and any disagreement between them is a logic error that panics
/// rather than limping on with a corrupted scene.
#[derive(Debug, Default)]
pub struct CanvasLayerManager {
    layers: Vec<CanvasLayer>,
    positions: HashMap<String, usize>,
    hit_targets: Vec<HitTarget>,
}

impl CanvasLayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> impl Iterator<Item = &CanvasLayer> {
        self.layers.iter()
    }

    pub fn layer_at(&self, position: usize) -> Option<&CanvasLayer> {
        self.layers.get(position)
    }

    pub fn layer_at_mut(&mut self, position: usize) -> Option<&mut CanvasLayer> {
        self.layers.get_mut(position)
    }

    pub fn layer(&self, id: &str) -> Option<&CanvasLayer> {
        self.layers.get(*self.positions.get(id)?)
    }

    pub fn layer_mut(&mut self, id: &str) -> Option<&mut CanvasLayer> {
        let position = *self.positions.get(id)?;
        self.layers.get_mut(position)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Appends a layer on top of the stack.
    ///
    /// A duplicate id is rejected: the error is returned, a warning logged,
    /// and the scene left untouched.
    pub fn add_layer(&mut self, layer: CanvasLayer) -> Result<(), SceneError> {
        if self.positions.contains_key(layer.id()) {
            warn!("rejecting layer with duplicate id '{}'", layer.id());
            return Err(SceneError::DuplicateLayerId(layer.id().to_string()));
        }
        self.positions.insert(layer.id().to_string(), self.layers.len());
        self.layers.push(layer);
        self.assert_in_sync();
        Ok(())
    }

    /// Inserts a layer at the given position; layers at or above it shift up
    /// by one. A position past the end appends. Duplicate ids are rejected
    /// the same way as in [`CanvasLayerManager::add_layer`].
    pub fn insert_layer(&mut self, position: usize, layer: CanvasLayer) -> Result<(), SceneError> {
        if self.positions.contains_key(layer.id()) {
            warn!("rejecting layer with duplicate id '{}'", layer.id());
            return Err(SceneError::DuplicateLayerId(layer.id().to_string()));
        }
        let position = position.min(self.layers.len());
        self.layers.insert(position, layer);
        self.reindex_from(position);
        Ok(())
    }

    /// Removes a layer by id; layers above it shift down by one. Unknown
    /// ids are a lookup miss, not an error.
    pub fn remove_layer(&mut self, id: &str) -> Option<CanvasLayer> {
        let position = self.positions.remove(id)?;
        let layer = self.layers.remove(position);
        self.reindex_from(position);
        Some(layer)
    }

    /// Removes the layer at a position; layers above it shift down by one.
    /// Out-of-range positions are a lookup miss, not an error.
    pub fn remove_layer_at(&mut self, position: usize) -> Option<CanvasLayer> {
        if position >= self.layers.len() {
            return None;
        }
        let layer = self.layers.remove(position);
        self.positions.remove(layer.id());
        self.reindex_from(position);
        Some(layer)
    }

    /// Drops every layer. Hit targets are unaffected.
    pub fn remove_all_layers(&mut self) {
        self.layers.clear();
        self.positions.clear();
    }

    /// Records all layers bottom-to-top onto the target.
    ///
    /// `clip` culls primitives by their padded bounding boxes. The `stop`
    /// predicate is polled after each layer; once it returns true the
    /// remaining layers are skipped, which lets a superseded render give up
    /// mid-composite instead of finishing a frame nobody will see.
    pub fn record_layers(
        &self,
        target: &mut dyn DrawTarget,
        clip: Option<&Rect>,
        mut stop: impl FnMut() -> bool,
    ) {
        let count = self.layers.len();
        for (position, layer) in self.layers.iter().enumerate() {
            layer.record(target, clip);
            if position + 1 < count && stop() {
                debug!("stopping layer recording after {} of {count} layers", position + 1);
                return;
            }
        }
    }

    // ------------------------------------------------------------------
    // Hit targets
    // ------------------------------------------------------------------

    /// Registers a scene-space hit target. Duplicate ids are rejected and
    /// the registry left unchanged.
    pub fn add_hit_target(&mut self, target: HitTarget) -> Result<(), SceneError> {
        if self.hit_targets.iter().any(|t| t.id == target.id) {
            warn!("rejecting hit target with duplicate id '{}'", target.id);
            return Err(SceneError::DuplicateHitTargetId(target.id));
        }
        self.hit_targets.push(target);
        Ok(())
    }

    pub fn remove_hit_target(&mut self, id: &str) -> Option<HitTarget> {
        let index = self.hit_targets.iter().position(|t| t.id == id)?;
        Some(self.hit_targets.remove(index))
    }

    pub fn clear_hit_targets(&mut self) {
        self.hit_targets.clear();
    }

    pub fn hit_targets(&self) -> &[HitTarget] {
        &self.hit_targets
    }

    pub fn hit_target_count(&self) -> usize {
        self.hit_targets.len()
    }

    // ------------------------------------------------------------------
    // Index maintenance
    // ------------------------------------------------------------------

    /// Rewrites map entries for every layer at or above `start`, then checks
    /// that vector and map still describe the same scene.
    fn reindex_from(&mut self, start: usize) {
        for position in start..self.layers.len() {
            self.positions
                .insert(self.layers[position].id().to_string(), position);
        }
        self.assert_in_sync();
    }

    fn assert_in_sync(&self) {
        if self.positions.len() != self.layers.len() {
            panic!(
                "layer index out of sync: {} layers but {} index entries",
                self.layers.len(),
                self.positions.len()
            );
        }
    }
}
