//! A named, ordered collection of primitives.

use uuid::Uuid;

use crate::draw::Primitive;
use crate::geometry::Rect;
use crate::render::DrawTarget;

/// One paint layer of the scene.
///
/// Primitives are appended only; their insertion order is their paint order
/// within the layer. The id names the layer inside the manager and must be
/// unique there.
#[derive(Clone, Debug)]
pub struct CanvasLayer {
    id: String,
    primitives: Vec<Primitive>,
}

impl CanvasLayer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            primitives: Vec::new(),
        }
    }

    /// Creates a layer with a random UUID id, for callers that never look
    /// the layer up by name.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Appends a primitive on top of the layer's existing content.
    pub fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.primitives.get_mut(index)
    }

    pub fn clear_primitives(&mut self) {
        self.primitives.clear();
    }

    /// Records every primitive in paint order.
    ///
    /// With a clip rect, primitives are culled by their padded bounding box:
    /// anything that does not intersect the clip, or has no box at all, is
    /// skipped. Without a clip every primitive is recorded (unstyled and
    /// degenerate ones draw nothing on their own).
    pub fn record(&self, target: &mut dyn DrawTarget, clip: Option<&Rect>) {
        for primitive in &self.primitives {
            if let Some(clip) = clip {
                match primitive.bounding_box() {
                    Some(bounds) if bounds.intersects(clip) => {}
                    _ => continue,
                }
            }
            primitive.record(target);
        }
    }
}
