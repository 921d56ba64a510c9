//! Hit targets and the device-space overlay used to resolve taps.

use crate::geometry::{Point, Rect};
use crate::render::Transform;

/// An interactive region registered in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTarget {
    pub id: String,
    pub rect: Rect,
}

impl HitTarget {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self { id: id.into(), rect }
    }
}

/// A hit target mapped into device coordinates for the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub id: String,
    pub device_rect: Rect,
}

/// Device-space snapshot of the hit targets.
///
/// The overlay is rebuilt whenever zoom or scroll changes, so `hit_test`
/// can compare raw device points against it without converting back to
/// scene space. `revision` counts rebuilds, which lets callers tell a
/// fresh overlay from one left over from an earlier view.
#[derive(Debug, Default)]
pub struct HitOverlay {
    regions: Vec<HitRegion>,
    revision: u64,
}

impl HitOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the overlay with the targets mapped through `transform`,
    /// preserving registration order.
    pub fn rebuild(&mut self, targets: &[HitTarget], transform: &Transform) {
        self.regions.clear();
        self.regions.extend(targets.iter().map(|target| HitRegion {
            id: target.id.clone(),
            device_rect: Rect::new(
                transform.map_x(target.rect.min_x()),
                transform.map_y(target.rect.min_y()),
                transform.map_len(target.rect.width()),
                transform.map_len(target.rect.height()),
            ),
        }));
        self.revision += 1;
    }

    /// Returns the topmost region containing the device point, later
    /// registrations winning over earlier ones.
    pub fn hit_test(&self, point: Point) -> Option<&HitRegion> {
        self.regions
            .iter()
            .rev()
            .find(|region| region.device_rect.contains(point))
    }

    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
