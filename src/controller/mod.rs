//! Viewport state, render-strategy switching, and frame presentation.
//!
//! [`CanvasController`] owns the scene, the scroll and zoom state reported by
//! the host, and the retained images the host displays. Below 1.0 zoom the
//! whole canvas is rendered at reduced fidelity; at and above 1.0 only the
//! visible rectangle is rendered at device resolution. Crossing the threshold
//! switches strategy on the refresh that observes it.

pub mod host;

pub use host::{NullHost, ScrollHost};

use std::sync::Arc;

use log::{debug, warn};

use crate::config::CanvasConfig;
use crate::draw::Color;
use crate::geometry::{Point, Rect, Size};
use crate::numeric;
use crate::render::{
    DisplayList, ImageRenderer, ListRecorder, RasterImage, RenderJob, RenderMode, RenderQueue,
    Transform,
};
use crate::scene::{CanvasLayerManager, HitOverlay};

type HitAction = Box<dyn FnMut(&str)>;

/// Viewport frame pinned to the content position it was rendered for. The
/// image stays glued to that position while newer scroll offsets render in
/// the background.
struct PlacedImage {
    image: RasterImage,
    rect: Rect,
}

/// Everything the host needs to paint one frame.
pub struct Presentation<'a> {
    pub mode: RenderMode,
    pub background: Color,
    /// Retained image for the active mode, if one has been rendered.
    pub image: Option<&'a RasterImage>,
    /// Content-space rectangle the image maps onto.
    pub image_rect: Rect,
    /// Total scrollable content extent at the current zoom.
    pub content_size: Size,
}

/// Owns the scene and the viewport, and decides how and when it is rendered.
///
/// All methods must be called from the thread that owns the controller.
/// Rasterization itself runs through the injected [`RenderQueue`]; finished
/// frames come back via [`CanvasController::poll_completed`].
pub struct CanvasController {
    scene: CanvasLayerManager,
    hit_overlay: HitOverlay,
    on_hit_target_tapped: Option<HitAction>,
    on_hit_target_released: Option<HitAction>,

    canvas_size: Size,
    viewport_size: Size,
    content_offset: Point,
    zoom_scale: f64,
    min_zoom_scale: f64,
    max_zoom_scale: f64,
    /// Zoom at the previous refresh; mode transitions compare against it.
    last_rendered_zoom_scale: f64,
    render_mode: RenderMode,
    background: Color,

    full_canvas_image: Option<RasterImage>,
    viewport_image: Option<PlacedImage>,

    renderer: Arc<dyn ImageRenderer>,
    queue: Box<dyn RenderQueue>,
    host: Box<dyn ScrollHost>,

    generation_counter: u64,
    latest_full_generation: u64,
    latest_viewport_generation: u64,
}

/// Zoom at and above 1.0 renders the visible rectangle only; below it the
/// whole canvas is rendered at reduced fidelity.
fn mode_for_zoom(zoom: f64) -> RenderMode {
    if numeric::is_greater_or_equal(zoom, 1.0) {
        RenderMode::ViewportOnly
    } else {
        RenderMode::FullCanvas
    }
}

impl CanvasController {
    /// Builds a controller from its configuration and pushes the configured
    /// scroll behavior to the host. The zoom starts at the configured
    /// minimum, fully zoomed out.
    pub fn new(
        config: &CanvasConfig,
        renderer: Arc<dyn ImageRenderer>,
        queue: Box<dyn RenderQueue>,
        mut host: Box<dyn ScrollHost>,
    ) -> Self {
        let canvas_size = Size::new(config.canvas_width, config.canvas_height);
        let zoom_scale = config.min_zoom_scale;

        host.set_zoom_range(config.min_zoom_scale, config.max_zoom_scale);
        host.set_zoom_scale(zoom_scale, false);
        host.set_bounce_enabled(config.bounce_enabled);
        host.set_scroll_indicators_visible(config.scroll_indicators_visible);
        host.set_content_size(canvas_size.scaled(zoom_scale));

        Self {
            scene: CanvasLayerManager::new(),
            hit_overlay: HitOverlay::new(),
            on_hit_target_tapped: None,
            on_hit_target_released: None,
            canvas_size,
            viewport_size: Size::ZERO,
            content_offset: Point::ZERO,
            zoom_scale,
            min_zoom_scale: config.min_zoom_scale,
            max_zoom_scale: config.max_zoom_scale,
            last_rendered_zoom_scale: zoom_scale,
            render_mode: mode_for_zoom(zoom_scale),
            background: config.background.to_color(),
            full_canvas_image: None,
            viewport_image: None,
            renderer,
            queue,
            host,
            generation_counter: 0,
            latest_full_generation: 0,
            latest_viewport_generation: 0,
        }
    }

    pub fn layer_manager(&self) -> &CanvasLayerManager {
        &self.scene
    }

    pub fn layer_manager_mut(&mut self) -> &mut CanvasLayerManager {
        &mut self.scene
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    pub fn min_zoom_scale(&self) -> f64 {
        self.min_zoom_scale
    }

    pub fn max_zoom_scale(&self) -> f64 {
        self.max_zoom_scale
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Canvas size scaled by the current zoom, in device units.
    pub fn content_size(&self) -> Size {
        self.canvas_size.scaled(self.zoom_scale)
    }

    pub fn hit_overlay(&self) -> &HitOverlay {
        &self.hit_overlay
    }

    /// Scene-space rectangle currently on screen.
    ///
    /// The raw rectangle is the scroll offset and viewport size divided by
    /// the zoom. At or above the minimum zoom each axis is clamped so the
    /// rectangle stays inside the canvas, shifting the origin back by the
    /// overflow but never below zero. Below the minimum zoom the rectangle
    /// is left unclamped; the host is mid-bounce there and clamping would
    /// fight its settling animation.
    pub fn visible_rect(&self) -> Rect {
        let mut origin = Point::new(
            self.content_offset.x / self.zoom_scale,
            self.content_offset.y / self.zoom_scale,
        );
        let size = Size::new(
            self.viewport_size.width / self.zoom_scale,
            self.viewport_size.height / self.zoom_scale,
        );
        if numeric::is_greater_or_equal(self.zoom_scale, self.min_zoom_scale) {
            let overflow_x = origin.x + size.width - self.canvas_size.width;
            if numeric::is_positive(overflow_x) {
                origin.x = (origin.x - overflow_x).max(0.0);
            }
            let overflow_y = origin.y + size.height - self.canvas_size.height;
            if numeric::is_positive(overflow_y) {
                origin.y = (origin.y - overflow_y).max(0.0);
            }
        }
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Resizes the logical canvas and recenters the viewport on it.
    pub fn set_canvas_size(&mut self, size: Size) -> &mut Self {
        if size.is_empty() {
            warn!(
                "ignoring empty canvas size {}x{}",
                size.width, size.height
            );
            return self;
        }
        self.canvas_size = size;
        self.center_viewport();
        self.refresh();
        self
    }

    pub fn set_min_zoom_scale(&mut self, scale: f64) -> &mut Self {
        if !numeric::is_positive(scale) {
            warn!("ignoring non-positive minimum zoom {scale}");
            return self;
        }
        if numeric::is_greater(scale, self.max_zoom_scale) {
            warn!(
                "ignoring minimum zoom {scale} above maximum {}",
                self.max_zoom_scale
            );
            return self;
        }
        self.min_zoom_scale = scale;
        self.host.set_zoom_range(self.min_zoom_scale, self.max_zoom_scale);
        self
    }

    pub fn set_max_zoom_scale(&mut self, scale: f64) -> &mut Self {
        if numeric::is_less(scale, self.min_zoom_scale) {
            warn!(
                "ignoring maximum zoom {scale} below minimum {}",
                self.min_zoom_scale
            );
            return self;
        }
        self.max_zoom_scale = scale;
        self.host.set_zoom_range(self.min_zoom_scale, self.max_zoom_scale);
        self
    }

    /// Sets the minimum zoom to the scale at which the whole canvas exactly
    /// fits the viewport.
    pub fn match_min_zoom_to_canvas_size(&mut self) -> &mut Self {
        if self.viewport_size.is_empty() {
            warn!("cannot match minimum zoom before the viewport has a size");
            return self;
        }
        let fit = (self.viewport_size.width / self.canvas_size.width)
            .min(self.viewport_size.height / self.canvas_size.height);
        self.set_min_zoom_scale(fit)
    }

    pub fn set_background_color(&mut self, color: Color) -> &mut Self {
        self.background = color;
        self
    }

    pub fn set_bounce_enabled(&mut self, enabled: bool) -> &mut Self {
        self.host.set_bounce_enabled(enabled);
        self
    }

    pub fn set_scroll_indicators_visible(&mut self, visible: bool) -> &mut Self {
        self.host.set_scroll_indicators_visible(visible);
        self
    }

    pub fn set_on_hit_target_tapped(&mut self, action: impl FnMut(&str) + 'static) -> &mut Self {
        self.on_hit_target_tapped = Some(Box::new(action));
        self
    }

    pub fn set_on_hit_target_released(&mut self, action: impl FnMut(&str) + 'static) -> &mut Self {
        self.on_hit_target_released = Some(Box::new(action));
        self
    }

    // ------------------------------------------------------------------
    // Scroll and zoom
    // ------------------------------------------------------------------

    /// Scrolls so the given content-space position sits at the viewport
    /// origin. The offset is stored as requested; rendering clamps it
    /// through [`CanvasController::visible_rect`].
    pub fn scroll_to(&mut self, position: Point, animated: bool) {
        self.content_offset = position;
        self.host.set_scroll_position(position, animated);
        self.refresh();
    }

    /// Zooms to the given scale, clamped to the configured bounds.
    pub fn zoom_to(&mut self, scale: f64, animated: bool) {
        let clamped = scale.clamp(self.min_zoom_scale, self.max_zoom_scale);
        if !numeric::is_equal(clamped, scale) {
            debug!("clamping requested zoom {scale} to {clamped}");
        }
        self.zoom_scale = clamped;
        self.host.set_zoom_scale(clamped, animated);
        self.refresh();
    }

    /// Zooms and scrolls so the given scene-space rectangle fills the
    /// viewport, centered.
    pub fn zoom_to_rect(&mut self, rect: Rect, animated: bool) {
        if rect.is_empty() || self.viewport_size.is_empty() {
            debug!("ignoring zoom to degenerate rect {rect:?}");
            return;
        }
        let scale = (self.viewport_size.width / rect.width())
            .min(self.viewport_size.height / rect.height())
            .clamp(self.min_zoom_scale, self.max_zoom_scale);
        let center = rect.center();
        let offset = Point::new(
            (center.x * scale - self.viewport_size.width / 2.0).max(0.0),
            (center.y * scale - self.viewport_size.height / 2.0).max(0.0),
        );
        self.zoom_scale = scale;
        self.content_offset = offset;
        self.host.set_zoom_scale(scale, animated);
        self.host.set_scroll_position(offset, animated);
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// The host's viewport changed size. The first call centers the canvas
    /// in the new viewport; later calls keep the scroll position.
    pub fn viewport_resized(&mut self, size: Size) {
        let first = self.viewport_size.is_empty();
        self.viewport_size = size;
        if first {
            self.center_viewport();
        }
        self.refresh();
    }

    /// The host scrolled, by user gesture or animation.
    pub fn scroll_changed(&mut self, offset: Point) {
        self.content_offset = offset;
        self.refresh();
    }

    /// The host's zoom changed. The value is taken as reported, including
    /// out-of-range values during bounce; [`CanvasController::zoom_to`] is
    /// the clamping path.
    pub fn zoom_changed(&mut self, scale: f64) {
        if !numeric::is_positive(scale) {
            warn!("ignoring non-positive zoom scale {scale}");
            return;
        }
        self.zoom_scale = scale;
        self.refresh();
    }

    /// A scroll or zoom gesture finished settling.
    pub fn drag_ended(&mut self) {
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Recomputes layout and re-renders for the current zoom.
    ///
    /// Entering viewport-only mode renders synchronously, once per upward
    /// crossing, so the zoomed view never flashes stale full-canvas pixels.
    /// Entering full-canvas mode drops the viewport image and reveals the
    /// retained full-canvas image while a fresh one renders in the
    /// background. Without a mode change the active image re-renders
    /// asynchronously and the previous frame stays visible until the new
    /// one is installed.
    pub fn refresh(&mut self) {
        self.host.set_content_size(self.content_size());
        self.rebuild_hit_overlay();

        if self.viewport_size.is_empty() {
            debug!("skipping render; viewport has no size yet");
            return;
        }

        let mode = mode_for_zoom(self.zoom_scale);
        if mode != mode_for_zoom(self.last_rendered_zoom_scale) {
            match mode {
                RenderMode::ViewportOnly => self.render_viewport_sync(),
                RenderMode::FullCanvas => {
                    self.viewport_image = None;
                    self.request_render(RenderMode::FullCanvas);
                }
            }
        } else {
            self.request_render(mode);
        }
        self.render_mode = mode;
        self.last_rendered_zoom_scale = self.zoom_scale;
        self.host.request_redraw();
    }

    /// Re-renders the active image asynchronously without touching layout.
    pub fn redraw(&mut self) {
        if self.viewport_size.is_empty() {
            return;
        }
        self.request_render(self.render_mode);
    }

    /// Collects a finished background render, if any, and installs it.
    ///
    /// A frame is discarded when it arrives for an inactive mode or with a
    /// superseded generation; only the newest request per mode is ever
    /// published. Returns whether an image was installed.
    pub fn poll_completed(&mut self) -> bool {
        let Some(completed) = self.queue.try_take_completed() else {
            return false;
        };
        if completed.mode != self.render_mode {
            debug!(
                "discarding completed {:?} render; mode is now {:?}",
                completed.mode, self.render_mode
            );
            return false;
        }
        let latest = self.latest_generation(completed.mode);
        if completed.generation < latest {
            debug!(
                "discarding stale {:?} render (generation {} < {latest})",
                completed.mode, completed.generation
            );
            return false;
        }
        match completed.mode {
            RenderMode::FullCanvas => self.full_canvas_image = Some(completed.image),
            RenderMode::ViewportOnly => {
                self.viewport_image = Some(PlacedImage {
                    image: completed.image,
                    rect: self.visible_rect().scaled(self.zoom_scale),
                });
            }
        }
        self.host.request_redraw();
        true
    }

    /// Snapshot of what the host should paint right now.
    pub fn presentation(&self) -> Presentation<'_> {
        let content_size = self.content_size();
        match self.render_mode {
            RenderMode::FullCanvas => Presentation {
                mode: RenderMode::FullCanvas,
                background: self.background,
                image: self.full_canvas_image.as_ref(),
                image_rect: Rect::new(0.0, 0.0, content_size.width, content_size.height),
                content_size,
            },
            RenderMode::ViewportOnly => {
                let (image, image_rect) = match &self.viewport_image {
                    Some(placed) => (Some(&placed.image), placed.rect),
                    None => (None, Rect::default()),
                };
                Presentation {
                    mode: RenderMode::ViewportOnly,
                    background: self.background,
                    image,
                    image_rect,
                    content_size,
                }
            }
        }
    }

    fn request_render(&mut self, mode: RenderMode) {
        let generation = self.next_generation(mode);
        let list = self.record_scene(mode);
        self.queue.submit(RenderJob {
            list,
            mode,
            generation,
        });
    }

    /// Renders the visible rectangle inline and installs it immediately.
    fn render_viewport_sync(&mut self) {
        // Taking a generation here also marks in-flight async viewport
        // frames as superseded.
        self.next_generation(RenderMode::ViewportOnly);
        let list = self.record_scene(RenderMode::ViewportOnly);
        match self.renderer.render(&list) {
            Ok(image) => {
                self.viewport_image = Some(PlacedImage {
                    image,
                    rect: self.visible_rect().scaled(self.zoom_scale),
                });
            }
            Err(e) => {
                warn!("synchronous viewport render failed: {e}");
                self.viewport_image = None;
            }
        }
    }

    /// Records the scene into a self-contained device-space snapshot of the
    /// current viewport state.
    fn record_scene(&self, mode: RenderMode) -> DisplayList {
        match mode {
            RenderMode::FullCanvas => {
                let content = self.content_size();
                let width = (content.width.ceil() as u32).max(1);
                let height = (content.height.ceil() as u32).max(1);
                let transform = Transform::new(self.zoom_scale, 0.0, 0.0);
                let mut recorder =
                    ListRecorder::with_background(width, height, transform, self.background);
                self.scene.record_layers(&mut recorder, None, || false);
                recorder.finish()
            }
            RenderMode::ViewportOnly => {
                let visible = self.visible_rect();
                let width = (self.viewport_size.width.ceil() as u32).max(1);
                let height = (self.viewport_size.height.ceil() as u32).max(1);
                let transform = Transform::new(
                    self.zoom_scale,
                    visible.min_x() * self.zoom_scale,
                    visible.min_y() * self.zoom_scale,
                );
                let mut recorder =
                    ListRecorder::with_background(width, height, transform, self.background);
                self.scene.record_layers(&mut recorder, Some(&visible), || false);
                recorder.finish()
            }
        }
    }

    fn next_generation(&mut self, mode: RenderMode) -> u64 {
        self.generation_counter += 1;
        match mode {
            RenderMode::FullCanvas => self.latest_full_generation = self.generation_counter,
            RenderMode::ViewportOnly => self.latest_viewport_generation = self.generation_counter,
        }
        self.generation_counter
    }

    fn latest_generation(&self, mode: RenderMode) -> u64 {
        match mode {
            RenderMode::FullCanvas => self.latest_full_generation,
            RenderMode::ViewportOnly => self.latest_viewport_generation,
        }
    }

    /// Centers the zoomed content in the viewport.
    fn center_viewport(&mut self) {
        let content = self.content_size();
        let offset = Point::new(
            ((content.width - self.viewport_size.width) / 2.0).max(0.0),
            ((content.height - self.viewport_size.height) / 2.0).max(0.0),
        );
        self.content_offset = offset;
        self.host.set_scroll_position(offset, false);
    }

    // ------------------------------------------------------------------
    // Hit targets
    // ------------------------------------------------------------------

    /// Resolves a press at a content-space point against the hit overlay,
    /// fires the tap action with the target's id, and schedules a redraw.
    /// Returns whether a target was hit.
    pub fn hit_target_tapped(&mut self, point: Point) -> bool {
        let Some(id) = self.hit_overlay.hit_test(point).map(|r| r.id.clone()) else {
            return false;
        };
        debug!("hit target '{id}' tapped");
        if let Some(action) = self.on_hit_target_tapped.as_mut() {
            action(&id);
        }
        self.redraw();
        true
    }

    /// Release counterpart of [`CanvasController::hit_target_tapped`].
    pub fn hit_target_released(&mut self, point: Point) -> bool {
        let Some(id) = self.hit_overlay.hit_test(point).map(|r| r.id.clone()) else {
            return false;
        };
        debug!("hit target '{id}' released");
        if let Some(action) = self.on_hit_target_released.as_mut() {
            action(&id);
        }
        self.redraw();
        true
    }

    /// Remaps every registered hit target into content space. Offsets do not
    /// move targets; they live in content coordinates and scroll with it.
    fn rebuild_hit_overlay(&mut self) {
        self.hit_overlay.rebuild(
            self.scene.hit_targets(),
            &Transform::new(self.zoom_scale, 0.0, 0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::render::{CompletedRender, RenderError};
    use crate::scene::HitTarget;

    #[derive(Default)]
    struct QueueState {
        submitted: Vec<(RenderMode, u64)>,
        completed: Option<CompletedRender>,
    }

    /// Queue that records submissions and completes only when told to.
    #[derive(Clone, Default)]
    struct DeferredQueue {
        state: Arc<Mutex<QueueState>>,
    }

    impl DeferredQueue {
        fn submissions(&self) -> Vec<(RenderMode, u64)> {
            self.state.lock().unwrap().submitted.clone()
        }

        fn complete(&self, mode: RenderMode, generation: u64) {
            self.state.lock().unwrap().completed = Some(CompletedRender {
                image: RasterImage::blank(1, 1),
                mode,
                generation,
            });
        }
    }

    impl RenderQueue for DeferredQueue {
        fn submit(&self, job: RenderJob) {
            self.state
                .lock()
                .unwrap()
                .submitted
                .push((job.mode, job.generation));
        }

        fn try_take_completed(&self) -> Option<CompletedRender> {
            self.state.lock().unwrap().completed.take()
        }
    }

    #[derive(Clone, Default)]
    struct CountingRenderer {
        calls: Arc<Mutex<usize>>,
    }

    impl CountingRenderer {
        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl ImageRenderer for CountingRenderer {
        fn render(&self, list: &DisplayList) -> Result<RasterImage, RenderError> {
            *self.calls.lock().unwrap() += 1;
            Ok(RasterImage::blank(list.width, list.height))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingHost {
        redraws: Arc<Mutex<usize>>,
        scrolled_to: Arc<Mutex<Option<Point>>>,
    }

    impl ScrollHost for RecordingHost {
        fn set_scroll_position(&mut self, position: Point, _animated: bool) {
            *self.scrolled_to.lock().unwrap() = Some(position);
        }

        fn request_redraw(&mut self) {
            *self.redraws.lock().unwrap() += 1;
        }
    }

    fn controller() -> (CanvasController, DeferredQueue, CountingRenderer, RecordingHost) {
        let queue = DeferredQueue::default();
        let renderer = CountingRenderer::default();
        let host = RecordingHost::default();
        let controller = CanvasController::new(
            &CanvasConfig::default(),
            Arc::new(renderer.clone()),
            Box::new(queue.clone()),
            Box::new(host.clone()),
        );
        (controller, queue, renderer, host)
    }

    #[test]
    fn visible_rect_clamps_to_canvas_bounds() {
        let (mut controller, ..) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        controller.zoom_to(1.0, false);
        controller.scroll_to(Point::new(2900.0, 2900.0), false);

        let visible = controller.visible_rect();
        assert_eq!(visible.origin, Point::new(2700.0, 2700.0));
        assert_eq!(visible.size, Size::new(300.0, 300.0));
    }

    #[test]
    fn visible_rect_is_unclamped_below_minimum_zoom() {
        let (mut controller, ..) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        // Below the 0.2 minimum, as reported mid-bounce.
        controller.zoom_changed(0.1);
        controller.scroll_changed(Point::new(290.0, 290.0));

        let visible = controller.visible_rect();
        assert_eq!(visible.origin, Point::new(2900.0, 2900.0));
        assert_eq!(visible.size, Size::new(3000.0, 3000.0));
    }

    #[test]
    fn first_viewport_resize_centers_the_content() {
        let (mut controller, _, _, host) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        // 3000 canvas at 0.2 zoom is 600 content; 150 hangs off each side.
        assert_eq!(controller.content_offset(), Point::new(150.0, 150.0));
        assert_eq!(
            *host.scrolled_to.lock().unwrap(),
            Some(Point::new(150.0, 150.0))
        );

        controller.scroll_to(Point::ZERO, false);
        controller.viewport_resized(Size::new(400.0, 400.0));
        assert_eq!(controller.content_offset(), Point::ZERO);
    }

    #[test]
    fn upward_zoom_crossing_renders_synchronously_exactly_once() {
        let (mut controller, queue, renderer, _) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));

        controller.zoom_changed(0.9);
        assert_eq!(controller.render_mode(), RenderMode::FullCanvas);
        assert_eq!(renderer.calls(), 0);

        controller.zoom_changed(1.1);
        assert_eq!(controller.render_mode(), RenderMode::ViewportOnly);
        assert_eq!(renderer.calls(), 1);

        controller.zoom_changed(1.5);
        controller.zoom_changed(2.0);
        assert_eq!(renderer.calls(), 1);
        let viewport_submissions = queue
            .submissions()
            .iter()
            .filter(|(mode, _)| *mode == RenderMode::ViewportOnly)
            .count();
        assert_eq!(viewport_submissions, 2);
    }

    #[test]
    fn downward_zoom_crossing_reveals_the_full_canvas_image() {
        let (mut controller, queue, _, _) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        controller.zoom_changed(1.2);
        assert!(controller.presentation().image.is_some());

        controller.zoom_changed(0.8);
        assert_eq!(controller.render_mode(), RenderMode::FullCanvas);
        assert_eq!(
            queue.submissions().last().map(|(mode, _)| *mode),
            Some(RenderMode::FullCanvas)
        );
        // No full-canvas frame has completed yet, so only the background
        // shows until the queued render lands.
        assert!(controller.presentation().image.is_none());
    }

    #[test]
    fn zoom_mode_threshold_uses_tolerant_comparison() {
        let (mut controller, ..) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));

        controller.zoom_changed(1.0 - 1.0e-7);
        assert_eq!(controller.render_mode(), RenderMode::ViewportOnly);

        controller.zoom_changed(0.99);
        assert_eq!(controller.render_mode(), RenderMode::FullCanvas);
    }

    #[test]
    fn zoom_to_clamps_but_host_reported_zoom_is_taken_raw() {
        let (mut controller, ..) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));

        controller.zoom_to(50.0, false);
        assert_eq!(controller.zoom_scale(), 10.0);
        controller.zoom_to(0.05, false);
        assert_eq!(controller.zoom_scale(), 0.2);

        controller.zoom_changed(0.05);
        assert_eq!(controller.zoom_scale(), 0.05);
    }

    #[test]
    fn zoom_to_rect_centers_the_rect_in_the_viewport() {
        let (mut controller, ..) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        controller.zoom_to_rect(Rect::new(1000.0, 1000.0, 100.0, 100.0), false);

        assert_eq!(controller.zoom_scale(), 3.0);
        assert_eq!(controller.content_offset(), Point::new(3000.0, 3000.0));
        assert_eq!(controller.visible_rect().center(), Point::new(1050.0, 1050.0));
    }

    #[test]
    fn zoom_bound_setters_reject_invalid_values() {
        let (mut controller, ..) = controller();
        controller.set_min_zoom_scale(0.0);
        assert_eq!(controller.min_zoom_scale(), 0.2);
        controller.set_min_zoom_scale(20.0);
        assert_eq!(controller.min_zoom_scale(), 0.2);

        controller.set_min_zoom_scale(0.5);
        assert_eq!(controller.min_zoom_scale(), 0.5);
        controller.set_max_zoom_scale(0.4);
        assert_eq!(controller.max_zoom_scale(), 10.0);
    }

    #[test]
    fn match_min_zoom_fits_the_canvas_to_the_viewport() {
        let (mut controller, ..) = controller();
        controller.match_min_zoom_to_canvas_size();
        assert_eq!(controller.min_zoom_scale(), 0.2);

        controller.viewport_resized(Size::new(300.0, 600.0));
        controller.match_min_zoom_to_canvas_size();
        assert_eq!(controller.min_zoom_scale(), 0.1);
    }

    #[test]
    fn stale_or_wrong_mode_frames_are_discarded() {
        let (mut controller, queue, _, host) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        controller.redraw();
        controller.redraw();
        let submissions = queue.submissions();
        let (_, stale_generation) = submissions[submissions.len() - 2];
        let (_, latest_generation) = submissions[submissions.len() - 1];

        queue.complete(RenderMode::FullCanvas, stale_generation);
        assert!(!controller.poll_completed());
        assert!(controller.presentation().image.is_none());

        queue.complete(RenderMode::ViewportOnly, latest_generation);
        assert!(!controller.poll_completed());

        let redraws_before = *host.redraws.lock().unwrap();
        queue.complete(RenderMode::FullCanvas, latest_generation);
        assert!(controller.poll_completed());
        assert!(controller.presentation().image.is_some());
        assert!(*host.redraws.lock().unwrap() > redraws_before);
    }

    #[test]
    fn viewport_presentation_stays_pinned_to_its_render_position() {
        let (mut controller, queue, _, _) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        controller.zoom_to(1.0, false);
        assert_eq!(
            controller.presentation().image_rect,
            Rect::new(150.0, 150.0, 300.0, 300.0)
        );

        // Scrolling away queues an async render; until it lands, the frame
        // keeps covering the content it was rendered for.
        controller.scroll_to(Point::new(500.0, 400.0), false);
        assert_eq!(
            controller.presentation().image_rect,
            Rect::new(150.0, 150.0, 300.0, 300.0)
        );

        let (_, latest) = *queue.submissions().last().expect("render was queued");
        queue.complete(RenderMode::ViewportOnly, latest);
        assert!(controller.poll_completed());
        assert_eq!(
            controller.presentation().image_rect,
            Rect::new(500.0, 400.0, 300.0, 300.0)
        );
    }

    #[test]
    fn tap_inside_a_hit_target_fires_the_action_and_redraws() {
        let (mut controller, queue, _, _) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        controller
            .layer_manager_mut()
            .add_hit_target(HitTarget::new(
                "reset-button",
                Rect::new(100.0, 100.0, 50.0, 50.0),
            ))
            .unwrap();

        let tapped = Arc::new(Mutex::new(Vec::new()));
        let record = tapped.clone();
        controller.set_on_hit_target_tapped(move |id| record.lock().unwrap().push(id.to_string()));
        controller.refresh();

        // The target sits at (20, 20)..(30, 30) in content space at 0.2 zoom.
        let submissions_before = queue.submissions().len();
        assert!(controller.hit_target_tapped(Point::new(25.0, 25.0)));
        assert_eq!(tapped.lock().unwrap().as_slice(), ["reset-button"]);
        assert!(queue.submissions().len() > submissions_before);

        assert!(!controller.hit_target_tapped(Point::new(200.0, 200.0)));
        assert_eq!(tapped.lock().unwrap().len(), 1);
    }

    #[test]
    fn set_canvas_size_recenters_the_viewport() {
        let (mut controller, _, _, host) = controller();
        controller.viewport_resized(Size::new(300.0, 300.0));
        controller.scroll_to(Point::ZERO, false);

        controller.set_canvas_size(Size::new(5000.0, 5000.0));
        // 5000 * 0.2 = 1000 content; centering leaves 350 on each side.
        assert_eq!(controller.content_offset(), Point::new(350.0, 350.0));
        assert_eq!(
            *host.scrolled_to.lock().unwrap(),
            Some(Point::new(350.0, 350.0))
        );

        controller.set_canvas_size(Size::new(0.0, 100.0));
        assert_eq!(controller.canvas_size(), Size::new(5000.0, 5000.0));
    }
}
