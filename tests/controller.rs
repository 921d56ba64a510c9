use std::sync::{Arc, Mutex};

use canvascope::config::CanvasConfig;
use canvascope::controller::{CanvasController, ScrollHost};
use canvascope::draw::{Color, FillSettings, Primitive, StrokeSettings, WHITE};
use canvascope::geometry::{LineSegment, Point, Rect, Shape, Size};
use canvascope::render::{
    CompletedRender, DisplayList, DrawOp, ImageRenderer, RasterImage, RenderError, RenderJob,
    RenderMode, RenderQueue,
};
use canvascope::scene::{CanvasLayer, HitTarget};

/// Queue double that keeps every submitted job so tests can inspect the
/// recorded display lists and hand frames back in any order.
#[derive(Clone, Default)]
struct CapturingQueue {
    state: Arc<Mutex<QueueState>>,
}

#[derive(Default)]
struct QueueState {
    jobs: Vec<RenderJob>,
    completed: Option<CompletedRender>,
}

impl CapturingQueue {
    fn job_count(&self) -> usize {
        self.state.lock().expect("queue lock").jobs.len()
    }

    fn with_job<R>(&self, index: usize, inspect: impl FnOnce(&RenderJob) -> R) -> R {
        let state = self.state.lock().expect("queue lock");
        inspect(&state.jobs[index])
    }

    fn with_last_job<R>(&self, inspect: impl FnOnce(&RenderJob) -> R) -> R {
        let state = self.state.lock().expect("queue lock");
        inspect(state.jobs.last().expect("a job was submitted"))
    }

    /// Finishes the job at `index` as a worker would, with a blank image of
    /// the job's dimensions.
    fn complete_job(&self, index: usize) {
        let mut state = self.state.lock().expect("queue lock");
        let job = &state.jobs[index];
        state.completed = Some(CompletedRender {
            image: RasterImage::blank(job.list.width, job.list.height),
            mode: job.mode,
            generation: job.generation,
        });
    }
}

impl RenderQueue for CapturingQueue {
    fn submit(&self, job: RenderJob) {
        self.state.lock().expect("queue lock").jobs.push(job);
    }

    fn try_take_completed(&self) -> Option<CompletedRender> {
        self.state.lock().expect("queue lock").completed.take()
    }
}

struct InlineRenderer;

impl ImageRenderer for InlineRenderer {
    fn render(&self, list: &DisplayList) -> Result<RasterImage, RenderError> {
        Ok(RasterImage::blank(list.width, list.height))
    }
}

#[derive(Clone, Default)]
struct CountingHost {
    redraws: Arc<Mutex<usize>>,
}

impl CountingHost {
    fn redraws(&self) -> usize {
        *self.redraws.lock().expect("host lock")
    }
}

impl ScrollHost for CountingHost {
    fn request_redraw(&mut self) {
        *self.redraws.lock().expect("host lock") += 1;
    }
}

fn controller_with(queue: &CapturingQueue, host: &CountingHost) -> CanvasController {
    CanvasController::new(
        &CanvasConfig::default(),
        Arc::new(InlineRenderer),
        Box::new(queue.clone()),
        Box::new(host.clone()),
    )
}

/// A 40-unit diagonal stroke starting at the given point.
fn pen_stroke(x: f64, y: f64) -> Primitive {
    Primitive::stroked(
        Shape::Line(LineSegment::new(Point::new(x, y), Point::new(x + 40.0, y + 40.0))),
        StrokeSettings::new().with_width(4.0),
    )
}

fn add_ink_layer(controller: &mut CanvasController, strokes: &[(f64, f64)]) {
    let mut layer = CanvasLayer::new("ink");
    for &(x, y) in strokes {
        layer.add_primitive(pen_stroke(x, y));
    }
    controller
        .layer_manager_mut()
        .add_layer(layer)
        .expect("unique layer id");
}

#[test]
fn full_canvas_frames_flow_from_queue_to_presentation() {
    let queue = CapturingQueue::default();
    let host = CountingHost::default();
    let mut controller = controller_with(&queue, &host);
    add_ink_layer(&mut controller, &[(100.0, 100.0)]);

    controller.viewport_resized(Size::new(300.0, 300.0));
    assert_eq!(controller.render_mode(), RenderMode::FullCanvas);
    assert!(controller.presentation().image.is_none());

    // The queued job is a self-contained snapshot: a content-sized surface,
    // background first, scene coordinates and widths scaled by the 0.2 zoom.
    queue.with_last_job(|job| {
        assert_eq!(job.mode, RenderMode::FullCanvas);
        assert_eq!((job.list.width, job.list.height), (600, 600));
        assert_eq!(
            job.list.ops[0],
            DrawOp::SetFill(FillSettings { color: WHITE })
        );
        assert!(job.list.ops.iter().any(|op| matches!(
            op,
            DrawOp::MoveTo { x, y } if *x == 20.0 && *y == 20.0
        )));
        assert!(job.list.ops.iter().any(|op| matches!(
            op,
            DrawOp::SetStroke(stroke) if stroke.width == 0.8
        )));
    });

    let redraws_before = host.redraws();
    queue.complete_job(0);
    assert!(controller.poll_completed());
    assert_eq!(host.redraws(), redraws_before + 1);

    let presentation = controller.presentation();
    let image = presentation.image.expect("completed frame installed");
    assert_eq!((image.width, image.height), (600, 600));
    assert_eq!(presentation.image_rect, Rect::new(0.0, 0.0, 600.0, 600.0));
    assert_eq!(presentation.content_size, Size::new(600.0, 600.0));
}

#[test]
fn zooming_in_renders_the_visible_rect_synchronously() {
    let queue = CapturingQueue::default();
    let host = CountingHost::default();
    let mut controller = controller_with(&queue, &host);
    add_ink_layer(&mut controller, &[(100.0, 100.0), (2000.0, 2000.0)]);

    controller.viewport_resized(Size::new(300.0, 300.0));
    controller.zoom_to(2.0, false);

    // The upward crossing rendered inline; a frame is already on screen,
    // pinned to the visible rect it was rendered for.
    assert_eq!(controller.render_mode(), RenderMode::ViewportOnly);
    let presentation = controller.presentation();
    let image = presentation.image.expect("synchronous frame");
    assert_eq!((image.width, image.height), (300, 300));
    assert_eq!(presentation.image_rect, Rect::new(150.0, 150.0, 300.0, 300.0));

    // Later scrolls re-render asynchronously. Only the stroke inside the
    // visible rect is recorded, mapped by zoom and scroll offset.
    controller.scroll_changed(Point::new(200.0, 200.0));
    queue.with_last_job(|job| {
        assert_eq!(job.mode, RenderMode::ViewportOnly);
        assert_eq!((job.list.width, job.list.height), (300, 300));
        let moves: Vec<(f64, f64)> = job
            .list
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::MoveTo { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(moves, vec![(0.0, 0.0)]);
        assert!(job.list.ops.iter().any(|op| matches!(
            op,
            DrawOp::SetStroke(stroke) if stroke.width == 8.0
        )));
    });
}

#[test]
fn zooming_back_out_reveals_the_retained_full_canvas_frame() {
    let queue = CapturingQueue::default();
    let host = CountingHost::default();
    let mut controller = controller_with(&queue, &host);
    add_ink_layer(&mut controller, &[(100.0, 100.0)]);

    controller.viewport_resized(Size::new(300.0, 300.0));
    queue.complete_job(0);
    assert!(controller.poll_completed());

    controller.zoom_to(2.0, false);
    assert_eq!(controller.render_mode(), RenderMode::ViewportOnly);

    // Zooming back out must not wait for a render: the retained full-canvas
    // image reappears immediately while a fresh one renders behind it.
    let jobs_before = queue.job_count();
    controller.zoom_to(0.2, false);
    assert_eq!(controller.render_mode(), RenderMode::FullCanvas);
    let presentation = controller.presentation();
    assert!(presentation.image.is_some());
    assert_eq!(presentation.image_rect, Rect::new(0.0, 0.0, 600.0, 600.0));
    assert_eq!(queue.job_count(), jobs_before + 1);
    queue.with_last_job(|job| assert_eq!(job.mode, RenderMode::FullCanvas));
}

#[test]
fn out_of_order_completions_keep_only_the_newest_frame() {
    let queue = CapturingQueue::default();
    let host = CountingHost::default();
    let mut controller = controller_with(&queue, &host);

    controller.viewport_resized(Size::new(300.0, 300.0));
    controller.scroll_changed(Point::new(40.0, 0.0));
    controller.scroll_changed(Point::new(80.0, 0.0));
    assert_eq!(queue.job_count(), 3);

    queue.complete_job(2);
    assert!(controller.poll_completed());

    // The slower first scroll finishes afterwards; its frame is stale and
    // must not replace the newer one.
    let redraws_before = host.redraws();
    queue.complete_job(1);
    assert!(!controller.poll_completed());
    assert_eq!(host.redraws(), redraws_before);
    assert!(controller.presentation().image.is_some());
}

#[test]
fn hit_targets_follow_the_zoom_and_dispatch_by_id() {
    let queue = CapturingQueue::default();
    let host = CountingHost::default();
    let mut controller = controller_with(&queue, &host);
    controller
        .layer_manager_mut()
        .add_hit_target(HitTarget::new("save-button", Rect::new(500.0, 500.0, 100.0, 50.0)))
        .expect("unique target id");

    let tapped: Arc<Mutex<Vec<String>>> = Arc::default();
    let released: Arc<Mutex<Vec<String>>> = Arc::default();
    let tapped_log = Arc::clone(&tapped);
    let released_log = Arc::clone(&released);
    controller
        .set_on_hit_target_tapped(move |id| tapped_log.lock().expect("log lock").push(id.to_string()))
        .set_on_hit_target_released(move |id| {
            released_log.lock().expect("log lock").push(id.to_string())
        });

    controller.viewport_resized(Size::new(300.0, 300.0));
    controller.zoom_to(2.0, false);

    // At zoom 2 the target covers (1000, 1000)-(1200, 1100) in content space.
    assert!(controller.hit_target_tapped(Point::new(1100.0, 1050.0)));
    assert!(controller.hit_target_released(Point::new(1100.0, 1050.0)));
    assert!(!controller.hit_target_tapped(Point::new(10.0, 10.0)));

    assert_eq!(*tapped.lock().expect("log lock"), vec!["save-button"]);
    assert_eq!(*released.lock().expect("log lock"), vec!["save-button"]);
}

#[test]
fn controller_honors_its_toml_configuration() {
    let config = CanvasConfig::from_toml_str(
        r#"
        canvas_width = 1000.0
        canvas_height = 500.0
        min_zoom_scale = 0.5
        max_zoom_scale = 4.0
        background = [0, 0, 0]
        "#,
    )
    .expect("valid config");

    let queue = CapturingQueue::default();
    let mut controller = CanvasController::new(
        &config,
        Arc::new(InlineRenderer),
        Box::new(queue.clone()),
        Box::new(CountingHost::default()),
    );

    assert_eq!(controller.canvas_size(), Size::new(1000.0, 500.0));
    assert_eq!(controller.zoom_scale(), 0.5);
    assert_eq!(controller.render_mode(), RenderMode::FullCanvas);

    controller.viewport_resized(Size::new(200.0, 200.0));
    controller.zoom_to(9.0, false);
    assert_eq!(controller.zoom_scale(), 4.0);
    assert_eq!(
        controller.presentation().background,
        Color::rgb(0.0, 0.0, 0.0)
    );
}
