use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use nalgebra::Matrix3;
use tracing::trace;

use crate::utils::coordinate::Coordinate2D;

/// Drawing surface supplied by the rendering host. Coordinates handed to it
/// are already in view space.
pub trait Canvas {
    fn draw_circle(&mut self, center: Coordinate2D, radius: f32);
    fn draw_text(&mut self, text: &str, at: Coordinate2D);
}

/// Image-space to view-space mapping supplied by the rendering host, which
/// owns the preview geometry and the front/back camera mirroring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// View width, used to flip x when mirrored.
    pub view_width: f32,
    pub mirrored: bool,
}

impl OverlayTransform {
    pub const fn identity() -> Self {
        OverlayTransform {
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            view_width: 0.0,
            mirrored: false,
        }
    }

    pub fn translate_x(&self, x: f32) -> f32 {
        let scaled = x * self.scale_x + self.offset_x;
        if self.mirrored {
            self.view_width - scaled
        } else {
            scaled
        }
    }

    pub fn translate_y(&self, y: f32) -> f32 {
        y * self.scale_y + self.offset_y
    }

    /// apply maps an image-space point into view space.
    pub fn apply(&self, point: Coordinate2D) -> Coordinate2D {
        Coordinate2D::new(self.translate_x(point.x), self.translate_y(point.y))
    }

    /// to_matrix returns the homogeneous form of the mapping.
    ///
    /// # Returns
    /// * `Matrix3<f32>`
    pub fn to_matrix(&self) -> Matrix3<f32> {
        if self.mirrored {
            Matrix3::new(
                -self.scale_x,
                0.0,
                self.view_width - self.offset_x,
                0.0,
                self.scale_y,
                self.offset_y,
                0.0,
                0.0,
                1.0,
            )
        } else {
            Matrix3::new(
                self.scale_x,
                0.0,
                self.offset_x,
                0.0,
                self.scale_y,
                self.offset_y,
                0.0,
                0.0,
                1.0,
            )
        }
    }
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Anything the overlay can draw for one tracked face.
pub trait Graphic: Send + Sync {
    fn draw(&self, canvas: &mut dyn Canvas, transform: &OverlayTransform);
}

// Trait-object identity by data pointer; stable regardless of how the
// Arc<dyn Graphic> was unsized.
fn same_graphic(a: &Arc<dyn Graphic>, b: &Arc<dyn Graphic>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Shared collection of per-face graphics. The detection thread adds and
/// removes entries while the render thread iterates; the render pass always
/// sees a structurally consistent point-in-time copy.
///
/// Registration is at-most-once: adding a graphic already present is a
/// no-op, so a single remove always leaves zero instances behind.
pub struct GraphicOverlay {
    graphics: Mutex<Vec<Arc<dyn Graphic>>>,
    invalidated: AtomicBool,
}

impl GraphicOverlay {
    pub fn new() -> Self {
        GraphicOverlay {
            graphics: Mutex::new(Vec::new()),
            invalidated: AtomicBool::new(false),
        }
    }

    fn lock_graphics(&self) -> std::sync::MutexGuard<'_, Vec<Arc<dyn Graphic>>> {
        // A panicked writer cannot leave the vec structurally torn; keep
        // serving the last consistent contents.
        match self.graphics.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// add registers a graphic on the overlay. Idempotent.
    pub fn add(&self, graphic: Arc<dyn Graphic>) {
        let mut graphics = self.lock_graphics();
        if !graphics.iter().any(|existing| same_graphic(existing, &graphic)) {
            graphics.push(graphic);
            trace!(registered = graphics.len(), "graphic added to overlay");
        }
        drop(graphics);
        self.request_redraw();
    }

    /// remove detaches a graphic from the overlay. Idempotent; removing an
    /// absent graphic is a no-op.
    pub fn remove(&self, graphic: &Arc<dyn Graphic>) {
        let mut graphics = self.lock_graphics();
        let before = graphics.len();
        graphics.retain(|existing| !same_graphic(existing, graphic));
        if graphics.len() != before {
            trace!(registered = graphics.len(), "graphic removed from overlay");
        }
        drop(graphics);
        self.request_redraw();
    }

    pub fn clear(&self) {
        self.lock_graphics().clear();
        self.request_redraw();
    }

    pub fn len(&self) -> usize {
        self.lock_graphics().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_graphics().is_empty()
    }

    /// request_redraw flags the overlay as needing a repaint. The host polls
    /// the flag through take_redraw_request on its render cadence.
    pub fn request_redraw(&self) {
        self.invalidated.store(true, Ordering::Release);
    }

    /// take_redraw_request consumes the pending-redraw flag.
    ///
    /// # Returns
    /// * `bool` - true when a repaint was requested since the last take
    pub fn take_redraw_request(&self) -> bool {
        self.invalidated.swap(false, Ordering::AcqRel)
    }

    /// draw renders every registered graphic. Iterates over a copy taken
    /// under the lock so concurrent add/remove cannot race the pass.
    ///
    /// # Arguments
    /// * `canvas` - host drawing surface
    /// * `transform` - host image-to-view mapping
    pub fn draw(&self, canvas: &mut dyn Canvas, transform: &OverlayTransform) {
        let snapshot: Vec<Arc<dyn Graphic>> = self.lock_graphics().clone();
        for graphic in snapshot {
            graphic.draw(canvas, transform);
        }
    }
}

impl Default for GraphicOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingGraphic;

    impl Graphic for CountingGraphic {
        fn draw(&self, canvas: &mut dyn Canvas, _transform: &OverlayTransform) {
            canvas.draw_circle(Coordinate2D::new(0.0, 0.0), 1.0);
        }
    }

    #[derive(Default)]
    struct CountingCanvas {
        circles: usize,
    }

    impl Canvas for CountingCanvas {
        fn draw_circle(&mut self, _center: Coordinate2D, _radius: f32) {
            self.circles += 1;
        }

        fn draw_text(&mut self, _text: &str, _at: Coordinate2D) {}
    }

    #[test]
    fn double_add_single_remove_leaves_empty() {
        let overlay = GraphicOverlay::new();
        let graphic: Arc<dyn Graphic> = Arc::new(CountingGraphic);

        overlay.add(graphic.clone());
        overlay.add(graphic.clone());
        assert_eq!(overlay.len(), 1);

        let mut canvas = CountingCanvas::default();
        overlay.draw(&mut canvas, &OverlayTransform::identity());
        assert_eq!(canvas.circles, 1);

        overlay.remove(&graphic);
        assert!(overlay.is_empty());

        // Second remove is a no-op.
        overlay.remove(&graphic);
        assert!(overlay.is_empty());
    }

    #[test]
    fn distinct_graphics_coexist() {
        let overlay = GraphicOverlay::new();
        let first: Arc<dyn Graphic> = Arc::new(CountingGraphic);
        let second: Arc<dyn Graphic> = Arc::new(CountingGraphic);

        overlay.add(first.clone());
        overlay.add(second);
        assert_eq!(overlay.len(), 2);

        overlay.remove(&first);
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn redraw_flag_is_consumed_once() {
        let overlay = GraphicOverlay::new();
        assert!(!overlay.take_redraw_request());

        overlay.request_redraw();
        assert!(overlay.take_redraw_request());
        assert!(!overlay.take_redraw_request());
    }

    #[test]
    fn add_and_remove_request_redraw() {
        let overlay = GraphicOverlay::new();
        let graphic: Arc<dyn Graphic> = Arc::new(CountingGraphic);

        overlay.add(graphic.clone());
        assert!(overlay.take_redraw_request());

        overlay.remove(&graphic);
        assert!(overlay.take_redraw_request());
    }

    #[test]
    fn transform_applies_scale_offset_and_mirror() {
        let transform = OverlayTransform {
            scale_x: 2.0,
            scale_y: 3.0,
            offset_x: 10.0,
            offset_y: 20.0,
            view_width: 640.0,
            mirrored: false,
        };
        let mapped = transform.apply(Coordinate2D::new(5.0, 5.0));
        assert!((mapped.x - 20.0).abs() < 1e-6);
        assert!((mapped.y - 35.0).abs() < 1e-6);

        let mirrored = OverlayTransform {
            mirrored: true,
            ..transform
        };
        let flipped = mirrored.apply(Coordinate2D::new(5.0, 5.0));
        assert!((flipped.x - 620.0).abs() < 1e-6);
        assert!((flipped.y - 35.0).abs() < 1e-6);
    }

    #[test]
    fn matrix_form_matches_translate() {
        use nalgebra::Vector3;

        for mirrored in [false, true] {
            let transform = OverlayTransform {
                scale_x: 1.5,
                scale_y: 0.5,
                offset_x: 4.0,
                offset_y: -2.0,
                view_width: 320.0,
                mirrored,
            };
            let point = Coordinate2D::new(12.0, 34.0);
            let mapped = transform.apply(point);
            let homogeneous = transform.to_matrix() * Vector3::new(point.x, point.y, 1.0);
            assert!((homogeneous.x - mapped.x).abs() < 1e-4);
            assert!((homogeneous.y - mapped.y).abs() < 1e-4);
        }
    }

    #[test]
    fn concurrent_add_remove_during_draw() {
        use std::thread;

        let overlay = Arc::new(GraphicOverlay::new());
        let graphics: Vec<Arc<dyn Graphic>> = (0..8)
            .map(|_| Arc::new(CountingGraphic) as Arc<dyn Graphic>)
            .collect();

        let writer = {
            let overlay = Arc::clone(&overlay);
            let graphics = graphics.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    for g in &graphics {
                        overlay.add(g.clone());
                    }
                    for g in &graphics {
                        overlay.remove(g);
                    }
                }
            })
        };

        let mut canvas = CountingCanvas::default();
        for _ in 0..200 {
            overlay.draw(&mut canvas, &OverlayTransform::identity());
        }
        writer.join().unwrap();

        assert!(overlay.is_empty());
    }
}
