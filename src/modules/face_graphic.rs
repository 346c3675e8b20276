use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::config::config::GraphicConfig;
use crate::utils::coordinate::Coordinate2D;
use crate::utils::face::{FaceSnapshot, LandmarkKind};

use super::graphic_overlay::{Canvas, Graphic, OverlayTransform};

/// Overlay graphic for one tracked face. The detection thread replaces the
/// held snapshot through set_face while the render thread reads it in draw;
/// the slot always yields a complete snapshot, never a torn one.
pub struct FaceGraphic {
    config: GraphicConfig,
    face: RwLock<Option<Arc<FaceSnapshot>>>,
}

impl FaceGraphic {
    pub fn new(config: GraphicConfig) -> Self {
        FaceGraphic {
            config,
            face: RwLock::new(None),
        }
    }

    fn slot(&self) -> Option<Arc<FaceSnapshot>> {
        match self.face.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// set_face atomically replaces the held snapshot. Last writer wins.
    ///
    /// # Arguments
    /// * `face` - complete snapshot for the current frame
    pub fn set_face(&self, face: Arc<FaceSnapshot>) {
        let mut slot = match self.face.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(face);
    }

    /// face returns the most recently set snapshot, if any.
    pub fn face(&self) -> Option<Arc<FaceSnapshot>> {
        self.slot()
    }
}

impl Graphic for FaceGraphic {
    fn draw(&self, canvas: &mut dyn Canvas, transform: &OverlayTransform) {
        // One consistent read for the whole pass; a concurrent set_face
        // takes effect on the next redraw.
        let Some(face) = self.slot() else {
            return;
        };

        for lm in &face.landmarks {
            let label = lm.kind.label();
            if label.is_empty() {
                continue;
            }
            let at = transform.apply(lm.position);
            canvas.draw_circle(at, self.config.dot_radius);
            canvas.draw_text(label, Coordinate2D::new(at.x, at.y + self.config.label_offset_y));
            if lm.kind == LandmarkKind::NoseBase {
                trace!(x = at.x, y = at.y, "nose base marker");
            }
        }
    }
}
