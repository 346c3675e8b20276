use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::config::GraphicConfig;
use crate::helper::landmark_helper::LandmarkHistory;
use crate::utils::face::{FaceSnapshot, Landmark, LandmarkKind};

use super::face_graphic::FaceGraphic;
use super::graphic_overlay::{Graphic, GraphicOverlay};

/// Detector-assigned integer distinguishing one tracked face from another
/// across frames.
pub type FaceId = i32;

/// Frame metadata delivered alongside update and missing callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detections {
    pub frame_id: u64,
}

impl Detections {
    pub const fn new(frame_id: u64) -> Self {
        Detections { frame_id }
    }
}

/// Lifecycle callbacks the external detector delivers for one tracked
/// identity. For a given identity the calls arrive in order and never
/// concurrently; the detector drives implementations by injection.
pub trait Tracker: Send {
    fn on_new(&mut self, id: FaceId, face: &FaceSnapshot);
    fn on_update(&mut self, detections: &Detections, face: &FaceSnapshot);
    fn on_missing(&mut self, detections: &Detections);
    fn on_done(&mut self);
}

/// Lifecycle of one tracked identity on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Graphic allocated, nothing attached yet.
    #[default]
    Created,
    /// Attached to the overlay and visible.
    Active,
    /// Detached from the overlay; history retained in case the face
    /// reappears under the same identity.
    Detached,
    /// The identity will not recur. No re-entry.
    Terminated,
}

/// Bridges detector lifecycle callbacks to a per-face overlay graphic and
/// fills in drawable landmarks the detector transiently fails to report.
pub struct FaceTracker {
    overlay: Arc<GraphicOverlay>,
    config: GraphicConfig,
    graphic: Option<Arc<FaceGraphic>>,
    history: LandmarkHistory,
    state: TrackState,
    id: FaceId,
}

impl FaceTracker {
    pub fn new(overlay: Arc<GraphicOverlay>, config: GraphicConfig) -> Self {
        FaceTracker {
            overlay,
            config,
            graphic: None,
            history: LandmarkHistory::new(),
            state: TrackState::Created,
            id: 0,
        }
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn graphic(&self) -> Option<&Arc<FaceGraphic>> {
        self.graphic.as_ref()
    }

    pub fn history(&self) -> &LandmarkHistory {
        &self.history
    }

    fn graphic_handle(&self) -> Option<Arc<dyn Graphic>> {
        self.graphic
            .as_ref()
            .map(|g| Arc::clone(g) as Arc<dyn Graphic>)
    }

    /// Snapshot to push to the graphic: the reported landmarks plus
    /// approximated positions for drawable kinds missing this frame.
    fn augment(&self, face: &FaceSnapshot) -> FaceSnapshot {
        let mut landmarks = face.landmarks.clone();
        for kind in LandmarkKind::DRAWN {
            if face.landmark(kind).is_none() {
                if let Some(position) = self.history.approximate(face, kind) {
                    trace!(id = self.id, ?kind, "approximating unreported landmark");
                    landmarks.push(Landmark::new(kind, position));
                }
            }
        }
        FaceSnapshot::new(face.bounds, landmarks)
    }
}

impl Tracker for FaceTracker {
    fn on_new(&mut self, id: FaceId, _face: &FaceSnapshot) {
        debug!(id, "face entered tracking");
        self.id = id;
        self.graphic = Some(Arc::new(FaceGraphic::new(self.config)));
    }

    fn on_update(&mut self, detections: &Detections, face: &FaceSnapshot) {
        if self.state == TrackState::Terminated {
            debug!(id = self.id, "update after done ignored");
            return;
        }
        let Some(graphic) = self.graphic.clone() else {
            warn!(id = self.id, "update before new ignored");
            return;
        };

        self.overlay.add(Arc::clone(&graphic) as Arc<dyn Graphic>);
        let augmented = self.augment(face);
        self.history.record(face);
        graphic.set_face(Arc::new(augmented));
        self.overlay.request_redraw();
        self.state = TrackState::Active;
        trace!(
            id = self.id,
            frame = detections.frame_id,
            landmarks = face.landmarks.len(),
            "face updated"
        );
    }

    fn on_missing(&mut self, detections: &Detections) {
        if self.state == TrackState::Terminated {
            return;
        }
        if let Some(handle) = self.graphic_handle() {
            self.overlay.remove(&handle);
        }
        self.state = TrackState::Detached;
        debug!(
            id = self.id,
            frame = detections.frame_id,
            "face missing, history retained"
        );
    }

    fn on_done(&mut self) {
        if self.state == TrackState::Terminated {
            return;
        }
        if let Some(handle) = self.graphic_handle() {
            self.overlay.remove(&handle);
        }
        // The identity never recurs, so the cached ratios can never be
        // read again.
        self.history.clear();
        self.state = TrackState::Terminated;
        debug!(id = self.id, "face done");
    }
}
