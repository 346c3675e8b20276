use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::config::config::GraphicConfig;
use crate::modules::face_tracker::{Detections, FaceId, FaceTracker, Tracker};
use crate::modules::graphic_overlay::GraphicOverlay;
use crate::utils::face::FaceSnapshot;

/// One detector callback, tagged with the identity it belongs to.
#[derive(Debug, Clone)]
pub enum DetectionEvent {
    New {
        id: FaceId,
        face: FaceSnapshot,
    },
    Update {
        id: FaceId,
        detections: Detections,
        face: FaceSnapshot,
    },
    Missing {
        id: FaceId,
        detections: Detections,
    },
    Done {
        id: FaceId,
    },
}

impl DetectionEvent {
    pub fn id(&self) -> FaceId {
        match self {
            DetectionEvent::New { id, .. }
            | DetectionEvent::Update { id, .. }
            | DetectionEvent::Missing { id, .. }
            | DetectionEvent::Done { id } => *id,
        }
    }
}

fn recover<T: ?Sized>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Fans detector callbacks out to one tracker per face identity. Trackers
/// are created through the injected factory on first sight of an identity
/// and discarded once the identity is done.
///
/// Callbacks for different identities may arrive from different detector
/// threads; the identity map has its own lock and each tracker is locked
/// only for the duration of its callback, so cross-identity dispatch can
/// interleave while per-identity ordering is preserved.
pub struct FaceOverlayPipeline<T: Tracker> {
    factory: Box<dyn Fn(FaceId) -> T + Send + Sync>,
    trackers: Mutex<HashMap<FaceId, Arc<Mutex<T>>>>,
}

impl<T: Tracker> FaceOverlayPipeline<T> {
    /// new builds a pipeline around a tracker factory.
    ///
    /// # Arguments
    /// * `factory` - called once per newly seen identity
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(FaceId) -> T + Send + Sync + 'static,
    {
        FaceOverlayPipeline {
            factory: Box::new(factory),
            trackers: Mutex::new(HashMap::new()),
        }
    }

    fn tracker(&self, id: FaceId) -> Option<Arc<Mutex<T>>> {
        recover(&self.trackers).get(&id).cloned()
    }

    /// tracked returns the number of identities currently being tracked.
    pub fn tracked(&self) -> usize {
        recover(&self.trackers).len()
    }

    /// process routes one detector event to the tracker owning its
    /// identity. Events for unknown identities are dropped with a warning;
    /// nothing here panics or propagates an error.
    ///
    /// # Arguments
    /// * `event` - the detector callback to dispatch
    pub fn process(&self, event: DetectionEvent) {
        match event {
            DetectionEvent::New { id, face } => {
                let tracker = Arc::new(Mutex::new((self.factory)(id)));
                recover(&tracker).on_new(id, &face);
                let previous = recover(&self.trackers).insert(id, tracker);
                if previous.is_some() {
                    warn!(id, "duplicate new event replaced an existing tracker");
                }
                debug!(id, "tracker created");
            }
            DetectionEvent::Update {
                id,
                detections,
                face,
            } => match self.tracker(id) {
                Some(tracker) => recover(&tracker).on_update(&detections, &face),
                None => warn!(id, "update for unknown identity dropped"),
            },
            DetectionEvent::Missing { id, detections } => match self.tracker(id) {
                Some(tracker) => recover(&tracker).on_missing(&detections),
                None => warn!(id, "missing for unknown identity dropped"),
            },
            DetectionEvent::Done { id } => {
                let removed = recover(&self.trackers).remove(&id);
                match removed {
                    Some(tracker) => {
                        recover(&tracker).on_done();
                        debug!(id, "tracker discarded");
                    }
                    None => warn!(id, "done for unknown identity dropped"),
                }
            }
        }
    }
}

impl FaceOverlayPipeline<FaceTracker> {
    /// with_overlay wires the pipeline to landmark trackers sharing one
    /// overlay surface.
    ///
    /// # Arguments
    /// * `overlay` - shared overlay the trackers attach their graphics to
    /// * `config` - drawing parameters for each per-face graphic
    ///
    /// # Returns
    /// * `FaceOverlayPipeline<FaceTracker>`
    pub fn with_overlay(overlay: Arc<GraphicOverlay>, config: GraphicConfig) -> Self {
        Self::new(move |_id| FaceTracker::new(Arc::clone(&overlay), config))
    }
}
