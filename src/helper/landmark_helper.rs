use std::collections::HashMap;

use crate::utils::coordinate::Coordinate2D;
use crate::utils::face::{FaceSnapshot, LandmarkKind};

/// Per-face cache of landmark positions expressed as fractions of the face
/// bounds. Subjects can move too quickly for the detector to report every
/// feature on every frame; the stored ratios approximate where a feature
/// should be while it is momentarily unreported.
#[derive(Debug, Clone, Default)]
pub struct LandmarkHistory {
    previous: HashMap<LandmarkKind, Coordinate2D>,
}

impl LandmarkHistory {
    pub fn new() -> Self {
        LandmarkHistory {
            previous: HashMap::new(),
        }
    }

    /// record stores the ratio of every landmark reported in this snapshot,
    /// overwriting prior entries of the same kind. Landmarks on degenerate
    /// bounds are skipped.
    ///
    /// # Arguments
    /// * `face` - the snapshot whose reported landmarks are cached
    pub fn record(&mut self, face: &FaceSnapshot) {
        for lm in &face.landmarks {
            if let Some(ratio) = face.bounds.to_ratio(lm.position) {
                self.previous.insert(lm.kind, ratio);
            }
        }
    }

    /// position returns the coordinates of the requested landmark if the
    /// snapshot reports it, or approximated coordinates from prior frames
    /// if not.
    ///
    /// # Arguments
    /// * `face` - current snapshot
    /// * `kind` - landmark kind to look up
    ///
    /// # Returns
    /// * `Option<Coordinate2D>` - None when the position is unknown
    pub fn position(&self, face: &FaceSnapshot, kind: LandmarkKind) -> Option<Coordinate2D> {
        if let Some(lm) = face.landmark(kind) {
            return Some(lm.position);
        }
        self.approximate(face, kind)
    }

    /// approximate reconstructs an absolute position from the stored ratio
    /// and the current face bounds. None when the kind was never observed
    /// or the bounds are degenerate.
    pub fn approximate(&self, face: &FaceSnapshot, kind: LandmarkKind) -> Option<Coordinate2D> {
        if face.bounds.is_degenerate() {
            return None;
        }
        self.previous
            .get(&kind)
            .map(|ratio| face.bounds.from_ratio(*ratio))
    }

    /// observed reports whether a kind has ever been recorded.
    pub fn observed(&self, kind: LandmarkKind) -> bool {
        self.previous.contains_key(&kind)
    }

    pub fn clear(&mut self) {
        self.previous.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }
}
