use serde::{Deserialize, Serialize};

use crate::utils::coordinate::{Coordinate2D, FaceBounds};

/// Landmark kinds reported by the external face detector. The overlay draws
/// six of them; the rest pass through undrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandmarkKind {
    BottomMouth,
    LeftCheek,
    LeftEar,
    LeftEarTip,
    LeftEye,
    LeftMouth,
    NoseBase,
    RightCheek,
    RightEar,
    RightEarTip,
    RightEye,
    RightMouth,
}

impl LandmarkKind {
    /// The kinds the overlay marks and labels.
    pub const DRAWN: [LandmarkKind; 6] = [
        LandmarkKind::BottomMouth,
        LandmarkKind::LeftEye,
        LandmarkKind::LeftMouth,
        LandmarkKind::NoseBase,
        LandmarkKind::RightEye,
        LandmarkKind::RightMouth,
    ];

    /// Display label for the overlay. Empty for kinds that are not drawn.
    pub fn label(self) -> &'static str {
        match self {
            LandmarkKind::BottomMouth => "mouth bottom",
            LandmarkKind::LeftEye => "left eye",
            LandmarkKind::LeftMouth => "mouth left",
            LandmarkKind::NoseBase => "nose base",
            LandmarkKind::RightEye => "right eye",
            LandmarkKind::RightMouth => "mouth right",
            _ => "",
        }
    }
}

/// One detected facial feature: kind plus image-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub position: Coordinate2D,
}

impl Landmark {
    pub const fn new(kind: LandmarkKind, position: Coordinate2D) -> Self {
        Landmark { kind, position }
    }
}

/// Immutable record of one face at a single detector frame: bounds plus the
/// landmarks the detector reported. Replaced wholesale on every update,
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSnapshot {
    pub bounds: FaceBounds,
    pub landmarks: Vec<Landmark>,
}

impl FaceSnapshot {
    pub fn new(bounds: FaceBounds, landmarks: Vec<Landmark>) -> Self {
        FaceSnapshot { bounds, landmarks }
    }

    /// landmark returns the first landmark of the requested kind, if the
    /// detector reported one in this frame.
    pub fn landmark(&self, kind: LandmarkKind) -> Option<&Landmark> {
        self.landmarks.iter().find(|lm| lm.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawn_kinds_map_to_expected_labels() {
        assert_eq!(LandmarkKind::BottomMouth.label(), "mouth bottom");
        assert_eq!(LandmarkKind::LeftEye.label(), "left eye");
        assert_eq!(LandmarkKind::LeftMouth.label(), "mouth left");
        assert_eq!(LandmarkKind::NoseBase.label(), "nose base");
        assert_eq!(LandmarkKind::RightEye.label(), "right eye");
        assert_eq!(LandmarkKind::RightMouth.label(), "mouth right");
    }

    #[test]
    fn undrawn_kinds_have_empty_labels() {
        for kind in [
            LandmarkKind::LeftCheek,
            LandmarkKind::LeftEar,
            LandmarkKind::LeftEarTip,
            LandmarkKind::RightCheek,
            LandmarkKind::RightEar,
            LandmarkKind::RightEarTip,
        ] {
            assert_eq!(kind.label(), "");
            assert!(!LandmarkKind::DRAWN.contains(&kind));
        }
    }

    #[test]
    fn snapshot_lookup_finds_reported_kind_only() {
        let snapshot = FaceSnapshot::new(
            FaceBounds::new(0.0, 0.0, 100.0, 100.0),
            vec![Landmark::new(
                LandmarkKind::NoseBase,
                Coordinate2D::new(50.0, 60.0),
            )],
        );
        assert!(snapshot.landmark(LandmarkKind::NoseBase).is_some());
        assert!(snapshot.landmark(LandmarkKind::LeftEye).is_none());
    }
}
