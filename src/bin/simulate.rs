//! Scripted detector feed for exercising the overlay without a camera.
//!
//! Usage:
//!   simulate [frames]
//!
//! Feeds a canned face through the pipeline, drops the nose landmark on
//! every third frame to show history-based approximation, and prints the
//! resulting draw calls. RUST_LOG=trace surfaces the tracker diagnostics.

use std::env;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use rs_face_overlay::config::config::GraphicConfig;
use rs_face_overlay::modules::face_tracker::Detections;
use rs_face_overlay::modules::graphic_overlay::{Canvas, GraphicOverlay, OverlayTransform};
use rs_face_overlay::pipeline::pipeline::{DetectionEvent, FaceOverlayPipeline};
use rs_face_overlay::utils::coordinate::{Coordinate2D, FaceBounds};
use rs_face_overlay::utils::face::{FaceSnapshot, Landmark, LandmarkKind};

struct ConsoleCanvas;

impl Canvas for ConsoleCanvas {
    fn draw_circle(&mut self, center: Coordinate2D, radius: f32) {
        println!("  dot   ({:7.1}, {:7.1}) r={:.1}", center.x, center.y, radius);
    }

    fn draw_text(&mut self, text: &str, at: Coordinate2D) {
        println!("  label ({:7.1}, {:7.1}) {}", at.x, at.y, text);
    }
}

/// A face drifting slowly to the right, with the nose unreported on every
/// third frame.
fn scripted_face(frame: u64) -> FaceSnapshot {
    let bounds = FaceBounds::new(80.0 + frame as f32 * 2.0, 40.0, 40.0, 40.0);
    let mut landmarks = vec![
        Landmark::new(
            LandmarkKind::LeftEye,
            bounds.from_ratio(Coordinate2D::new(0.3, 0.35)),
        ),
        Landmark::new(
            LandmarkKind::RightEye,
            bounds.from_ratio(Coordinate2D::new(0.7, 0.35)),
        ),
        Landmark::new(
            LandmarkKind::LeftMouth,
            bounds.from_ratio(Coordinate2D::new(0.35, 0.8)),
        ),
        Landmark::new(
            LandmarkKind::RightMouth,
            bounds.from_ratio(Coordinate2D::new(0.65, 0.8)),
        ),
        Landmark::new(
            LandmarkKind::BottomMouth,
            bounds.from_ratio(Coordinate2D::new(0.5, 0.9)),
        ),
    ];
    if frame % 3 != 0 {
        landmarks.push(Landmark::new(
            LandmarkKind::NoseBase,
            bounds.from_ratio(Coordinate2D::new(0.5, 0.55)),
        ));
    }
    FaceSnapshot::new(bounds, landmarks)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let frames: u64 = env::args()
        .nth(1)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8);

    let overlay = Arc::new(GraphicOverlay::new());
    let pipeline = FaceOverlayPipeline::with_overlay(Arc::clone(&overlay), GraphicConfig::default());

    // Front camera preview: doubled and mirrored into a 1280-wide view.
    let transform = OverlayTransform {
        scale_x: 2.0,
        scale_y: 2.0,
        offset_x: 0.0,
        offset_y: 0.0,
        view_width: 1280.0,
        mirrored: true,
    };
    let mut canvas = ConsoleCanvas;

    pipeline.process(DetectionEvent::New {
        id: 1,
        face: scripted_face(0),
    });

    for frame in 0..frames {
        if frame == frames / 2 {
            // Simulate the face briefly leaving the detection range.
            pipeline.process(DetectionEvent::Missing {
                id: 1,
                detections: Detections::new(frame),
            });
        } else {
            pipeline.process(DetectionEvent::Update {
                id: 1,
                detections: Detections::new(frame),
                face: scripted_face(frame),
            });
        }

        if overlay.take_redraw_request() {
            println!("frame {frame}:");
            overlay.draw(&mut canvas, &transform);
        }
    }

    pipeline.process(DetectionEvent::Done { id: 1 });
    println!("tracked identities remaining: {}", pipeline.tracked());
}
