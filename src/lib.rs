pub mod config;
pub mod helper;
pub mod modules;
pub mod pipeline;
pub mod utils;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::config::GraphicConfig;
    use crate::modules::graphic_overlay::GraphicOverlay;
    use crate::pipeline::pipeline::FaceOverlayPipeline;

    #[test]
    fn pipeline_wires_against_a_shared_overlay() {
        let overlay = Arc::new(GraphicOverlay::new());
        let pipeline =
            FaceOverlayPipeline::with_overlay(Arc::clone(&overlay), GraphicConfig::default());
        assert_eq!(pipeline.tracked(), 0);
        assert!(overlay.is_empty());
    }
}
