//! ParkingPipeline for combining detection with dwell tracking.

use std::time::Instant;

use crate::config::PipelineConfig;
use crate::tracker::StopTracker;
use crate::zone::{FrameSize, RenderDirective};

use super::DetectionSource;

/// Bundles a detection backend with a [`StopTracker`] for end-to-end
/// frame-to-directives processing.
///
/// Frame timestamps come from a monotonic clock started at construction;
/// use [`ParkingPipeline::process_frame_at`] to supply timestamps yourself
/// (replays, tests).
pub struct ParkingPipeline<D: DetectionSource> {
    detector: D,
    tracker: StopTracker,
    started: Instant,
}

impl<D: DetectionSource> ParkingPipeline<D> {
    /// Create a new pipeline with the given detector and configuration.
    pub fn new(detector: D, config: PipelineConfig) -> Self {
        Self {
            detector,
            tracker: StopTracker::new(config),
            started: Instant::now(),
        }
    }

    /// Create a new pipeline with the default configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, PipelineConfig::default())
    }

    /// Process a single frame and return the overlay directives.
    ///
    /// Runs detection on the input image, then updates the tracker. A
    /// detector error fails the frame and is returned unchanged; the
    /// track store is left exactly as the previous frame left it.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<RenderDirective>, D::Error> {
        let now = self.started.elapsed().as_secs_f64();
        self.process_frame_at(input, width, height, now)
    }

    /// Like [`ParkingPipeline::process_frame`], with a caller-supplied
    /// timestamp in seconds.
    pub fn process_frame_at(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        now: f64,
    ) -> Result<Vec<RenderDirective>, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        let frame = FrameSize::new(width as f32, height as f32);
        Ok(self.tracker.process_frame(&detections, frame, now))
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &StopTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut StopTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Detection;

    struct MockDetector {
        detections: Vec<Detection>,
    }

    impl DetectionSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            Ok(self.detections.clone())
        }
    }

    struct FailingDetector;

    impl DetectionSource for FailingDetector {
        type Error = String;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            Err("camera gone".to_string())
        }
    }

    #[test]
    fn test_pipeline_tracks_detections() {
        let detector = MockDetector {
            detections: vec![Detection::new(100.0, 100.0, 40.0, 40.0, 0.9)],
        };

        let mut pipeline = ParkingPipeline::with_default_config(detector);
        let directives = pipeline.process_frame_at(&[], 320, 320, 0.0).unwrap();

        // First frame creates the track; nothing is drawn yet.
        assert!(directives.is_empty());
        assert_eq!(pipeline.tracker().store().len(), 1);
    }

    #[test]
    fn test_detector_failure_propagates() {
        let mut pipeline = ParkingPipeline::with_default_config(FailingDetector);
        let result = pipeline.process_frame_at(&[], 320, 320, 0.0);
        assert_eq!(result.unwrap_err(), "camera gone");
    }
}
