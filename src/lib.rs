//! Parking-zone dwell tracking core.
//!
//! This crate consumes per-frame object detections (bounding boxes with
//! confidence scores) from an external detector and turns them into render
//! directives describing parking-zone occupancy, dwell duration and
//! legality/cost. It associates detections across frames into persistent
//! track identities, measures how long each track has been stationary,
//! classifies track positions into named zones and applies per-zone rules.
//!
//! Camera acquisition, the detection model and pixel-level rendering are
//! external collaborators: connect a detector through
//! [`DetectionSource`] and hand the emitted [`RenderDirective`]s to your
//! renderer.

pub mod config;
pub mod integration;
pub mod tracker;
pub mod zone;

pub use config::{ConfigError, PipelineConfig, TrackerConfig};
pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, ParkingPipeline};
pub use tracker::{Detection, ParkedTrack, Rect, StopTracker, TrackStore};
pub use zone::{Color, FrameSize, RenderDirective, Zone, ZonePolicy, ZoneTable};
