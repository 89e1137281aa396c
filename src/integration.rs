//! Integration module for connecting object detection backends with the
//! dwell tracker.
//!
//! The detection model is an external collaborator: implement
//! [`DetectionSource`] for whatever backend produces boxes and scores, and
//! [`ParkingPipeline`] will drive it frame by frame.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::ParkingPipeline;
