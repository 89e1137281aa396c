//! Per-frame dwell tracking engine.
//!
//! One `process_frame` call runs the whole core pipeline for a frame:
//! stale-track reaping, confidence filtering, association, track state
//! updates and zone policy evaluation.

use nalgebra::distance;
use tracing::{trace, warn};

use crate::config::{PipelineConfig, TrackerConfig};
use crate::tracker::matching::{self, Detection};
use crate::tracker::track::TrackStore;
use crate::zone::{FrameSize, RenderDirective, ZonePolicy, ZoneTable};

/// Tracks stationary objects across frames and derives overlay directives
/// from per-zone dwell rules.
///
/// Single-threaded and synchronous: the tracker exclusively owns its
/// [`TrackStore`], one frame is fully processed before the next begins, and
/// detections are handled in the order the detector supplied them.
pub struct StopTracker {
    store: TrackStore,
    zones: ZoneTable,
    policy: ZonePolicy,
    config: TrackerConfig,
}

impl StopTracker {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            store: TrackStore::new(),
            zones: config.zones,
            policy: config.policy,
            config: config.tracker,
        }
    }

    /// Live tracks, for callers that want more than the directives.
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Process one frame of detections taken at `now` (seconds on the
    /// caller's clock) and return the overlay directives for the frame.
    ///
    /// Reaping always runs first, even for an empty detection list, so
    /// unseen tracks age out normally. Malformed detections are skipped
    /// without touching the store; detections below the confidence
    /// threshold never create or update a track.
    pub fn process_frame(
        &mut self,
        detections: &[Detection],
        frame: FrameSize,
        now: f64,
    ) -> Vec<RenderDirective> {
        self.store.remove_stale(now, self.config.stale_timeout);

        let mut directives = Vec::new();
        for detection in detections {
            if !detection.is_well_formed() {
                warn!(?detection, "skipping malformed detection");
                continue;
            }
            if detection.score < self.config.confidence_threshold {
                trace!(score = detection.score, "skipping low-confidence detection");
                continue;
            }

            let center = detection.bbox.center();
            let zone = self.zones.zone_of(center, frame);

            match matching::find_best_match(detection, &self.store, &self.config) {
                Some(id) => {
                    if let Some(track) = self.store.get_mut(id) {
                        let moved =
                            distance(&center, &track.last_pos) > self.config.movement_threshold;
                        if moved {
                            track.start_time = now;
                            track.stop_duration = 0.0;
                            track.last_box = detection.bbox;
                            track.last_pos = center;
                            track.zone = zone;
                        } else {
                            track.stop_duration = now - track.start_time;
                        }
                        track.last_seen_time = now;

                        // The directive carries the detection's box for this
                        // frame; `last_pos` stays the stationary anchor.
                        if let Some(directive) =
                            self.policy
                                .evaluate(track.zone, track.stop_duration, detection.bbox)
                        {
                            directives.push(directive);
                        }
                    }
                }
                None => {
                    self.store.create(detection.bbox, zone, now);
                }
            }
        }

        directives
    }
}

impl Default for StopTracker {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
