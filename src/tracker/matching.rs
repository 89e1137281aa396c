//! Greedy per-detection association of detections to parked tracks.

use nalgebra::distance;

use crate::config::TrackerConfig;
use crate::tracker::rect::Rect;
use crate::tracker::track::TrackStore;

/// Keeps the size-ratio gate finite for zero-area detections.
const AREA_EPSILON: f32 = 1e-5;

/// Detection input for the tracker. Ephemeral: not retained past the frame
/// that produced it.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Bounding box in TLWH format (x, y, width, height)
    pub bbox: Rect,
    /// Detection confidence score in [0, 1]
    pub score: f32,
}

impl Detection {
    pub fn new(x: f32, y: f32, width: f32, height: f32, score: f32) -> Self {
        Self {
            bbox: Rect::new(x, y, width, height),
            score,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self { bbox, score }
    }

    /// Whether the detection carries usable geometry and score.
    pub fn is_well_formed(&self) -> bool {
        self.bbox.is_well_formed() && self.score.is_finite()
    }
}

/// Find the best still-alive track for one detection, or `None`.
///
/// A track is a candidate when it passes all three gates: IoU above
/// `iou_gate`, center displacement under `center_distance_gate` and area
/// difference ratio under `size_ratio_gate`. Among candidates the highest
/// IoU wins; ties go to the lowest (oldest) track id.
///
/// The match is greedy and per-detection against the live store, so several
/// detections in one frame can claim the same track. That is part of the
/// observable contract; do not replace this with a global assignment.
pub fn find_best_match(
    detection: &Detection,
    store: &TrackStore,
    config: &TrackerConfig,
) -> Option<u64> {
    let center = detection.bbox.center();
    let det_area = detection.bbox.area();

    let mut best: Option<(u64, f32)> = None;
    for track in store.iter() {
        let iou_score = detection.bbox.iou(&track.last_box);
        if iou_score <= config.iou_gate {
            continue;
        }
        if distance(&center, &track.last_pos) >= config.center_distance_gate {
            continue;
        }
        let size_ratio = (det_area - track.last_box.area()).abs() / (det_area + AREA_EPSILON);
        if size_ratio >= config.size_ratio_gate {
            continue;
        }

        // Strict comparison: ascending id iteration keeps the oldest track on ties.
        match best {
            Some((_, best_score)) if iou_score <= best_score => {}
            _ => best = Some((track.id, iou_score)),
        }
    }

    best.map(|(id, _)| id)
}
