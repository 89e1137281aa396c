//! Zone classification against a fixed region table.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Named parking zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    A,
    B,
    C,
    D,
}

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned region in reference-frame coordinates, inclusive on all
/// four edges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneRect {
    pub zone: Zone,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl ZoneRect {
    fn contains_scaled(&self, point: Point2<f32>, sx: f32, sy: f32) -> bool {
        self.x_min * sx <= point.x
            && point.x <= self.x_max * sx
            && self.y_min * sy <= point.y
            && point.y <= self.y_max * sy
    }
}

/// Ordered region table: a point maps to the first region containing it,
/// or to no zone at all. Regions are defined against `reference` and scale
/// to whatever frame size the detector is running at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneTable {
    pub reference: FrameSize,
    pub regions: Vec<ZoneRect>,
}

impl ZoneTable {
    pub fn new(reference: FrameSize, regions: Vec<ZoneRect>) -> Self {
        Self { reference, regions }
    }

    /// Map a point in `frame` coordinates to its zone.
    ///
    /// Pure and deterministic; region order decides overlaps.
    pub fn zone_of(&self, point: Point2<f32>, frame: FrameSize) -> Option<Zone> {
        let sx = frame.width / self.reference.width;
        let sy = frame.height / self.reference.height;
        self.regions
            .iter()
            .find(|region| region.contains_scaled(point, sx, sy))
            .map(|region| region.zone)
    }
}

impl Default for ZoneTable {
    /// The curbside layout this system ships with, on a 320x320 reference
    /// frame. Note the uncovered seam between the upper (A, C) and lower
    /// (B, D) bands; points there map to no zone.
    fn default() -> Self {
        Self {
            reference: FrameSize::new(320.0, 320.0),
            regions: vec![
                ZoneRect {
                    zone: Zone::A,
                    x_min: 50.0,
                    y_min: 0.0,
                    x_max: 100.0,
                    y_max: 105.0,
                },
                ZoneRect {
                    zone: Zone::B,
                    x_min: 10.0,
                    y_min: 106.0,
                    x_max: 100.0,
                    y_max: 320.0,
                },
                ZoneRect {
                    zone: Zone::C,
                    x_min: 180.0,
                    y_min: 0.0,
                    x_max: 270.0,
                    y_max: 105.0,
                },
                ZoneRect {
                    zone: Zone::D,
                    x_min: 190.0,
                    y_min: 105.0,
                    x_max: 320.0,
                    y_max: 320.0,
                },
            ],
        }
    }
}
