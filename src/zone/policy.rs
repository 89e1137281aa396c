//! Per-zone legality and pricing rules.

use serde::{Deserialize, Serialize};

use crate::tracker::Rect;
use crate::zone::table::Zone;

/// RGB color for an overlay directive. The renderer decides how (and in
/// what color space) these are actually drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What the external renderer should draw for one track this frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderDirective {
    /// Box to draw, in frame coordinates
    pub bbox: Rect,
    pub color: Color,
    pub text: String,
    pub visible: bool,
}

/// Dwell thresholds (seconds) and colors for the zone rules.
///
/// Zones A-C are time-limited; zone D is metered. Anything else, including
/// unzoned positions, is free parking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonePolicy {
    /// Dwells shorter than this produce no directive at all
    pub min_display_duration: f64,
    pub zone_a_limit: f64,
    pub zone_b_limit: f64,
    pub zone_c_limit: f64,
    /// Metering in zone D starts at this dwell
    pub zone_d_min: f64,
    /// Length of one billing step in zone D
    pub price_step_secs: f64,
    /// Currency units charged per completed billing step
    pub price_step_amount: u64,
    pub violation_color: Color,
    pub pricing_color: Color,
    pub neutral_color: Color,
}

impl Default for ZonePolicy {
    fn default() -> Self {
        Self {
            min_display_duration: 5.0,
            zone_a_limit: 30.0,
            zone_b_limit: 100.0,
            zone_c_limit: 5.0,
            zone_d_min: 5.0,
            price_step_secs: 10.0,
            price_step_amount: 5,
            violation_color: Color::new(250, 0, 0),
            pricing_color: Color::new(255, 150, 0),
            neutral_color: Color::new(0, 255, 60),
        }
    }
}

impl ZonePolicy {
    /// Derive the overlay directive for a track's zone and dwell, or `None`
    /// below the display threshold.
    ///
    /// Rules are evaluated in fixed order and the first match wins: A, B
    /// and C violations, then D metering, then the free-dwell fallback.
    pub fn evaluate(
        &self,
        zone: Option<Zone>,
        stop_duration: f64,
        bbox: Rect,
    ) -> Option<RenderDirective> {
        if stop_duration < self.min_display_duration {
            return None;
        }

        let (color, text) = match zone {
            Some(Zone::A) if stop_duration > self.zone_a_limit => {
                (self.violation_color, "No Park".to_string())
            }
            Some(Zone::B) if stop_duration > self.zone_b_limit => {
                (self.violation_color, "No Park".to_string())
            }
            Some(Zone::C) if stop_duration > self.zone_c_limit => {
                (self.violation_color, "No Park".to_string())
            }
            Some(Zone::D) if stop_duration >= self.zone_d_min => {
                let steps = (stop_duration / self.price_step_secs).floor() as u64;
                let price = steps * self.price_step_amount;
                (self.pricing_color, format!("${price}"))
            }
            // Renderers expect the elapsed seconds with the historical
            // "m" suffix.
            _ => (
                self.neutral_color,
                format!("Free {}m", stop_duration.floor() as u64),
            ),
        };

        Some(RenderDirective {
            bbox,
            color,
            text,
            visible: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(zone: Option<Zone>, stop_duration: f64) -> Option<RenderDirective> {
        ZonePolicy::default().evaluate(zone, stop_duration, Rect::new(0.0, 0.0, 40.0, 40.0))
    }

    #[test]
    fn test_below_display_threshold_is_silent() {
        assert!(evaluate(Some(Zone::A), 4.9).is_none());
        assert!(evaluate(Some(Zone::D), 0.0).is_none());
        assert!(evaluate(None, 4.0).is_none());
    }

    #[test]
    fn test_zone_a_violation_boundary() {
        let policy = ZonePolicy::default();

        let over = evaluate(Some(Zone::A), 31.0).unwrap();
        assert_eq!(over.text, "No Park");
        assert_eq!(over.color, policy.violation_color);

        // Under the limit zone A falls through to the free-dwell rule.
        let under = evaluate(Some(Zone::A), 29.0).unwrap();
        assert_eq!(under.text, "Free 29m");
        assert_eq!(under.color, policy.neutral_color);
    }

    #[test]
    fn test_zone_b_violation_boundary() {
        assert_eq!(evaluate(Some(Zone::B), 101.0).unwrap().text, "No Park");
        assert_eq!(evaluate(Some(Zone::B), 99.0).unwrap().text, "Free 99m");
    }

    #[test]
    fn test_zone_c_strict_limit() {
        assert_eq!(evaluate(Some(Zone::C), 5.5).unwrap().text, "No Park");
        // Exactly at the limit is not yet a violation.
        assert_eq!(evaluate(Some(Zone::C), 5.0).unwrap().text, "Free 5m");
    }

    #[test]
    fn test_zone_d_pricing() {
        let policy = ZonePolicy::default();

        let early = evaluate(Some(Zone::D), 5.0).unwrap();
        assert_eq!(early.text, "$0");
        assert_eq!(early.color, policy.pricing_color);

        assert_eq!(evaluate(Some(Zone::D), 15.0).unwrap().text, "$5");
        assert_eq!(evaluate(Some(Zone::D), 25.0).unwrap().text, "$10");
        assert_eq!(evaluate(Some(Zone::D), 120.0).unwrap().text, "$60");
    }

    #[test]
    fn test_unzoned_dwell_is_free() {
        let policy = ZonePolicy::default();

        let directive = evaluate(None, 6.0).unwrap();
        assert_eq!(directive.text, "Free 6m");
        assert_eq!(directive.color, policy.neutral_color);
        assert!(directive.visible);
    }

    #[test]
    fn test_directive_carries_the_given_box() {
        let bbox = Rect::new(10.0, 20.0, 30.0, 40.0);
        let directive = ZonePolicy::default()
            .evaluate(Some(Zone::D), 15.0, bbox)
            .unwrap();
        assert_eq!(directive.bbox.to_tlwh(), bbox.to_tlwh());
    }
}
