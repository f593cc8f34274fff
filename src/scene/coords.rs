//! Polar-to-Cartesian mapping for the quarter-circle layout.
//!
//! Pure functions; every other part of the scene derives its geometry
//! from these. Angle 0 points right, pi/2 points straight up, and the
//! y-axis grows downward to match screen coordinates.

use std::f32::consts::FRAC_PI_2;

use egui::Pos2;

/// Outer margin around the usable drawing area, in scene pixels.
pub const MARGIN: f32 = 80.0;

/// Resources sit on the band from 20% to 95% of the maximum radius.
pub const RADIUS_INNER: f32 = 0.2;
pub const RADIUS_SPAN: f32 = 0.75;

/// Shared geometry of one built scene: the arc origin and the usable
/// radius, both derived from the viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    pub origin: Pos2,
    pub max_radius: f32,
}

impl SceneFrame {
    /// Anchor the quarter circle near the bottom-left corner of a viewport.
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            origin: Pos2::new(MARGIN + 40.0, height - MARGIN - 40.0),
            max_radius: width.min(height) - 2.0 * MARGIN,
        }
    }
}

/// Angular width of one topic slice; the slices tile [0, pi/2] exactly.
pub fn angle_step(topic_count: usize) -> f32 {
    if topic_count == 0 {
        0.0
    } else {
        FRAC_PI_2 / topic_count as f32
    }
}

pub fn polar_to_cartesian(origin: Pos2, radius: f32, angle: f32) -> Pos2 {
    Pos2::new(
        origin.x + radius * angle.cos(),
        origin.y - radius * angle.sin(),
    )
}

/// Scene position of a resource from its fractional slot inside a topic
/// slice: `frac_x` sweeps the slice angle, `frac_y` the radius band.
pub fn resource_position(
    frame: &SceneFrame,
    topic_index: usize,
    frac_x: f32,
    frac_y: f32,
    topic_count: usize,
) -> Pos2 {
    let step = angle_step(topic_count);
    let angle = (topic_index as f32 + frac_x) * step;
    let radius = frame.max_radius * (RADIUS_INNER + frac_y * RADIUS_SPAN);
    polar_to_cartesian(frame.origin, radius, angle)
}

/// Scene position of a teaching assistant: the angular midpoint of its
/// topic slice at a configured fraction of the maximum radius.
pub fn ta_position(
    frame: &SceneFrame,
    topic_index: usize,
    radius_factor: f32,
    topic_count: usize,
) -> Pos2 {
    let step = angle_step(topic_count);
    let angle = (topic_index as f32 + 0.5) * step;
    polar_to_cartesian(frame.origin, frame.max_radius * radius_factor, angle)
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_axes() {
        let origin = Pos2::new(100.0, 200.0);
        let right = polar_to_cartesian(origin, 50.0, 0.0);
        assert!((right.x - 150.0).abs() < 0.01);
        assert!((right.y - 200.0).abs() < 0.01);

        let up = polar_to_cartesian(origin, 50.0, FRAC_PI_2);
        assert!((up.x - 100.0).abs() < 0.01);
        assert!((up.y - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_known_resource_position() {
        // topicCount 6, fractional (0.3, 0.2), maxRadius 400, origin (120, 320)
        let frame = SceneFrame {
            origin: Pos2::new(120.0, 320.0),
            max_radius: 400.0,
        };
        let p = resource_position(&frame, 0, 0.3, 0.2, 6);
        assert!((p.x - 259.6).abs() < 0.1, "x was {}", p.x);
        assert!((p.y - 309.0).abs() < 0.1, "y was {}", p.y);
    }

    #[test]
    fn test_slices_tile_quarter_circle() {
        let frame = SceneFrame {
            origin: Pos2::new(0.0, 0.0),
            max_radius: 300.0,
        };
        // The end of each slice coincides with the start of the next.
        for count in [1, 3, 6, 7] {
            for i in 0..count - 1 {
                let end = resource_position(&frame, i, 1.0, 0.5, count);
                let start = resource_position(&frame, i + 1, 0.0, 0.5, count);
                assert!((end.x - start.x).abs() < 1e-3);
                assert!((end.y - start.y).abs() < 1e-3);
            }
            // The last slice closes at exactly pi/2.
            assert!(((count as f32) * angle_step(count) - FRAC_PI_2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_radius_band() {
        let frame = SceneFrame {
            origin: Pos2::new(0.0, 0.0),
            max_radius: 400.0,
        };
        let inner = resource_position(&frame, 0, 0.0, 0.0, 4);
        let outer = resource_position(&frame, 0, 0.0, 1.0, 4);
        assert!((inner.distance(frame.origin) - 80.0).abs() < 0.01);
        assert!((outer.distance(frame.origin) - 380.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_from_viewport() {
        let frame = SceneFrame::from_viewport(800.0, 600.0);
        assert!((frame.origin.x - 120.0).abs() < 0.01);
        assert!((frame.origin.y - 480.0).abs() < 0.01);
        assert!((frame.max_radius - 440.0).abs() < 0.01);
    }

    #[test]
    fn test_ta_sits_on_slice_midline() {
        let frame = SceneFrame {
            origin: Pos2::new(120.0, 480.0),
            max_radius: 440.0,
        };
        let p = ta_position(&frame, 2, 0.7, 6);
        let expected = polar_to_cartesian(frame.origin, 440.0 * 0.7, 2.5 * angle_step(6));
        assert!((p.x - expected.x).abs() < 1e-4);
        assert!((p.y - expected.y).abs() < 1e-4);
    }

    #[test]
    fn test_zero_topics_degenerate() {
        let frame = SceneFrame {
            origin: Pos2::new(0.0, 0.0),
            max_radius: 100.0,
        };
        assert_eq!(angle_step(0), 0.0);
        let p = resource_position(&frame, 0, 0.5, 0.5, 0);
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
