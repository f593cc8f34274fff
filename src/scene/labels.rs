//! Zoom-compensated marker labels.
//!
//! Labels keep a constant on-screen size and a constant on-screen
//! distance from their marker at every zoom level. Base positions are
//! fixed at scene build; only the screen projection changes with the
//! transform, so re-placement is O(labels) per frame.

use egui::{Align2, Pos2};

use crate::viewport::Transform;

/// Screen pixels between a resource marker and its label.
pub const RESOURCE_OFFSET: f32 = 14.0;
/// Screen pixels between a TA marker and its label.
pub const TA_OFFSET: f32 = 18.0;

pub const RESOURCE_FONT: f32 = 11.0;
pub const TA_FONT: f32 = 10.0;

/// One marker label, placed above or below its marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Scene position of the labeled marker.
    pub base: Pos2,
    /// -1 above the marker, +1 below.
    pub dir: f32,
    /// Marker-to-label distance in screen pixels.
    pub offset: f32,
    /// Font size in screen pixels.
    pub font_px: f32,
    /// Owning resource for hover emphasis; None for TA labels.
    pub resource_id: Option<u32>,
}

/// Markers above the shared origin push their label further up, markers
/// below push it down, so labels always point away from the arc.
pub fn direction(marker: Pos2, origin: Pos2) -> f32 {
    if marker.y < origin.y {
        -1.0
    } else {
        1.0
    }
}

impl Label {
    pub fn for_resource(text: String, base: Pos2, origin: Pos2, resource_id: u32) -> Self {
        Self {
            text,
            base,
            dir: direction(base, origin),
            offset: RESOURCE_OFFSET,
            font_px: RESOURCE_FONT,
            resource_id: Some(resource_id),
        }
    }

    pub fn for_ta(text: String, base: Pos2, origin: Pos2) -> Self {
        Self {
            text,
            base,
            dir: direction(base, origin),
            offset: TA_OFFSET,
            font_px: TA_FONT,
            resource_id: None,
        }
    }

    /// Screen anchor under the given transform: the marker's projected
    /// position displaced vertically by the fixed offset.
    pub fn screen_pos(&self, t: &Transform) -> Pos2 {
        let p = t.apply(self.base);
        Pos2::new(p.x, p.y + self.dir * self.offset)
    }

    /// Text grows away from the marker.
    pub fn anchor(&self) -> Align2 {
        if self.dir < 0.0 {
            Align2::CENTER_BOTTOM
        } else {
            Align2::CENTER_TOP
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_sign() {
        let origin = Pos2::new(120.0, 480.0);
        assert_eq!(direction(Pos2::new(300.0, 200.0), origin), -1.0);
        assert_eq!(direction(Pos2::new(300.0, 480.0), origin), 1.0);
        assert_eq!(direction(Pos2::new(300.0, 500.0), origin), 1.0);
    }

    #[test]
    fn test_screen_distance_constant_under_zoom() {
        let origin = Pos2::new(120.0, 480.0);
        let label = Label::for_resource("Binary Trees".into(), Pos2::new(260.0, 310.0), origin, 201);
        for k in [0.5_f32, 1.0, 2.0, 4.7, 8.0] {
            let t = Transform {
                k,
                tx: 31.0,
                ty: -17.0,
            };
            let marker = t.apply(label.base);
            let dist = marker.distance(label.screen_pos(&t));
            assert!(
                (dist - RESOURCE_OFFSET).abs() < 1e-3,
                "distance {} at k {}",
                dist,
                k
            );
        }
    }

    #[test]
    fn test_anchor_tracks_direction() {
        let origin = Pos2::new(120.0, 480.0);
        let above = Label::for_ta("Aditya KNV".into(), Pos2::new(200.0, 100.0), origin);
        assert_eq!(above.anchor(), Align2::CENTER_BOTTOM);
        assert!(above.screen_pos(&Transform::IDENTITY).y < 100.0);

        let below = Label::for_ta("Aditya KNV".into(), Pos2::new(200.0, 490.0), origin);
        assert_eq!(below.anchor(), Align2::CENTER_TOP);
        assert!(below.screen_pos(&Transform::IDENTITY).y > 490.0);
    }

    #[test]
    fn test_kind_metrics() {
        let origin = Pos2::new(0.0, 0.0);
        let r = Label::for_resource("Quick Sort".into(), Pos2::new(10.0, -10.0), origin, 401);
        assert_eq!(r.offset, RESOURCE_OFFSET);
        assert_eq!(r.font_px, RESOURCE_FONT);
        assert_eq!(r.resource_id, Some(401));

        let t = Label::for_ta("Praneeth Reddy".into(), Pos2::new(10.0, -10.0), origin);
        assert_eq!(t.offset, TA_OFFSET);
        assert_eq!(t.font_px, TA_FONT);
        assert_eq!(t.resource_id, None);
    }
}
