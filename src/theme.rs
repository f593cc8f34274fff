//! Color themes for the course map and its chrome.
//!
//! Two fixed palettes (light and dark) plus the per-resource-type accent
//! colors shared by markers, legends, and the detail modal.

use egui::Color32;

use crate::model::ResourceKind;

/// Ring color for teaching-assistant markers, identical in both themes.
pub const TA_COLOR: Color32 = Color32::from_rgb(99, 102, 241);

/// Theme tokens used across the map canvas, header, sidebar, and overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub bg: Color32,
    pub card_bg: Color32,
    pub header_bg: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub border: Color32,
    pub grid: Color32,
    pub tooltip_bg: Color32,
    pub modal_bg: Color32,
    pub shadow: Color32,
    pub history_item_bg: Color32,
    pub history_item_hover: Color32,
    pub accent: Color32,
    pub active_item_bg: Color32,
    pub active_item_border: Color32,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg: Color32::from_rgb(248, 250, 252),
            card_bg: Color32::WHITE,
            header_bg: Color32::WHITE,
            text: Color32::from_rgb(30, 41, 59),
            text_secondary: Color32::from_rgb(100, 116, 139),
            border: Color32::from_rgb(226, 232, 240),
            grid: Color32::from_rgb(203, 213, 225),
            tooltip_bg: Color32::from_rgba_unmultiplied(255, 255, 255, 250),
            modal_bg: Color32::WHITE,
            shadow: Color32::from_rgba_unmultiplied(0, 0, 0, 25),
            history_item_bg: Color32::from_rgb(248, 250, 252),
            history_item_hover: Color32::from_rgb(241, 245, 249),
            accent: Color32::from_rgb(59, 130, 246),
            active_item_bg: Color32::from_rgb(239, 246, 255),
            active_item_border: Color32::from_rgb(59, 130, 246),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color32::from_rgb(15, 23, 42),
            card_bg: Color32::from_rgb(30, 41, 59),
            header_bg: Color32::from_rgb(30, 41, 59),
            text: Color32::from_rgb(241, 245, 249),
            text_secondary: Color32::from_rgb(148, 163, 184),
            border: Color32::from_rgb(51, 65, 85),
            grid: Color32::from_rgb(51, 65, 85),
            tooltip_bg: Color32::from_rgba_unmultiplied(30, 41, 59, 250),
            modal_bg: Color32::from_rgb(30, 41, 59),
            shadow: Color32::from_rgba_unmultiplied(0, 0, 0, 128),
            history_item_bg: Color32::from_rgb(51, 65, 85),
            history_item_hover: Color32::from_rgb(71, 85, 105),
            accent: Color32::from_rgb(96, 165, 250),
            active_item_bg: Color32::from_rgb(30, 58, 138),
            active_item_border: Color32::from_rgb(96, 165, 250),
        }
    }

    /// Select a palette by mode flag.
    pub fn pick(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Marker color for a resource type, shared by dots, history rows, and the modal badge.
pub fn resource_color(kind: ResourceKind) -> Color32 {
    match kind {
        ResourceKind::Video => Color32::from_rgb(239, 68, 68),
        ResourceKind::Document => Color32::from_rgb(59, 130, 246),
        ResourceKind::Quiz => Color32::from_rgb(245, 158, 11),
        ResourceKind::Practice => Color32::from_rgb(16, 185, 129),
    }
}

/// Translucent variant used for marker glows and wedge fills.
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

// ── Tests ──────────────────────────────────────────────────────────────
