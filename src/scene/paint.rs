//! Painter pass: draws a built scene through the current transform.
//!
//! Layer order is fixed so text and markers never hide behind geometry:
//! grid, topic wedges, journey, resource dots, TA markers, labels.
//! Geometry strokes and radii live in scene units and scale with zoom;
//! marker labels are drawn by the label layer at constant screen size.

use egui::{Align2, FontId, Mesh, Painter, Pos2, Shape, Stroke};

use crate::journey::Journey;
use crate::scene::coords::polar_to_cartesian;
use crate::scene::{
    Scene, DOT_CORE_R, DOT_GLOW_R, DOT_HALO_R, GRID_ARCS, TA_HALO_R, TA_RING_R, WEDGE_INNER,
};
use crate::theme::{self, Theme};
use crate::viewport::Transform;

/// Dash pattern of the grid arcs, in scene units.
const GRID_DASH: f32 = 4.0;

/// Dash pattern of the static journey line, in scene units.
const JOURNEY_DASH: f32 = 6.0;
const JOURNEY_GAP: f32 = 4.0;

/// Half the label outline thickness, in screen pixels.
const LABEL_HALO: f32 = 1.5;

/// Draws one frame of a scene. `view` must already map scene space to
/// absolute screen space (viewport transform composed with the canvas
/// origin).
pub struct ScenePainter<'a> {
    painter: &'a Painter,
    theme: &'a Theme,
    view: Transform,
}

impl<'a> ScenePainter<'a> {
    pub fn new(painter: &'a Painter, theme: &'a Theme, view: Transform) -> Self {
        Self {
            painter,
            theme,
            view,
        }
    }

    /// Paint every layer. `playback` carries the sweep progress while the
    /// journey is replaying; `hovered` is the resource whose label gets
    /// hover emphasis.
    pub fn paint(&self, scene: &Scene, playback: Option<f32>, hovered: Option<u32>) {
        self.grid(scene);
        self.wedges(scene);
        if let Some(journey) = &scene.journey {
            match playback {
                Some(progress) => self.journey_playback(journey, progress),
                None => self.journey_static(journey),
            }
        }
        self.resource_dots(scene);
        self.ta_markers(scene);
        self.labels(scene, hovered);
    }

    fn project(&self, p: Pos2) -> Pos2 {
        self.view.apply(p)
    }

    /// Quarter-circle arc at `radius`, projected to screen space.
    fn arc_points(&self, scene: &Scene, radius: f32) -> Vec<Pos2> {
        let sweep = std::f32::consts::FRAC_PI_2;
        let n = arc_segments(radius * self.view.k, sweep);
        (0..=n)
            .map(|i| {
                let angle = sweep * i as f32 / n as f32;
                self.project(polar_to_cartesian(scene.frame.origin, radius, angle))
            })
            .collect()
    }

    fn grid(&self, scene: &Scene) {
        let k = self.view.k;
        let color = theme::with_alpha(self.theme.grid, 128);
        let stroke = Stroke::new(k, color);
        for frac in GRID_ARCS {
            let points = self.arc_points(scene, scene.frame.max_radius * frac);
            self.painter
                .extend(Shape::dashed_line(&points, stroke, GRID_DASH * k, GRID_DASH * k));
        }
        for &(from, to) in &scene.grid_rays {
            self.painter
                .line_segment([self.project(from), self.project(to)], stroke);
        }
    }

    fn wedges(&self, scene: &Scene) {
        let k = self.view.k;
        let inner_r = scene.frame.max_radius * WEDGE_INNER;
        let outer_r = scene.frame.max_radius;
        for wedge in &scene.wedges {
            let sweep = wedge.end_angle - wedge.start_angle;
            let n = arc_segments(outer_r * k, sweep);
            let fill = theme::with_alpha(wedge.color, 20);

            // Annular sector as a triangle strip between the two arcs.
            let mut mesh = Mesh::default();
            let mut inner_arc = Vec::with_capacity(n + 1);
            let mut outer_arc = Vec::with_capacity(n + 1);
            for i in 0..=n {
                let angle = wedge.start_angle + sweep * i as f32 / n as f32;
                let inner = self.project(polar_to_cartesian(scene.frame.origin, inner_r, angle));
                let outer = self.project(polar_to_cartesian(scene.frame.origin, outer_r, angle));
                mesh.colored_vertex(inner, fill);
                mesh.colored_vertex(outer, fill);
                inner_arc.push(inner);
                outer_arc.push(outer);
            }
            for i in 0..n as u32 {
                let base = 2 * i;
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base + 1, base + 3, base + 2);
            }
            self.painter.add(Shape::mesh(mesh));

            // Outline follows inner arc out, outer arc back.
            outer_arc.reverse();
            inner_arc.extend(outer_arc);
            self.painter.add(Shape::closed_line(
                inner_arc,
                Stroke::new(k, theme::with_alpha(wedge.color, 77)),
            ));

            let anchor = if wedge.anchor_end {
                Align2::RIGHT_BOTTOM
            } else {
                Align2::LEFT_BOTTOM
            };
            self.painter.text(
                self.project(wedge.label_pos),
                anchor,
                &wedge.label,
                FontId::proportional(12.0 * k),
                self.theme.text,
            );
        }
    }

    fn journey_static(&self, journey: &Journey) {
        let k = self.view.k;
        let accent = theme::with_alpha(self.theme.accent, 153);
        let points: Vec<Pos2> = journey.points.iter().map(|&p| self.project(p)).collect();
        self.painter.extend(Shape::dashed_line(
            &points,
            Stroke::new(2.0 * k, accent),
            JOURNEY_DASH * k,
            JOURNEY_GAP * k,
        ));
        // Chevrons are opaque; only the dashed line itself is faded.
        for (mid, angle) in journey.chevrons() {
            let pts = chevron_points(self.project(mid), angle, k);
            self.painter
                .add(Shape::line(pts.to_vec(), Stroke::new(2.0 * k, self.theme.accent)));
        }
    }

    fn journey_playback(&self, journey: &Journey, progress: f32) {
        let k = self.view.k;
        let revealed: Vec<Pos2> = journey
            .revealed(progress)
            .into_iter()
            .map(|p| self.project(p))
            .collect();
        if revealed.len() >= 2 {
            self.painter.add(Shape::line(
                revealed,
                Stroke::new(4.0 * k, self.theme.accent),
            ));
        }
    }

    fn resource_dots(&self, scene: &Scene) {
        let k = self.view.k;
        for marker in &scene.markers {
            let p = self.project(marker.pos);
            self.painter.circle_filled(p, DOT_HALO_R * k, self.theme.bg);
            self.painter
                .circle_filled(p, DOT_GLOW_R * k, theme::with_alpha(marker.color, 51));
            let (fill, ring) = if marker.active {
                (self.theme.accent, self.theme.accent)
            } else {
                (marker.color, self.theme.bg)
            };
            self.painter
                .circle(p, DOT_CORE_R * k, fill, Stroke::new(1.5 * k, ring));
        }
    }

    fn ta_markers(&self, scene: &Scene) {
        let k = self.view.k;
        for ta in &scene.ta_markers {
            let p = self.project(ta.pos);
            self.painter.circle_filled(p, TA_HALO_R * k, self.theme.bg);
            self.painter.circle(
                p,
                TA_RING_R * k,
                theme::with_alpha(theme::TA_COLOR, 51),
                Stroke::new(1.5 * k, theme::TA_COLOR),
            );
            self.painter.text(
                p,
                Align2::CENTER_CENTER,
                "TA",
                FontId::proportional(8.0 * k),
                self.theme.text,
            );
        }
    }

    fn labels(&self, scene: &Scene, hovered: Option<u32>) {
        for label in &scene.labels {
            let pos = label.screen_pos(&self.view);
            let anchor = label.anchor();
            let font = FontId::proportional(label.font_px);

            // Outline first: offset copies in the page background color,
            // then the fill on top, like SVG paint-order stroke.
            for (dx, dy) in halo_offsets() {
                self.painter
                    .text(Pos2::new(pos.x + dx, pos.y + dy), anchor, &label.text, font.clone(), self.theme.bg);
            }
            self.painter
                .text(pos, anchor, &label.text, font.clone(), self.theme.text);
            if label.resource_id.is_some() && label.resource_id == hovered {
                // Double-strike for hover emphasis.
                self.painter.text(
                    Pos2::new(pos.x + 0.35, pos.y),
                    anchor,
                    &label.text,
                    font,
                    self.theme.text,
                );
            }
        }
    }
}

/// Segment count for an arc of the given screen radius and sweep, aiming
/// for short chords without unbounded point counts at high zoom.
fn arc_segments(radius_screen: f32, sweep: f32) -> usize {
    (((sweep * radius_screen.max(0.0)) / 6.0).ceil() as usize).clamp(8, 192)
}

/// Open arrowhead centered on `mid`, rotated to `angle`, scaled with zoom.
fn chevron_points(mid: Pos2, angle: f32, k: f32) -> [Pos2; 3] {
    const LOCAL: [(f32, f32); 3] = [(-6.0, -4.0), (2.0, 0.0), (-6.0, 4.0)];
    let (sin, cos) = angle.sin_cos();
    LOCAL.map(|(lx, ly)| {
        Pos2::new(
            mid.x + (lx * cos - ly * sin) * k,
            mid.y + (lx * sin + ly * cos) * k,
        )
    })
}

fn halo_offsets() -> [(f32, f32); 8] {
    let d = LABEL_HALO;
    let diag = d * std::f32::consts::FRAC_1_SQRT_2;
    [
        (d, 0.0),
        (-d, 0.0),
        (0.0, d),
        (0.0, -d),
        (diag, diag),
        (diag, -diag),
        (-diag, diag),
        (-diag, -diag),
    ]
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use egui::epaint::ColorMode;

    use crate::model::CourseData;

    #[test]
    fn test_arc_segments_bounds() {
        let quarter = std::f32::consts::FRAC_PI_2;
        assert_eq!(arc_segments(0.0, quarter), 8);
        assert_eq!(arc_segments(10.0, quarter), 8);
        assert_eq!(arc_segments(100_000.0, quarter), 192);
        // Mid-range scales with radius.
        let a = arc_segments(300.0, quarter);
        let b = arc_segments(600.0, quarter);
        assert!(a < b);
    }

    #[test]
    fn test_chevron_unrotated() {
        let pts = chevron_points(Pos2::new(100.0, 100.0), 0.0, 1.0);
        assert!((pts[0].x - 94.0).abs() < 1e-4 && (pts[0].y - 96.0).abs() < 1e-4);
        assert!((pts[1].x - 102.0).abs() < 1e-4 && (pts[1].y - 100.0).abs() < 1e-4);
        assert!((pts[2].x - 94.0).abs() < 1e-4 && (pts[2].y - 104.0).abs() < 1e-4);
    }

    #[test]
    fn test_chevron_quarter_turn() {
        // Pointing straight down-screen: tip below the midpoint.
        let pts = chevron_points(Pos2::new(0.0, 0.0), std::f32::consts::FRAC_PI_2, 1.0);
        assert!((pts[1].x - 0.0).abs() < 1e-4);
        assert!((pts[1].y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_chevron_scales_with_zoom() {
        let k1 = chevron_points(Pos2::new(0.0, 0.0), 0.0, 1.0);
        let k2 = chevron_points(Pos2::new(0.0, 0.0), 0.0, 2.0);
        assert!((k2[1].x - 2.0 * k1[1].x).abs() < 1e-4);
    }

    #[test]
    fn test_halo_ring_radius() {
        for (dx, dy) in halo_offsets() {
            let r = (dx * dx + dy * dy).sqrt();
            assert!((r - LABEL_HALO).abs() < 1e-4);
        }
    }

    #[test]
    fn test_chevron_stroke_is_opaque_accent() {
        let scene = Scene::build(&CourseData::demo(), 800.0, 600.0, true, true).unwrap();
        let theme = Theme::light();
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            ..Default::default()
        };
        let output = ctx.run(input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            ScenePainter::new(&painter, &theme, Transform::IDENTITY).paint(&scene, None, None);
        });

        // Chevrons are the only open three-point paths in a static frame.
        let mut seen = 0;
        for clipped in &output.shapes {
            if let Shape::Path(path) = &clipped.shape {
                if !path.closed && path.points.len() == 3 {
                    seen += 1;
                    assert_eq!(path.stroke.color, ColorMode::Solid(theme.accent));
                }
            }
        }
        assert_eq!(seen, 5);
    }
}
