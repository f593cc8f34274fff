//! Scene construction for the radial course map.
//!
//! `Scene::build` turns course data and the viewport size into one
//! immutable-per-build set of layers: grid, topic wedges, journey
//! polyline, resource and TA markers, and their labels. A rebuild
//! replaces the whole scene; the only state mutated in place afterwards
//! is the per-marker active flag driven by playback.

pub mod coords;
pub mod labels;
pub mod paint;

use std::collections::HashMap;

use egui::{Color32, Pos2};
use log::debug;

use crate::journey::Journey;
use crate::model::CourseData;
use crate::scene::coords::{
    angle_step, polar_to_cartesian, resource_position, ta_position, SceneFrame,
};
use crate::scene::labels::Label;
use crate::theme;
use crate::viewport::Transform;

/// Radii of the dashed grid arcs, as fractions of the maximum radius.
pub const GRID_ARCS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];

/// Topic wedges span from 15% of the maximum radius out to the rim.
pub const WEDGE_INNER: f32 = 0.15;

/// Topic names sit just outside the rim.
pub const RIM_LABEL_RADIUS: f32 = 1.05;

/// Resource marker radii in scene units: occluding halo, translucent
/// glow, solid core.
pub const DOT_HALO_R: f32 = 12.0;
pub const DOT_GLOW_R: f32 = 8.0;
pub const DOT_CORE_R: f32 = 5.0;

/// TA marker radii in scene units.
pub const TA_HALO_R: f32 = 14.0;
pub const TA_RING_R: f32 = 10.0;

/// One topic's annular wedge plus its rim label.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub color: Color32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub label: String,
    pub label_pos: Pos2,
    /// Labels past the halfway slice anchor on their right edge so they
    /// stay over the canvas instead of running off it.
    pub anchor_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceMarker {
    pub id: u32,
    pub pos: Pos2,
    /// Type-default core color.
    pub color: Color32,
    /// True while playback holds this marker as the active step.
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaMarker {
    pub id: u32,
    pub pos: Pos2,
}

/// What the pointer is over. TA markers draw above resource dots and
/// take priority on overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Resource(u32),
    Ta(u32),
}

pub struct Scene {
    pub frame: SceneFrame,
    /// Radial boundary lines, one per slice edge.
    pub grid_rays: Vec<(Pos2, Pos2)>,
    pub wedges: Vec<Wedge>,
    pub markers: Vec<ResourceMarker>,
    pub ta_markers: Vec<TaMarker>,
    /// Resource labels first, TA labels after, drawn in order.
    pub labels: Vec<Label>,
    pub journey: Option<Journey>,
    marker_index: HashMap<u32, usize>,
}

impl Scene {
    /// Build the full scene, or None when the viewport has no usable area
    /// yet (e.g. before the window reports a real size).
    pub fn build(
        data: &CourseData,
        width: f32,
        height: f32,
        show_journey: bool,
        show_tas: bool,
    ) -> Option<Self> {
        let frame = SceneFrame::from_viewport(width, height);
        if width <= 0.0 || height <= 0.0 || frame.max_radius <= 0.0 {
            debug!("skipping scene build for degenerate viewport {width}x{height}");
            return None;
        }

        let topic_count = data.course.topics.len();
        let step = angle_step(topic_count);

        let grid_rays = (0..=topic_count)
            .map(|i| {
                let rim = polar_to_cartesian(frame.origin, frame.max_radius, i as f32 * step);
                (frame.origin, rim)
            })
            .collect();

        let wedges = data
            .course
            .topics
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                let start_angle = i as f32 * step;
                let end_angle = (i + 1) as f32 * step;
                let mid = (start_angle + end_angle) / 2.0;
                Wedge {
                    color: topic.color,
                    start_angle,
                    end_angle,
                    label: topic.name.clone(),
                    label_pos: polar_to_cartesian(
                        frame.origin,
                        frame.max_radius * RIM_LABEL_RADIUS,
                        mid,
                    ),
                    anchor_end: i > topic_count / 2,
                }
            })
            .collect();

        let mut markers = Vec::new();
        let mut marker_index = HashMap::new();
        let mut labels = Vec::new();
        for (ti, topic) in data.course.topics.iter().enumerate() {
            for resource in &topic.resources {
                let pos = resource_position(&frame, ti, resource.x, resource.y, topic_count);
                marker_index.insert(resource.id, markers.len());
                labels.push(Label::for_resource(
                    resource.title.clone(),
                    pos,
                    frame.origin,
                    resource.id,
                ));
                markers.push(ResourceMarker {
                    id: resource.id,
                    pos,
                    color: theme::resource_color(resource.kind),
                    active: false,
                });
            }
        }

        let journey = if show_journey {
            Journey::from_history(&data.course, &data.learner_history, &frame)
        } else {
            None
        };

        let mut ta_markers = Vec::new();
        if show_tas {
            for ta in &data.course.teaching_assistants {
                if ta.topic_index >= topic_count {
                    debug!("skipping TA {} with unknown topic index {}", ta.id, ta.topic_index);
                    continue;
                }
                let pos = ta_position(&frame, ta.topic_index, ta.radius_factor, topic_count);
                ta_markers.push(TaMarker { id: ta.id, pos });
                labels.push(Label::for_ta(ta.name.clone(), pos, frame.origin));
            }
        }

        Some(Self {
            frame,
            grid_rays,
            wedges,
            markers,
            ta_markers,
            labels,
            journey,
            marker_index,
        })
    }

    /// Mark one resource's core dot as the active playback step, clearing
    /// every other marker. None clears them all.
    pub fn set_active_step(&mut self, id: Option<u32>) {
        for m in &mut self.markers {
            m.active = false;
        }
        if let Some(id) = id {
            if let Some(&i) = self.marker_index.get(&id) {
                self.markers[i].active = true;
            }
        }
    }

    /// Nearest marker under a screen-space point, if any is within its
    /// hover radius. The pointer is mapped back into scene space once;
    /// hover radii match the drawn glow/ring sizes, so hit areas scale
    /// with zoom like the markers do.
    pub fn hit_test(&self, screen: Pos2, t: &Transform) -> Option<Hit> {
        let local = t.invert(screen);
        let mut best: Option<(f32, Hit)> = None;
        for ta in &self.ta_markers {
            let d = ta.pos.distance(local);
            if d <= TA_RING_R && best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, Hit::Ta(ta.id)));
            }
        }
        if let Some((_, hit)) = best {
            return Some(hit);
        }
        for m in &self.markers {
            let d = m.pos.distance(local);
            if d <= DOT_GLOW_R && best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, Hit::Resource(m.id)));
            }
        }
        best.map(|(_, hit)| hit)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseData;

    fn demo_scene() -> Scene {
        Scene::build(&CourseData::demo(), 800.0, 600.0, true, true).unwrap()
    }

    #[test]
    fn test_build_layer_counts() {
        let scene = demo_scene();
        assert_eq!(scene.grid_rays.len(), 7);
        assert_eq!(scene.wedges.len(), 6);
        assert_eq!(scene.markers.len(), 18);
        assert_eq!(scene.ta_markers.len(), 3);
        assert_eq!(scene.labels.len(), 21);
        assert!(scene.journey.is_some());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let data = CourseData::demo();
        let a = Scene::build(&data, 800.0, 600.0, true, true).unwrap();
        let b = Scene::build(&data, 800.0, 600.0, true, true).unwrap();
        assert_eq!(a.markers, b.markers);
        assert_eq!(a.ta_markers, b.ta_markers);
        assert_eq!(a.wedges, b.wedges);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.journey, b.journey);
    }

    #[test]
    fn test_hiding_tas_leaves_resources_alone() {
        let data = CourseData::demo();
        let with = Scene::build(&data, 800.0, 600.0, true, true).unwrap();
        let without = Scene::build(&data, 800.0, 600.0, true, false).unwrap();
        assert!(without.ta_markers.is_empty());
        assert_eq!(without.labels.len(), 18);
        assert_eq!(with.markers, without.markers);
    }

    #[test]
    fn test_hiding_journey() {
        let data = CourseData::demo();
        let scene = Scene::build(&data, 800.0, 600.0, false, true).unwrap();
        assert!(scene.journey.is_none());
        assert_eq!(scene.markers.len(), 18);
    }

    #[test]
    fn test_degenerate_viewport_skips_build() {
        let data = CourseData::demo();
        assert!(Scene::build(&data, 0.0, 600.0, true, true).is_none());
        assert!(Scene::build(&data, 800.0, 0.0, true, true).is_none());
        // Smaller than twice the margin leaves no radius at all.
        assert!(Scene::build(&data, 150.0, 150.0, true, true).is_none());
    }

    #[test]
    fn test_grid_rays_span_quarter() {
        let scene = demo_scene();
        let (origin, first_end) = scene.grid_rays[0];
        assert_eq!(origin, scene.frame.origin);
        assert!((first_end.x - (origin.x + scene.frame.max_radius)).abs() < 0.01);
        assert!((first_end.y - origin.y).abs() < 0.01);

        let (_, last_end) = scene.grid_rays[6];
        assert!((last_end.x - origin.x).abs() < 0.01);
        assert!((last_end.y - (origin.y - scene.frame.max_radius)).abs() < 0.01);
    }

    #[test]
    fn test_rim_label_anchor_flip() {
        let scene = demo_scene();
        assert!(!scene.wedges[0].anchor_end);
        assert!(!scene.wedges[3].anchor_end);
        assert!(scene.wedges[4].anchor_end);
        assert!(scene.wedges[5].anchor_end);
    }

    #[test]
    fn test_wedges_tile_quarter() {
        let scene = demo_scene();
        let step = angle_step(6);
        for (i, w) in scene.wedges.iter().enumerate() {
            assert!((w.start_angle - i as f32 * step).abs() < 1e-6);
            assert!((w.end_angle - (i + 1) as f32 * step).abs() < 1e-6);
        }
        assert!((scene.wedges[5].end_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_set_active_step() {
        let mut scene = demo_scene();
        scene.set_active_step(Some(201));
        let active: Vec<u32> = scene
            .markers
            .iter()
            .filter(|m| m.active)
            .map(|m| m.id)
            .collect();
        assert_eq!(active, vec![201]);

        scene.set_active_step(Some(302));
        let active: Vec<u32> = scene
            .markers
            .iter()
            .filter(|m| m.active)
            .map(|m| m.id)
            .collect();
        assert_eq!(active, vec![302]);

        scene.set_active_step(None);
        assert!(scene.markers.iter().all(|m| !m.active));

        // Unknown id just clears.
        scene.set_active_step(Some(999));
        assert!(scene.markers.iter().all(|m| !m.active));
    }

    #[test]
    fn test_hit_test_resource() {
        let scene = demo_scene();
        let t = Transform::IDENTITY;
        let target = scene.markers[4];
        assert_eq!(
            scene.hit_test(target.pos, &t),
            Some(Hit::Resource(target.id))
        );
        let off = Pos2::new(target.pos.x + 100.0, target.pos.y + 100.0);
        assert_ne!(scene.hit_test(off, &t), Some(Hit::Resource(target.id)));
    }

    #[test]
    fn test_hit_test_prefers_ta_on_overlap() {
        let mut scene = demo_scene();
        let pos = scene.markers[0].pos;
        scene.ta_markers.push(TaMarker { id: 42, pos });
        assert_eq!(scene.hit_test(pos, &Transform::IDENTITY), Some(Hit::Ta(42)));
    }

    #[test]
    fn test_hit_radius_scales_with_zoom() {
        let scene = demo_scene();
        let marker = scene.markers[0];
        let zoomed = Transform {
            k: 4.0,
            tx: 0.0,
            ty: 0.0,
        };
        let screen = zoomed.apply(marker.pos);
        let near = Pos2::new(screen.x + 30.0, screen.y);
        assert_eq!(
            scene.hit_test(near, &zoomed),
            Some(Hit::Resource(marker.id))
        );

        let ident_near = Pos2::new(marker.pos.x + 30.0, marker.pos.y);
        assert_ne!(
            scene.hit_test(ident_near, &Transform::IDENTITY),
            Some(Hit::Resource(marker.id))
        );
    }

    #[test]
    fn test_dangling_ta_topic_skipped() {
        let mut data = CourseData::demo();
        data.course.teaching_assistants.push(crate::model::TeachingAssistant {
            id: 9,
            name: "Ghost".into(),
            topic_index: 99,
            expertise: "Nothing".into(),
            radius_factor: 0.5,
        });
        let scene = Scene::build(&data, 800.0, 600.0, true, true).unwrap();
        assert_eq!(scene.ta_markers.len(), 3);
    }
}
