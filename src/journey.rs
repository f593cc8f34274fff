//! Learner-journey polyline and its playback sweep.
//!
//! The journey connects the scene positions of the learner's history
//! entries in order. Playback is a time-driven state machine advanced by
//! the frame clock: the revealed prefix of the polyline grows linearly
//! over a fixed duration while the history point nearest the moving head
//! becomes the active step.

use egui::Pos2;
use log::debug;

use crate::model::{Course, HistoryEntry};
use crate::scene::coords::{self, SceneFrame};

/// Seconds for one full playback sweep.
pub const PLAYBACK_SECS: f32 = 5.0;

/// Scene-distance within which a history point tracks the playback head.
pub const ACTIVE_STEP_RANGE: f32 = 40.0;

/// Resolved journey geometry: one point per history entry whose resource
/// exists, in history order.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    pub points: Vec<Pos2>,
    /// Resource id behind each point, parallel to `points`.
    pub step_ids: Vec<u32>,
    /// Cumulative polyline length up to each point; last entry is the total.
    cum_len: Vec<f32>,
}

impl Journey {
    /// Resolve history entries against the course. Entries whose resource
    /// id matches nothing are skipped; fewer than two resolved points is
    /// no journey at all.
    pub fn from_history(
        course: &Course,
        history: &[HistoryEntry],
        frame: &SceneFrame,
    ) -> Option<Self> {
        let topic_count = course.topics.len();
        let mut points = Vec::with_capacity(history.len());
        let mut step_ids = Vec::with_capacity(history.len());
        for entry in history {
            let Some((topic_index, resource)) = course.find_resource(entry.resource_id) else {
                debug!("skipping history entry for unknown resource {}", entry.resource_id);
                continue;
            };
            points.push(coords::resource_position(
                frame,
                topic_index,
                resource.x,
                resource.y,
                topic_count,
            ));
            step_ids.push(resource.id);
        }
        Self::from_points(points, step_ids)
    }

    /// Build from already-resolved points. Returns None below two points.
    pub fn from_points(points: Vec<Pos2>, step_ids: Vec<u32>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut cum_len = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cum_len.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cum_len.push(total);
        }
        Some(Self {
            points,
            step_ids,
            cum_len,
        })
    }

    pub fn total_len(&self) -> f32 {
        *self.cum_len.last().unwrap_or(&0.0)
    }

    /// Position of the playback head at `frac` of the total arc length.
    pub fn head_at(&self, frac: f32) -> Pos2 {
        let total = self.total_len();
        if total <= 0.0 {
            return self.points[0];
        }
        let target = frac.clamp(0.0, 1.0) * total;
        for i in 1..self.points.len() {
            if target <= self.cum_len[i] {
                let seg = self.cum_len[i] - self.cum_len[i - 1];
                let t = if seg > 0.0 {
                    (target - self.cum_len[i - 1]) / seg
                } else {
                    1.0
                };
                return self.points[i - 1].lerp(self.points[i], t);
            }
        }
        self.points[self.points.len() - 1]
    }

    /// Prefix of the polyline revealed at `frac` of the arc length,
    /// ending at the interpolated head.
    pub fn revealed(&self, frac: f32) -> Vec<Pos2> {
        let total = self.total_len();
        if total <= 0.0 || frac >= 1.0 {
            return self.points.clone();
        }
        let target = frac.clamp(0.0, 1.0) * total;
        let head = self.head_at(frac);
        let mut out = Vec::new();
        for (i, &p) in self.points.iter().enumerate() {
            if self.cum_len[i] <= target {
                out.push(p);
            } else {
                break;
            }
        }
        if out.last() != Some(&head) {
            out.push(head);
        }
        out
    }

    /// Resource id of the history point closest to `head`, if any lies
    /// within `range` scene pixels.
    pub fn nearest_step(&self, head: Pos2, range: f32) -> Option<u32> {
        let mut best: Option<(f32, u32)> = None;
        for (p, &id) in self.points.iter().zip(&self.step_ids) {
            let d = p.distance(head);
            if d < range && best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Direction chevrons for static mode: one per segment, placed at the
    /// midpoint and rotated from earlier to later step.
    pub fn chevrons(&self) -> Vec<(Pos2, f32)> {
        self.points
            .windows(2)
            .map(|pair| {
                let (a, b) = (pair[0], pair[1]);
                let mid = Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
                (mid, (b.y - a.y).atan2(b.x - a.x))
            })
            .collect()
    }
}

/// Linear playback clock, advanced once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    elapsed: f32,
}

impl Playback {
    pub fn start() -> Self {
        Self { elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Sweep progress in [0, 1], linear in time.
    pub fn progress(&self) -> f32 {
        (self.elapsed / PLAYBACK_SECS).clamp(0.0, 1.0)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= PLAYBACK_SECS
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseData;

    fn frame() -> SceneFrame {
        SceneFrame {
            origin: Pos2::new(120.0, 480.0),
            max_radius: 440.0,
        }
    }

    fn bent_path() -> Journey {
        Journey::from_points(
            vec![
                Pos2::new(0.0, 0.0),
                Pos2::new(10.0, 0.0),
                Pos2::new(10.0, 10.0),
            ],
            vec![1, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_resolves_demo_history_in_order() {
        let data = CourseData::demo();
        let journey = Journey::from_history(&data.course, &data.learner_history, &frame()).unwrap();
        assert_eq!(journey.step_ids, vec![101, 102, 201, 301, 302, 401]);
        assert_eq!(journey.points.len(), 6);
    }

    #[test]
    fn test_dangling_entries_skipped() {
        let data = CourseData::demo();
        let history = vec![
            HistoryEntry {
                resource_id: 101,
                timestamp: "2026-01-01T09:00:00".into(),
                duration_secs: 900,
            },
            HistoryEntry {
                resource_id: 999,
                timestamp: "2026-01-01T09:30:00".into(),
                duration_secs: 600,
            },
            HistoryEntry {
                resource_id: 201,
                timestamp: "2026-01-01T10:00:00".into(),
                duration_secs: 1500,
            },
        ];
        let journey = Journey::from_history(&data.course, &history, &frame()).unwrap();
        assert_eq!(journey.step_ids, vec![101, 201]);
    }

    #[test]
    fn test_too_few_points_is_no_journey() {
        let data = CourseData::demo();
        let one = vec![HistoryEntry {
            resource_id: 101,
            timestamp: "2026-01-01T09:00:00".into(),
            duration_secs: 900,
        }];
        assert!(Journey::from_history(&data.course, &one, &frame()).is_none());
        assert!(Journey::from_history(&data.course, &[], &frame()).is_none());
        assert!(Journey::from_points(vec![Pos2::new(1.0, 1.0)], vec![7]).is_none());
    }

    #[test]
    fn test_head_walks_arc_length() {
        let j = bent_path();
        assert_eq!(j.total_len(), 20.0);

        let start = j.head_at(0.0);
        assert!((start.x - 0.0).abs() < 1e-4 && (start.y - 0.0).abs() < 1e-4);

        let quarter = j.head_at(0.25);
        assert!((quarter.x - 5.0).abs() < 1e-4 && quarter.y.abs() < 1e-4);

        let three_quarters = j.head_at(0.75);
        assert!((three_quarters.x - 10.0).abs() < 1e-4);
        assert!((three_quarters.y - 5.0).abs() < 1e-4);

        let end = j.head_at(1.0);
        assert!((end.x - 10.0).abs() < 1e-4 && (end.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_revealed_prefix() {
        let j = bent_path();

        let half = j.revealed(0.5);
        assert_eq!(half.len(), 2);
        assert!((half[1].x - 10.0).abs() < 1e-4 && half[1].y.abs() < 1e-4);

        let most = j.revealed(0.75);
        assert_eq!(most.len(), 3);
        assert!((most[2].y - 5.0).abs() < 1e-4);

        assert_eq!(j.revealed(1.0), j.points);
    }

    #[test]
    fn test_nearest_step_picks_closest_in_range() {
        let j = bent_path();
        assert_eq!(j.nearest_step(Pos2::new(1.0, 1.0), 40.0), Some(1));
        assert_eq!(j.nearest_step(Pos2::new(9.0, 1.0), 40.0), Some(2));
        assert_eq!(j.nearest_step(Pos2::new(200.0, 200.0), 40.0), None);
        // Both endpoints in range; the closer one wins.
        assert_eq!(j.nearest_step(Pos2::new(10.0, 6.0), 40.0), Some(3));
    }

    #[test]
    fn test_chevrons_point_forward() {
        let j = bent_path();
        let chevrons = j.chevrons();
        assert_eq!(chevrons.len(), 2);

        let (mid, angle) = chevrons[0];
        assert!((mid.x - 5.0).abs() < 1e-4 && mid.y.abs() < 1e-4);
        assert!(angle.abs() < 1e-4);

        let (mid, angle) = chevrons[1];
        assert!((mid.x - 10.0).abs() < 1e-4 && (mid.y - 5.0).abs() < 1e-4);
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_zero_length_path() {
        let j = Journey::from_points(
            vec![Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0)],
            vec![1, 1],
        )
        .unwrap();
        assert_eq!(j.total_len(), 0.0);
        let head = j.head_at(0.5);
        assert!(head.x.is_finite() && head.y.is_finite());
        assert_eq!(j.revealed(0.5).len(), 2);
    }

    #[test]
    fn test_playback_clock() {
        let mut p = Playback::start();
        assert_eq!(p.progress(), 0.0);
        assert!(!p.finished());

        p.advance(2.5);
        assert!((p.progress() - 0.5).abs() < 1e-4);
        assert!(!p.finished());

        p.advance(2.5);
        assert!((p.progress() - 1.0).abs() < 1e-4);
        assert!(p.finished());

        p.advance(1.0);
        assert_eq!(p.progress(), 1.0);
    }
}
