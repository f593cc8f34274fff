//! Course data model: topics, resources, teaching assistants, and the
//! learner's activity history. Immutable once loaded.

use egui::Color32;

/// The kind of learning resource a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Video,
    Document,
    Quiz,
    Practice,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Video => "Video",
            ResourceKind::Document => "Document",
            ResourceKind::Quiz => "Quiz",
            ResourceKind::Practice => "Practice",
        }
    }
}

/// A single learning item, positioned inside its topic's slice by two
/// fractional coordinates: `x` across the slice angle, `y` along the radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: u32,
    pub kind: ResourceKind,
    pub title: String,
    pub metadata: String,
    pub x: f32,
    pub y: f32,
}

/// A course topic owning one angular slice of the quarter circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub id: u32,
    pub name: String,
    pub color: Color32,
    pub resources: Vec<Resource>,
}

/// A teaching assistant anchored at the middle of a topic's slice.
#[derive(Debug, Clone, PartialEq)]
pub struct TeachingAssistant {
    pub id: u32,
    pub name: String,
    pub topic_index: usize,
    pub expertise: String,
    pub radius_factor: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: u32,
    pub name: String,
    pub topics: Vec<Topic>,
    pub teaching_assistants: Vec<TeachingAssistant>,
}

impl Course {
    /// Look up a resource by id across all topics, returning the index of
    /// the owning topic alongside the resource.
    pub fn find_resource(&self, id: u32) -> Option<(usize, &Resource)> {
        self.topics.iter().enumerate().find_map(|(ti, topic)| {
            topic.resources.iter().find(|r| r.id == id).map(|r| (ti, r))
        })
    }
}

/// One completed activity in the learner's history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub resource_id: u32,
    /// ISO-8601 local timestamp, e.g. `2026-01-01T09:00:00`.
    pub timestamp: String,
    pub duration_secs: u32,
}

impl HistoryEntry {
    /// Clock-time label for list rows, `HH:MM`. Falls back to a placeholder
    /// when the timestamp does not parse.
    pub fn time_label(&self) -> String {
        chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S")
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|_| "--:--".into())
    }

    /// Time spent, in whole minutes.
    pub fn duration_label(&self) -> String {
        format!("{}m", self.duration_secs / 60)
    }
}

/// Everything the navigator displays: the course plus the learner's history.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseData {
    pub course: Course,
    pub learner_history: Vec<HistoryEntry>,
}

// ── Demo dataset ───────────────────────────────────────────────────────

fn res(id: u32, kind: ResourceKind, title: &str, metadata: &str, x: f32, y: f32) -> Resource {
    Resource {
        id,
        kind,
        title: title.into(),
        metadata: metadata.into(),
        x,
        y,
    }
}

fn entry(resource_id: u32, timestamp: &str, duration_secs: u32) -> HistoryEntry {
    HistoryEntry {
        resource_id,
        timestamp: timestamp.into(),
        duration_secs,
    }
}

impl CourseData {
    /// Built-in sample course used when the app starts without external data.
    pub fn demo() -> Self {
        use ResourceKind::{Document, Practice, Quiz, Video};

        let topics = vec![
            Topic {
                id: 1,
                name: "Arrays & Strings".into(),
                color: Color32::from_rgb(99, 102, 241),
                resources: vec![
                    res(101, Video, "Array Fundamentals", "Duration: 15 min", 0.3, 0.2),
                    res(102, Document, "String Algorithms", "PDF, 12 pages", 0.5, 0.3),
                    res(103, Quiz, "Arrays Quiz", "10 questions", 0.7, 0.25),
                ],
            },
            Topic {
                id: 2,
                name: "Trees & Graphs".into(),
                color: Color32::from_rgb(16, 185, 129),
                resources: vec![
                    res(201, Video, "Binary Trees", "Duration: 20 min", 0.4, 0.3),
                    res(202, Document, "Graph Theory", "PDF, 18 pages", 0.6, 0.4),
                    res(203, Practice, "Tree Traversal", "5 exercises", 0.5, 0.5),
                ],
            },
            Topic {
                id: 3,
                name: "Dynamic Programming".into(),
                color: Color32::from_rgb(245, 158, 11),
                resources: vec![
                    res(301, Video, "DP Introduction", "Duration: 25 min", 0.3, 0.4),
                    res(302, Document, "Memoization", "PDF, 15 pages", 0.5, 0.5),
                    res(303, Quiz, "DP Concepts", "15 questions", 0.5, 0.25),
                ],
            },
            Topic {
                id: 4,
                name: "Sorting & Searching".into(),
                color: Color32::from_rgb(239, 68, 68),
                resources: vec![
                    res(401, Video, "Quick Sort", "Duration: 18 min", 0.4, 0.35),
                    res(402, Practice, "Binary Search", "8 exercises", 0.6, 0.5),
                    res(403, Document, "Sort Analysis", "PDF, 10 pages", 0.5, 0.6),
                ],
            },
            Topic {
                id: 5,
                name: "Hash Tables".into(),
                color: Color32::from_rgb(139, 92, 246),
                resources: vec![
                    res(501, Video, "Hashing Basics", "Duration: 12 min", 0.35, 0.4),
                    res(502, Document, "Hashing Techniques", "PDF, 8 pages", 0.55, 0.5),
                    res(503, Quiz, "Hash Quiz", "12 questions", 0.7, 0.55),
                ],
            },
            Topic {
                id: 6,
                name: "Advanced Algorithms".into(),
                color: Color32::from_rgb(236, 72, 153),
                resources: vec![
                    res(601, Video, "Greedy Algorithms", "Duration: 22 min", 0.4, 0.45),
                    res(602, Practice, "Algorithm Practice", "10 exercises", 0.6, 0.6),
                    res(603, Document, "Algorithm Design", "PDF, 20 pages", 0.5, 0.7),
                ],
            },
        ];

        let teaching_assistants = vec![
            TeachingAssistant {
                id: 1,
                name: "Abhijit Dibbidi".into(),
                topic_index: 0,
                expertise: "Arrays & Complexity".into(),
                radius_factor: 0.65,
            },
            TeachingAssistant {
                id: 2,
                name: "Aditya KNV".into(),
                topic_index: 2,
                expertise: "Dynamic Programming".into(),
                radius_factor: 0.7,
            },
            TeachingAssistant {
                id: 3,
                name: "Praneeth Reddy".into(),
                topic_index: 4,
                expertise: "Hash Tables".into(),
                radius_factor: 0.68,
            },
        ];

        let learner_history = vec![
            entry(101, "2026-01-01T09:00:00", 900),
            entry(102, "2026-01-01T09:20:00", 1200),
            entry(201, "2026-01-01T10:00:00", 1500),
            entry(301, "2026-01-01T11:00:00", 1800),
            entry(302, "2026-01-01T11:35:00", 1000),
            entry(401, "2026-01-01T12:00:00", 1100),
        ];

        Self {
            course: Course {
                id: 1,
                name: "Advanced Data Structures".into(),
                topics,
                teaching_assistants,
            },
            learner_history,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
