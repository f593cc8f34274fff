//! `NavigatorApp`: the top-level egui application state.
//!
//! This module declares the `NavigatorApp` struct, its `Default` impl,
//! and the frame loop. All drawing methods live in sibling sub-modules:
//!
//! - `header`: course title strip and view toggles
//! - `sidebar`: learning-path history list
//! - `canvas`: the map itself (rebuilds, gestures, playback, paint)
//! - `overlays`: tooltip, resource modal, floating zoom controls

pub mod canvas;
pub mod header;
pub mod overlays;
pub mod sidebar;

use eframe::egui;
use log::info;

use learning_navigator::journey::Playback;
use learning_navigator::model::CourseData;
use learning_navigator::scene::{Hit, Scene};
use learning_navigator::theme::Theme;
use learning_navigator::viewport::Viewport;

use canvas::SceneKey;

// ─── Application state ───────────────────────────────────────────────────────

pub struct NavigatorApp {
    pub data: CourseData,
    // View flags (header controls)
    pub dark_mode: bool,
    pub show_history: bool,
    pub show_journey: bool,
    pub show_tas: bool,
    pub is_playing: bool,
    // Scene, rebuilt whenever the key changes
    pub scene: Option<Scene>,
    pub scene_key: Option<SceneKey>,
    pub viewport: Viewport,
    // Playback
    pub playback: Option<Playback>,
    pub active_step_id: Option<u32>,
    // Pointer state
    pub hovered: Option<Hit>,
    pub tooltip_pos: Option<egui::Pos2>,
    pub selected_resource: Option<u32>,
    // Sidebar auto-scroll bookkeeping
    pub last_scrolled_step: Option<u32>,
    // Canvas placement, for the floating overlay widgets
    pub canvas_rect: Option<egui::Rect>,
}

impl Default for NavigatorApp {
    fn default() -> Self {
        let data = CourseData::demo();
        info!(
            "loaded course '{}': {} topics, {} TAs, {} history entries",
            data.course.name,
            data.course.topics.len(),
            data.course.teaching_assistants.len(),
            data.learner_history.len()
        );
        Self {
            data,
            dark_mode: false,
            show_history: true,
            show_journey: true,
            show_tas: true,
            is_playing: false,
            scene: None,
            scene_key: None,
            viewport: Viewport::new(),
            playback: None,
            active_step_id: None,
            hovered: None,
            tooltip_pos: None,
            selected_resource: None,
            last_scrolled_step: None,
            canvas_rect: None,
        }
    }
}

impl NavigatorApp {
    /// Start or stop journey playback. Playing always turns the journey
    /// layer on; stopping clears any highlighted step.
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.stop_playback();
            info!("journey playback stopped");
        } else {
            self.show_journey = true;
            self.is_playing = true;
            self.playback = Some(Playback::start());
            info!("journey playback started");
        }
    }

    pub fn stop_playback(&mut self) {
        self.is_playing = false;
        self.playback = None;
        self.active_step_id = None;
        if let Some(scene) = &mut self.scene {
            scene.set_active_step(None);
        }
    }

    /// Resource id under the pointer, if the pointer is over a resource.
    pub fn hovered_resource(&self) -> Option<u32> {
        match self.hovered {
            Some(Hit::Resource(id)) => Some(id),
            _ => None,
        }
    }
}

impl eframe::App for NavigatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        let theme = Theme::pick(self.dark_mode);

        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.draw_header(ctx, &theme);
        if self.show_history {
            self.draw_sidebar(ctx, &theme);
        }
        self.draw_canvas(ctx, &theme, dt);
        self.draw_overlays(ctx, &theme);
    }
}
