//! The map canvas: scene rebuilds, pan/zoom gestures, playback advance,
//! hit testing, and the paint pass.

use eframe::egui::{self, CursorIcon, Pos2, Rounding, Sense};
use log::{debug, info};

use learning_navigator::journey::{Playback, ACTIVE_STEP_RANGE};
use learning_navigator::scene::paint::ScenePainter;
use learning_navigator::scene::{Hit, Scene};
use learning_navigator::theme::Theme;
use learning_navigator::viewport::Transform;

use super::NavigatorApp;

/// Everything that forces a full scene rebuild when it changes. Hover
/// and playback stay out: they are per-frame state painted over the
/// same geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneKey {
    width_bits: u32,
    height_bits: u32,
    dark_mode: bool,
    show_journey: bool,
    show_tas: bool,
}

impl SceneKey {
    fn new(width: f32, height: f32, dark_mode: bool, show_journey: bool, show_tas: bool) -> Self {
        Self {
            width_bits: width.to_bits(),
            height_bits: height.to_bits(),
            dark_mode,
            show_journey,
            show_tas,
        }
    }
}

impl NavigatorApp {
    /// Render the central map area.
    pub fn draw_canvas(&mut self, ctx: &egui::Context, theme: &Theme, dt: f32) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(theme.bg))
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
                self.canvas_rect = Some(rect);

                self.rebuild_if_needed(rect.width(), rect.height());

                self.viewport.tick(dt);
                self.advance_playback(ctx, dt);

                let t = self.viewport.transform();
                let view = Transform {
                    k: t.k,
                    tx: t.tx + rect.min.x,
                    ty: t.ty + rect.min.y,
                };

                self.handle_gestures(ui, rect, &response, &view);
                // A gesture supersedes the tween, so this comes after input.
                if self.viewport.animating() {
                    ctx.request_repaint();
                }

                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, Rounding::ZERO, theme.bg);
                if let Some(scene) = &self.scene {
                    let progress = if self.is_playing {
                        self.playback.map(|p| p.progress())
                    } else {
                        None
                    };
                    ScenePainter::new(&painter, theme, view).paint(
                        scene,
                        progress,
                        self.hovered_resource(),
                    );
                }

                // Leave the cursor alone unless the pointer is over the map.
                if response.dragged() {
                    ctx.output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);
                } else if self.hovered.is_some() {
                    ctx.output_mut(|o| o.cursor_icon = CursorIcon::PointingHand);
                } else if response.hovered() {
                    ctx.output_mut(|o| o.cursor_icon = CursorIcon::Grab);
                }
            });
    }

    /// Rebuild the scene when size, theme, or a view flag changed. The
    /// viewport transform survives rebuilds untouched.
    fn rebuild_if_needed(&mut self, width: f32, height: f32) {
        let key = SceneKey::new(
            width,
            height,
            self.dark_mode,
            self.show_journey,
            self.show_tas,
        );
        if self.scene_key == Some(key) {
            return;
        }
        debug!("rebuilding scene at {width}x{height}");
        self.scene = Scene::build(&self.data, width, height, self.show_journey, self.show_tas);
        self.scene_key = Some(key);
        // The old scene's highlighting dies with it; a running playback
        // starts a fresh sweep over the new geometry.
        self.active_step_id = None;
        if self.is_playing {
            self.playback = Some(Playback::start());
        }
    }

    /// Advance the playback sweep and keep the active step in sync.
    fn advance_playback(&mut self, ctx: &egui::Context, dt: f32) {
        if !self.is_playing {
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if scene.journey.is_none() {
            // Journey hidden or too few resolvable points.
            self.is_playing = false;
            self.playback = None;
            self.active_step_id = None;
            return;
        }
        let Some(mut playback) = self.playback else {
            return;
        };

        playback.advance(dt);
        if playback.finished() {
            scene.set_active_step(None);
            self.active_step_id = None;
            self.is_playing = false;
            self.playback = None;
            info!("journey playback finished");
            // The header and sidebar painted earlier this frame with the
            // sweep still running; one more frame shows the idle state.
            ctx.request_repaint();
            return;
        }

        let active = scene.journey.as_ref().and_then(|journey| {
            journey.nearest_step(journey.head_at(playback.progress()), ACTIVE_STEP_RANGE)
        });
        scene.set_active_step(active);
        self.active_step_id = active;
        self.playback = Some(playback);
        ctx.request_repaint();
    }

    /// Drag pans, wheel and pinch zoom around the cursor, hover feeds
    /// the tooltip, click opens the resource detail modal.
    fn handle_gestures(
        &mut self,
        ui: &egui::Ui,
        rect: egui::Rect,
        response: &egui::Response,
        view: &Transform,
    ) {
        if response.dragged() {
            self.viewport.pan(response.drag_delta());
        }

        if response.hovered() {
            let zoom_delta = ui.input(|i| i.zoom_delta());
            let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
            let factor = if zoom_delta != 1.0 {
                zoom_delta
            } else if scroll_y != 0.0 {
                2.0_f32.powf(scroll_y * 0.002)
            } else {
                1.0
            };
            if factor != 1.0 {
                if let Some(pointer) = response.hover_pos() {
                    let anchor = Pos2::new(pointer.x - rect.min.x, pointer.y - rect.min.y);
                    self.viewport.zoom_at(factor, anchor);
                }
            }
        }

        let Some(scene) = self.scene.as_ref() else {
            self.hovered = None;
            self.tooltip_pos = None;
            return;
        };

        match response.hover_pos() {
            Some(pointer) => {
                let hit = scene.hit_test(pointer, view);
                if hit != self.hovered {
                    self.hovered = hit;
                    // The tooltip sits where the pointer entered the marker.
                    self.tooltip_pos = hit.map(|_| pointer);
                }
            }
            None => {
                self.hovered = None;
                self.tooltip_pos = None;
            }
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                if let Some(Hit::Resource(id)) = scene.hit_test(pointer, view) {
                    debug!("resource {id} selected");
                    self.selected_resource = Some(id);
                }
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_app() -> NavigatorApp {
        let mut app = NavigatorApp::default();
        app.scene = Scene::build(&app.data, 800.0, 600.0, true, true);
        assert!(app.scene.is_some());
        app.is_playing = true;
        app.playback = Some(Playback::start());
        app
    }

    #[test]
    fn test_mid_sweep_requests_repaint() {
        let mut app = playing_app();
        let ctx = egui::Context::default();
        app.advance_playback(&ctx, 0.1);
        assert!(app.is_playing);
        assert!(app.playback.is_some());
        assert!(ctx.has_requested_repaint());
    }

    #[test]
    fn test_finished_sweep_clears_state_and_repaints() {
        let mut app = playing_app();
        app.scene.as_mut().unwrap().set_active_step(Some(101));
        app.active_step_id = Some(101);
        let ctx = egui::Context::default();
        app.advance_playback(&ctx, 60.0);
        assert!(!app.is_playing);
        assert!(app.playback.is_none());
        assert!(app.active_step_id.is_none());
        let scene = app.scene.as_ref().unwrap();
        assert!(scene.markers.iter().all(|m| !m.active));
        // The header's play control and the sidebar highlight were drawn
        // before the sweep finished; without this frame they stay stale.
        assert!(ctx.has_requested_repaint());
    }

    #[test]
    fn test_hidden_journey_stops_playback() {
        let mut app = NavigatorApp::default();
        app.scene = Scene::build(&app.data, 800.0, 600.0, false, true);
        app.is_playing = true;
        app.playback = Some(Playback::start());
        let ctx = egui::Context::default();
        app.advance_playback(&ctx, 0.1);
        assert!(!app.is_playing);
        assert!(app.playback.is_none());
    }

    #[test]
    fn test_zoom_tween_requests_repaint() {
        let mut app = NavigatorApp::default();
        let theme = Theme::light();
        app.viewport.zoom_in(Pos2::new(400.0, 300.0));
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(1280.0, 800.0),
            )),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            app.draw_canvas(ctx, &theme, 0.016);
            assert!(ctx.has_requested_repaint());
        });
        assert!(app.viewport.animating());
    }
}
