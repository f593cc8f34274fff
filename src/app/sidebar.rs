//! Learning-path sidebar: the learner's watch history as a clickable
//! list, kept in sync with playback highlighting.

use eframe::egui::{self, Align, Align2, FontId, Rounding, Sense, Stroke, vec2};

use learning_navigator::theme::{self, Theme};

use super::NavigatorApp;

impl NavigatorApp {
    pub fn draw_sidebar(&mut self, ctx: &egui::Context, theme: &Theme) {
        // Once nothing is active the next playback may scroll again.
        if self.active_step_id.is_none() {
            self.last_scrolled_step = None;
        }

        egui::SidePanel::right("history_sidebar")
            .exact_width(320.0)
            .resizable(false)
            .frame(egui::Frame::none().fill(theme.card_bg))
            .show(ctx, |ui| {
                ui.add_space(18.0);
                ui.horizontal(|ui| {
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Learning Path")
                            .size(14.0)
                            .strong()
                            .color(theme.text),
                    );
                    ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                        ui.add_space(12.0);
                        let close = ui.add(
                            egui::Button::new(
                                egui::RichText::new("\u{00D7}")
                                    .size(16.0)
                                    .color(theme.text_secondary),
                            )
                            .frame(false),
                        );
                        if close.clicked() {
                            self.show_history = false;
                        }
                    });
                });
                ui.add_space(14.0);
                let sep_y = ui.cursor().top();
                ui.painter()
                    .hline(ui.max_rect().x_range(), sep_y, Stroke::new(1.0, theme.border));
                ui.add_space(1.0);

                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(16.0);
                    for entry in &self.data.learner_history {
                        // Entries pointing at removed resources are not shown.
                        let Some((_, resource)) =
                            self.data.course.find_resource(entry.resource_id)
                        else {
                            continue;
                        };
                        let width = ui.available_width() - 32.0;
                        ui.horizontal(|ui| {
                            ui.add_space(16.0);
                            let (rect, response) =
                                ui.allocate_exact_size(vec2(width, 56.0), Sense::click());
                            let is_active = self.active_step_id == Some(entry.resource_id);
                            let (bg, border) = if is_active {
                                (theme.active_item_bg, theme.active_item_border)
                            } else if response.hovered() {
                                (theme.history_item_hover, theme.border)
                            } else {
                                (theme.history_item_bg, theme.border)
                            };

                            let painter = ui.painter();
                            painter.rect(rect, Rounding::same(6.0), bg, Stroke::new(1.0, border));
                            painter.circle_filled(
                                rect.min + vec2(20.0, 18.0),
                                4.0,
                                theme::resource_color(resource.kind),
                            );
                            let title_color = if is_active { theme.accent } else { theme.text };
                            painter.text(
                                rect.min + vec2(36.0, 12.0),
                                Align2::LEFT_TOP,
                                truncate(&resource.title, 32),
                                FontId::proportional(13.0),
                                title_color,
                            );
                            painter.text(
                                rect.min + vec2(36.0, 32.0),
                                Align2::LEFT_TOP,
                                format!("{} \u{00B7} {}", entry.duration_label(), entry.time_label()),
                                FontId::proportional(11.0),
                                theme.text_secondary,
                            );

                            if response.clicked() {
                                self.selected_resource = Some(entry.resource_id);
                            }
                            // Keep the playback's active step in view.
                            if is_active && self.last_scrolled_step != Some(entry.resource_id) {
                                response.scroll_to_me(Some(Align::Center));
                                self.last_scrolled_step = Some(entry.resource_id);
                            }
                        });
                        ui.add_space(8.0);
                    }
                });
            });
    }
}

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}
