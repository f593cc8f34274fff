//! Header strip: course title on the left, playback and view toggles
//! on the right.

use eframe::egui::{self, Align, Color32, Layout, Margin, Rounding, Stroke, vec2};

use learning_navigator::theme::Theme;

use super::NavigatorApp;

impl NavigatorApp {
    pub fn draw_header(&mut self, ctx: &egui::Context, theme: &Theme) {
        egui::TopBottomPanel::top("header")
            .exact_height(64.0)
            .frame(
                egui::Frame::none()
                    .fill(theme.header_bg)
                    .inner_margin(Margin::symmetric(24.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("\u{25CF}")
                            .size(20.0)
                            .color(theme.accent),
                    );
                    ui.add_space(4.0);
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(&self.data.course.name)
                                .size(16.0)
                                .strong()
                                .color(theme.text),
                        );
                        ui.label(
                            egui::RichText::new("Learning Navigator")
                                .size(12.0)
                                .color(theme.text_secondary),
                        );
                    });

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let dark_glyph = if self.dark_mode {
                            "\u{2600}"
                        } else {
                            "\u{263E}"
                        };
                        if icon_button(ui, dark_glyph, theme).clicked() {
                            self.dark_mode = !self.dark_mode;
                        }

                        separator(ui, theme);

                        if control_button(ui, "TAs", self.show_tas, theme).clicked() {
                            self.show_tas = !self.show_tas;
                        }
                        if control_button(ui, "Journey", self.show_journey, theme).clicked() {
                            self.show_journey = !self.show_journey;
                        }

                        separator(ui, theme);

                        let play_label = if self.is_playing {
                            "Playing..."
                        } else {
                            "\u{25B6} Play Journey"
                        };
                        if control_button(ui, play_label, self.is_playing, theme).clicked() {
                            self.toggle_play();
                        }
                    });
                });

                let full = ui.clip_rect();
                ui.painter()
                    .hline(full.x_range(), full.bottom() - 0.5, Stroke::new(1.0, theme.border));
            });
    }
}

fn control_button(
    ui: &mut egui::Ui,
    label: &str,
    active: bool,
    theme: &Theme,
) -> egui::Response {
    let (fill, text_color) = if active {
        (theme.accent, Color32::WHITE)
    } else {
        (Color32::TRANSPARENT, theme.text_secondary)
    };
    ui.add(
        egui::Button::new(egui::RichText::new(label).size(13.0).color(text_color))
            .fill(fill)
            .rounding(Rounding::same(6.0)),
    )
}

fn icon_button(ui: &mut egui::Ui, glyph: &str, theme: &Theme) -> egui::Response {
    ui.add(
        egui::Button::new(
            egui::RichText::new(glyph)
                .size(16.0)
                .color(theme.text_secondary),
        )
        .frame(false)
        .min_size(vec2(32.0, 32.0)),
    )
}

fn separator(ui: &mut egui::Ui, theme: &Theme) {
    let (rect, _) = ui.allocate_exact_size(vec2(1.0, 24.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, Rounding::ZERO, theme.border);
}
