//! Floating chrome above the canvas: hover tooltip, resource detail
//! modal, zoom controls, and the sidebar reopen button.

use eframe::egui::{
    self, Align, Align2, Color32, FontId, Layout, Margin, Pos2, Rounding, Sense, Shadow, Stroke,
    vec2,
};
use log::info;

use learning_navigator::scene::Hit;
use learning_navigator::theme::{self, Theme};

use super::NavigatorApp;

impl NavigatorApp {
    pub fn draw_overlays(&mut self, ctx: &egui::Context, theme: &Theme) {
        self.draw_zoom_controls(ctx, theme);
        self.draw_reopen_button(ctx, theme);
        self.draw_tooltip(ctx, theme);
        self.draw_modal(ctx, theme);
    }

    // ─── Tooltip ──────────────────────────────────────────────────────────────

    fn draw_tooltip(&mut self, ctx: &egui::Context, theme: &Theme) {
        let (Some(hit), Some(pos)) = (self.hovered, self.tooltip_pos) else {
            return;
        };
        egui::Area::new(egui::Id::new("marker_tooltip"))
            .order(egui::Order::Tooltip)
            .interactable(false)
            .fixed_pos(pos + vec2(15.0, 15.0))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(theme.tooltip_bg)
                    .rounding(Rounding::same(8.0))
                    .stroke(Stroke::new(1.0, theme.border))
                    .inner_margin(Margin::same(16.0))
                    .shadow(Shadow {
                        offset: vec2(0.0, 4.0),
                        blur: 16.0,
                        spread: 0.0,
                        color: theme.shadow,
                    })
                    .show(ui, |ui| {
                        ui.set_max_width(248.0);
                        match hit {
                            Hit::Resource(id) => self.tooltip_resource(ui, theme, id),
                            Hit::Ta(id) => self.tooltip_ta(ui, theme, id),
                        }
                    });
            });
    }

    fn tooltip_resource(&self, ui: &mut egui::Ui, theme: &Theme, id: u32) {
        let Some((_, resource)) = self.data.course.find_resource(id) else {
            return;
        };
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("\u{25CF}")
                    .size(10.0)
                    .color(theme::resource_color(resource.kind)),
            );
            ui.label(
                egui::RichText::new(resource.kind.label().to_uppercase())
                    .size(10.0)
                    .strong()
                    .color(theme.text_secondary),
            );
        });
        ui.add_space(4.0);
        ui.label(egui::RichText::new(&resource.title).strong().color(theme.text));
        ui.add_space(2.0);
        ui.label(
            egui::RichText::new(&resource.metadata)
                .size(12.0)
                .color(theme.text_secondary),
        );
    }

    fn tooltip_ta(&self, ui: &mut egui::Ui, theme: &Theme, id: u32) {
        let Some(ta) = self
            .data
            .course
            .teaching_assistants
            .iter()
            .find(|t| t.id == id)
        else {
            return;
        };
        ui.label(
            egui::RichText::new("TEACHING ASSISTANT")
                .size(10.0)
                .strong()
                .color(theme::TA_COLOR),
        );
        ui.add_space(4.0);
        ui.label(egui::RichText::new(&ta.name).strong().color(theme.text));
        ui.add_space(2.0);
        ui.label(
            egui::RichText::new(&ta.expertise)
                .size(12.0)
                .color(theme.text_secondary),
        );
    }

    // ─── Resource detail modal ────────────────────────────────────────────────

    fn draw_modal(&mut self, ctx: &egui::Context, theme: &Theme) {
        let Some(id) = self.selected_resource else {
            return;
        };
        let Some((_, resource)) = self.data.course.find_resource(id) else {
            self.selected_resource = None;
            return;
        };

        // Dim layer; clicking anywhere on it closes the modal.
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("modal_dim"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(screen, Sense::click());
                ui.painter().rect_filled(
                    screen,
                    Rounding::ZERO,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 128),
                );
                if response.clicked() {
                    self.selected_resource = None;
                }
            });

        let kind_color = theme::resource_color(resource.kind);
        egui::Area::new(egui::Id::new("resource_modal"))
            .order(egui::Order::Tooltip)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(theme.modal_bg)
                    .rounding(Rounding::same(12.0))
                    .stroke(Stroke::new(1.0, theme.border))
                    .inner_margin(Margin::same(32.0))
                    .shadow(Shadow {
                        offset: vec2(0.0, 8.0),
                        blur: 32.0,
                        spread: 0.0,
                        color: theme.shadow,
                    })
                    .show(ui, |ui| {
                        ui.set_width(416.0);

                        ui.horizontal(|ui| {
                            egui::Frame::none()
                                .fill(theme::with_alpha(kind_color, 21))
                                .rounding(Rounding::same(4.0))
                                .inner_margin(Margin::symmetric(8.0, 4.0))
                                .show(ui, |ui| {
                                    ui.label(
                                        egui::RichText::new(
                                            resource.kind.label().to_uppercase(),
                                        )
                                        .size(11.0)
                                        .strong()
                                        .color(kind_color),
                                    );
                                });
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                let close = ui.add(
                                    egui::Button::new(
                                        egui::RichText::new("\u{00D7}")
                                            .size(18.0)
                                            .color(theme.text_secondary),
                                    )
                                    .frame(false),
                                );
                                if close.clicked() {
                                    self.selected_resource = None;
                                }
                            });
                        });

                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new(&resource.title)
                                .size(20.0)
                                .strong()
                                .color(theme.text),
                        );
                        ui.add_space(20.0);

                        ui.columns(2, |cols| {
                            detail_box(&mut cols[0], "Format", &resource.metadata, theme);
                            detail_box(
                                &mut cols[1],
                                "Location",
                                &format!("Coordinates: {}, {}", resource.x, resource.y),
                                theme,
                            );
                        });

                        ui.add_space(24.0);
                        ui.columns(2, |cols| {
                            let start = cols[0].add_sized(
                                [cols[0].available_width(), 36.0],
                                egui::Button::new(
                                    egui::RichText::new("Start Activity")
                                        .size(13.0)
                                        .strong()
                                        .color(Color32::WHITE),
                                )
                                .fill(theme.accent)
                                .rounding(Rounding::same(6.0)),
                            );
                            if start.clicked() {
                                info!("starting activity for resource {id}");
                                self.selected_resource = None;
                            }
                            let cancel = cols[1].add_sized(
                                [cols[1].available_width(), 36.0],
                                egui::Button::new(
                                    egui::RichText::new("Cancel")
                                        .size(13.0)
                                        .color(theme.text),
                                )
                                .fill(Color32::TRANSPARENT)
                                .stroke(Stroke::new(1.0, theme.border))
                                .rounding(Rounding::same(6.0)),
                            );
                            if cancel.clicked() {
                                self.selected_resource = None;
                            }
                        });
                    });
            });
    }

    // ─── Zoom controls ────────────────────────────────────────────────────────

    fn draw_zoom_controls(&mut self, ctx: &egui::Context, theme: &Theme) {
        let Some(canvas) = self.canvas_rect else {
            return;
        };
        // Zoom buttons anchor on the canvas centre, in container coordinates.
        let center = Pos2::new(canvas.width() / 2.0, canvas.height() / 2.0);
        egui::Area::new(egui::Id::new("zoom_controls"))
            .order(egui::Order::Middle)
            .pivot(Align2::RIGHT_BOTTOM)
            .fixed_pos(canvas.max - vec2(32.0, 32.0))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(theme.card_bg)
                    .rounding(Rounding::same(8.0))
                    .stroke(Stroke::new(1.0, theme.border))
                    .inner_margin(Margin::same(8.0))
                    .shadow(Shadow {
                        offset: vec2(0.0, 2.0),
                        blur: 8.0,
                        spread: 0.0,
                        color: theme.shadow,
                    })
                    .show(ui, |ui| {
                        if zoom_button(ui, "+", theme).clicked() {
                            self.viewport.zoom_in(center);
                        }
                        if zoom_button(ui, "\u{2212}", theme).clicked() {
                            self.viewport.zoom_out(center);
                        }
                        let (rect, _) = ui.allocate_exact_size(vec2(32.0, 1.0), Sense::hover());
                        ui.painter().rect_filled(rect, Rounding::ZERO, theme.border);
                        if zoom_button(ui, "1:1", theme).clicked() {
                            self.viewport.reset();
                        }
                    });
            });
    }

    // ─── Sidebar reopen ───────────────────────────────────────────────────────

    fn draw_reopen_button(&mut self, ctx: &egui::Context, theme: &Theme) {
        if self.show_history {
            return;
        }
        let Some(canvas) = self.canvas_rect else {
            return;
        };
        egui::Area::new(egui::Id::new("sidebar_reopen"))
            .order(egui::Order::Middle)
            .pivot(Align2::RIGHT_TOP)
            .fixed_pos(Pos2::new(canvas.right(), canvas.top() + 24.0))
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(theme.card_bg)
                    .stroke(Stroke::new(1.0, theme.border))
                    .rounding(Rounding {
                        nw: 8.0,
                        ne: 0.0,
                        sw: 8.0,
                        se: 0.0,
                    })
                    .inner_margin(Margin::symmetric(12.0, 8.0))
                    .show(ui, |ui| {
                        let open = ui.add(
                            egui::Button::new(
                                egui::RichText::new("\u{25C0} Path")
                                    .size(13.0)
                                    .color(theme.text_secondary),
                            )
                            .frame(false),
                        );
                        if open.clicked() {
                            self.show_history = true;
                        }
                    });
            });
    }
}

// ─── Widget helpers ───────────────────────────────────────────────────────────

fn detail_box(ui: &mut egui::Ui, label: &str, value: &str, theme: &Theme) {
    egui::Frame::none()
        .fill(theme.bg)
        .rounding(Rounding::same(8.0))
        .inner_margin(Margin::same(16.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(label)
                    .size(11.0)
                    .color(theme.text_secondary),
            );
            ui.add_space(2.0);
            ui.label(
                egui::RichText::new(value)
                    .font(FontId::proportional(13.0))
                    .color(theme.text),
            );
        });
}

fn zoom_button(ui: &mut egui::Ui, label: &str, theme: &Theme) -> egui::Response {
    ui.add(
        egui::Button::new(
            egui::RichText::new(label)
                .size(14.0)
                .color(theme.text_secondary),
        )
        .frame(false)
        .min_size(vec2(32.0, 28.0)),
    )
}
