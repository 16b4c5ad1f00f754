use egui::{
    pos2, vec2, Align, Align2, Color32, CornerRadius, FontId, Key, Layout, Rect, RichText,
    Stroke, StrokeKind,
};
use egui_glow::Painter;
use glow::HasContext;

use crate::session::ViewerSession;
use crate::sheet::{SheetParams, GRID_SIZE_MAX, GRID_SIZE_MIN, MARGIN_MAX, MARGIN_MIN};
use crate::viewport::{max_scroll, Viewport};

/// Fixed layout of the sprite grid: every sprite is drawn at the same
/// display size regardless of its source cell size, with its name
/// underneath.
struct GridLayout {
    display_size: f32,
    padding: f32,
    label_height: f32,
    start_x: f32,
    start_y: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            display_size: 32.0,
            padding: 10.0,
            label_height: 20.0,
            start_x: 50.0,
            start_y: 40.0,
        }
    }
}

pub struct Gui {
    layout: GridLayout,
    show_settings: bool,
}

impl Gui {
    pub fn new() -> Self {
        Self {
            layout: GridLayout::default(),
            show_settings: false,
        }
    }

    pub fn clear(&self, gl: &glow::Context) {
        unsafe {
            gl.clear_color(0.96, 0.96, 0.96, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    pub fn update(
        &mut self,
        raw_input: egui::RawInput,
        ctx: &egui::Context,
        gl: &glow::Context,
        painter: &mut Painter,
        session: &mut ViewerSession,
    ) -> egui::FullOutput {
        // Runs any load scheduled last frame (file picked, parameter
        // edited, or the startup file) while the painter is in hand.
        session.maybe_reload(gl, painter);

        ctx.run(raw_input, |ctx| {
            self.handle_shortcuts(ctx, session);

            egui::TopBottomPanel::top("header").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Sprite Sheet Viewer");

                    if !session.status.is_empty() {
                        ui.label(
                            RichText::new(&session.status)
                                .color(Color32::DARK_GRAY)
                                .small(),
                        );
                    }

                    ui.allocate_ui_with_layout(
                        ui.available_size(),
                        Layout::right_to_left(Align::Center),
                        |ui| {
                            if ui.button("Open File").clicked() {
                                Self::open_file_dialog(session);
                            }
                            if ui.button("Settings").clicked() {
                                self.show_settings = !self.show_settings;
                            }
                        },
                    );
                });
            });

            egui::CentralPanel::default().show(ctx, |ui| {
                self.sprite_grid(ui, session);
            });

            if self.show_settings {
                Self::settings_window(ctx, session);
            }
        })
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context, session: &mut ViewerSession) {
        let open = ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, Key::O));
        if open {
            Self::open_file_dialog(session);
        }
        if self.show_settings && ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.show_settings = false;
        }
    }

    fn open_file_dialog(session: &mut ViewerSession) {
        let picked = rfd::FileDialog::new()
            .set_title("Choose a sprite sheet")
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file();

        // Cancelling the dialog is a no-op, not an error.
        if let Some(path) = picked {
            session.request_open(path);
        }
    }

    fn settings_window(ctx: &egui::Context, session: &mut ViewerSession) {
        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_TOP, vec2(0.0, 10.0))
            .show(ctx, |ui| {
                let mut params = session.params;

                ui.horizontal(|ui| {
                    ui.label("Margin");
                    ui.add(
                        egui::DragValue::new(&mut params.margin)
                            .range(MARGIN_MIN..=MARGIN_MAX)
                            .speed(0.1),
                    );

                    ui.add_space(20.0);

                    ui.label("Grid Size");
                    ui.add(
                        egui::DragValue::new(&mut params.grid_size)
                            .range(GRID_SIZE_MIN..=GRID_SIZE_MAX)
                            .speed(0.1),
                    );
                });

                ui.small("Drag or type a value; the sheet reslices immediately");

                // A changed value schedules a reslice on the next frame.
                session.set_params(SheetParams::new(params.margin, params.grid_size));
            });
    }

    fn sprite_grid(&mut self, ui: &mut egui::Ui, session: &mut ViewerSession) {
        let rect = ui.max_rect();
        let view = Viewport::new(rect.min.x, rect.min.y, rect.width(), rect.height());

        if let Some(err) = &session.load_error {
            ui.painter().text(
                pos2(view.x + self.layout.start_x, view.y + 10.0),
                Align2::LEFT_TOP,
                err,
                FontId::proportional(16.0),
                Color32::RED,
            );
            // The previously loaded sheet, if any, stays visible below.
        }

        let Some(loaded) = &session.loaded else {
            if session.load_error.is_none() {
                ui.painter().text(
                    pos2(view.x + self.layout.start_x, view.y + 10.0),
                    Align2::LEFT_TOP,
                    "No sprite sheet loaded. Press 'Open File' (Ctrl+O) to select one.",
                    FontId::proportional(16.0),
                    Color32::GRAY,
                );
            }
            return;
        };

        let layout = &self.layout;
        let col_stride = layout.display_size + layout.padding;
        let row_stride = col_stride + layout.label_height;

        let usable_width = (view.width - 2.0 * layout.start_x).max(col_stride);
        let per_row = (usable_width / col_stride).floor().max(1.0) as usize;
        let total_rows = session.sprite_names.len().div_ceil(per_row);
        let content_height = layout.start_y + total_rows as f32 * row_stride;

        let wheel = ui.input(|i| i.raw_scroll_delta.y);
        if wheel != 0.0 {
            session.scroll.scroll_by(-wheel);
        }
        session.scroll.clamp_to(content_height, view.height);

        let painter = ui.painter();
        let sheet_w = loaded.texture.width as f32;
        let sheet_h = loaded.texture.height as f32;

        for (i, name) in session.sprite_names.iter().enumerate() {
            let col = i % per_row;
            let row = i / per_row;
            let x = view.x + layout.start_x + col as f32 * col_stride;
            let y = view.y + layout.start_y + row as f32 * row_stride - session.scroll.offset;

            // Cull sprites outside the viewport.
            if y + layout.display_size < view.y || y > view.bottom() {
                continue;
            }

            let Some(sprite) = loaded.sheet.sprites.get(name) else {
                continue;
            };

            let uv = Rect::from_min_max(
                pos2(sprite.x as f32 / sheet_w, sprite.y as f32 / sheet_h),
                pos2(
                    (sprite.x + sprite.width) as f32 / sheet_w,
                    (sprite.y + sprite.height) as f32 / sheet_h,
                ),
            );
            let dest = Rect::from_min_size(
                pos2(x, y),
                vec2(layout.display_size, layout.display_size),
            );

            painter.image(loaded.tex_id, dest, uv, Color32::WHITE);
            painter.rect_stroke(
                dest,
                CornerRadius::ZERO,
                Stroke::new(1.0, Color32::GRAY),
                StrokeKind::Outside,
            );
            painter.text(
                pos2(x, y + layout.display_size + 2.0),
                Align2::LEFT_TOP,
                name,
                FontId::monospace(10.0),
                Color32::DARK_GRAY,
            );
        }

        self.scroll_indicators(painter, &view, session.scroll.offset, content_height);
    }

    /// Small arrows at the right edge showing that more content exists
    /// above or below the current scroll position.
    fn scroll_indicators(
        &self,
        painter: &egui::Painter,
        view: &Viewport,
        offset: f32,
        content_height: f32,
    ) {
        let limit = max_scroll(content_height, view.height);
        if limit <= 0.0 {
            return;
        }

        let x = view.x + view.width - 20.0;

        if offset > 0.0 {
            painter.add(egui::Shape::convex_polygon(
                vec![
                    pos2(x, view.y + 10.0),
                    pos2(x + 8.0, view.y + 20.0),
                    pos2(x - 8.0, view.y + 20.0),
                ],
                Color32::GRAY,
                Stroke::NONE,
            ));
        }

        if offset < limit {
            painter.add(egui::Shape::convex_polygon(
                vec![
                    pos2(x, view.bottom() - 10.0),
                    pos2(x - 8.0, view.bottom() - 20.0),
                    pos2(x + 8.0, view.bottom() - 20.0),
                ],
                Color32::GRAY,
                Stroke::NONE,
            ));
        }
    }
}
