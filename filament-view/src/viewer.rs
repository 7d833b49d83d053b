//! Branching-line animation viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns an [`Engine`] driving
//! the animation and implements [`eframe::App`] to supply it with
//! frame timestamps and paint the resulting segments.

use eframe::App;
use filament_core::engine::Engine;
use glam::Vec2;
use log::info;

/// Background fill of the drawing surface.
const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x1A, 0x17, 0x1C);
/// Core stroke color of a line segment.
const STROKE: egui::Color32 = egui::Color32::from_rgb(0xDE, 0xB9, 0xF6);

/// Main application state for the animation viewer.
///
/// [`Viewer`] glues together:
/// - The animation core: an [`Engine`] with a thread-local random source.
/// - The drawable surface: the central panel rect, whose size is fed
///   back into the engine every frame.
/// - The frame driver: egui's repaint request, with `input.time` used
///   as the monotonically increasing timestamp.
/// - The visibility signal: the engine is stopped while the window is
///   minimized and restarted when it becomes visible again.
pub struct Viewer {
    engine: Engine<rand::rngs::ThreadRng>,
    /// Whether the current pause came from the visibility signal
    /// rather than the user, so only those pauses auto-resume.
    hidden_pause: bool,
}

impl Viewer {
    /// Creates a viewer with a started engine and no active lines.
    ///
    /// The engine size is a placeholder until the first frame reports
    /// the real panel size.
    pub fn new() -> Self {
        let mut engine = Engine::new(800.0, 600.0, rand::rng());
        engine.start();

        Self {
            engine,
            hidden_pause: false,
        }
    }

    /// Maps a point from surface pixel coordinates to screen-space.
    fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
    }

    /// Stops the engine while the window is minimized and restarts it
    /// on restore. A pause initiated by the user is left alone.
    fn handle_visibility(&mut self, ctx: &egui::Context) {
        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));

        if minimized && self.engine.is_running() {
            info!("surface hidden, animation stopped");
            self.engine.stop();
            self.hidden_pause = true;
        } else if !minimized && self.hidden_pause {
            info!("surface visible, animation started");
            self.engine.start();
            self.hidden_pause = false;
        }
    }

    /// Builds the top panel with the run/pause control and a line count.
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if self.engine.is_running() {
                    "⏸ Pause"
                } else {
                    "▶ Run"
                };
                if ui.button(label).clicked() {
                    if self.engine.is_running() {
                        info!("animation stopped");
                        self.engine.stop();
                    } else {
                        info!("animation started");
                        self.engine.start();
                    }
                    self.hidden_pause = false;
                }

                ui.separator();
                ui.label(format!("lines = {}", self.engine.lines.len()));
            });
        });
    }

    /// Builds the central panel: sizes the engine to the panel, ticks
    /// it with the current frame timestamp and paints every segment.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // The engine works directly in surface pixel coordinates.
            self.engine.width = rect.width();
            self.engine.height = rect.height();

            painter.rect_filled(rect, egui::CornerRadius::ZERO, BACKGROUND);

            let now_ms = ctx.input(|i| i.time) * 1000.0;
            self.engine.tick(now_ms);

            let glow = egui::Color32::from_rgba_unmultiplied(0xDE, 0xB9, 0xF6, 48);
            for line in &self.engine.lines {
                let a = Self::to_screen(line.start, rect);
                let b = Self::to_screen(line.head, rect);

                // Wide translucent pass underneath a 1 px core stroke,
                // standing in for the original soft shadow glow.
                painter.line_segment([a, b], egui::Stroke::new(4.0, glow));
                painter.line_segment([a, b], egui::Stroke::new(1.0, STROKE));
            }

            if self.engine.is_running() {
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that handles visibility and builds all panels
    /// for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_visibility(ctx);
        self.ui_top_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewer_starts_running_with_no_lines() {
        let viewer = Viewer::new();
        assert!(viewer.engine.is_running());
        assert!(viewer.engine.lines.is_empty());
        assert!(!viewer.hidden_pause);
    }

    #[test]
    fn to_screen_offsets_by_rect_origin() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 600.0));
        let p = Viewer::to_screen(Vec2::new(5.0, 7.0), rect);
        assert_eq!(p, egui::pos2(15.0, 27.0));
    }
}
