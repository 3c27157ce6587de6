//! Main application
//!
//! Demo front-end: the d-pad overlay floating above a placeholder game
//! surface, a settings strip, and a live view of the shared digital word.

use eframe::egui;
use op_core::{new_shared_pad, OverlayConfig, SharedPadState};
use op_overlay::{DpadDirection, OverlayStore, TomlStore};
use std::sync::Arc;
use tracing::warn;

use crate::overlay::DpadOverlay;

/// Main application state
pub struct OverlayPadApp {
    /// Configuration
    config: OverlayConfig,
    /// Controller state shared with the (stub) emulation core
    pad: SharedPadState,
    /// The d-pad widget
    overlay: DpadOverlay,
}

impl OverlayPadApp {
    /// Create a new application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = OverlayConfig::load().unwrap_or_default();
        if let Err(err) = config.dpad.validate() {
            warn!("invalid d-pad bindings in config: {err}");
        }

        let store: Arc<dyn OverlayStore> = Arc::new(TomlStore::new());
        let overlay = DpadOverlay::new(&config, store);

        Self {
            config,
            pad: new_shared_pad(),
            overlay,
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut edit_mode = self.overlay.edit_mode();
            if ui.checkbox(&mut edit_mode, "Edit layout").changed() {
                self.overlay.set_edit_mode(edit_mode);
            }

            if ui
                .checkbox(&mut self.config.input.multitouch, "Multitouch")
                .changed()
            {
                self.overlay.set_multitouch(self.config.input.multitouch);
                if let Err(err) = self.config.save() {
                    warn!("failed to save config: {err}");
                }
            }

            ui.separator();

            let mut scale = self.overlay.region().scale_percent();
            if ui
                .add(egui::Slider::new(&mut scale, 10..=100).text("Scale %"))
                .changed()
            {
                self.overlay.region_mut().set_scale(scale);
            }

            let mut opacity = self.overlay.region().opacity_percent();
            if ui
                .add(egui::Slider::new(&mut opacity, 0..=100).text("Opacity %"))
                .changed()
            {
                self.overlay.region_mut().set_opacity(opacity);
            }

            if ui.button("Reset").clicked() {
                self.overlay.region_mut().reset_to_defaults();
            }
        });
    }

    fn show_pad_readout(&self, ui: &mut egui::Ui) {
        let digital = self.pad.lock().digital;
        ui.horizontal(|ui| {
            ui.monospace(format!("digital[0] = {:#06x}", digital[0]));
            for (direction, label) in [
                (DpadDirection::Up, "UP"),
                (DpadDirection::Left, "LEFT"),
                (DpadDirection::Right, "RIGHT"),
                (DpadDirection::Down, "DOWN"),
            ] {
                let color = if self.overlay.is_active(direction) {
                    egui::Color32::LIGHT_GREEN
                } else {
                    egui::Color32::DARK_GRAY
                };
                ui.colored_label(color, label);
            }
        });
    }
}

impl eframe::App for OverlayPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.show_controls(ui);
        });

        egui::TopBottomPanel::bottom("readout").show(ctx, |ui| {
            self.show_pad_readout(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::from_gray(20)))
            .show(ctx, |ui| {
                let events = ctx.input(|i| i.events.clone());
                for event in &events {
                    self.overlay.handle_event(event, &self.pad);
                }

                self.overlay.paint(ui.painter());
            });
    }
}

/// Launch the front-end window
pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "overlay-pad",
        options,
        Box::new(|cc| Ok(Box::new(OverlayPadApp::new(cc)))),
    )
}
