//! D-pad overlay widget
//!
//! Owns the region/recognizer pair and bridges them to egui: event
//! dispatch, glyph painting, and edit-mode dragging.

use crate::input::TouchTracker;
use egui::{Color32, Pos2, Shape, Stroke};
use op_core::{OverlayConfig, SharedPadState};
use op_overlay::{
    glyph_rects, DpadDirection, DpadRecognizer, OverlayRegion, OverlayStore, Rect, TouchAction,
    TouchEvent,
};
use std::sync::Arc;

/// Store key of the d-pad widget
const WIDGET_ID: &str = "dpad";

/// Glyph artwork size in overlay pixels
const BUTTON_WIDTH: i32 = 96;
const BUTTON_HEIGHT: i32 = 96;

/// On-screen d-pad widget
pub struct DpadOverlay {
    region: OverlayRegion,
    dpad: DpadRecognizer,
    tracker: TouchTracker,
    edit_mode: bool,
}

impl DpadOverlay {
    pub fn new(config: &OverlayConfig, store: Arc<dyn OverlayStore>) -> Self {
        Self {
            region: OverlayRegion::new(WIDGET_ID, BUTTON_WIDTH, BUTTON_HEIGHT, store),
            dpad: DpadRecognizer::new(config.dpad.clone(), config.input.multitouch),
            tracker: TouchTracker::new(),
            edit_mode: false,
        }
    }

    pub fn region(&self) -> &OverlayRegion {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut OverlayRegion {
        &mut self.region
    }

    pub fn is_active(&self, direction: DpadDirection) -> bool {
        self.dpad.is_active(direction)
    }

    pub fn set_multitouch(&mut self, multitouch: bool) {
        self.dpad.set_multitouch(multitouch);
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// In edit mode touches reposition the widget instead of pressing it
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
        if !edit_mode {
            self.region.stop_drag();
        }
    }

    /// Feed one host event through the tracker into the recognizer (or the
    /// drag handler while in edit mode)
    pub fn handle_event(&mut self, event: &egui::Event, pad: &SharedPadState) {
        let Some(touch) = self.tracker.translate(event) else {
            return;
        };

        if self.edit_mode {
            self.handle_drag(&touch);
        } else {
            self.dpad.on_touch(&touch, &self.region, pad);
        }
    }

    fn handle_drag(&mut self, touch: &TouchEvent) {
        match touch.action {
            TouchAction::Down => {
                if let Some(p) = touch.trigger() {
                    if self.region.contains(p.x as i32, p.y as i32) {
                        self.region.start_drag(p.x as i32, p.y as i32);
                    }
                }
            }
            TouchAction::Move => {
                if let Some(p) = touch.trigger() {
                    self.region.update_position(p.x as i32, p.y as i32, false);
                }
            }
            TouchAction::Up | TouchAction::PointerUp | TouchAction::Cancel => {
                self.region.stop_drag();
            }
            TouchAction::PointerDown => {}
        }
    }

    /// Draw the four glyphs; pressed directions are fully opaque
    pub fn paint(&self, painter: &egui::Painter) {
        let rects = glyph_rects(
            self.region.bounds(),
            self.region.button_width(),
            self.region.button_height(),
        );

        self.paint_glyph(painter, DpadDirection::Up, rects.up);
        self.paint_glyph(painter, DpadDirection::Left, rects.left);
        self.paint_glyph(painter, DpadDirection::Right, rects.right);
        self.paint_glyph(painter, DpadDirection::Down, rects.down);

        if self.edit_mode {
            painter.rect_stroke(
                to_egui(self.region.bounds()),
                2.0,
                Stroke::new(1.0, Color32::LIGHT_BLUE),
            );
        }
    }

    fn paint_glyph(&self, painter: &egui::Painter, direction: DpadDirection, rect: Rect) {
        let alpha = if self.is_active(direction) {
            255
        } else {
            self.region.idle_alpha()
        };
        let color = Color32::from_rgba_unmultiplied(230, 230, 230, alpha);
        painter.add(Shape::convex_polygon(
            arrow_points(direction, to_egui(rect)),
            color,
            Stroke::NONE,
        ));
    }
}

fn to_egui(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.left as f32, rect.top as f32),
        egui::pos2(rect.right as f32, rect.bottom as f32),
    )
}

/// Triangle pointing out of the pad center
fn arrow_points(direction: DpadDirection, rect: egui::Rect) -> Vec<Pos2> {
    match direction {
        DpadDirection::Up => vec![
            egui::pos2(rect.center().x, rect.top()),
            egui::pos2(rect.right(), rect.bottom()),
            egui::pos2(rect.left(), rect.bottom()),
        ],
        DpadDirection::Down => vec![
            egui::pos2(rect.center().x, rect.bottom()),
            egui::pos2(rect.left(), rect.top()),
            egui::pos2(rect.right(), rect.top()),
        ],
        DpadDirection::Left => vec![
            egui::pos2(rect.left(), rect.center().y),
            egui::pos2(rect.right(), rect.top()),
            egui::pos2(rect.right(), rect.bottom()),
        ],
        DpadDirection::Right => vec![
            egui::pos2(rect.right(), rect.center().y),
            egui::pos2(rect.left(), rect.bottom()),
            egui::pos2(rect.left(), rect.top()),
        ],
    }
}
