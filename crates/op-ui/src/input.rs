//! Host event translation
//!
//! Folds egui pointer and touch events into the overlay engine's touch
//! event model: first-down vs additional-down, release vs last-release,
//! and a full pointer list snapshot per event. The primary mouse button
//! doubles as a single synthetic touch for desktop use.

use egui::TouchPhase;
use op_overlay::{PointerId, TouchAction, TouchEvent, TouchPoint};

/// Synthetic pointer id for the mouse cursor
const MOUSE_POINTER: PointerId = u64::MAX;

/// Stateful translator from host events to [`TouchEvent`]s
#[derive(Debug, Default)]
pub struct TouchTracker {
    pointers: Vec<TouchPoint>,
    mouse_down: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently held pointers
    pub fn active_pointers(&self) -> &[TouchPoint] {
        &self.pointers
    }

    /// Convert one egui event; `None` for events that are not touch input
    pub fn translate(&mut self, event: &egui::Event) -> Option<TouchEvent> {
        match event {
            egui::Event::Touch { id, phase, pos, .. } => self.track(id.0, *phase, pos.x, pos.y),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                let phase = if *pressed {
                    TouchPhase::Start
                } else {
                    TouchPhase::End
                };
                self.track(MOUSE_POINTER, phase, pos.x, pos.y)
            }
            egui::Event::PointerMoved(pos) if self.mouse_down => {
                self.track(MOUSE_POINTER, TouchPhase::Move, pos.x, pos.y)
            }
            _ => None,
        }
    }

    fn track(&mut self, id: PointerId, phase: TouchPhase, x: f32, y: f32) -> Option<TouchEvent> {
        if id == MOUSE_POINTER {
            self.mouse_down = matches!(phase, TouchPhase::Start | TouchPhase::Move);
        }

        match phase {
            TouchPhase::Start => {
                if self.index_of(id).is_some() {
                    // duplicate down for a pointer we already track
                    return None;
                }
                self.pointers.push(TouchPoint { id, x, y });
                let index = self.pointers.len() - 1;
                let action = if self.pointers.len() == 1 {
                    TouchAction::Down
                } else {
                    TouchAction::PointerDown
                };
                Some(TouchEvent::new(action, index, self.pointers.clone()))
            }
            TouchPhase::Move => {
                let index = self.index_of(id)?;
                self.pointers[index].x = x;
                self.pointers[index].y = y;
                Some(TouchEvent::new(TouchAction::Move, index, self.pointers.clone()))
            }
            TouchPhase::End => {
                let index = self.index_of(id)?;
                self.pointers[index].x = x;
                self.pointers[index].y = y;
                let action = if self.pointers.len() == 1 {
                    TouchAction::Up
                } else {
                    TouchAction::PointerUp
                };
                // the releasing pointer stays in the snapshot, then drops
                let event = TouchEvent::new(action, index, self.pointers.clone());
                self.pointers.remove(index);
                Some(event)
            }
            TouchPhase::Cancel => {
                let index = self.index_of(id).unwrap_or(0);
                let event = TouchEvent::new(TouchAction::Cancel, index, self.pointers.clone());
                self.pointers.clear();
                self.mouse_down = false;
                Some(event)
            }
        }
    }

    fn index_of(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }
}
