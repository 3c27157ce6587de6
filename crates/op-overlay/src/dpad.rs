//! Virtual d-pad touch recognizer
//!
//! Consumes raw touch events against an [`OverlayRegion`] and derives the
//! pressed-direction bitmask, written into the shared controller state.
//! Two independent tracking slots allow a second finger to roll onto the
//! pad without disturbing the first.

use crate::region::OverlayRegion;
use crate::touch::{PointerId, TouchAction, TouchEvent};
use bitflags::bitflags;
use op_core::{DpadBindings, SharedPadState};

/// Number of independent touch tracking slots
pub const SLOT_COUNT: usize = 2;

/// Fraction of the region width that forms the edge activation band
const EDGE_DIVISOR: f32 = 3.5;

bitflags! {
    /// Per-slot direction tracking bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DpadButtons: u8 {
        const UP    = 1 << 0;
        const LEFT  = 1 << 1;
        const RIGHT = 1 << 2;
        const DOWN  = 1 << 3;
    }
}

/// One of the four d-pad directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpadDirection {
    Up,
    Left,
    Right,
    Down,
}

impl DpadDirection {
    /// All four directions in rendering order
    pub const ALL: [DpadDirection; 4] = [
        DpadDirection::Up,
        DpadDirection::Left,
        DpadDirection::Right,
        DpadDirection::Down,
    ];

    /// Tracking bit for this direction
    pub fn bit(self) -> DpadButtons {
        match self {
            DpadDirection::Up => DpadButtons::UP,
            DpadDirection::Left => DpadButtons::LEFT,
            DpadDirection::Right => DpadButtons::RIGHT,
            DpadDirection::Down => DpadButtons::DOWN,
        }
    }
}

/// One touch tracking slot
///
/// A slot is either unlocked (empty mask) or locked to the pointer id that
/// first claimed it; the lock holds until that pointer is released or the
/// gesture is cancelled.
#[derive(Debug, Clone, Copy, Default)]
struct TouchSlot {
    locked: Option<PointerId>,
    active: DpadButtons,
    digital: u32,
}

impl TouchSlot {
    fn release(&mut self) {
        *self = Self::default();
    }
}

/// Stateful d-pad input recognizer
pub struct DpadRecognizer {
    bindings: DpadBindings,
    multitouch: bool,
    slots: [TouchSlot; SLOT_COUNT],
}

impl DpadRecognizer {
    pub fn new(bindings: DpadBindings, multitouch: bool) -> Self {
        Self {
            bindings,
            multitouch,
            slots: [TouchSlot::default(); SLOT_COUNT],
        }
    }

    /// Enable or disable the second tracking slot
    ///
    /// Disabling does not release an already-locked slot 1; its owning
    /// pointer's release or a cancel will clear it as usual.
    pub fn set_multitouch(&mut self, multitouch: bool) {
        self.multitouch = multitouch;
    }

    pub fn multitouch(&self) -> bool {
        self.multitouch
    }

    /// Mask of every emulated button bit owned by this recognizer
    pub fn owned_mask(&self) -> u32 {
        self.bindings.mask()
    }

    /// True if any slot currently asserts the direction
    pub fn is_active(&self, direction: DpadDirection) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.active.contains(direction.bit()))
    }

    /// Process one touch event and refresh the shared digital state
    ///
    /// Returns true if a slot changed state, or if the triggering pointer
    /// landed within the region bounds, so the caller can attribute the
    /// touch to this widget.
    pub fn on_touch(
        &mut self,
        event: &TouchEvent,
        region: &OverlayRegion,
        pad: &SharedPadState,
    ) -> bool {
        let hit = if event.action == TouchAction::Cancel {
            self.cancel_all()
        } else {
            self.process_slots(event, region)
        };

        self.write_shared(pad);

        hit || event
            .trigger()
            .is_some_and(|p| region.contains(p.x as i32, p.y as i32))
    }

    /// Cancel unconditionally clears and unlocks every slot
    fn cancel_all(&mut self) -> bool {
        let mut hit = false;
        for slot in &mut self.slots {
            if slot.locked.is_some() {
                hit = true;
            }
            slot.release();
        }
        hit
    }

    /// Run the slot protocol; the first slot to claim the event wins
    fn process_slots(&mut self, event: &TouchEvent, region: &OverlayRegion) -> bool {
        let slot_limit = if self.multitouch { SLOT_COUNT } else { 1 };

        for slot_index in 0..slot_limit {
            let locked = self.slots[slot_index].locked;
            let mut active_index = event.pointer_index;

            if event.action == TouchAction::Move {
                // A move never acquires a lock; re-resolve which pointer
                // index the slot's owner currently occupies.
                let Some(id) = locked else {
                    continue;
                };
                match event.index_of(id) {
                    Some(index) => active_index = index,
                    // stale lock: the owner vanished without a release
                    None => continue,
                }
            }

            match event.action {
                TouchAction::Down | TouchAction::PointerDown | TouchAction::Move => {
                    if event.action != TouchAction::Move {
                        let Some(trigger_id) = event.pointer_id(event.pointer_index) else {
                            continue;
                        };
                        match locked {
                            None => self.slots[slot_index].locked = Some(trigger_id),
                            // owned by another concurrent touch
                            Some(id) if id != trigger_id => continue,
                            Some(_) => {}
                        }
                    }

                    let Some(point) = event.point(active_index) else {
                        continue;
                    };

                    let (active, digital) = self.hit_test(point.x, point.y, region);
                    let slot = &mut self.slots[slot_index];
                    slot.active = active;
                    slot.digital = digital;
                    return true;
                }
                TouchAction::Up | TouchAction::PointerUp => {
                    if locked.is_some() && event.pointer_id(event.pointer_index) == locked {
                        self.slots[slot_index].release();
                        return true;
                    }
                }
                // handled before the per-slot pass
                TouchAction::Cancel => {}
            }
        }

        false
    }

    /// Map a touch position to the directions it presses
    ///
    /// `right` is only considered when `left` missed, and `down` only when
    /// `up` missed: corners produce diagonal pairs such as UP|LEFT, while
    /// LEFT|RIGHT and UP|DOWN cannot occur.
    fn hit_test(&self, x: f32, y: f32, region: &OverlayRegion) -> (DpadButtons, u32) {
        let bounds = region.bounds();
        let threshold = bounds.width() as f32 / EDGE_DIVISOR;

        let left = x - (bounds.left as f32) < threshold;
        let right = !left && (bounds.right as f32) - x < threshold;
        let up = y - (bounds.top as f32) < threshold;
        let down = !up && (bounds.bottom as f32) - y < threshold;

        let mut active = DpadButtons::empty();
        let mut digital = 0u32;

        if up {
            active |= DpadButtons::UP;
            digital |= self.bindings.up_bit;
        }
        if left {
            active |= DpadButtons::LEFT;
            digital |= self.bindings.left_bit;
        }
        if right {
            active |= DpadButtons::RIGHT;
            digital |= self.bindings.right_bit;
        }
        if down {
            active |= DpadButtons::DOWN;
            digital |= self.bindings.down_bit;
        }

        (active, digital)
    }

    /// Clear-then-OR the owned bits into the shared digital word
    fn write_shared(&self, pad: &SharedPadState) {
        let mut state = pad.lock();
        let Some(word) = state.digital.get_mut(self.bindings.digital_index) else {
            return;
        };
        *word = (*word & !self.bindings.mask()) | self.slots[0].digital | self.slots[1].digital;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::touch::TouchPoint;
    use op_core::{new_shared_pad, PadButtons};
    use std::sync::Arc;

    // default region: bounds (100,100)-(250,250), threshold 150/3.5 ≈ 42.86
    fn make_region() -> OverlayRegion {
        OverlayRegion::new("dpad", 64, 64, Arc::new(MemoryStore::new()))
    }

    fn make_recognizer() -> DpadRecognizer {
        DpadRecognizer::new(DpadBindings::default(), true)
    }

    fn ev(action: TouchAction, index: usize, points: &[(PointerId, f32, f32)]) -> TouchEvent {
        TouchEvent::new(
            action,
            index,
            points
                .iter()
                .map(|&(id, x, y)| TouchPoint { id, x, y })
                .collect(),
        )
    }

    fn digital(pad: &SharedPadState) -> u32 {
        pad.lock().digital[0]
    }

    #[test]
    fn test_center_touch_presses_nothing() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        let hit = dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 175.0)]), &region, &pad);
        assert!(hit, "touch inside bounds is claimed");
        assert_eq!(digital(&pad), 0);
        assert!(!dpad.is_active(DpadDirection::Up));
    }

    #[test]
    fn test_top_edge_presses_up_only() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        assert_eq!(digital(&pad), PadButtons::DPAD_UP.bits());
        assert!(dpad.is_active(DpadDirection::Up));
        assert!(!dpad.is_active(DpadDirection::Left));
    }

    #[test]
    fn test_corner_presses_diagonal_pair() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 110.0, 110.0)]), &region, &pad);
        assert_eq!(
            digital(&pad),
            (PadButtons::DPAD_UP | PadButtons::DPAD_LEFT).bits()
        );
    }

    #[test]
    fn test_left_wins_over_right() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        // sweep the full width: left and right must never co-activate
        for x in 100..250 {
            dpad.on_touch(
                &ev(TouchAction::Down, 0, &[(1, x as f32, 175.0)]),
                &region,
                &pad,
            );
            let mask = digital(&pad);
            let left_and_right = PadButtons::DPAD_LEFT | PadButtons::DPAD_RIGHT;
            assert_ne!(
                mask & left_and_right.bits(),
                left_and_right.bits(),
                "left and right both active at x={x}"
            );
            dpad.on_touch(&ev(TouchAction::Up, 0, &[(1, x as f32, 175.0)]), &region, &pad);
        }
    }

    #[test]
    fn test_move_retargets_locked_slot() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        assert_eq!(digital(&pad), PadButtons::DPAD_UP.bits());

        // same pointer slides from the top edge to the left edge
        dpad.on_touch(&ev(TouchAction::Move, 0, &[(1, 110.0, 175.0)]), &region, &pad);
        assert_eq!(digital(&pad), PadButtons::DPAD_LEFT.bits());
        assert!(!dpad.is_active(DpadDirection::Up));
    }

    #[test]
    fn test_move_with_unknown_pointer_changes_nothing() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        let before = digital(&pad);

        // pointer 9 was never locked; slot 0's owner (1) is absent from
        // the event, so the lock is stale for this event and skipped
        let hit = dpad.on_touch(&ev(TouchAction::Move, 0, &[(9, 110.0, 175.0)]), &region, &pad);
        assert_eq!(digital(&pad), before);
        assert!(hit, "move inside the bounds is still attributed to the widget");
    }

    #[test]
    fn test_two_touches_or_their_masks() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        dpad.on_touch(
            &ev(
                TouchAction::PointerDown,
                1,
                &[(1, 175.0, 110.0), (2, 110.0, 175.0)],
            ),
            &region,
            &pad,
        );
        assert_eq!(
            digital(&pad),
            (PadButtons::DPAD_UP | PadButtons::DPAD_LEFT).bits()
        );

        // releasing the first leaves the second slot untouched
        dpad.on_touch(
            &ev(
                TouchAction::PointerUp,
                0,
                &[(1, 175.0, 110.0), (2, 110.0, 175.0)],
            ),
            &region,
            &pad,
        );
        assert_eq!(digital(&pad), PadButtons::DPAD_LEFT.bits());
        assert!(dpad.is_active(DpadDirection::Left));
        assert!(!dpad.is_active(DpadDirection::Up));
    }

    #[test]
    fn test_single_touch_mode_ignores_second_pointer() {
        let region = make_region();
        let mut dpad = DpadRecognizer::new(DpadBindings::default(), false);
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        dpad.on_touch(
            &ev(
                TouchAction::PointerDown,
                1,
                &[(1, 175.0, 110.0), (2, 110.0, 175.0)],
            ),
            &region,
            &pad,
        );
        assert_eq!(digital(&pad), PadButtons::DPAD_UP.bits());
    }

    #[test]
    fn test_cancel_clears_every_slot() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        dpad.on_touch(
            &ev(
                TouchAction::PointerDown,
                1,
                &[(1, 175.0, 110.0), (2, 110.0, 175.0)],
            ),
            &region,
            &pad,
        );

        let hit = dpad.on_touch(&ev(TouchAction::Cancel, 0, &[]), &region, &pad);
        assert!(hit);
        assert_eq!(digital(&pad), 0);
        for direction in DpadDirection::ALL {
            assert!(!dpad.is_active(direction));
        }
    }

    #[test]
    fn test_repeated_up_is_idempotent() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        dpad.on_touch(&ev(TouchAction::Up, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        assert_eq!(digital(&pad), 0);

        // second up for an already-unlocked slot: no slot claims it; the
        // touch still lies inside the bounds so the event is attributed
        let hit = dpad.on_touch(&ev(TouchAction::Up, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        assert_eq!(digital(&pad), 0);
        assert!(hit);
    }

    #[test]
    fn test_other_bits_in_shared_word_survive() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();
        pad.lock().digital[0] = (PadButtons::START | PadButtons::R1).bits();

        dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        assert_eq!(
            digital(&pad),
            (PadButtons::START | PadButtons::R1 | PadButtons::DPAD_UP).bits()
        );

        dpad.on_touch(&ev(TouchAction::Up, 0, &[(1, 175.0, 110.0)]), &region, &pad);
        assert_eq!(
            digital(&pad),
            (PadButtons::START | PadButtons::R1).bits()
        );
    }

    #[test]
    fn test_malformed_event_is_harmless() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        // trigger index far out of range, and an empty pointer list
        let hit = dpad.on_touch(&ev(TouchAction::Down, 5, &[(1, 175.0, 110.0)]), &region, &pad);
        assert!(!hit);
        assert_eq!(digital(&pad), 0);

        let hit = dpad.on_touch(&ev(TouchAction::Down, 0, &[]), &region, &pad);
        assert!(!hit);
        assert_eq!(digital(&pad), 0);
    }

    #[test]
    fn test_outside_touch_is_not_consumed_but_locks() {
        let region = make_region();
        let mut dpad = make_recognizer();
        let pad = new_shared_pad();

        // the widget manager normally filters these, but a down far from
        // the region still locks the slot with an empty mask
        let hit = dpad.on_touch(&ev(TouchAction::Down, 0, &[(1, 900.0, 900.0)]), &region, &pad);
        assert!(hit, "a down event always claims a free slot");
        assert_eq!(digital(&pad), 0);
    }
}
