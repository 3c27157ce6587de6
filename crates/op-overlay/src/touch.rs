//! Raw touch event model
//!
//! Events arrive one at a time from the host window system, each carrying
//! the action kind, the index of the pointer that triggered the action, and
//! the full list of currently active pointers.

/// Identifier of a physical touch point, stable for its lifetime
pub type PointerId = u64;

/// Touch action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// First pointer went down
    Down,
    /// An additional pointer went down while others are held
    PointerDown,
    /// One or more pointers moved
    Move,
    /// The last remaining pointer was lifted
    Up,
    /// A pointer was lifted while others remain held
    PointerUp,
    /// The gesture was aborted by the host; all pointers are gone
    Cancel,
}

/// One active touch point in host coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
}

/// One dispatched touch event
///
/// For `Up`/`PointerUp` the releasing pointer is still present in
/// `pointers`, matching how window systems report release coordinates.
#[derive(Debug, Clone)]
pub struct TouchEvent {
    pub action: TouchAction,
    /// Index into `pointers` of the pointer that triggered the action
    pub pointer_index: usize,
    pub pointers: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(action: TouchAction, pointer_index: usize, pointers: Vec<TouchPoint>) -> Self {
        Self {
            action,
            pointer_index,
            pointers,
        }
    }

    /// Pointer at the given index, if in range
    pub fn point(&self, index: usize) -> Option<TouchPoint> {
        self.pointers.get(index).copied()
    }

    /// Identifier of the pointer at the given index, if in range
    pub fn pointer_id(&self, index: usize) -> Option<PointerId> {
        self.point(index).map(|p| p.id)
    }

    /// Pointer that triggered this event, if the index is in range
    pub fn trigger(&self) -> Option<TouchPoint> {
        self.point(self.pointer_index)
    }

    /// Index of the pointer with the given identifier, if still active
    pub fn index_of(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pointer_event() -> TouchEvent {
        TouchEvent::new(
            TouchAction::Move,
            1,
            vec![
                TouchPoint {
                    id: 4,
                    x: 10.0,
                    y: 20.0,
                },
                TouchPoint {
                    id: 7,
                    x: 30.0,
                    y: 40.0,
                },
            ],
        )
    }

    #[test]
    fn test_point_lookup() {
        let event = two_pointer_event();
        assert_eq!(event.point(0).unwrap().id, 4);
        assert_eq!(event.pointer_id(1), Some(7));
        assert_eq!(event.trigger().unwrap().x, 30.0);
    }

    #[test]
    fn test_out_of_range_index_is_none() {
        let event = two_pointer_event();
        assert!(event.point(2).is_none());
        assert!(event.pointer_id(99).is_none());

        let empty = TouchEvent::new(TouchAction::Down, 0, Vec::new());
        assert!(empty.trigger().is_none());
    }

    #[test]
    fn test_index_of() {
        let event = two_pointer_event();
        assert_eq!(event.index_of(7), Some(1));
        assert_eq!(event.index_of(5), None);
    }
}
