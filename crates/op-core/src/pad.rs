//! Emulated controller state
//!
//! The digital button words shared between the overlay widgets and the
//! emulation core. Overlay widgets only ever touch the bits assigned to
//! them; the core reads the whole buffer once per frame.

use bitflags::bitflags;
use parking_lot::Mutex;
use std::sync::Arc;

/// Number of digital button words in the controller state
pub const DIGITAL_WORDS: usize = 2;

bitflags! {
    /// Emulated controller button flags (digital word 0)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PadButtons: u32 {
        const SELECT     = 0x0001;
        const L3         = 0x0002;
        const R3         = 0x0004;
        const START      = 0x0008;
        const DPAD_UP    = 0x0010;
        const DPAD_RIGHT = 0x0020;
        const DPAD_DOWN  = 0x0040;
        const DPAD_LEFT  = 0x0080;
        const L2         = 0x0100;
        const R2         = 0x0200;
        const L1         = 0x0400;
        const R1         = 0x0800;
    }
}

/// Controller state consumed by the emulation core
///
/// Each word in `digital` is a bitmask of currently pressed buttons. Every
/// overlay widget owns a statically assigned, disjoint bit range within one
/// word and must never write outside it.
#[derive(Debug, Clone, Default)]
pub struct PadState {
    /// Digital button words
    pub digital: [u32; DIGITAL_WORDS],
}

impl PadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if every bit of `mask` is set in the given digital word
    pub fn is_pressed(&self, word: usize, mask: u32) -> bool {
        self.digital.get(word).is_some_and(|w| w & mask == mask)
    }

    /// Clear all digital words
    pub fn clear(&mut self) {
        self.digital = [0; DIGITAL_WORDS];
    }
}

/// Controller state shared between the overlay widgets and the core
pub type SharedPadState = Arc<Mutex<PadState>>;

/// Create a fresh shared controller state with all buttons released
pub fn new_shared_pad() -> SharedPadState {
    Arc::new(Mutex::new(PadState::new()))
}
