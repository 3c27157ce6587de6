//! Touchscreen overlay input engine
//!
//! Turns raw multi-touch events against an on-screen d-pad region into a
//! digital button bitmask in the shared controller state. The engine is
//! renderer-agnostic: it exposes per-direction active queries and glyph
//! layout, and a UI layer does the actual drawing.

pub mod dpad;
pub mod layout;
pub mod region;
pub mod store;
pub mod touch;

pub use dpad::{DpadButtons, DpadDirection, DpadRecognizer};
pub use layout::{glyph_rects, GlyphRects};
pub use region::{OverlayRegion, Rect};
pub use store::{MemoryStore, OverlayLayout, OverlayStore, TomlStore};
pub use touch::{PointerId, TouchAction, TouchEvent, TouchPoint};
