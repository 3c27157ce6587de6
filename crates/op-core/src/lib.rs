//! Core types for the overlay-pad touchscreen controller
//!
//! This crate provides the shared controller-state buffer, the emulated
//! button bit definitions, configuration, and error types used by the
//! overlay input engine and the UI.

pub mod config;
pub mod error;
pub mod pad;

pub use config::{DpadBindings, OverlayConfig};
pub use error::{ConfigError, Result, StoreError};
pub use pad::{new_shared_pad, PadButtons, PadState, SharedPadState, DIGITAL_WORDS};
