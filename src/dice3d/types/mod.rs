//! Type definitions for the dice tray
//!
//! This module is organized into submodules:
//! - `dice` - Die component, control modes, dice count and results
//! - `session` - Pointer session and the deferred settlement check
//! - `camera` - Camera marker, zoom and pointer ray construction
//! - `input` - Normalized pointer input messages
//! - `tuning` - Tuning constants and their RON loader
//! - `ui` - Result board markers

pub mod camera;
pub mod dice;
pub mod input;
pub mod session;
pub mod tuning;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use dice::*;
pub use input::*;
pub use session::*;
pub use tuning::*;
pub use ui::*;
