//! Throw Control Module
//!
//! This module handles picking the dice up with the pointer, throwing them
//! on release, and flying dice that ended up outside the tray back in.

mod hold;
mod recovery;
mod state;
mod systems;

pub use hold::*;
pub use recovery::*;
pub use state::*;
pub use systems::*;
