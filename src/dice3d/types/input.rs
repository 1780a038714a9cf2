//! Normalized pointer input
//!
//! Mouse, touch and wheel events are classified once at the input boundary
//! and forwarded as [`TrayInput`] messages. Everything downstream only sees
//! these shapes.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum TrayInput {
    /// A single pointer engaged the tray
    PointerDown { ndc: Vec2 },
    /// The engaged pointer moved
    PointerMove { ndc: Vec2 },
    /// The engaged pointer let go (or left the window)
    PointerUp,
    /// A second finger landed; `distance` is between the two touches in pixels
    PinchStart { distance: f32 },
    PinchMove { distance: f32 },
    PinchEnd,
    /// Mouse wheel, in lines
    Scroll { delta: f32 },
}
