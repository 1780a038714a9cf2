//! Input handling systems
//!
//! This module turns raw mouse, touch and wheel input into [`TrayInput`]
//! messages and maps number keys to dice count changes.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::{Touch, Touches};
use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow};

use crate::dice3d::types::*;

/// Pixels per wheel line for trackpads that report pixel deltas
const PIXELS_PER_LINE: f32 = 100.0;

/// What the capture system remembers between frames
#[derive(Default, Debug)]
pub struct PointerCapture {
    /// The left mouse button started a hold that has not ended yet
    mouse_engaged: bool,
    /// A single finger is engaged with the tray
    touch_engaged: bool,
    /// Two fingers are down
    pinching: bool,
    /// Ignore touches until every finger is lifted after a pinch
    wait_for_lift: bool,
}

/// Classify this frame's pointer input and forward it as [`TrayInput`].
pub fn capture_tray_input(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut wheel_events: MessageReader<MouseWheel>,
    mut cursor_left: MessageReader<CursorLeft>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut capture: Local<PointerCapture>,
    mut tray_input: MessageWriter<TrayInput>,
) {
    for event in wheel_events.read() {
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        };
        if delta != 0.0 {
            tray_input.write(TrayInput::Scroll { delta });
        }
    }

    let Ok((window_entity, window)) = windows.single() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());
    let left_window = cursor_left
        .read()
        .filter(|event| event.window == window_entity)
        .count()
        > 0;

    let active: Vec<&Touch> = touches.iter().collect();
    for message in capture_touches(&mut capture, &touches, &active, window_size) {
        tray_input.write(message);
    }
    if capture.touch_engaged || capture.pinching || !active.is_empty() {
        return;
    }

    let ndc = window
        .cursor_position()
        .map(|cursor| cursor_to_ndc(cursor, window_size));
    for message in capture_mouse(&mut capture, &mouse, ndc, left_window) {
        tray_input.write(message);
    }
}

/// Left button drives the hold. Leaving the window counts as letting go.
fn capture_mouse(
    capture: &mut PointerCapture,
    mouse: &ButtonInput<MouseButton>,
    ndc: Option<Vec2>,
    left_window: bool,
) -> Vec<TrayInput> {
    let mut messages = Vec::new();

    if mouse.just_pressed(MouseButton::Left) {
        if let Some(ndc) = ndc {
            capture.mouse_engaged = true;
            messages.push(TrayInput::PointerDown { ndc });
        }
    } else if capture.mouse_engaged && mouse.pressed(MouseButton::Left) {
        if let Some(ndc) = ndc {
            messages.push(TrayInput::PointerMove { ndc });
        }
    }

    if capture.mouse_engaged && (left_window || mouse.just_released(MouseButton::Left)) {
        capture.mouse_engaged = false;
        messages.push(TrayInput::PointerUp);
    }

    messages
}

fn capture_touches(
    capture: &mut PointerCapture,
    touches: &Touches,
    active: &[&Touch],
    window_size: Vec2,
) -> Vec<TrayInput> {
    let mut messages = Vec::new();

    if active.len() >= 2 {
        let distance = active[0].position().distance(active[1].position());
        if capture.pinching {
            messages.push(TrayInput::PinchMove { distance });
        } else {
            // A pinch ends any single-finger hold
            capture.pinching = true;
            capture.touch_engaged = false;
            messages.push(TrayInput::PinchStart { distance });
        }
        return messages;
    }

    if capture.pinching {
        capture.pinching = false;
        capture.wait_for_lift = !active.is_empty();
        messages.push(TrayInput::PinchEnd);
        return messages;
    }

    match active.first() {
        None => {
            capture.wait_for_lift = false;
            if capture.touch_engaged {
                capture.touch_engaged = false;
                messages.push(TrayInput::PointerUp);
            }
        }
        Some(_) if capture.wait_for_lift => {}
        Some(touch) => {
            let ndc = cursor_to_ndc(touch.position(), window_size);
            if touches.just_pressed(touch.id()) || !capture.touch_engaged {
                capture.touch_engaged = true;
                messages.push(TrayInput::PointerDown { ndc });
            } else {
                messages.push(TrayInput::PointerMove { ndc });
            }
        }
    }

    messages
}

/// Number keys 1-9 request a new dice count
pub fn handle_dice_count_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut count_events: MessageWriter<DiceCountChanged>,
) {
    const KEYS: [(KeyCode, KeyCode); MAX_DICE] = [
        (KeyCode::Digit1, KeyCode::Numpad1),
        (KeyCode::Digit2, KeyCode::Numpad2),
        (KeyCode::Digit3, KeyCode::Numpad3),
        (KeyCode::Digit4, KeyCode::Numpad4),
        (KeyCode::Digit5, KeyCode::Numpad5),
        (KeyCode::Digit6, KeyCode::Numpad6),
        (KeyCode::Digit7, KeyCode::Numpad7),
        (KeyCode::Digit8, KeyCode::Numpad8),
        (KeyCode::Digit9, KeyCode::Numpad9),
    ];

    for (i, (digit, numpad)) in KEYS.iter().enumerate() {
        if keyboard.just_pressed(*digit) || keyboard.just_pressed(*numpad) {
            count_events.write(DiceCountChanged { count: i + 1 });
        }
    }
}
