//! Hold controller
//!
//! While the pointer holds the dice, every die chases the pointer target on
//! the drag plane with first-order smoothing and spins for show. Physics
//! momentum is discarded each frame so nothing stale survives the release.

use bevy::prelude::*;
use rand::Rng;

use crate::dice3d::body::DieBody;
use crate::dice3d::types::{Die, DieControl, TrayTuning};

/// Animation phase units per second of elapsed time
pub const PHASE_RATE: f32 = 10.0;

/// Spin rates around X, Y and Z for held dice, in radians per phase unit
const HOLD_SPIN: Vec3 = Vec3::new(2.0, 3.0, 1.5);

/// Range of the random spin offset assigned at pickup
const SPIN_OFFSET_RANGE: f32 = 100.0;

/// Animation phase for the given elapsed time
pub fn animation_phase(elapsed_secs: f32) -> f32 {
    elapsed_secs * PHASE_RATE
}

/// Horizontal wobble that keeps held dice from stacking on one point
pub fn hold_scatter(index: usize, phase: f32, amplitude: f32) -> Vec2 {
    let i = index as f32;
    Vec2::new(
        (phase + i).sin() * amplitude,
        (phase + i * 2.0).cos() * amplitude,
    )
}

/// Orientation of a held die at `phase`
pub fn hold_rotation(phase: f32, spin_offset: f32) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        phase * HOLD_SPIN.x + spin_offset,
        phase * HOLD_SPIN.y + spin_offset,
        phase * HOLD_SPIN.z,
    )
}

/// Pick a die up: wake it, re-roll its spin phase and take manual control.
pub fn begin_hold(body: &mut impl DieBody, die: &mut Die, rng: &mut impl Rng) {
    body.wake_up();
    die.spin_offset = rng.gen::<f32>() * SPIN_OFFSET_RANGE;
    die.control = DieControl::Held;
}

/// Advance one held die by one frame toward `target`.
pub fn hold_step(
    body: &mut impl DieBody,
    die: &mut Die,
    target: Vec3,
    phase: f32,
    tuning: &TrayTuning,
) {
    // Holding always wins over an unfinished recovery.
    die.control = DieControl::Held;

    let scatter = hold_scatter(die.index, phase, tuning.hold_scatter);
    let goal = Vec3::new(target.x + scatter.x, tuning.hold_height, target.z + scatter.y);
    let position = body.translation();
    body.set_translation(position + (goal - position) * tuning.hold_blend);

    body.set_rotation(hold_rotation(phase, die.spin_offset));
    body.freeze();
}
