//! Boundary recovery
//!
//! A die released outside the safe bound is flown back toward the center by
//! hand. Once it is inside again it gets a regular throw so the landing is
//! simulated rather than snapped.

use bevy::prelude::*;
use rand::Rng;

use super::state::{apply_throw, has_reentered_safe_bound};
use crate::dice3d::body::DieBody;
use crate::dice3d::types::{Die, DieControl, TrayTuning};

/// Spin rate of a returning die around X and Y, in radians per phase unit
const RETURN_SPIN: f32 = 5.0;

/// Result of one recovery frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// The die is not returning
    Idle,
    /// Still outside the safe bound
    InFlight,
    /// Re-entered this frame and was thrown back to physics
    Landed,
}

/// Advance one die's recovery episode by a frame.
pub fn recovery_step(
    body: &mut impl DieBody,
    die: &mut Die,
    phase: f32,
    tuning: &TrayTuning,
    rng: &mut impl Rng,
) -> Recovery {
    if die.control != DieControl::Returning {
        return Recovery::Idle;
    }

    let position = body.translation();
    body.set_translation(Vec3::new(
        position.x - position.x * tuning.return_blend,
        position.y + (tuning.return_height - position.y) * tuning.return_height_blend,
        position.z - position.z * tuning.return_blend,
    ));
    body.set_rotation(Quat::from_euler(
        EulerRot::XYZ,
        phase * RETURN_SPIN,
        phase * RETURN_SPIN,
        0.0,
    ));
    body.freeze();

    if has_reentered_safe_bound(body.translation(), tuning.safe_limit) {
        die.control = DieControl::Physics;
        apply_throw(body, tuning, rng);
        return Recovery::Landed;
    }

    Recovery::InFlight
}
