//! Throw Control Systems
//!
//! Systems that turn pointer input into holds and throws, steer held and
//! returning dice, and decide who owns each rigid body this frame.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::*;

use super::hold::{animation_phase, begin_hold, hold_step};
use super::recovery::{recovery_step, Recovery};
use super::state::{intersect_drag_plane, release_die, Release};
use crate::dice3d::body::RapierDieBody;
use crate::dice3d::types::*;

/// Apply pointer down/up to the session and the dice.
///
/// A pinch that starts mid-hold counts as a release so no die is left under
/// manual control.
pub fn handle_pointer_input(
    mut inputs: MessageReader<TrayInput>,
    mut session: ResMut<DiceSession>,
    mut results: ResMut<DiceResults>,
    tuning: Res<TrayTuning>,
    mut dice_query: Query<(&mut Die, &mut Transform, &mut Velocity, &mut Sleeping)>,
) {
    let mut rng = rand::thread_rng();

    for input in inputs.read() {
        match *input {
            TrayInput::PointerDown { ndc } => {
                if !session.begin_hold(ndc) {
                    continue;
                }
                results.hide();
                let mut picked = 0;
                for (mut die, transform, velocity, sleeping) in dice_query.iter_mut() {
                    let mut body = RapierDieBody::new(transform, velocity, sleeping);
                    begin_hold(&mut body, &mut die, &mut rng);
                    picked += 1;
                }
                debug!("Picked up {} dice", picked);
            }
            TrayInput::PointerMove { ndc } => {
                if session.holding {
                    session.pointer_ndc = ndc;
                }
            }
            TrayInput::PointerUp | TrayInput::PinchStart { .. } => {
                if !session.end_hold(tuning.check_delay()) {
                    continue;
                }
                let mut thrown = 0;
                let mut returning = 0;
                for (mut die, transform, velocity, sleeping) in dice_query.iter_mut() {
                    let mut body = RapierDieBody::new(transform, velocity, sleeping);
                    match release_die(&mut body, &mut die, &tuning, &mut rng) {
                        Release::Thrown => thrown += 1,
                        Release::Returning => returning += 1,
                    }
                }
                debug!("Released dice: {} thrown, {} returning", thrown, returning);
            }
            TrayInput::PinchMove { .. } | TrayInput::PinchEnd | TrayInput::Scroll { .. } => {}
        }
    }
}

/// Raycast the pointer onto the drag plane while the dice are held.
pub fn map_pointer_to_drag_plane(
    mut session: ResMut<DiceSession>,
    tuning: Res<TrayTuning>,
    zoom: Res<TrayZoom>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<&Transform, With<MainCamera>>,
) {
    if !session.holding {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    if window.height() <= 0.0 {
        return;
    }

    let view = OrthoView {
        transform: *camera_transform,
        frustum_height: tuning.frustum_height,
        aspect: window.width() / window.height(),
        zoom: zoom.level,
    };
    let ray = view.ray_through(session.pointer_ndc);

    // No target on a miss: the held dice skip this frame.
    session.pointer_target = intersect_drag_plane(ray, tuning.hold_height);
}

/// Pull held dice toward the pointer target
pub fn drive_held_dice(
    session: Res<DiceSession>,
    tuning: Res<TrayTuning>,
    time: Res<Time>,
    mut dice_query: Query<(&mut Die, &mut Transform, &mut Velocity, &mut Sleeping)>,
) {
    if !session.holding {
        return;
    }
    let Some(target) = session.pointer_target else {
        return;
    };

    let phase = animation_phase(time.elapsed_secs());
    for (mut die, transform, velocity, sleeping) in dice_query.iter_mut() {
        let mut body = RapierDieBody::new(transform, velocity, sleeping);
        hold_step(&mut body, &mut die, target, phase, &tuning);
    }
}

/// Fly returning dice back into the safe bound
pub fn recover_returning_dice(
    session: Res<DiceSession>,
    tuning: Res<TrayTuning>,
    time: Res<Time>,
    mut dice_query: Query<(&mut Die, &mut Transform, &mut Velocity, &mut Sleeping)>,
) {
    if session.holding {
        return;
    }

    let mut rng = rand::thread_rng();
    let phase = animation_phase(time.elapsed_secs());
    for (mut die, transform, velocity, sleeping) in dice_query.iter_mut() {
        if !die.is_returning() {
            continue;
        }
        let mut body = RapierDieBody::new(transform, velocity, sleeping);
        if recovery_step(&mut body, &mut die, phase, &tuning, &mut rng) == Recovery::Landed {
            debug!("Die {} is back inside the tray", die.index);
        }
    }
}

/// Switch each rigid body between dynamic and kinematic to match its control mode
pub fn sync_body_authority(mut dice_query: Query<(&Die, &mut RigidBody)>) {
    for (die, mut rigid_body) in dice_query.iter_mut() {
        rigid_body.set_if_neq(die.control.rigid_body());
    }
}

/// Pause the physics step while the dice are held and keep gravity in sync
pub fn gate_physics_step(
    session: Res<DiceSession>,
    tuning: Res<TrayTuning>,
    mut config_query: Query<&mut RapierConfiguration>,
) {
    let active = !session.holding;
    let gravity = Vec3::NEG_Y * tuning.gravity;

    for mut config in config_query.iter_mut() {
        if config.physics_pipeline_active != active {
            config.physics_pipeline_active = active;
        }
        if config.gravity != gravity {
            config.gravity = gravity;
        }
    }
}
