//! Tests for reading, throwing and recovering dice

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dicetray::dice3d::body::SimBody;
use dicetray::dice3d::systems::{determine_dice_result, evaluate_settlement, DieSnapshot};
use dicetray::dice3d::throw_control::{
    begin_hold, hold_step, recovery_step, release_die, Recovery, Release,
};
use dicetray::dice3d::types::{DiceResults, DiceSession, Die, DieControl, TrayTuning};

fn resting(index: usize, rotation: Quat) -> DieSnapshot {
    DieSnapshot {
        index,
        control: DieControl::Physics,
        rotation,
        linvel: Vec3::ZERO,
        angvel: Vec3::ZERO,
    }
}

#[test]
fn test_identity_die_reads_two() {
    assert_eq!(determine_dice_result(Quat::IDENTITY), 2);
    assert_eq!(evaluate_settlement(&[resting(0, Quat::IDENTITY)], 0.1), Some(vec![2]));
}

#[test]
fn test_three_dice_total_and_breakdown() {
    let dice = [
        resting(0, Quat::IDENTITY),
        resting(1, Quat::from_rotation_x(PI)),
        resting(2, Quat::from_rotation_z(-FRAC_PI_2)),
    ];
    let values = evaluate_settlement(&dice, 0.1).expect("all dice are at rest");

    let mut results = DiceResults::default();
    results.publish(values);
    assert_eq!(results.values, vec![2, 5, 6]);
    assert_eq!(results.total(), 13);
    assert_eq!(results.breakdown(), "(2 + 5 + 6)");
}

#[test]
fn test_opposite_faces_sum_to_seven() {
    let rotations = [
        Quat::IDENTITY,
        Quat::from_rotation_z(FRAC_PI_2),
        Quat::from_rotation_x(FRAC_PI_2),
    ];
    for rotation in rotations {
        let up = determine_dice_result(rotation);
        // Turning the die over in world space brings the opposite face up
        let flipped = determine_dice_result(Quat::from_rotation_x(PI) * rotation);
        assert_eq!(up + flipped, 7, "up {} and flipped {}", up, flipped);
    }
}

#[test]
fn test_die_released_outside_returns_then_lands_once() {
    let tuning = TrayTuning::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut body = SimBody::at(Vec3::new(10.0, 15.0, 0.0));
    let mut die = Die::new(0);

    begin_hold(&mut body, &mut die, &mut rng);
    assert_eq!(body.wake_count, 1);
    assert_eq!(release_die(&mut body, &mut die, &tuning, &mut rng), Release::Returning);
    assert!(die.is_returning());
    assert_eq!(body.linvel, Vec3::ZERO);
    assert_eq!(body.wake_count, 1);

    let mut landings = 0;
    for frame in 0..60 {
        if recovery_step(&mut body, &mut die, frame as f32, &tuning, &mut rng) == Recovery::Landed {
            landings += 1;
        }
    }

    assert_eq!(landings, 1);
    assert!(!die.is_returning());
    assert_eq!(die.control, DieControl::Physics);
    assert_eq!(body.wake_count, 2);
    assert!(body.translation.x.abs() < tuning.safe_limit);
    assert!(body.linvel.y < 0.0);
}

#[test]
fn test_held_dice_inside_bound_are_thrown() {
    let tuning = TrayTuning::default();
    let mut rng = StdRng::seed_from_u64(7);
    let target = Vec3::new(3.0, tuning.hold_height, -2.0);

    let mut dice: Vec<(SimBody, Die)> = (0..3)
        .map(|i| (SimBody::at(Vec3::new(i as f32 * 2.5, 2.5, 0.0)), Die::new(i)))
        .collect();

    for (body, die) in dice.iter_mut() {
        begin_hold(body, die, &mut rng);
    }
    for frame in 0..30 {
        for (body, die) in dice.iter_mut() {
            hold_step(body, die, target, frame as f32 * 0.16, &tuning);
            assert!(die.is_held());
        }
    }

    for (body, die) in dice.iter_mut() {
        assert!((body.translation.y - tuning.hold_height).abs() < 0.1);
        assert_eq!(release_die(body, die, &tuning, &mut rng), Release::Thrown);
        assert_eq!(die.control, DieControl::Physics);
        assert!(body.awake);
        assert!(body.linvel.length_squared() > 0.0);
        assert!(body.linvel.y <= -tuning.slam_speed);
    }
}

#[test]
fn test_second_hold_disarms_pending_check() {
    let delay = TrayTuning::default().check_delay();
    let mut session = DiceSession::default();

    assert!(session.begin_hold(Vec2::ZERO));
    session.pointer_ndc = Vec2::new(0.3, -0.2);
    assert!(session.end_hold(delay));

    session.result_check.tick(Duration::from_millis(250));
    assert!(!session.needs_result_check());

    assert!(session.begin_hold(Vec2::new(0.1, 0.1)));
    session.result_check.tick(Duration::from_secs(2));
    assert!(!session.needs_result_check());

    assert!(session.end_hold(delay));
    session.result_check.tick(delay);
    assert!(session.needs_result_check());
}
