//! Dice state and result systems
//!
//! This module contains systems for checking dice settlement,
//! determining dice results, and updating the results display.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::meshes::D6_FACE_NORMALS;
use crate::dice3d::types::*;

/// What the settlement check needs to know about one die
#[derive(Clone, Copy, Debug)]
pub struct DieSnapshot {
    pub index: usize,
    pub control: DieControl,
    pub rotation: Quat,
    pub linvel: Vec3,
    pub angvel: Vec3,
}

/// Determine the upward-facing value of a die based on its rotation
pub fn determine_dice_result(rotation: Quat) -> u32 {
    up_face(D6_FACE_NORMALS.map(|(normal, _)| (rotation * normal).y))
}

/// Face value with the largest upward projection, indexed like
/// [`D6_FACE_NORMALS`]. Ties go to the earlier table entry.
pub fn up_face(projections: [f32; 6]) -> u32 {
    let mut best = 0;
    for (i, projection) in projections.iter().enumerate().skip(1) {
        if *projection > projections[best] {
            best = i;
        }
    }
    D6_FACE_NORMALS[best].1
}

/// Squared speeds at or below `threshold` count as resting.
pub fn is_at_rest(linvel: Vec3, angvel: Vec3, threshold: f32) -> bool {
    linvel.length_squared() <= threshold && angvel.length_squared() <= threshold
}

/// Read every die if the whole set is at rest and none is recovering.
///
/// Values come back ordered by die index.
pub fn evaluate_settlement(dice: &[DieSnapshot], threshold: f32) -> Option<Vec<u32>> {
    if dice.is_empty() {
        return None;
    }

    let settled = dice.iter().all(|die| {
        die.control != DieControl::Returning && is_at_rest(die.linvel, die.angvel, threshold)
    });
    if !settled {
        return None;
    }

    let mut ordered: Vec<&DieSnapshot> = dice.iter().collect();
    ordered.sort_by_key(|die| die.index);
    Some(
        ordered
            .into_iter()
            .map(|die| determine_dice_result(die.rotation))
            .collect(),
    )
}

/// Count down the pending result check
pub fn tick_result_check(time: Res<Time>, mut session: ResMut<DiceSession>) {
    if session.result_check.is_pending() {
        session.result_check.tick(time.delta());
    }
}

/// System to check if dice have settled and publish the result
pub fn check_dice_settled(
    mut session: ResMut<DiceSession>,
    mut dice_results: ResMut<DiceResults>,
    tuning: Res<TrayTuning>,
    mut settled_events: MessageWriter<DiceSettled>,
    dice_query: Query<(&Die, &Transform, &Velocity)>,
) {
    if !session.needs_result_check() {
        return;
    }

    let snapshots: Vec<DieSnapshot> = dice_query
        .iter()
        .map(|(die, transform, velocity)| DieSnapshot {
            index: die.index,
            control: die.control,
            rotation: transform.rotation,
            linvel: velocity.linvel,
            angvel: velocity.angvel,
        })
        .collect();

    let Some(values) = evaluate_settlement(&snapshots, tuning.rest_threshold) else {
        return;
    };

    dice_results.publish(values.clone());
    let total = dice_results.total();
    info!("Dice settled: {} {}", total, dice_results.breakdown());

    settled_events.write(DiceSettled { values, total });
    session.result_check = ResultCheck::Idle;
}

/// System to update the results display text
pub fn update_results_display(
    dice_results: Res<DiceResults>,
    mut board_query: Query<&mut Visibility, With<ResultBoard>>,
    mut total_query: Query<&mut Text, (With<ResultTotalText>, Without<ResultDetailText>)>,
    mut detail_query: Query<&mut Text, (With<ResultDetailText>, Without<ResultTotalText>)>,
) {
    if !dice_results.is_changed() {
        return;
    }

    let visibility = if dice_results.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut board in board_query.iter_mut() {
        board.set_if_neq(visibility);
    }

    if !dice_results.visible {
        return;
    }

    for mut text in total_query.iter_mut() {
        text.0 = dice_results.total().to_string();
    }
    for mut text in detail_query.iter_mut() {
        text.0 = dice_results.breakdown();
    }
}
