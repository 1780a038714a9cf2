//! Dice tray plugin
//!
//! Registers the tray's resources and messages and runs every interaction
//! system in one explicit order per frame.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::systems::*;
use crate::dice3d::throw_control::*;
use crate::dice3d::types::*;

/// Rapier steps once per frame at most, on a fixed 60 Hz timestep
const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Adds the dice tray to an app that already has the rendering and rapier
/// plugins.
#[derive(Debug, Clone)]
pub struct DiceTrayPlugin {
    pub tuning: TrayTuning,
    pub dice_count: usize,
}

impl Default for DiceTrayPlugin {
    fn default() -> Self {
        Self {
            tuning: TrayTuning::default(),
            dice_count: DiceConfig::default().count,
        }
    }
}

impl DiceTrayPlugin {
    pub fn new(tuning: TrayTuning, dice_count: usize) -> Self {
        Self { tuning, dice_count }
    }
}

impl Plugin for DiceTrayPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.tuning.clone())
            .insert_resource(DiceConfig::new(self.dice_count))
            .insert_resource(ClearColor(hex_color(BACKGROUND_COLOR)))
            .insert_resource(TimestepMode::Fixed {
                dt: PHYSICS_DT,
                substeps: 1,
            })
            .init_resource::<DiceSession>()
            .init_resource::<DiceResults>()
            .init_resource::<TrayZoom>()
            .add_message::<TrayInput>()
            .add_message::<DiceCountChanged>()
            .add_message::<DiceSettled>()
            .add_systems(Startup, setup_dice_tray)
            .add_systems(
                Update,
                (
                    capture_tray_input,
                    handle_dice_count_keys,
                    rebuild_dice_on_count_change,
                    handle_pointer_input,
                    handle_zoom_input,
                    map_pointer_to_drag_plane,
                    drive_held_dice,
                    recover_returning_dice,
                    sync_body_authority,
                    tick_result_check,
                    check_dice_settled,
                    sync_die_shadows,
                    update_results_display,
                    gate_physics_step,
                )
                    .chain(),
            );
    }
}
