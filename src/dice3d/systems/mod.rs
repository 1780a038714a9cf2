//! Systems module for the dice tray
//!
//! This module contains the Bevy systems outside the throw controller,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, arena, dice, UI) and rebuild
//! - `camera`: Pinch and wheel zoom
//! - `dice`: Settlement detection, result determination and the result board
//! - `input`: Pointer capture and dice count keys
//! - `shadows`: Ground shadows that follow the dice

mod camera;
mod dice;
mod input;
mod setup;
mod shadows;

// Re-export all public systems
pub use camera::handle_zoom_input;
pub use dice::{
    check_dice_settled, determine_dice_result, evaluate_settlement, is_at_rest,
    tick_result_check, up_face, update_results_display, DieSnapshot,
};
pub use input::{capture_tray_input, handle_dice_count_keys, PointerCapture};
pub use setup::{
    calculate_dice_position, hex_color, rebuild_dice_on_count_change, setup_dice_tray,
    spawn_dice_set, spawn_die, BACKGROUND_COLOR, DIE_PALETTE, OUTLINE_COLOR, OUTLINE_SCALE,
    SHADOW_COLOR, TRADITIONAL_DIE,
};
pub use shadows::{shadow_footprint, sync_die_shadows, SHADOW_Y};
