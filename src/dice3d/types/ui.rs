//! UI components for the result board and hints

use bevy::prelude::*;

/// Marker for the result board root node
#[derive(Component)]
pub struct ResultBoard;

/// Marker for the total text inside the result board
#[derive(Component)]
pub struct ResultTotalText;

/// Marker for the per-die breakdown text inside the result board
#[derive(Component)]
pub struct ResultDetailText;

/// Marker for the controls hint at the bottom of the screen
#[derive(Component)]
pub struct HintText;
