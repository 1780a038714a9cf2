//! Camera control systems
//!
//! Pinch and wheel zoom. The camera never moves; zoom only changes the
//! orthographic projection scale.

use bevy::prelude::*;

use crate::dice3d::types::*;

/// Apply pinch and wheel input to the zoom level and the camera projection
pub fn handle_zoom_input(
    mut inputs: MessageReader<TrayInput>,
    mut zoom: ResMut<TrayZoom>,
    tuning: Res<TrayTuning>,
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
) {
    for input in inputs.read() {
        match *input {
            TrayInput::PinchStart { distance } => zoom.pinch_start(distance),
            TrayInput::PinchMove { distance } => {
                zoom.pinch_move(distance, tuning.zoom_min, tuning.zoom_max)
            }
            TrayInput::PinchEnd => zoom.pinch_end(),
            TrayInput::Scroll { delta } => zoom.scroll(delta, tuning.zoom_min, tuning.zoom_max),
            TrayInput::PointerDown { .. } | TrayInput::PointerMove { .. } | TrayInput::PointerUp => {}
        }
    }

    if !zoom.is_changed() {
        return;
    }

    for mut projection in camera_query.iter_mut() {
        if let Projection::Orthographic(ortho) = projection.as_mut() {
            ortho.scale = zoom.projection_scale();
        }
    }
}
