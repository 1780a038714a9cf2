//! Dice-related types and components
//!
//! This module contains the `Die` component with its control mode, the
//! components linking a die to its derived visuals, the requested dice
//! count and the published results.

use bevy::prelude::*;
use bevy_rapier3d::prelude::RigidBody;

/// Largest dice set the tray accepts
pub const MAX_DICE: usize = 9;

/// Which system owns a die's transform and velocity this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DieControl {
    /// The physics step moves the die
    #[default]
    Physics,
    /// The die follows the pointer
    Held,
    /// The die is flying back into the safe bound under manual control
    Returning,
}

impl DieControl {
    pub fn is_manual(&self) -> bool {
        !matches!(self, DieControl::Physics)
    }

    /// Rapier body type matching this control mode.
    ///
    /// Held dice stay dynamic: the pipeline is paused during a hold and
    /// rapier only teleports dynamic bodies on a transform write, so the
    /// body is already where the die was let go. Returning dice are
    /// kinematic while the step runs so contacts cannot push them off
    /// their flight path.
    pub fn rigid_body(&self) -> RigidBody {
        match self {
            DieControl::Returning => RigidBody::KinematicPositionBased,
            DieControl::Physics | DieControl::Held => RigidBody::Dynamic,
        }
    }
}

/// Component attached to each die entity
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Die {
    /// Position in the die set; drives start layout and hold wobble
    pub index: usize,
    /// Spin phase offset, re-rolled every pickup
    pub spin_offset: f32,
    pub control: DieControl,
}

impl Die {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            spin_offset: 0.0,
            control: DieControl::Physics,
        }
    }

    pub fn is_returning(&self) -> bool {
        self.control == DieControl::Returning
    }

    pub fn is_held(&self) -> bool {
        self.control == DieControl::Held
    }
}

/// Materials owned by a single die. Released when the die set is rebuilt.
#[derive(Component, Clone, Debug)]
pub struct DieMaterials {
    pub body: Handle<StandardMaterial>,
    pub shadow: Handle<StandardMaterial>,
}

/// Ground shadow that follows a die
#[derive(Component, Clone, Copy, Debug)]
pub struct DieShadow {
    pub die: Entity,
}

/// Marker for the back-face outline shell child of a die
#[derive(Component)]
pub struct DieOutline;

/// Marker for pip children of a die
#[derive(Component)]
pub struct DiePip;

/// Marker for the static arena colliders
#[derive(Component)]
pub struct DiceArena;

/// Meshes and materials shared by every die, created once at startup
#[derive(Resource, Clone, Default)]
pub struct DiceAssets {
    pub die_mesh: Handle<Mesh>,
    pub pip_mesh: Handle<Mesh>,
    pub shadow_mesh: Handle<Mesh>,
    pub outline_material: Handle<StandardMaterial>,
    pub light_pip_material: Handle<StandardMaterial>,
    pub dark_pip_material: Handle<StandardMaterial>,
    pub red_pip_material: Handle<StandardMaterial>,
}

/// Requested dice count
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceConfig {
    pub count: usize,
}

impl DiceConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count: count.clamp(1, MAX_DICE),
        }
    }
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Request to rebuild the die set with a new count
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceCountChanged {
    pub count: usize,
}

/// Fired once per roll when every die is at rest and the faces were read
#[derive(Message, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiceSettled {
    pub values: Vec<u32>,
    pub total: u32,
}

/// Resource storing the published result of the last roll
#[derive(Resource, Default, Debug, Clone)]
pub struct DiceResults {
    /// Face values ordered by die index
    pub values: Vec<u32>,
    /// Whether the result board is shown
    pub visible: bool,
}

impl DiceResults {
    pub fn publish(&mut self, values: Vec<u32>) {
        self.values = values;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    /// Per-die breakdown such as `(2 + 5 + 6)`; empty for a single die.
    pub fn breakdown(&self) -> String {
        if self.values.len() <= 1 {
            return String::new();
        }
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        format!("({})", values.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_config_clamps_count() {
        assert_eq!(DiceConfig::new(0).count, 1);
        assert_eq!(DiceConfig::new(5).count, 5);
        assert_eq!(DiceConfig::new(42).count, MAX_DICE);
        assert_eq!(DiceConfig::default().count, 3);
    }

    #[test]
    fn test_results_breakdown() {
        let mut results = DiceResults::default();
        results.publish(vec![2, 5, 6]);
        assert!(results.visible);
        assert_eq!(results.total(), 13);
        assert_eq!(results.breakdown(), "(2 + 5 + 6)");
    }

    #[test]
    fn test_single_die_has_no_breakdown() {
        let mut results = DiceResults::default();
        results.publish(vec![4]);
        assert_eq!(results.total(), 4);
        assert!(results.breakdown().is_empty());
    }

    #[test]
    fn test_hide_keeps_values() {
        let mut results = DiceResults::default();
        results.publish(vec![1, 1]);
        results.hide();
        assert!(!results.visible);
        assert_eq!(results.total(), 2);
    }

    #[test]
    fn test_control_modes() {
        let mut die = Die::new(2);
        assert_eq!(die.control, DieControl::Physics);
        assert_eq!(die.control.rigid_body(), RigidBody::Dynamic);

        die.control = DieControl::Returning;
        assert!(die.is_returning());
        assert!(!die.is_held());
        assert_eq!(die.control.rigid_body(), RigidBody::KinematicPositionBased);

        die.control = DieControl::Held;
        assert!(die.is_held());
        assert!(!die.is_returning());
        assert_eq!(die.control.rigid_body(), RigidBody::Dynamic);
    }
}
