//! Rigid-body access for the dice controller
//!
//! The hold, throw and recovery logic never touches rapier components
//! directly. It goes through [`DieBody`], implemented for the live rapier
//! components of a die and for [`SimBody`], a detached body used by tests
//! and headless tooling.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// What the dice controller needs from a physics body
pub trait DieBody {
    fn translation(&self) -> Vec3;
    fn set_translation(&mut self, translation: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    fn linvel(&self) -> Vec3;
    fn angvel(&self) -> Vec3;
    fn set_velocity(&mut self, linvel: Vec3, angvel: Vec3);
    /// Make sure the body takes part in the next physics step
    fn wake_up(&mut self);

    /// Drop all linear and angular momentum
    fn freeze(&mut self) {
        self.set_velocity(Vec3::ZERO, Vec3::ZERO);
    }
}

/// Live rapier components of a die entity
///
/// Holds `Mut` wrappers so every write is seen by rapier's change detection.
pub struct RapierDieBody<'a> {
    pub transform: Mut<'a, Transform>,
    pub velocity: Mut<'a, Velocity>,
    pub sleeping: Mut<'a, Sleeping>,
}

impl<'a> RapierDieBody<'a> {
    pub fn new(
        transform: Mut<'a, Transform>,
        velocity: Mut<'a, Velocity>,
        sleeping: Mut<'a, Sleeping>,
    ) -> Self {
        Self {
            transform,
            velocity,
            sleeping,
        }
    }
}

impl DieBody for RapierDieBody<'_> {
    fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_translation(&mut self, translation: Vec3) {
        self.transform.translation = translation;
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn linvel(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn angvel(&self) -> Vec3 {
        self.velocity.angvel
    }

    fn set_velocity(&mut self, linvel: Vec3, angvel: Vec3) {
        self.velocity.linvel = linvel;
        self.velocity.angvel = angvel;
    }

    fn wake_up(&mut self) {
        self.sleeping.sleeping = false;
    }
}

/// A body that lives outside any physics world
#[derive(Clone, Debug, PartialEq)]
pub struct SimBody {
    pub translation: Vec3,
    pub rotation: Quat,
    pub linvel: Vec3,
    pub angvel: Vec3,
    pub awake: bool,
    /// How many times `wake_up` was called
    pub wake_count: u32,
}

impl SimBody {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..default()
        }
    }
}

impl Default for SimBody {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            linvel: Vec3::ZERO,
            angvel: Vec3::ZERO,
            awake: false,
            wake_count: 0,
        }
    }
}

impl DieBody for SimBody {
    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn linvel(&self) -> Vec3 {
        self.linvel
    }

    fn angvel(&self) -> Vec3 {
        self.angvel
    }

    fn set_velocity(&mut self, linvel: Vec3, angvel: Vec3) {
        self.linvel = linvel;
        self.angvel = angvel;
    }

    fn wake_up(&mut self) {
        self.awake = true;
        self.wake_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_body_freeze_and_wake() {
        let mut body = SimBody {
            linvel: Vec3::ONE,
            angvel: Vec3::X,
            ..SimBody::at(Vec3::new(1.0, 2.0, 3.0))
        };
        body.freeze();
        assert_eq!(body.linvel, Vec3::ZERO);
        assert_eq!(body.angvel, Vec3::ZERO);
        assert_eq!(body.translation, Vec3::new(1.0, 2.0, 3.0));

        body.wake_up();
        body.wake_up();
        assert!(body.awake);
        assert_eq!(body.wake_count, 2);
    }
}
