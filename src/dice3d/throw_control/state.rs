//! Throw Control State
//!
//! Safe-bound checks, the drag-plane raycast and the release/throw engine.

use bevy::math::Ray3d;
use bevy::prelude::*;
use rand::Rng;

use crate::dice3d::body::DieBody;
use crate::dice3d::types::{Die, DieControl, TrayTuning};

/// Linear and angular velocity handed to a die when it is thrown
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrowImpulse {
    pub linvel: Vec3,
    pub angvel: Vec3,
}

/// What happened to a die at release
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Inside the safe bound: thrown and handed to physics
    Thrown,
    /// Outside the safe bound: manual recovery takes over
    Returning,
}

/// Check if a point is inside the safe bound (XZ plane, edges included)
pub fn is_within_safe_bound(position: Vec3, safe_limit: f32) -> bool {
    position.x.abs() <= safe_limit && position.z.abs() <= safe_limit
}

/// Strict variant used to end a recovery episode
pub fn has_reentered_safe_bound(position: Vec3, safe_limit: f32) -> bool {
    position.x.abs() < safe_limit && position.z.abs() < safe_limit
}

/// Intersect a pointer ray with the horizontal drag plane at `height`.
///
/// Returns `None` when the ray runs parallel to the plane or the plane lies
/// behind the ray origin.
pub fn intersect_drag_plane(ray: Ray3d, height: f32) -> Option<Vec3> {
    // Ray: P = origin + t * direction, plane: Y = height
    // t = (height - origin.y) / direction.y
    if ray.direction.y.abs() < 0.0001 {
        return None;
    }

    let t = (height - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }

    Some(ray.origin + *ray.direction * t)
}

/// Symmetric random value in [-width/2, width/2)
fn jitter(rng: &mut impl Rng, width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * width
}

/// Calculate the throw for a die at `position`.
///
/// The horizontal velocity pulls the die back toward the center, the
/// vertical velocity slams it down, and every axis spins randomly.
pub fn calculate_throw(position: Vec3, tuning: &TrayTuning, rng: &mut impl Rng) -> ThrowImpulse {
    let linvel = Vec3::new(
        -position.x * tuning.throw_center_pull + jitter(rng, tuning.throw_jitter),
        -tuning.slam_speed - rng.gen::<f32>() * tuning.slam_jitter,
        -position.z * tuning.throw_center_pull + jitter(rng, tuning.throw_jitter),
    );
    let angvel = Vec3::new(
        jitter(rng, tuning.spin_range),
        jitter(rng, tuning.spin_range),
        jitter(rng, tuning.spin_range),
    );

    ThrowImpulse { linvel, angvel }
}

/// Wake a body and hand it a fresh throw
pub fn apply_throw(body: &mut impl DieBody, tuning: &TrayTuning, rng: &mut impl Rng) -> ThrowImpulse {
    let impulse = calculate_throw(body.translation(), tuning, rng);
    body.wake_up();
    body.set_velocity(impulse.linvel, impulse.angvel);
    impulse
}

/// Let go of one die: throw it if it is inside the safe bound, otherwise
/// start a recovery episode without touching physics.
pub fn release_die(
    body: &mut impl DieBody,
    die: &mut Die,
    tuning: &TrayTuning,
    rng: &mut impl Rng,
) -> Release {
    if is_within_safe_bound(body.translation(), tuning.safe_limit) {
        die.control = DieControl::Physics;
        apply_throw(body, tuning, rng);
        Release::Thrown
    } else {
        die.control = DieControl::Returning;
        Release::Returning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::body::SimBody;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d {
            origin,
            direction: Dir3::new(direction).unwrap(),
        }
    }

    #[test]
    fn test_safe_bound_edges() {
        assert!(is_within_safe_bound(Vec3::new(9.0, 30.0, -9.0), 9.0));
        assert!(!is_within_safe_bound(Vec3::new(9.01, 0.0, 0.0), 9.0));
        assert!(!is_within_safe_bound(Vec3::new(0.0, 0.0, -10.0), 9.0));

        assert!(!has_reentered_safe_bound(Vec3::new(9.0, 0.0, 0.0), 9.0));
        assert!(has_reentered_safe_bound(Vec3::new(8.99, 0.0, -8.99), 9.0));
    }

    #[test]
    fn test_drag_plane_hit() {
        let hit = intersect_drag_plane(ray(Vec3::splat(50.0), Vec3::NEG_ONE), 15.0).unwrap();
        assert!((hit - Vec3::splat(15.0)).length() < 1e-3);
    }

    #[test]
    fn test_drag_plane_parallel_ray_misses() {
        assert_eq!(intersect_drag_plane(ray(Vec3::new(0.0, 20.0, 0.0), Vec3::X), 15.0), None);
    }

    #[test]
    fn test_drag_plane_behind_origin_misses() {
        assert_eq!(intersect_drag_plane(ray(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y), 15.0), None);
    }

    #[test]
    fn test_throw_ranges() {
        let tuning = TrayTuning::default();
        let mut rng = StdRng::seed_from_u64(7);
        let position = Vec3::new(4.0, 15.0, -2.0);

        for _ in 0..200 {
            let impulse = calculate_throw(position, &tuning, &mut rng);
            // Center pull -6 / +3 with +-7.5 jitter
            assert!(impulse.linvel.x >= -13.5 && impulse.linvel.x <= 1.5);
            assert!(impulse.linvel.z >= -4.5 && impulse.linvel.z <= 10.5);
            assert!(impulse.linvel.y <= -15.0 && impulse.linvel.y >= -25.0);
            for axis in impulse.angvel.to_array() {
                assert!(axis.abs() <= 17.5);
            }
        }
    }

    #[test]
    fn test_release_inside_throws_and_wakes() {
        let tuning = TrayTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut body = SimBody::at(Vec3::new(9.0, 15.0, 3.0));
        let mut die = Die {
            control: DieControl::Held,
            ..Die::new(0)
        };

        assert_eq!(release_die(&mut body, &mut die, &tuning, &mut rng), Release::Thrown);
        assert_eq!(die.control, DieControl::Physics);
        assert_eq!(body.wake_count, 1);
        assert!(body.linvel.length_squared() > 0.0);
    }

    #[test]
    fn test_release_outside_starts_recovery_without_physics() {
        let tuning = TrayTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut body = SimBody::at(Vec3::new(10.0, 15.0, 0.0));
        let mut die = Die {
            control: DieControl::Held,
            ..Die::new(0)
        };

        assert_eq!(release_die(&mut body, &mut die, &tuning, &mut rng), Release::Returning);
        assert!(die.is_returning());
        assert_eq!(body.wake_count, 0);
        assert_eq!(body.linvel, Vec3::ZERO);
        assert_eq!(body.angvel, Vec3::ZERO);
    }
}
