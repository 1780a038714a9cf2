//! Interaction session state
//!
//! One session exists per app. It tracks whether the pointer holds the dice,
//! where it points, and whether the settled result should be evaluated.

use std::time::Duration;

use bevy::prelude::*;

/// Deferred settlement check
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultCheck {
    /// Nothing to evaluate
    #[default]
    Idle,
    /// Armed once `remaining` runs out
    Pending { remaining: Duration },
    /// Settlement is evaluated every frame until it succeeds
    Armed,
}

impl ResultCheck {
    pub fn schedule(delay: Duration) -> Self {
        ResultCheck::Pending { remaining: delay }
    }

    /// Advance a pending check by one frame.
    pub fn tick(&mut self, delta: Duration) {
        if let ResultCheck::Pending { remaining } = self {
            *remaining = remaining.saturating_sub(delta);
            if remaining.is_zero() {
                *self = ResultCheck::Armed;
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, ResultCheck::Armed)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResultCheck::Pending { .. })
    }
}

/// Resource tracking the pointer session
#[derive(Resource, Debug, Default)]
pub struct DiceSession {
    pub holding: bool,
    /// Latest pointer position in normalized device coordinates
    pub pointer_ndc: Vec2,
    /// Latest pointer target on the drag plane
    pub pointer_target: Option<Vec3>,
    pub result_check: ResultCheck,
}

impl DiceSession {
    /// Start holding the dice. Returns false if a hold is already active.
    ///
    /// Any pending or armed settlement check is dropped.
    pub fn begin_hold(&mut self, ndc: Vec2) -> bool {
        if self.holding {
            return false;
        }
        self.holding = true;
        self.pointer_ndc = ndc;
        self.pointer_target = None;
        self.result_check = ResultCheck::Idle;
        true
    }

    /// Stop holding and schedule the settlement check. Returns false if
    /// nothing was held.
    pub fn end_hold(&mut self, check_delay: Duration) -> bool {
        if !self.holding {
            return false;
        }
        self.holding = false;
        self.pointer_target = None;
        self.result_check = ResultCheck::schedule(check_delay);
        true
    }

    pub fn needs_result_check(&self) -> bool {
        self.result_check.is_armed()
    }

    /// Back to "not holding, no pending check"
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_release_arms_only_after_delay() {
        let mut session = DiceSession::default();
        assert!(session.begin_hold(Vec2::ZERO));
        assert!(session.end_hold(DELAY));
        assert!(session.result_check.is_pending());
        assert!(!session.needs_result_check());

        session.result_check.tick(Duration::from_millis(300));
        assert!(!session.needs_result_check());

        session.result_check.tick(Duration::from_millis(199));
        assert!(!session.needs_result_check());

        session.result_check.tick(Duration::from_millis(1));
        assert!(session.needs_result_check());
    }

    #[test]
    fn test_new_hold_disarms_pending_check() {
        let mut session = DiceSession::default();
        session.begin_hold(Vec2::ZERO);
        session.end_hold(DELAY);
        session.result_check.tick(Duration::from_millis(250));

        assert!(session.begin_hold(Vec2::new(0.5, 0.5)));
        assert_eq!(session.result_check, ResultCheck::Idle);

        // The old delay running out must not arm anything.
        session.result_check.tick(Duration::from_secs(1));
        assert!(!session.needs_result_check());
    }

    #[test]
    fn test_hold_disarms_armed_check() {
        let mut session = DiceSession {
            result_check: ResultCheck::Armed,
            ..default()
        };
        session.begin_hold(Vec2::ZERO);
        assert!(!session.needs_result_check());
    }

    #[test]
    fn test_double_begin_and_end_are_ignored() {
        let mut session = DiceSession::default();
        assert!(!session.end_hold(DELAY));
        assert_eq!(session.result_check, ResultCheck::Idle);

        assert!(session.begin_hold(Vec2::ZERO));
        assert!(!session.begin_hold(Vec2::ONE));
        assert_eq!(session.pointer_ndc, Vec2::ZERO);
    }

    #[test]
    fn test_armed_check_ignores_ticks() {
        let mut check = ResultCheck::Armed;
        check.tick(Duration::from_secs(3));
        assert!(check.is_armed());

        let mut idle = ResultCheck::Idle;
        idle.tick(Duration::from_secs(3));
        assert_eq!(idle, ResultCheck::Idle);
    }

    #[test]
    fn test_reset() {
        let mut session = DiceSession::default();
        session.begin_hold(Vec2::ONE);
        session.pointer_target = Some(Vec3::ONE);
        session.reset();
        assert!(!session.holding);
        assert_eq!(session.pointer_target, None);
        assert_eq!(session.result_check, ResultCheck::Idle);
    }
}
