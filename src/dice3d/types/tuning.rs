//! Tray tuning constants and their RON loader
//!
//! Every number that shapes how the tray feels lives here. The defaults are
//! the values the game ships with; a RON file can override any subset.

use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize tuning: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid tuning value: {0}")]
    Invalid(String),
}

/// Gameplay-feel parameters for the dice tray
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayTuning {
    /// Half-width of the square region where dice may be thrown directly
    pub safe_limit: f32,
    /// Distance of the invisible walls from the center
    pub wall_distance: f32,

    /// Height of the drag plane and of held dice
    pub hold_height: f32,
    /// Fraction of the remaining distance a held die covers per frame
    pub hold_blend: f32,
    /// Amplitude of the per-die wobble while dice are held together
    pub hold_scatter: f32,

    /// Fraction of the horizontal distance to the center covered per frame while returning
    pub return_blend: f32,
    /// Flight height of returning dice
    pub return_height: f32,
    /// Vertical blend toward `return_height`
    pub return_height_blend: f32,

    /// How strongly a throw pulls a die back toward the center
    pub throw_center_pull: f32,
    /// Full width of the random horizontal throw jitter
    pub throw_jitter: f32,
    /// Minimum downward speed of a throw
    pub slam_speed: f32,
    /// Extra random downward speed on top of `slam_speed`
    pub slam_jitter: f32,
    /// Full width of the random angular velocity range on each axis
    pub spin_range: f32,

    /// Squared speed under which a die counts as resting
    pub rest_threshold: f32,
    /// Delay between release and the first settlement check
    pub check_delay_ms: u64,

    /// Magnitude of the downward gravity
    pub gravity: f32,
    pub die_size: f32,
    pub die_mass: f32,
    pub friction: f32,
    pub restitution: f32,

    /// Visible world height of the orthographic camera at zoom 1
    pub frustum_height: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Default for TrayTuning {
    fn default() -> Self {
        Self {
            safe_limit: 9.0,
            wall_distance: 12.0,
            hold_height: 15.0,
            hold_blend: 0.25,
            hold_scatter: 1.0,
            return_blend: 0.15,
            return_height: 12.0,
            return_height_blend: 0.1,
            throw_center_pull: 1.5,
            throw_jitter: 15.0,
            slam_speed: 15.0,
            slam_jitter: 10.0,
            spin_range: 35.0,
            rest_threshold: 0.1,
            check_delay_ms: 500,
            gravity: 40.0,
            die_size: 2.5,
            die_mass: 5.0,
            friction: 0.3,
            restitution: 0.6,
            frustum_height: 23.0,
            zoom_min: 0.5,
            zoom_max: 3.0,
        }
    }
}

impl TrayTuning {
    /// Parse and validate a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, TuningError> {
        let tuning: TrayTuning = ron::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_pretty(&self) -> Result<String, TuningError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Delay between a release and the moment settlement may be evaluated
    pub fn check_delay(&self) -> Duration {
        Duration::from_millis(self.check_delay_ms)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let blends = [
            ("hold_blend", self.hold_blend),
            ("return_blend", self.return_blend),
            ("return_height_blend", self.return_height_blend),
        ];
        for (name, value) in blends {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }

        if !(self.safe_limit > 0.0) {
            return Err(TuningError::Invalid(format!(
                "safe_limit must be positive, got {}",
                self.safe_limit
            )));
        }
        if self.safe_limit >= self.wall_distance {
            return Err(TuningError::Invalid(format!(
                "safe_limit ({}) must be smaller than wall_distance ({})",
                self.safe_limit, self.wall_distance
            )));
        }
        if !(self.rest_threshold > 0.0) {
            return Err(TuningError::Invalid(format!(
                "rest_threshold must be positive, got {}",
                self.rest_threshold
            )));
        }
        if !(self.die_size > 0.0 && self.die_mass > 0.0) {
            return Err(TuningError::Invalid(
                "die_size and die_mass must be positive".to_string(),
            ));
        }
        if !(self.frustum_height > 0.0) {
            return Err(TuningError::Invalid(
                "frustum_height must be positive".to_string(),
            ));
        }
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            return Err(TuningError::Invalid(format!(
                "zoom range [{}, {}] is not ordered",
                self.zoom_min, self.zoom_max
            )));
        }

        Ok(())
    }
}
