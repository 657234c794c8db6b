//! Session tuning shared by the world and its hosts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Boundary;

/// Parameters a session is (re)initialised from on every reset.
///
/// Missing keys fall back to [`SessionConfig::default`] when deserialising, so
/// a host configuration file only needs to name the values it overrides.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds between discrete steps at the start of a session.
    pub step_interval: f64,
    /// Factor applied to the step interval on every apple pickup.
    pub speed_multiplier: f64,
    /// Distance travelled per step and unit of the pickup radius.
    pub grid_size: f32,
    /// Number of apples spawned when a session starts.
    pub apples_amount: usize,
    /// Playing field.
    pub boundary: Boundary,
    /// Seconds a message stays visible.
    pub message_stay: f64,
    /// Seconds of countdown added after the final message.
    pub restart_delay: f64,
    /// Remaining countdown at which the session is rebuilt.
    pub countdown_cutoff: f64,
}

impl SessionConfig {
    /// Total time between the end of a session and the start of the next.
    #[must_use]
    pub fn restart_duration(&self) -> f64 {
        self.message_stay + self.restart_delay
    }

    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_size > 0.0) || !self.grid_size.is_finite() {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !(self.step_interval > 0.0) || !self.step_interval.is_finite() {
            return Err(ConfigError::StepInterval(self.step_interval));
        }
        if !(self.speed_multiplier > 0.0 && self.speed_multiplier <= 1.0) {
            return Err(ConfigError::SpeedMultiplier(self.speed_multiplier));
        }
        if self.apples_amount == 0 {
            return Err(ConfigError::NoApples);
        }

        let boundary = self.boundary;
        if !(boundary.min_x < boundary.max_x && boundary.min_z < boundary.max_z) {
            return Err(ConfigError::Boundary(boundary));
        }
        // Apples are sampled in [-max, max) on each axis.
        if boundary.min_x > -boundary.max_x
            || boundary.min_z > -boundary.max_z
            || boundary.max_x / self.grid_size < 1.0
            || boundary.max_z / self.grid_size < 1.0
        {
            return Err(ConfigError::Boundary(boundary));
        }

        for (name, value) in [
            ("message_stay", self.message_stay),
            ("restart_delay", self.restart_delay),
            ("countdown_cutoff", self.countdown_cutoff),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Duration { name, value });
            }
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_interval: 0.33,
            speed_multiplier: 0.85,
            grid_size: 0.25,
            apples_amount: 10,
            boundary: Boundary::default(),
            message_stay: 4.0,
            restart_delay: 4.0,
            countdown_cutoff: 1.0,
        }
    }
}

/// Reasons a [`SessionConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The grid size must be a positive finite number.
    #[error("grid size must be positive, got {0}")]
    GridSize(f32),
    /// The step interval must be a positive finite number of seconds.
    #[error("step interval must be positive, got {0}")]
    StepInterval(f64),
    /// The speed multiplier must lie in (0, 1].
    #[error("speed multiplier must lie in (0, 1], got {0}")]
    SpeedMultiplier(f64),
    /// At least one apple is required for the session to be winnable.
    #[error("at least one apple is required")]
    NoApples,
    /// The boundary must span at least one grid step and cover the mirror of
    /// its positive extent, where apples are placed.
    #[error("boundary {0:?} does not cover the apple spawn area")]
    Boundary(Boundary),
    /// A message or countdown duration was negative or not finite.
    #[error("{name} must be a non-negative number of seconds, got {value}")]
    Duration {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
        assert!((SessionConfig::default().restart_duration() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_speed_multiplier_above_one() {
        let config = SessionConfig {
            speed_multiplier: 1.5,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SpeedMultiplier(1.5)));
    }

    #[test]
    fn rejects_inverted_boundary() {
        let boundary = Boundary::new(2.0, -2.0, -6.0, 6.0);
        let config = SessionConfig {
            boundary,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Boundary(boundary)));
    }

    #[test]
    fn rejects_boundary_that_clips_the_spawn_area() {
        for boundary in [
            Boundary::new(0.0, 2.0, -6.0, 6.0),
            Boundary::new(-3.25, 3.25, -1.0, 6.0),
        ] {
            let config = SessionConfig {
                boundary,
                ..SessionConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::Boundary(boundary)));
        }

        let wider_negative = SessionConfig {
            boundary: Boundary::new(-4.0, 2.0, -6.0, 6.0),
            ..SessionConfig::default()
        };
        assert_eq!(wider_negative.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_apple_set() {
        let config = SessionConfig {
            apples_amount: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoApples));
    }

    #[test]
    fn rejects_negative_durations() {
        let config = SessionConfig {
            restart_delay: -1.0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Duration {
                name: "restart_delay",
                ..
            })
        ));
    }
}
