//! Physical and numerical parameters for one ball

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Ball tuning parameters
///
/// Defaults come from [`crate::consts`]; a host may override any of them
/// through [`crate::Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallParams {
    /// Length of one host tick (s)
    pub tick_length: f64,
    /// Vertical acceleration (m/s², must be negative)
    pub gravity: f64,
    /// Ball radius (m); the ball touches the ground at `height == radius`
    pub radius: f64,
    /// Ball mass (kg)
    pub mass: f64,
    /// Seconds of squeeze per m/s of impact speed
    pub squeeze_rate: f64,
    /// Seconds of stretch per unit of stored energy
    pub stretch_rate: f64,
    /// Fraction of absorbed kinetic energy kept for the rebound
    pub bounce_retention: f64,
    pub rest_height_epsilon: f64,
    pub rest_speed_epsilon: f64,
}

impl Default for BallParams {
    fn default() -> Self {
        Self {
            tick_length: TICK_LENGTH,
            gravity: GRAVITY,
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            squeeze_rate: SQUEEZE_RATE,
            stretch_rate: STRETCH_RATE,
            bounce_retention: BOUNCE_RETENTION,
            rest_height_epsilon: REST_HEIGHT_EPSILON,
            rest_speed_epsilon: REST_SPEED_EPSILON,
        }
    }
}

impl BallParams {
    /// Check the parameters the phase functions rely on
    ///
    /// The core never validates at run time, so anything fed to
    /// [`crate::advance`] from outside should pass through here first.
    pub fn validate(&self) -> Result<()> {
        if !(self.gravity.is_finite() && self.gravity < 0.0) {
            return Err(invalid("gravity", "must be finite and negative"));
        }
        positive("tick_length", self.tick_length)?;
        positive("radius", self.radius)?;
        positive("mass", self.mass)?;
        positive("squeeze_rate", self.squeeze_rate)?;
        positive("stretch_rate", self.stretch_rate)?;
        if !(0.0..=1.0).contains(&self.bounce_retention) {
            return Err(invalid("bounce_retention", "must be within [0, 1]"));
        }
        non_negative("rest_height_epsilon", self.rest_height_epsilon)?;
        non_negative("rest_speed_epsilon", self.rest_speed_epsilon)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Error {
    Error::InvalidSetting { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and positive"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and non-negative"))
    }
}
