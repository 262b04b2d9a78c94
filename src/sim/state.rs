//! Ball state and contact phases
//!
//! Everything a host must persist between ticks lives here.

use serde::{Deserialize, Serialize};

use super::params::BallParams;
use crate::kinetic_energy;

/// Current contact/deformation phase of the ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Airborne, ballistic motion (also holds the resting sub-state)
    #[default]
    Freefall,
    /// Compressing on impact, speed decays toward zero, energy is stored
    Squeeze,
    /// Rebounding, stored energy is released as upward speed
    Stretch,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Freefall => "freefall",
            Phase::Squeeze => "squeeze",
            Phase::Stretch => "stretch",
        }
    }

    /// True while the ball is pinned at the contact height
    pub fn in_contact(&self) -> bool {
        matches!(self, Phase::Squeeze | Phase::Stretch)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Per-ball simulation record
///
/// Owned by the host between ticks and lent to the core for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Vertical speed (m/s, positive = upward)
    pub vertical_speed: f64,
    /// Height of the ball centre above the ground (m)
    pub height: f64,
    /// Elastic energy accumulated during squeeze, never negative
    pub stored_energy: f64,
    /// Seconds of the current tick not yet simulated
    #[serde(default)]
    pub remaining_time: f64,
}

impl SimulationState {
    /// A ball released at `height` with zero speed
    pub fn at_height(height: f64) -> Self {
        Self::new(0.0, height)
    }

    pub fn new(vertical_speed: f64, height: f64) -> Self {
        Self {
            vertical_speed,
            height,
            stored_energy: 0.0,
            remaining_time: 0.0,
        }
    }

    /// Set the time budget to a full tick
    pub fn begin_tick(&mut self, tick_length: f64) {
        self.remaining_time = tick_length;
    }

    /// Consume `elapsed` seconds of the budget
    pub fn spend_time(&mut self, elapsed: f64) {
        self.remaining_time -= elapsed;
    }

    /// Consume whatever is left of the budget
    pub fn exhaust_time(&mut self) {
        self.remaining_time = 0.0;
    }

    /// Height of the ball centre above the contact height
    pub fn clearance(&self, params: &BallParams) -> f64 {
        self.height - params.radius
    }

    /// Within the rest tolerances of the contact point with no speed
    pub fn is_resting(&self, params: &BallParams) -> bool {
        self.clearance(params) < params.rest_height_epsilon
            && self.vertical_speed.abs() < params.rest_speed_epsilon
    }

    pub fn kinetic_energy(&self, params: &BallParams) -> f64 {
        kinetic_energy(params.mass, self.vertical_speed)
    }

    /// Kinetic + gravitational potential energy per unit mass (`½v² - g·h`)
    pub fn specific_mechanical_energy(&self, params: &BallParams) -> f64 {
        0.5 * self.vertical_speed * self.vertical_speed - params.gravity * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_budget_mutators() {
        let mut state = SimulationState::at_height(2.0);
        state.begin_tick(0.1);
        assert_eq!(state.remaining_time, 0.1);

        state.spend_time(0.04);
        assert!((state.remaining_time - 0.06).abs() < 1e-12);

        state.exhaust_time();
        assert_eq!(state.remaining_time, 0.0);
    }

    #[test]
    fn test_resting_detection() {
        let params = BallParams::default();
        assert!(SimulationState::at_height(params.radius).is_resting(&params));
        assert!(SimulationState::new(-5e-6, params.radius + 5e-6).is_resting(&params));

        // Moving, or hovering above contact
        assert!(!SimulationState::new(-0.1, params.radius).is_resting(&params));
        assert!(!SimulationState::at_height(params.radius + 0.01).is_resting(&params));
    }

    #[test]
    fn test_phase_contact() {
        assert!(!Phase::Freefall.in_contact());
        assert!(Phase::Squeeze.in_contact());
        assert!(Phase::Stretch.in_contact());
        assert_eq!(Phase::default(), Phase::Freefall);
        assert_eq!(Phase::Stretch.to_string(), "stretch");
    }

    #[test]
    fn test_state_serde_defaults_remaining_time() {
        let json = r#"{"vertical_speed":-1.5,"height":3.0,"stored_energy":0.0}"#;
        let state: SimulationState = serde_json::from_str(json).unwrap();
        assert_eq!(state.remaining_time, 0.0);
        assert_eq!(state.vertical_speed, -1.5);
    }
}
