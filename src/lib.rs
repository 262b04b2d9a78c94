//! Squish Ball - a deformable ball bouncing on a flat ground plane
//!
//! Core modules:
//! - `sim`: Deterministic per-tick simulation (phase state machine, kinematics)
//! - `scene`: Minimal host harness that owns objects and per-ball records
//! - `settings`: JSON-backed run configuration
//! - `error`: Error type for the fallible edges (settings, harness)

pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use scene::{BallRecord, Scene, SceneObject, SceneSnapshot};
pub use settings::{RunOptions, Settings};
pub use sim::{BallParams, Phase, SimulationState, advance, advance_traced};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation tick length (seconds)
    pub const TICK_LENGTH: f64 = 0.1;

    /// Gravity along the vertical axis (m/s², negative = downward)
    pub const GRAVITY: f64 = -9.8;

    /// Ball defaults
    pub const BALL_MASS: f64 = 1.0;
    pub const BALL_RADIUS: f64 = 0.5;

    /// Seconds of squeeze per m/s of impact speed
    pub const SQUEEZE_RATE: f64 = 0.006;
    /// Seconds of stretch per unit of stored energy
    pub const STRETCH_RATE: f64 = 0.00008;
    /// Fraction of absorbed kinetic energy returned by the stretch
    pub const BOUNCE_RETENTION: f64 = 0.56;

    /// Rest detection tolerances (height above contact, speed)
    pub const REST_HEIGHT_EPSILON: f64 = 1e-5;
    pub const REST_SPEED_EPSILON: f64 = 1e-5;
}

/// Kinetic energy of a mass moving at `speed`
#[inline]
pub fn kinetic_energy(mass: f64, speed: f64) -> f64 {
    0.5 * mass * speed * speed
}
