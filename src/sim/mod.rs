//! Deterministic simulation module
//!
//! All ball physics lives here. This module must stay pure and deterministic:
//! - Fixed tick length only
//! - Closed-form kinematics, no sub-stepping
//! - No I/O; observation goes through [`PhaseObserver`]
//! - No references to host state kept across calls

pub mod kinematics;
pub mod params;
pub mod state;
pub mod tick;
pub mod trace;

pub use kinematics::{project, time_to_travel};
pub use params::BallParams;
pub use state::{Phase, SimulationState};
pub use tick::{advance, advance_traced, freefall, squeeze, stretch};
pub use trace::{LogObserver, NoTrace, PhaseObserver, PhaseStep};
