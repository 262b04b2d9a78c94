//! Fixed timestep simulation tick
//!
//! A tick hands the ball a time budget and lets the active phase spend it.
//! Each phase either spends everything that is left or stops at the instant
//! it hands over to the next phase, so several transitions can happen inside
//! one tick without any sub-stepping.

use super::kinematics::{project, time_to_travel};
use super::params::BallParams;
use super::state::{Phase, SimulationState};
use super::trace::{NoTrace, PhaseObserver, PhaseStep};

/// Advance the ball by one tick of `params.tick_length`
///
/// Returns the phase to resume from on the next tick.
pub fn advance(state: &mut SimulationState, phase: Phase, params: &BallParams) -> Phase {
    advance_traced(state, phase, params, &mut NoTrace)
}

/// [`advance`], reporting every phase call to `observer`
pub fn advance_traced<O: PhaseObserver + ?Sized>(
    state: &mut SimulationState,
    mut phase: Phase,
    params: &BallParams,
    observer: &mut O,
) -> Phase {
    state.begin_tick(params.tick_length);

    while state.remaining_time > 0.0 {
        let before = state.remaining_time;
        let next = phase.update(state, params);
        debug_assert!(state.remaining_time >= 0.0);
        debug_assert!(state.stored_energy >= 0.0);

        observer.on_step(&PhaseStep {
            from: phase,
            to: next,
            elapsed: before - state.remaining_time,
            state: *state,
        });
        phase = next;
    }

    phase
}

impl Phase {
    /// Run this phase's update against the remaining budget
    pub fn update(self, state: &mut SimulationState, params: &BallParams) -> Phase {
        match self {
            Phase::Freefall => freefall(state, params),
            Phase::Squeeze => squeeze(state, params),
            Phase::Stretch => stretch(state, params),
        }
    }
}

/// Ballistic flight until the tick ends or the ball reaches the ground
pub fn freefall(state: &mut SimulationState, params: &BallParams) -> Phase {
    // Sitting on the ground with no speed: nothing left to simulate
    if state.is_resting(params) {
        state.exhaust_time();
        return Phase::Freefall;
    }

    let (speed, height) = project(
        state.vertical_speed,
        state.height,
        params.gravity,
        state.remaining_time,
    );
    if height - params.radius > 0.0 {
        state.vertical_speed = speed;
        state.height = height;
        state.exhaust_time();
        return Phase::Freefall;
    }

    // Contact happens inside this tick; stop exactly there
    let to_contact = time_to_travel(
        params.gravity,
        state.vertical_speed,
        params.radius - state.height,
    )
    .min(state.remaining_time);

    let (speed, height) = project(state.vertical_speed, state.height, params.gravity, to_contact);
    state.vertical_speed = speed;
    state.height = height;
    state.spend_time(to_contact);

    Phase::Squeeze
}

/// Impact speed decays linearly to zero, feeding the stored energy
pub fn squeeze(state: &mut SimulationState, params: &BallParams) -> Phase {
    let speed = state.vertical_speed;
    debug_assert!(
        speed <= params.rest_speed_epsilon,
        "squeeze entered moving upward ({speed})"
    );

    let full_squeeze = params.squeeze_rate * speed.abs();
    let (spent, new_speed) = if full_squeeze <= state.remaining_time {
        (full_squeeze, 0.0)
    } else {
        let spent = state.remaining_time;
        (spent, (speed + spent / params.squeeze_rate).min(0.0))
    };

    let before = state.kinetic_energy(params);
    state.vertical_speed = new_speed;
    let absorbed = before - state.kinetic_energy(params);
    state.stored_energy += absorbed * params.bounce_retention;
    state.spend_time(spent);

    if new_speed == 0.0 {
        Phase::Stretch
    } else {
        Phase::Squeeze
    }
}

/// Stored energy drains at a fixed rate and becomes upward speed
pub fn stretch(state: &mut SimulationState, params: &BallParams) -> Phase {
    let energy = state.stored_energy;

    let full_stretch = params.stretch_rate * energy;
    let (spent, new_energy) = if full_stretch <= state.remaining_time {
        (full_stretch, 0.0)
    } else {
        let spent = state.remaining_time;
        (spent, (energy - spent / params.stretch_rate).max(0.0))
    };

    let speed = state.vertical_speed;
    let radicand = (4.0 * (energy - new_energy) + params.mass * speed * speed) / (2.0 * params.mass);
    debug_assert!(radicand >= 0.0);

    state.stored_energy = new_energy;
    state.vertical_speed = radicand.sqrt();
    state.spend_time(spent);

    if new_energy == 0.0 {
        Phase::Freefall
    } else {
        Phase::Stretch
    }
}
