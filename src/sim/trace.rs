//! Optional per-step observation of the phase machine
//!
//! The core never prints. Hosts that want to see inside a tick pass a
//! [`PhaseObserver`]; closures work directly.

use serde::Serialize;

use super::state::{Phase, SimulationState};

/// One phase function call inside a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseStep {
    /// Phase whose update ran
    pub from: Phase,
    /// Phase it handed over to
    pub to: Phase,
    /// Seconds this call consumed
    pub elapsed: f64,
    /// State after the call
    pub state: SimulationState,
}

impl PhaseStep {
    pub fn is_transition(&self) -> bool {
        self.from != self.to
    }
}

/// Receives every [`PhaseStep`] of a tick in order
pub trait PhaseObserver {
    fn on_step(&mut self, step: &PhaseStep);
}

impl<F: FnMut(&PhaseStep)> PhaseObserver for F {
    fn on_step(&mut self, step: &PhaseStep) {
        self(step)
    }
}

/// Observer that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl PhaseObserver for NoTrace {
    #[inline]
    fn on_step(&mut self, _step: &PhaseStep) {}
}

/// Observer that writes each step to the `log` facade at trace level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver {
    /// Host object the steps belong to
    pub object_id: Option<u32>,
}

impl LogObserver {
    pub fn for_object(object_id: u32) -> Self {
        Self {
            object_id: Some(object_id),
        }
    }
}

impl PhaseObserver for LogObserver {
    fn on_step(&mut self, step: &PhaseStep) {
        let s = &step.state;
        log::trace!(
            "ball {:?}: {} -> {} dt={:.6} height={:.6} speed={:.6} energy={:.6} left={:.6}",
            self.object_id,
            step.from,
            step.to,
            step.elapsed,
            s.height,
            s.vertical_speed,
            s.stored_energy,
            s.remaining_time,
        );
    }
}
