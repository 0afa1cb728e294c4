//! Gesture lifecycle as an explicit state machine.
//!
//! Platform recognizers report `began / changed / ended` through delegate
//! callbacks; here those become [`GestureEvent`]s run through a fixed
//! transition table, so the kernel never depends on a particular gesture API.

use web_time::Duration;

mod phase;

pub use phase::ScrollPhase;

/// Where a single component instance is in its drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No finger down, no settle animation running.
    #[default]
    Idle,
    /// A drag is in progress and position follows the finger.
    Dragging,
    /// The finger lifted; an animation toward the committed target runs.
    Settling,
}

/// Discrete lifecycle events from the gesture collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Began,
    /// Translation of the finger since `Began`, along the main axis, and
    /// when it was measured.
    Changed { translation: f32, timestamp: Duration },
    /// Final translation and release velocity (points per second).
    Ended { translation: f32, velocity: f32 },
    /// The settle animation reached its target.
    SettleFinished,
    /// The platform cancelled the gesture (e.g. a parent stole it).
    Cancelled,
}

impl GestureEvent {
    fn name(&self) -> &'static str {
        match self {
            GestureEvent::Began => "began",
            GestureEvent::Changed { .. } => "changed",
            GestureEvent::Ended { .. } => "ended",
            GestureEvent::SettleFinished => "settle-finished",
            GestureEvent::Cancelled => "cancelled",
        }
    }
}

/// Result of feeding one event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: GesturePhase,
    pub to: GesturePhase,
}

impl PhaseTransition {
    /// A new drag began while a settle animation was still in flight.
    pub fn interrupted_settle(&self) -> bool {
        self.from == GesturePhase::Settling && self.to == GesturePhase::Dragging
    }
}

/// The transition table. `None` means the event is not valid in `phase`.
pub fn next_phase(phase: GesturePhase, event: &GestureEvent) -> Option<GesturePhase> {
    use GesturePhase::*;
    match (phase, event) {
        (Idle, GestureEvent::Began) => Some(Dragging),
        (Dragging, GestureEvent::Changed { .. }) => Some(Dragging),
        (Dragging, GestureEvent::Ended { .. }) => Some(Settling),
        (Dragging, GestureEvent::Cancelled) => Some(Settling),
        (Settling, GestureEvent::Began) => Some(Dragging),
        (Settling, GestureEvent::SettleFinished) => Some(Idle),
        (Settling, GestureEvent::Cancelled) => Some(Idle),
        _ => None,
    }
}

/// Owns the current [`GesturePhase`] of one component instance.
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    phase: GesturePhase,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Applies `event`; invalid events leave the phase untouched.
    pub fn handle(&mut self, event: &GestureEvent) -> Option<PhaseTransition> {
        let from = self.phase;
        match next_phase(from, event) {
            Some(to) => {
                self.phase = to;
                if from != to {
                    log::debug!("gesture {:?} -> {:?} on {}", from, to, event.name());
                }
                Some(PhaseTransition { from, to })
            }
            None => {
                log::debug!("ignoring {} while {:?}", event.name(), from);
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}
