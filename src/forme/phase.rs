//! Phases of an override and the transitions between them.

use serde::Serialize;
use thiserror::Error;

/// Stages an override controller moves through, always in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePhase {
    /// Waiting for a non-maximum selection.
    Idle,
    /// A selection was intercepted; input is already blocked.
    Triggered,
    /// The gag's scripted animation is playing.
    Animating,
    /// Five has been committed; the ripple and leftovers are winding down.
    Settling,
}

/// Events that drive an override controller between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// A non-maximum value was selected on an enabled gag.
    Trigger,
    /// The animation script started.
    Begin,
    /// Five was written into the form.
    Commit,
    /// The blocking window ended.
    Release,
}

/// Error returned when an event does not apply to the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid override transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// Phase the controller was in.
    pub from: OverridePhase,
    /// Rejected event.
    pub event: PhaseEvent,
}

/// Compute the phase reached by applying `event` in `from`.
///
/// `Triggered -> Settling` is the missing-target fallback, which commits
/// without animating.
pub fn next_phase(from: OverridePhase, event: PhaseEvent) -> Result<OverridePhase, InvalidTransition> {
    let next = match (from, event) {
        (OverridePhase::Idle, PhaseEvent::Trigger) => OverridePhase::Triggered,
        (OverridePhase::Triggered, PhaseEvent::Begin) => OverridePhase::Animating,
        (OverridePhase::Triggered, PhaseEvent::Commit) => OverridePhase::Settling,
        (OverridePhase::Animating, PhaseEvent::Commit) => OverridePhase::Settling,
        (OverridePhase::Settling, PhaseEvent::Release) => OverridePhase::Idle,
        (from, event) => return Err(InvalidTransition { from, event }),
    };

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[PhaseEvent]) -> Result<OverridePhase, InvalidTransition> {
        events
            .iter()
            .try_fold(OverridePhase::Idle, |phase, event| next_phase(phase, *event))
    }

    #[test]
    fn animated_path_returns_to_idle() {
        assert_eq!(
            run(&[
                PhaseEvent::Trigger,
                PhaseEvent::Begin,
                PhaseEvent::Commit,
                PhaseEvent::Release
            ]),
            Ok(OverridePhase::Idle)
        );
    }

    #[test]
    fn fallback_path_skips_animation() {
        assert_eq!(
            run(&[PhaseEvent::Trigger, PhaseEvent::Commit, PhaseEvent::Release]),
            Ok(OverridePhase::Idle)
        );
    }

    #[test]
    fn retrigger_while_busy_is_rejected() {
        let err = run(&[PhaseEvent::Trigger, PhaseEvent::Begin, PhaseEvent::Trigger]).unwrap_err();
        assert_eq!(err.from, OverridePhase::Animating);
        assert_eq!(err.event, PhaseEvent::Trigger);
    }

    #[test]
    fn release_before_commit_is_rejected() {
        assert!(run(&[PhaseEvent::Trigger, PhaseEvent::Begin, PhaseEvent::Release]).is_err());
    }
}
