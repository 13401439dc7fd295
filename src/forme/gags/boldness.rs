use crate::{
    forme::{
        gags::{Choreography, EdgePicker, RIPPLE_DURATION_MS},
        script::{CueAction, GagVisual, HandPose, Script},
        target::Stage,
    },
    state::gag::{GagKind, RatingValue},
};

/// Time for the hand to slide onto the control.
const HAND_ENTRY_MS: u64 = 550;
/// Duration of the press.
const HAND_PRESS_MS: u64 = 140;
/// Time for the hand to lift off before input is released.
const HAND_LIFT_MS: u64 = 260;
/// Fingertip offset relative to the control centre.
const HAND_OFFSET: (f32, f32) = (-36.0, 12.0);

/// A hand slides in from a viewport edge and presses five.
#[derive(Debug, Clone, Copy)]
pub struct HandGuidedBoldness {
    edges: EdgePicker,
}

impl HandGuidedBoldness {
    /// Hand entering from a random edge.
    pub fn new() -> Self {
        Self {
            edges: EdgePicker::Random,
        }
    }

    /// Hand entering according to `edges`.
    pub fn with_edges(edges: EdgePicker) -> Self {
        Self { edges }
    }
}

impl Default for HandGuidedBoldness {
    fn default() -> Self {
        Self::new()
    }
}

impl Choreography for HandGuidedBoldness {
    fn gag(&self) -> GagKind {
        GagKind::Boldness
    }

    fn script(&self, _start: RatingValue, stage: &Stage) -> Option<Script> {
        let entry = self.edges.pick();
        let position = stage.target.center().offset(HAND_OFFSET.0, HAND_OFFSET.1);
        let hand = |pose| CueAction::Show(GagVisual::Hand {
            position,
            entry,
            pose,
        });

        let press_at = HAND_ENTRY_MS;
        let commit_at = press_at + HAND_PRESS_MS;

        Some(
            Script::new()
                .cue(0, hand(HandPose::Entering))
                .cue(press_at, hand(HandPose::Pressing))
                .cue(commit_at, CueAction::ForceSelect)
                .cue(commit_at, hand(HandPose::Lifting))
                .cue(commit_at + HAND_LIFT_MS, CueAction::Release)
                .cue(commit_at + RIPPLE_DURATION_MS, CueAction::ClearRipple),
        )
    }
}
