use crate::{
    forme::{
        gags::Choreography,
        script::{CueAction, DevilPose, GagVisual, Script},
        target::Stage,
    },
    state::gag::{GagKind, RatingValue},
};

const POSE_MS: u64 = 600;
const RIPPLE_CLEAR_MS: u64 = 900;
const HIDE_MS: u64 = 1200;
/// Horizontal distance between the devil and the question card.
const DEVIL_OFFSET_X: f32 = 300.0;

/// A two-frame devil appears beside the question and points at five.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevilHumor;

impl Choreography for DevilHumor {
    fn gag(&self) -> GagKind {
        GagKind::Humor
    }

    fn script(&self, _start: RatingValue, stage: &Stage) -> Option<Script> {
        let question = stage.question?;
        let position = question.origin().offset(-DEVIL_OFFSET_X, 0.0);
        let devil = |pose| CueAction::Show(GagVisual::Devil { position, pose });

        Some(
            Script::new()
                .cue(0, devil(DevilPose::Before))
                .cue(POSE_MS, devil(DevilPose::After))
                .cue(POSE_MS, CueAction::ForceSelect)
                .cue(RIPPLE_CLEAR_MS, CueAction::ClearRipple)
                .cue(HIDE_MS, CueAction::Release),
        )
    }
}
