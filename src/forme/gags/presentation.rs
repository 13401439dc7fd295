use crate::{
    forme::{
        gags::{Choreography, RIPPLE_DURATION_MS},
        script::{CueAction, GagVisual, Script},
        target::Stage,
    },
    state::gag::{GagKind, RatingValue},
};

/// Time each counted value stays on screen.
const COUNT_FRAME_MS: u64 = 120;

/// The field counts up one value at a time until it reaches five.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationCount;

impl Choreography for PresentationCount {
    fn gag(&self) -> GagKind {
        GagKind::Presentation
    }

    fn script(&self, start: RatingValue, _stage: &Stage) -> Option<Script> {
        let mut script =
            Script::new().cue(0, CueAction::Show(GagVisual::Counting { displayed: start }));

        // The starting value is already in the field; five is committed by ForceSelect.
        let mut at = 0;
        for value in start.ascending_from().skip(1) {
            at += COUNT_FRAME_MS;
            if value.is_max() {
                break;
            }
            script = script.cue(at, CueAction::Display(value));
        }

        let commit_at = u64::from(start.steps_to_max()) * COUNT_FRAME_MS;
        Some(
            script
                .cue(commit_at, CueAction::ForceSelect)
                .cue(commit_at + RIPPLE_DURATION_MS, CueAction::ClearRipple)
                .cue(commit_at + RIPPLE_DURATION_MS, CueAction::Release),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::forme::target::{Rect, Viewport};

    fn stage() -> Stage {
        Stage {
            target: Rect::new(0.0, 0.0, 20.0, 20.0),
            question: None,
            viewport: Viewport::default(),
        }
    }

    #[test]
    fn counts_each_intermediate_value_once() {
        let cues = PresentationCount
            .script(RatingValue::Two, &stage())
            .unwrap()
            .into_cues();
        let displayed: Vec<_> = cues
            .iter()
            .filter_map(|cue| match cue.action {
                CueAction::Display(value) => Some((cue.at, value)),
                _ => None,
            })
            .collect();
        assert_eq!(
            displayed,
            vec![
                (Duration::from_millis(120), RatingValue::Three),
                (Duration::from_millis(240), RatingValue::Four),
            ]
        );
    }

    #[test]
    fn commit_time_scales_with_distance_to_five() {
        for (start, expected) in [
            (RatingValue::One, 480),
            (RatingValue::Two, 360),
            (RatingValue::Four, 120),
        ] {
            let script = PresentationCount.script(start, &stage()).unwrap();
            assert_eq!(script.commit_at(), Some(Duration::from_millis(expected)));
            assert_eq!(
                script.release_at(),
                Some(Duration::from_millis(expected + 900))
            );
        }
    }

    #[test]
    fn four_goes_straight_to_commit() {
        let script = PresentationCount.script(RatingValue::Four, &stage()).unwrap();
        assert!(
            script
                .into_cues()
                .iter()
                .all(|cue| !matches!(cue.action, CueAction::Display(_)))
        );
    }
}
