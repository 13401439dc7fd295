use crate::{
    forme::{
        gags::{Choreography, RIPPLE_DURATION_MS},
        script::{CueAction, GagVisual, Script},
        target::Stage,
    },
    state::gag::{GagKind, RatingValue},
};

const MELT_DURATION_MS: u64 = 900;
const RESET_DURATION_MS: u64 = 1600;

/// Every option but five melts away, then five is selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreativeMeltdown;

impl Choreography for CreativeMeltdown {
    fn gag(&self) -> GagKind {
        GagKind::Creativity
    }

    fn script(&self, start: RatingValue, _stage: &Stage) -> Option<Script> {
        Some(
            Script::new()
                .cue(0, CueAction::Show(GagVisual::Melting { option: start }))
                .cue(MELT_DURATION_MS, CueAction::ForceSelect)
                .cue(RESET_DURATION_MS, CueAction::Release)
                .cue(MELT_DURATION_MS + RIPPLE_DURATION_MS, CueAction::ClearRipple),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::forme::target::{Rect, Viewport};

    #[test]
    fn meltdown_releases_before_ripple_fades() {
        let stage = Stage {
            target: Rect::new(0.0, 0.0, 20.0, 20.0),
            question: None,
            viewport: Viewport::default(),
        };
        let script = CreativeMeltdown.script(RatingValue::Three, &stage).unwrap();
        assert_eq!(script.commit_at(), Some(Duration::from_millis(900)));
        assert_eq!(script.release_at(), Some(Duration::from_millis(1600)));
        assert_eq!(script.duration(), Duration::from_millis(1800));

        let first = &script.into_cues()[0];
        assert_eq!(
            first.action,
            CueAction::Show(GagVisual::Melting {
                option: RatingValue::Three
            })
        );
    }
}
