use crate::{
    forme::{
        gags::{Choreography, EdgePicker, RIPPLE_DURATION_MS},
        script::{CueAction, GagVisual, PointerMotion, Script},
        target::Stage,
    },
    state::gag::{GagKind, RatingValue},
};

/// Pointer tip offset from the control's top-left corner.
const POINTER_OFFSET: (f32, f32) = (15.0, -25.0);
const MOTION_MS: u64 = 650;
const PRESS_MS: u64 = 450;
const FADE_MS: u64 = 400;
const SPRING_STIFFNESS: f32 = 400.0;
const SPRING_DAMPING: f32 = 30.0;

/// A mouse pointer flies in from off-screen, hops, springs onto five and clicks it.
#[derive(Debug, Clone, Copy)]
pub struct PointerExecution {
    edges: EdgePicker,
}

impl PointerExecution {
    /// Pointer entering from a random edge.
    pub fn new() -> Self {
        Self {
            edges: EdgePicker::Random,
        }
    }

    /// Pointer entering according to `edges`.
    pub fn with_edges(edges: EdgePicker) -> Self {
        Self { edges }
    }
}

impl Default for PointerExecution {
    fn default() -> Self {
        Self::new()
    }
}

impl Choreography for PointerExecution {
    fn gag(&self) -> GagKind {
        GagKind::Execution
    }

    fn script(&self, _start: RatingValue, stage: &Stage) -> Option<Script> {
        let target = stage
            .target
            .origin()
            .offset(POINTER_OFFSET.0, POINTER_OFFSET.1);
        let start = self.edges.pick().start(target, stage.viewport);
        let hop = start.midpoint(target);
        let pointer = |position, motion| CueAction::Show(GagVisual::Pointer { position, motion });

        let click_at = MOTION_MS + PRESS_MS;

        Some(
            Script::new()
                .cue(0, pointer(start, PointerMotion::Appear))
                .cue(MOTION_MS / 4, pointer(hop, PointerMotion::Hop))
                .cue(
                    MOTION_MS / 2,
                    pointer(
                        target,
                        PointerMotion::Spring {
                            stiffness: SPRING_STIFFNESS,
                            damping: SPRING_DAMPING,
                        },
                    ),
                )
                .cue(MOTION_MS, pointer(target, PointerMotion::Press))
                .cue(click_at, CueAction::ForceSelect)
                .cue(click_at, pointer(target, PointerMotion::FadeOut))
                .cue(click_at + FADE_MS, CueAction::Release)
                .cue(click_at + RIPPLE_DURATION_MS, CueAction::ClearRipple),
        )
    }
}
