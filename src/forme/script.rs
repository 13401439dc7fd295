//! Timed cue lists describing what a gag shows and when it commits.

use std::time::Duration;

use serde::Serialize;

use crate::{
    forme::target::{ScreenPosition, Viewport},
    state::gag::RatingValue,
};

/// Viewport edge an animated graphic flies in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryEdge {
    /// Two viewport widths to the right, level with the target.
    Right,
    /// Two viewport widths to the left, level with the target.
    Left,
    /// Two viewport heights below, in line with the target.
    Bottom,
}

impl EntryEdge {
    /// Every edge a graphic may enter from.
    pub const ALL: [EntryEdge; 3] = [EntryEdge::Right, EntryEdge::Left, EntryEdge::Bottom];

    /// Off-screen starting point for a graphic heading to `target`.
    pub fn start(self, target: ScreenPosition, viewport: Viewport) -> ScreenPosition {
        match self {
            EntryEdge::Right => ScreenPosition::new(target.top, viewport.width * 2.0),
            EntryEdge::Left => ScreenPosition::new(target.top, -viewport.width * 2.0),
            EntryEdge::Bottom => ScreenPosition::new(viewport.height * 2.0, target.left),
        }
    }
}

/// Pose of the boldness hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandPose {
    /// Sliding in from its entry edge.
    Entering,
    /// Pushed down onto the control.
    Pressing,
    /// Lifting off after the press.
    Lifting,
}

/// Motion the execution pointer is performing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerMotion {
    /// Shown instantly at its start point.
    Appear,
    /// Travelling through the intermediate hop.
    Hop,
    /// Spring-eased onto the target.
    Spring {
        /// Spring stiffness.
        stiffness: f32,
        /// Spring damping.
        damping: f32,
    },
    /// Click squash (scale 1 → 0.7 → 1).
    Press,
    /// Fading out after the click.
    FadeOut,
}

/// Frame of the humor devil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DevilPose {
    /// First frame, looking at the judge.
    Before,
    /// Second frame, pointing at five.
    After,
}

/// What a gag currently draws over the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GagVisual {
    /// Boldness hand graphic.
    Hand {
        /// Where the hand rests once in place.
        position: ScreenPosition,
        /// Edge it enters from.
        entry: EntryEdge,
        /// Current pose.
        pose: HandPose,
    },
    /// Execution mouse pointer.
    Pointer {
        /// Current pointer position.
        position: ScreenPosition,
        /// Motion in progress.
        motion: PointerMotion,
    },
    /// Humor devil next to the question.
    Devil {
        /// Devil position.
        position: ScreenPosition,
        /// Current frame.
        pose: DevilPose,
    },
    /// Creativity meltdown of every option except five.
    Melting {
        /// Option the judge picked, melting first.
        option: RatingValue,
    },
    /// Presentation count-up.
    Counting {
        /// Value currently shown as checked.
        displayed: RatingValue,
    },
}

/// Something a script does at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub enum CueAction {
    /// Replace the gag's visual.
    Show(GagVisual),
    /// Write an intermediate value into the field (presentation count-up).
    Display(RatingValue),
    /// Commit five through the value-5 control and drop a ripple on it.
    ForceSelect,
    /// Remove the ripple.
    ClearRipple,
    /// End the blocking window and remove the visual.
    Release,
}

/// Action scheduled at an offset from the trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Offset from the trigger.
    pub at: Duration,
    /// What happens then.
    pub action: CueAction,
}

/// Ordered list of cues for one override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    cues: Vec<Cue>,
}

impl Script {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `action` at `at_ms` milliseconds after the trigger.
    pub fn cue(mut self, at_ms: u64, action: CueAction) -> Self {
        self.cues.push(Cue {
            at: Duration::from_millis(at_ms),
            action,
        });
        self
    }

    /// Cues sorted by offset; ties keep insertion order.
    pub fn into_cues(mut self) -> Vec<Cue> {
        self.cues.sort_by_key(|cue| cue.at);
        self.cues
    }

    /// Offset of the first cue matching `predicate`.
    pub fn offset_of(&self, predicate: impl Fn(&CueAction) -> bool) -> Option<Duration> {
        self.cues
            .iter()
            .filter(|cue| predicate(&cue.action))
            .map(|cue| cue.at)
            .min()
    }

    /// When five gets committed.
    pub fn commit_at(&self) -> Option<Duration> {
        self.offset_of(|action| matches!(action, CueAction::ForceSelect))
    }

    /// When the blocking window ends.
    pub fn release_at(&self) -> Option<Duration> {
        self.offset_of(|action| matches!(action, CueAction::Release))
    }

    /// Offset of the last cue.
    pub fn duration(&self) -> Duration {
        self.cues.iter().map(|cue| cue.at).max().unwrap_or_default()
    }
}
