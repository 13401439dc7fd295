//! The five gag choreographies.

mod boldness;
mod creativity;
mod execution;
mod humor;
mod presentation;

pub use self::boldness::HandGuidedBoldness;
pub use self::creativity::CreativeMeltdown;
pub use self::execution::PointerExecution;
pub use self::humor::DevilHumor;
pub use self::presentation::PresentationCount;

use rand::Rng;

use crate::{
    forme::{
        script::{EntryEdge, Script},
        target::Stage,
    },
    state::gag::{GagKind, RatingValue},
};

/// How long a ripple stays on the forced control.
pub const RIPPLE_DURATION_MS: u64 = 900;

/// Scripted animation for one gag.
pub trait Choreography: Send + Sync {
    /// Gag this choreography belongs to.
    fn gag(&self) -> GagKind;

    /// Build the cue list for an override starting at `start`.
    ///
    /// Returns `None` when the stage lacks something the animation needs; the
    /// controller then commits five directly.
    fn script(&self, start: RatingValue, stage: &Stage) -> Option<Script>;
}

/// Default choreography of `gag`.
pub fn choreography_for(gag: GagKind) -> Box<dyn Choreography> {
    match gag {
        GagKind::Boldness => Box::new(HandGuidedBoldness::new()),
        GagKind::Execution => Box::new(PointerExecution::new()),
        GagKind::Humor => Box::new(DevilHumor),
        GagKind::Creativity => Box::new(CreativeMeltdown),
        GagKind::Presentation => Box::new(PresentationCount),
    }
}

/// Entry edge selection for graphics that fly in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePicker {
    /// Pick uniformly at random on every override.
    Random,
    /// Always use the same edge.
    Fixed(EntryEdge),
}

impl EdgePicker {
    fn pick(self) -> EntryEdge {
        match self {
            EdgePicker::Random => {
                let index = rand::rng().random_range(0..EntryEdge::ALL.len());
                EntryEdge::ALL[index]
            }
            EdgePicker::Fixed(edge) => edge,
        }
    }
}
