//! Per-gag override state machine.

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    forme::{
        form::FormState,
        gags::{Choreography, choreography_for},
        phase::{OverridePhase, PhaseEvent, next_phase},
        script::{CueAction, GagVisual},
        scroll_lock::{ScrollLock, ScrollLockGuard},
        session::FormEvent,
        target::{ScreenPosition, TargetRegistry},
        timer_queue::TimerQueue,
    },
    state::gag::{GagKind, RatingValue},
};

/// A cue delivered by the timer queue.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerFired {
    /// Controller the cue belongs to.
    pub gag: GagKind,
    /// Override run that scheduled it; stale runs are ignored.
    pub generation: Uuid,
    /// What to do.
    pub action: CueAction,
}

/// What happened to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The value was stored as chosen.
    Passthrough,
    /// The field is blocked by a running override; nothing changed.
    Ignored,
    /// An override took over. `fallback` is set when five was forced without animation.
    Overridden {
        /// Whether the animation was skipped.
        fallback: bool,
    },
}

/// Shared pieces of the session a controller acts on.
pub struct ControllerContext<'a> {
    /// The form; ratings only change through `commit`.
    pub form: &'a mut FormState,
    /// Where rating controls are rendered.
    pub targets: &'a TargetRegistry,
    /// Page lock shared by every controller.
    pub lock: &'a ScrollLock,
}

/// Observable state of one controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideSnapshot {
    /// Gag.
    pub gag: GagKind,
    /// Current phase.
    pub phase: OverridePhase,
    /// Whether input on the field is ignored.
    pub blocking: bool,
    /// Graphic currently drawn, if any.
    pub visual: Option<GagVisual>,
    /// Where the ripple is shown, if any.
    pub ripple: Option<ScreenPosition>,
    /// Values the field went through during the last override.
    pub visited: Vec<RatingValue>,
}

/// Intercepts non-maximum selections on one field and plays its gag.
pub struct OverrideController {
    gag: GagKind,
    choreography: Box<dyn Choreography>,
    phase: OverridePhase,
    generation: Uuid,
    timers: TimerQueue<FormEvent>,
    lock_guard: Option<ScrollLockGuard>,
    visual: Option<GagVisual>,
    ripple: Option<ScreenPosition>,
    visited: Vec<RatingValue>,
}

impl OverrideController {
    /// Controller playing the default choreography of `gag`.
    pub fn new(gag: GagKind, timers: TimerQueue<FormEvent>) -> Self {
        Self::with_choreography(choreography_for(gag), timers)
    }

    /// Controller playing a custom choreography.
    pub fn with_choreography(
        choreography: Box<dyn Choreography>,
        timers: TimerQueue<FormEvent>,
    ) -> Self {
        Self {
            gag: choreography.gag(),
            choreography,
            phase: OverridePhase::Idle,
            generation: Uuid::new_v4(),
            timers,
            lock_guard: None,
            visual: None,
            ripple: None,
            visited: Vec::new(),
        }
    }

    /// Gag handled by this controller.
    pub fn gag(&self) -> GagKind {
        self.gag
    }

    /// Whether user input on the field is currently ignored.
    pub fn is_blocking(&self) -> bool {
        self.phase != OverridePhase::Idle
    }

    /// Handle the judge selecting `value` on this field.
    pub fn on_select(&mut self, value: RatingValue, cx: &mut ControllerContext<'_>) -> SelectOutcome {
        if self.is_blocking() {
            debug!(gag = ?self.gag, value = ?value, phase = ?self.phase, "selection ignored while blocking");
            return SelectOutcome::Ignored;
        }

        cx.form.commit(self.gag, value);
        if value.is_max() {
            return SelectOutcome::Passthrough;
        }

        self.clear_leftovers();
        self.visited = vec![value];
        self.advance(PhaseEvent::Trigger);
        self.lock_guard = Some(cx.lock.acquire());

        let script = cx
            .targets
            .stage(self.gag)
            .and_then(|stage| self.choreography.script(value, &stage));
        let Some(script) = script else {
            warn!(gag = ?self.gag, "override target unavailable, forcing five directly");
            self.force_select(cx, false);
            self.release();
            return SelectOutcome::Overridden { fallback: true };
        };

        self.advance(PhaseEvent::Begin);
        for cue in script.into_cues() {
            if cue.at.is_zero() {
                self.apply(cue.action, cx);
            } else {
                let event = FormEvent::Timer(TimerFired {
                    gag: self.gag,
                    generation: self.generation,
                    action: cue.action,
                });
                self.timers.schedule(cue.at, event);
            }
        }

        SelectOutcome::Overridden { fallback: false }
    }

    /// Apply a cue delivered by the timer queue.
    pub fn on_timer(&mut self, fired: TimerFired, cx: &mut ControllerContext<'_>) {
        if fired.generation != self.generation {
            debug!(gag = ?self.gag, action = ?fired.action, "stale cue dropped");
            return;
        }
        self.apply(fired.action, cx);
    }

    /// Cancel everything and let go of the page lock. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.timers.cancel_all();
        self.generation = Uuid::new_v4();
        self.lock_guard = None;
        self.visual = None;
        self.ripple = None;
        self.phase = OverridePhase::Idle;
    }

    /// Current state.
    pub fn snapshot(&self) -> OverrideSnapshot {
        OverrideSnapshot {
            gag: self.gag,
            phase: self.phase,
            blocking: self.is_blocking(),
            visual: self.visual.clone(),
            ripple: self.ripple,
            visited: self.visited.clone(),
        }
    }

    fn apply(&mut self, action: CueAction, cx: &mut ControllerContext<'_>) {
        match action {
            CueAction::Show(visual) => self.visual = Some(visual),
            CueAction::Display(value) => {
                if self.phase == OverridePhase::Animating {
                    cx.form.commit(self.gag, value);
                    self.visited.push(value);
                    self.visual = Some(GagVisual::Counting { displayed: value });
                }
            }
            CueAction::ForceSelect => {
                if self.phase == OverridePhase::Animating {
                    self.force_select(cx, true);
                }
            }
            CueAction::ClearRipple => self.ripple = None,
            CueAction::Release => match self.phase {
                OverridePhase::Animating => {
                    // Same-deadline cues may arrive in any order.
                    self.force_select(cx, true);
                    self.release();
                }
                OverridePhase::Settling => self.release(),
                OverridePhase::Idle | OverridePhase::Triggered => {}
            },
        }
    }

    fn force_select(&mut self, cx: &mut ControllerContext<'_>, with_ripple: bool) {
        cx.form.commit(self.gag, RatingValue::MAX);
        self.visited.push(RatingValue::MAX);
        if matches!(self.visual, Some(GagVisual::Counting { .. })) {
            self.visual = Some(GagVisual::Counting {
                displayed: RatingValue::MAX,
            });
        }

        if with_ripple {
            self.ripple = cx
                .targets
                .resolve(self.gag, RatingValue::MAX)
                .map(|rect| rect.center());
            if self.ripple.is_none() {
                warn!(gag = ?self.gag, "value-5 control unmounted mid-override, committed without ripple");
            }
        }
        self.advance(PhaseEvent::Commit);
    }

    fn release(&mut self) {
        self.advance(PhaseEvent::Release);
        self.visual = None;
        self.lock_guard = None;
    }

    fn clear_leftovers(&mut self) {
        self.timers.cancel_all();
        self.generation = Uuid::new_v4();
        self.visual = None;
        self.ripple = None;
    }

    fn advance(&mut self, event: PhaseEvent) {
        match next_phase(self.phase, event) {
            Ok(next) => {
                debug!(gag = ?self.gag, from = ?self.phase, to = ?next, "override phase changed");
                self.phase = next;
            }
            Err(err) => warn!(gag = ?self.gag, error = %err, "override event ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

    use super::*;
    use crate::forme::{
        gags::{EdgePicker, PointerExecution},
        script::{EntryEdge, PointerMotion, Script},
        scroll_lock::HeadlessPage,
        target::{Stage, Viewport},
    };

    /// Commits and releases on the same tick, with release queued first.
    struct SameTickRelease;

    impl Choreography for SameTickRelease {
        fn gag(&self) -> GagKind {
            GagKind::Boldness
        }

        fn script(&self, _start: RatingValue, _stage: &Stage) -> Option<Script> {
            Some(
                Script::new()
                    .cue(100, CueAction::Release)
                    .cue(100, CueAction::ForceSelect),
            )
        }
    }

    struct Fixture {
        form: FormState,
        targets: TargetRegistry,
        lock: ScrollLock,
        page: Arc<HeadlessPage>,
        _tx: UnboundedSender<FormEvent>,
        inbox: UnboundedReceiver<FormEvent>,
        controller: OverrideController,
    }

    impl Fixture {
        fn new(gag: GagKind) -> Self {
            Self::with_choreography(choreography_for(gag))
        }

        fn with_choreography(choreography: Box<dyn Choreography>) -> Self {
            let (tx, inbox) = unbounded_channel();
            let page = Arc::new(HeadlessPage::default());
            let targets = TargetRegistry::new();
            targets.register_column_layout(Viewport::default());
            let controller = OverrideController::with_choreography(choreography, TimerQueue::new(&tx));
            Self {
                form: FormState::new(),
                targets,
                lock: ScrollLock::new(page.clone()),
                page,
                _tx: tx,
                inbox,
                controller,
            }
        }

        fn select(&mut self, value: RatingValue) -> SelectOutcome {
            let mut cx = ControllerContext {
                form: &mut self.form,
                targets: &self.targets,
                lock: &self.lock,
            };
            self.controller.on_select(value, &mut cx)
        }

        async fn drain_until_idle(&mut self) {
            while let Some(FormEvent::Timer(fired)) = self.inbox.recv().await {
                let mut cx = ControllerContext {
                    form: &mut self.form,
                    targets: &self.targets,
                    lock: &self.lock,
                };
                self.controller.on_timer(fired, &mut cx);
                if !self.controller.is_blocking() {
                    break;
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn five_passes_through_untouched() {
        let mut fixture = Fixture::new(GagKind::Boldness);
        assert_eq!(fixture.select(RatingValue::Five), SelectOutcome::Passthrough);
        assert!(!fixture.controller.is_blocking());
        assert!(!fixture.lock.is_active());
        assert_eq!(fixture.form.values().boldness, Some(RatingValue::Five));
    }

    #[tokio::test(start_paused = true)]
    async fn override_blocks_then_commits_five() {
        let mut fixture = Fixture::new(GagKind::Creativity);
        let outcome = fixture.select(RatingValue::Two);
        assert_eq!(outcome, SelectOutcome::Overridden { fallback: false });
        assert!(fixture.controller.is_blocking());
        assert!(fixture.page.state().click_overlay);
        assert_eq!(fixture.form.values().creativity, Some(RatingValue::Two));

        assert_eq!(fixture.select(RatingValue::One), SelectOutcome::Ignored);
        assert_eq!(fixture.form.values().creativity, Some(RatingValue::Two));

        fixture.drain_until_idle().await;
        assert_eq!(fixture.form.values().creativity, Some(RatingValue::Five));
        assert!(!fixture.lock.is_active());
        assert_eq!(fixture.page.state().overflow, "auto");
        // Ripple outlives the blocking window.
        assert!(fixture.controller.snapshot().ripple.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_target_forces_five_immediately() {
        let mut fixture = Fixture::new(GagKind::Execution);
        fixture
            .targets
            .register_option(GagKind::Execution, RatingValue::Five, None);

        let outcome = fixture.select(RatingValue::Three);
        assert_eq!(outcome, SelectOutcome::Overridden { fallback: true });
        assert!(!fixture.controller.is_blocking());
        assert!(!fixture.lock.is_active());
        assert_eq!(fixture.form.values().execution, Some(RatingValue::Five));
        assert_eq!(fixture.controller.snapshot().visual, None);
        assert_eq!(fixture.controller.timers.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn humor_without_question_card_falls_back() {
        let mut fixture = Fixture::new(GagKind::Humor);
        fixture.targets.register_question(GagKind::Humor, None);

        let outcome = fixture.select(RatingValue::One);
        assert_eq!(outcome, SelectOutcome::Overridden { fallback: true });
        assert_eq!(fixture.form.values().humor, Some(RatingValue::Five));
        assert_eq!(fixture.controller.snapshot().ripple, None);
    }

    #[tokio::test(start_paused = true)]
    async fn target_unmounted_mid_animation_still_commits() {
        let mut fixture = Fixture::new(GagKind::Humor);
        fixture.select(RatingValue::Four);
        fixture
            .targets
            .register_option(GagKind::Humor, RatingValue::Five, None);

        fixture.drain_until_idle().await;
        assert_eq!(fixture.form.values().humor, Some(RatingValue::Five));
        assert_eq!(fixture.controller.snapshot().ripple, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_cancels_pending_cues() {
        let mut fixture = Fixture::new(GagKind::Boldness);
        fixture.select(RatingValue::Two);
        assert!(fixture.controller.timers.pending() > 0);

        fixture.controller.dispose();
        fixture.controller.dispose();
        assert!(!fixture.lock.is_active());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(fixture.inbox.try_recv().is_err());
        assert_eq!(fixture.form.values().boldness, Some(RatingValue::Two));
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_after_release_drops_old_ripple() {
        let mut fixture = Fixture::new(GagKind::Boldness);
        fixture.select(RatingValue::Two);
        fixture.drain_until_idle().await;
        let first = fixture.controller.snapshot();
        assert!(first.ripple.is_some());

        fixture.select(RatingValue::Three);
        let second = fixture.controller.snapshot();
        assert_eq!(second.ripple, None);
        assert_eq!(second.visited, vec![RatingValue::Three]);
        assert!(second.blocking);
    }

    #[tokio::test(start_paused = true)]
    async fn release_before_commit_still_ends_on_five() {
        let mut fixture = Fixture::with_choreography(Box::new(SameTickRelease));
        fixture.select(RatingValue::Two);
        assert!(fixture.controller.is_blocking());

        fixture.drain_until_idle().await;
        assert!(!fixture.controller.is_blocking());
        assert!(!fixture.lock.is_active());
        assert_eq!(fixture.form.values().boldness, Some(RatingValue::Five));
        assert_eq!(fixture.controller.snapshot().phase, OverridePhase::Idle);

        // The late ForceSelect of the same run changes nothing.
        tokio::time::sleep(Duration::from_millis(50)).await;
        while let Ok(FormEvent::Timer(fired)) = fixture.inbox.try_recv() {
            let mut cx = ControllerContext {
                form: &mut fixture.form,
                targets: &fixture.targets,
                lock: &fixture.lock,
            };
            fixture.controller.on_timer(fired, &mut cx);
        }
        assert!(!fixture.controller.is_blocking());
        assert_eq!(fixture.controller.snapshot().visited, vec![RatingValue::Two, RatingValue::Five]);
    }

    #[tokio::test(start_paused = true)]
    async fn pointer_is_seen_off_screen_before_hopping() {
        let choreography = PointerExecution::with_edges(EdgePicker::Fixed(EntryEdge::Right));
        let mut fixture = Fixture::with_choreography(Box::new(choreography));
        fixture.select(RatingValue::One);

        let Some(GagVisual::Pointer { position, motion }) = fixture.controller.snapshot().visual else {
            panic!("pointer should be visible right after the trigger");
        };
        assert_eq!(motion, PointerMotion::Appear);
        assert_eq!(position.left, Viewport::default().width * 2.0);

        let Some(FormEvent::Timer(fired)) = fixture.inbox.recv().await else {
            panic!("hop cue expected");
        };
        let mut cx = ControllerContext {
            form: &mut fixture.form,
            targets: &fixture.targets,
            lock: &fixture.lock,
        };
        fixture.controller.on_timer(fired, &mut cx);
        assert!(matches!(
            fixture.controller.snapshot().visual,
            Some(GagVisual::Pointer {
                motion: PointerMotion::Hop,
                ..
            })
        ));
    }
}
