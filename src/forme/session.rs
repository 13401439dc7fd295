//! The form page: one task owning the form values and every override controller.

use std::{collections::HashMap, ops::ControlFlow, sync::Arc, time::Duration};

use serde::Serialize;
use tokio::sync::{
    mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    oneshot,
};
use tracing::{debug, info};

use crate::{
    forme::{
        controller::{ControllerContext, OverrideController, OverrideSnapshot, SelectOutcome, TimerFired},
        error::{SessionError, SubmitError},
        form::{FormState, FormValues},
        scroll_lock::{HeadlessPage, PageSurface, ScrollLock},
        target::{TargetRegistry, Viewport},
        timer_queue::TimerQueue,
    },
    state::{
        flags::FeatureFlagSet,
        gag::{GagKind, RatingValue},
    },
};

/// Request sent from a [`FormHandle`] to its session.
#[derive(Debug)]
pub enum FormCommand {
    /// The judge picked a rating.
    Select {
        /// Question.
        gag: GagKind,
        /// Picked value.
        value: RatingValue,
        /// Receives what happened to the selection.
        reply: oneshot::Sender<SelectOutcome>,
    },
    /// The judge typed a name.
    SetName {
        /// New name.
        name: String,
        /// Acknowledgement.
        reply: oneshot::Sender<()>,
    },
    /// The judge typed a comment.
    SetComment {
        /// New comment.
        comment: String,
        /// Acknowledgement.
        reply: oneshot::Sender<()>,
    },
    /// "Clear form".
    Clear {
        /// Acknowledgement.
        reply: oneshot::Sender<()>,
    },
    /// Validate and send the answers.
    Submit {
        /// Receives the submitted values once the simulated request settles.
        reply: oneshot::Sender<Result<FormValues, SubmitError>>,
    },
    /// Read the current state.
    Snapshot {
        /// Receives the snapshot.
        reply: oneshot::Sender<FormSnapshot>,
    },
    /// Tear the page down.
    Unmount {
        /// Sent once everything is cancelled.
        reply: oneshot::Sender<()>,
    },
}

/// Everything a session reacts to.
#[derive(Debug)]
pub enum FormEvent {
    /// A request from a handle.
    Command(FormCommand),
    /// A cue scheduled by one of the controllers.
    Timer(TimerFired),
    /// The simulated submit request finished.
    SubmitSettled,
}

/// Observable state of a form page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    /// Flags the page was composed with.
    pub flags: FeatureFlagSet,
    /// Current answers.
    pub values: FormValues,
    /// One entry per enabled gag.
    pub overrides: Vec<OverrideSnapshot>,
    /// Whether scrolling is suspended and clicks are intercepted.
    pub page_locked: bool,
    /// Whether a submit is waiting on the network.
    pub submitting: bool,
    /// Values of the last successful submit, for the thank-you banner.
    pub last_submission: Option<FormValues>,
}

impl FormSnapshot {
    /// State of one gag's controller, when enabled.
    pub fn override_state(&self, gag: GagKind) -> Option<&OverrideSnapshot> {
        self.overrides.iter().find(|state| state.gag == gag)
    }

    /// Whether any override is still holding its field.
    pub fn any_blocking(&self) -> bool {
        self.overrides.iter().any(|state| state.blocking)
    }
}

/// Rendering-layer collaborators of a session.
#[derive(Clone)]
pub struct SessionOptions {
    /// Rendered rating controls.
    pub targets: TargetRegistry,
    /// Page that gets locked during overrides.
    pub page: Arc<dyn PageSurface>,
    /// Simulated network delay of a submit.
    pub submit_latency: Duration,
}

impl SessionOptions {
    /// Headless page with the default column layout.
    pub fn headless(submit_latency: Duration) -> Self {
        let targets = TargetRegistry::new();
        targets.register_column_layout(Viewport::default());
        Self {
            targets,
            page: Arc::new(HeadlessPage::default()),
            submit_latency,
        }
    }
}

struct PendingSubmit {
    values: FormValues,
    reply: oneshot::Sender<Result<FormValues, SubmitError>>,
}

/// State owned by the session task.
pub struct FormSession {
    flags: FeatureFlagSet,
    form: FormState,
    controllers: HashMap<GagKind, OverrideController>,
    targets: TargetRegistry,
    lock: ScrollLock,
    submit_timers: TimerQueue<FormEvent>,
    submit_latency: Duration,
    pending_submit: Option<PendingSubmit>,
    last_submission: Option<FormValues>,
}

impl FormSession {
    /// Start a session wired with `flags` and return the handle driving it.
    ///
    /// Only enabled gags get a controller; the others behave as plain inputs.
    pub fn spawn(flags: FeatureFlagSet, options: SessionOptions) -> FormHandle {
        let (tx, rx) = unbounded_channel();
        let controllers = flags
            .enabled()
            .map(|gag| (gag, OverrideController::new(gag, TimerQueue::new(&tx))))
            .collect();

        let session = FormSession {
            flags,
            form: FormState::new(),
            controllers,
            targets: options.targets.clone(),
            lock: ScrollLock::new(options.page),
            submit_timers: TimerQueue::new(&tx),
            submit_latency: options.submit_latency,
            pending_submit: None,
            last_submission: None,
        };
        info!(enabled = ?flags.enabled().collect::<Vec<_>>(), "form session started");
        tokio::spawn(session.run(rx));

        FormHandle {
            inbox: tx,
            targets: options.targets,
        }
    }

    async fn run(mut self, mut inbox: UnboundedReceiver<FormEvent>) {
        while let Some(event) = inbox.recv().await {
            match event {
                FormEvent::Command(command) => {
                    if self.handle_command(command).is_break() {
                        return;
                    }
                }
                FormEvent::Timer(fired) => self.handle_timer(fired),
                FormEvent::SubmitSettled => self.settle_submit(),
            }
        }
        self.teardown();
    }

    /// Apply one command; `Break` once the page is unmounted.
    fn handle_command(&mut self, command: FormCommand) -> ControlFlow<()> {
        match command {
            FormCommand::Select { gag, value, reply } => {
                let _ = reply.send(self.select(gag, value));
            }
            FormCommand::SetName { name, reply } => {
                self.form.set_name(name);
                let _ = reply.send(());
            }
            FormCommand::SetComment { comment, reply } => {
                self.form.set_comment(comment);
                let _ = reply.send(());
            }
            FormCommand::Clear { reply } => {
                self.form.reset();
                let _ = reply.send(());
            }
            FormCommand::Submit { reply } => self.submit(reply),
            FormCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            FormCommand::Unmount { reply } => {
                self.teardown();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn select(&mut self, gag: GagKind, value: RatingValue) -> SelectOutcome {
        let Some(controller) = self.controllers.get_mut(&gag) else {
            self.form.commit(gag, value);
            return SelectOutcome::Passthrough;
        };
        let mut cx = ControllerContext {
            form: &mut self.form,
            targets: &self.targets,
            lock: &self.lock,
        };
        controller.on_select(value, &mut cx)
    }

    fn handle_timer(&mut self, fired: TimerFired) {
        let Some(controller) = self.controllers.get_mut(&fired.gag) else {
            return;
        };
        let mut cx = ControllerContext {
            form: &mut self.form,
            targets: &self.targets,
            lock: &self.lock,
        };
        controller.on_timer(fired, &mut cx);
    }

    fn submit(&mut self, reply: oneshot::Sender<Result<FormValues, SubmitError>>) {
        let verdict = if self.pending_submit.is_some() {
            Err(SubmitError::AlreadySubmitting)
        } else if self.controllers.values().any(OverrideController::is_blocking) {
            Err(SubmitError::Busy)
        } else {
            self.form.validate().map_err(SubmitError::Invalid)
        };

        match verdict {
            Ok(values) => {
                debug!(latency_ms = self.submit_latency.as_millis() as u64, "submitting form");
                self.submit_timers
                    .schedule(self.submit_latency, FormEvent::SubmitSettled);
                self.pending_submit = Some(PendingSubmit { values, reply });
            }
            Err(err) => {
                debug!(error = %err, "submit rejected");
                let _ = reply.send(Err(err));
            }
        }
    }

    fn settle_submit(&mut self) {
        let Some(PendingSubmit { values, reply }) = self.pending_submit.take() else {
            return;
        };
        info!(judge = %values.name, "form submitted");
        self.last_submission = Some(values.clone());
        self.form.reset();
        let _ = reply.send(Ok(values));
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            flags: self.flags,
            values: self.form.values().clone(),
            overrides: GagKind::ALL
                .into_iter()
                .filter_map(|gag| self.controllers.get(&gag))
                .map(OverrideController::snapshot)
                .collect(),
            page_locked: self.lock.is_active(),
            submitting: self.pending_submit.is_some(),
            last_submission: self.last_submission.clone(),
        }
    }

    fn teardown(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.dispose();
        }
        self.submit_timers.cancel_all();
        self.pending_submit = None;
        debug!("form session torn down");
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Cloneable handle to a running form session.
#[derive(Clone)]
pub struct FormHandle {
    inbox: UnboundedSender<FormEvent>,
    targets: TargetRegistry,
}

impl FormHandle {
    /// Registry the rendering layer updates as controls mount and unmount.
    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// Pick a rating.
    pub async fn select(&self, gag: GagKind, value: RatingValue) -> Result<SelectOutcome, SessionError> {
        self.request(|reply| FormCommand::Select { gag, value, reply }).await
    }

    /// Type the judge name.
    pub async fn set_name(&self, name: impl Into<String>) -> Result<(), SessionError> {
        let name = name.into();
        self.request(|reply| FormCommand::SetName { name, reply }).await
    }

    /// Type the comment.
    pub async fn set_comment(&self, comment: impl Into<String>) -> Result<(), SessionError> {
        let comment = comment.into();
        self.request(|reply| FormCommand::SetComment { comment, reply })
            .await
    }

    /// Reset every answer.
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.request(|reply| FormCommand::Clear { reply }).await
    }

    /// Validate, wait for the simulated request, then reset the form.
    pub async fn submit(&self) -> Result<FormValues, SubmitError> {
        self.request(|reply| FormCommand::Submit { reply }).await?
    }

    /// Current state of the page.
    pub async fn snapshot(&self) -> Result<FormSnapshot, SessionError> {
        self.request(|reply| FormCommand::Snapshot { reply }).await
    }

    /// Tear the page down; pending cues never fire afterwards.
    pub async fn unmount(&self) -> Result<(), SessionError> {
        self.request(|reply| FormCommand::Unmount { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> FormCommand,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.inbox
            .send(FormEvent::Command(command(reply)))
            .map_err(|_| SessionError)?;
        response.await.map_err(|_| SessionError)
    }
}
