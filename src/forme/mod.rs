//! Client-side interaction engine of the judging form.
//!
//! A [`session::FormSession`] owns the form values and one
//! [`controller::OverrideController`] per enabled gag. Controllers turn a
//! non-maximum selection into a scripted [`script::Script`] whose cues are
//! delivered back to the session through a [`timer_queue::TimerQueue`].

pub mod controller;
pub mod error;
pub mod form;
pub mod gags;
pub mod phase;
pub mod script;
pub mod scroll_lock;
pub mod session;
pub mod target;
pub mod timer_queue;

pub use self::{
    controller::SelectOutcome,
    error::{SessionError, SubmitError},
    session::{FormHandle, FormSession, FormSnapshot, SessionOptions},
};
