//! Composition of the judging form page.

use serde::Serialize;
use tracing::info;

use crate::{
    client::{error::PageError, gateway::FlagGateway},
    forme::{FormHandle, FormSession, SessionOptions},
    state::{flags::FeatureFlagSet, gag::GagKind},
};

/// One rating question as rendered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Gag bound to the question.
    pub gag: GagKind,
    /// Label above the scale.
    pub label: &'static str,
    /// Whether its override is armed.
    pub armed: bool,
}

/// A composed form page.
pub struct FormPage {
    flags: FeatureFlagSet,
    form: FormHandle,
}

impl FormPage {
    /// Flags the page was composed with.
    pub fn flags(&self) -> FeatureFlagSet {
        self.flags
    }

    /// Handle driving the form session.
    pub fn form(&self) -> &FormHandle {
        &self.form
    }

    /// Rating questions in display order.
    pub fn questions(&self) -> Vec<Question> {
        GagKind::ALL
            .into_iter()
            .map(|gag| Question {
                gag,
                label: gag.label(),
                armed: self.flags.get(gag),
            })
            .collect()
    }
}

/// Fetch the flags once and start a form session wired with them.
///
/// The page refuses to render when the flags cannot be fetched.
pub async fn compose_form_page<G>(gateway: &G, options: SessionOptions) -> Result<FormPage, PageError>
where
    G: FlagGateway + ?Sized,
{
    let flags = gateway
        .fetch_all()
        .await
        .map_err(PageError::FlagsUnavailable)?;
    info!(flags = ?flags, "composing form page");

    Ok(FormPage {
        flags,
        form: FormSession::spawn(flags, options),
    })
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use super::*;
    use crate::{
        client::admin::tests::FakeGateway,
        forme::SelectOutcome,
        state::gag::RatingValue,
    };

    #[tokio::test(start_paused = true)]
    async fn page_arms_only_enabled_gags() {
        let gateway = FakeGateway {
            flags: Mutex::new(FeatureFlagSet::default().with(GagKind::Execution, true)),
            ..Default::default()
        };
        let page = compose_form_page(&gateway, SessionOptions::headless(Duration::ZERO))
            .await
            .unwrap();

        let armed: Vec<_> = page
            .questions()
            .into_iter()
            .filter(|question| question.armed)
            .map(|question| question.label)
            .collect();
        assert_eq!(armed, vec!["Execution & Improvement"]);

        let outcome = page
            .form()
            .select(GagKind::Boldness, RatingValue::One)
            .await
            .unwrap();
        assert_eq!(outcome, SelectOutcome::Passthrough);
        let outcome = page
            .form()
            .select(GagKind::Execution, RatingValue::One)
            .await
            .unwrap();
        assert_eq!(outcome, SelectOutcome::Overridden { fallback: false });
    }

    #[tokio::test]
    async fn page_refuses_to_render_without_flags() {
        let gateway = FakeGateway {
            unreachable: true,
            ..Default::default()
        };
        let result = compose_form_page(&gateway, SessionOptions::headless(Duration::ZERO)).await;
        assert!(matches!(result, Err(PageError::FlagsUnavailable(_))));
    }
}
