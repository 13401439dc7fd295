//! Composes a headless form page against the flag API, fires every armed gag
//! and prints what the page ends up showing.

use std::time::Duration;

use anyhow::Context;
use goodgle_forme::{
    client::{HttpFlagGateway, compose_form_page},
    config::AppConfig,
    forme::SessionOptions,
    init_tracing,
    state::gag::{GagKind, RatingValue},
};
use tokio::time::sleep;
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let gateway = HttpFlagGateway::new(&config.api_base_url).context("building flag client")?;
    let page = compose_form_page(&gateway, SessionOptions::headless(config.submit_latency))
        .await
        .context("composing form page")?;
    let form = page.form();

    form.set_name("Demo Judge").await?;
    for question in page.questions() {
        let outcome = form.select(question.gag, RatingValue::One).await?;
        info!(gag = ?question.gag, armed = question.armed, outcome = ?outcome, "rated one");
    }

    loop {
        let snapshot = form.snapshot().await?;
        if !snapshot.any_blocking() {
            break;
        }
        sleep(POLL_INTERVAL).await;
    }

    let snapshot = form.snapshot().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    let submitted = form.submit().await.context("submitting form")?;
    let forced = GagKind::ALL
        .into_iter()
        .filter(|gag| submitted.rating(*gag) == Some(RatingValue::MAX))
        .count();
    info!(forced, "submitted form");

    form.unmount().await?;
    Ok(())
}
