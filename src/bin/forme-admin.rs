//! Admin panel over the flag API: list the gags or toggle some of them.

use anyhow::Context;
use clap::{Parser, Subcommand};
use goodgle_forme::{
    client::{AdminPanel, HttpFlagGateway, ToggleOutcome},
    config::AppConfig,
    init_tracing,
    state::gag::GagKind,
};

#[derive(Debug, Parser)]
#[command(name = "forme-admin")]
#[command(about = "Toggle the Goodgle Forme gags")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Show every gag and whether it is armed.
    List,
    /// Flip one or more gags, then show the result.
    Toggle {
        /// Field name (`humor`) or flag key (`isFormeHumor`).
        #[arg(required = true)]
        gags: Vec<GagKind>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load();
    let gateway = HttpFlagGateway::new(&config.api_base_url).context("building flag client")?;
    let panel = AdminPanel::load(gateway)
        .await
        .context("loading admin panel")?;

    if let Some(Command::Toggle { gags }) = cli.command {
        let outcomes =
            futures::future::join_all(gags.into_iter().map(|gag| panel.toggle(gag))).await;
        for outcome in outcomes {
            if let ToggleOutcome::RolledBack { gag, .. } = outcome {
                eprintln!("failed to toggle {gag}; kept previous value");
            }
        }
    }

    let flags = panel.flags();
    for gag in GagKind::ALL {
        let state = if flags.get(gag) { "on" } else { "off" };
        println!("{:<26} {:<20} {state}", gag.label(), gag.flag_key());
    }
    Ok(())
}
