//! foglio-cli: command-line adapter over the list-sync engine.
//! Every command opens a session, drives it through the same transitions the
//! browser surface would, and prints the resulting state as JSON.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod handlers;
mod io;
mod print;

use std::sync::Arc;

use clap::Parser;

use foglio::application::collection::CollectionClient;
use foglio::config::{self, Overrides};
use foglio::infra::api::HttpCollection;
use foglio::infra::telemetry;

use args::{Cli, Commands};
use handlers::CliError;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = config::load(
        cli.config_file.as_deref(),
        &Overrides {
            api_base_url: cli.api_base_url.clone(),
        },
    )?;
    telemetry::init(&settings.logging)?;

    let client: Arc<dyn CollectionClient> = Arc::new(HttpCollection::from_settings(&settings.api)?);

    match cli.command {
        Commands::Posts(cmd) => handlers::posts(client, cmd.action).await?,
    }

    Ok(())
}
