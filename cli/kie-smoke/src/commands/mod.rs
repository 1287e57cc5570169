//! Runner commands.

mod containers;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kie_client::MarshallingFormat;
use kie_harness::settings::{CONTAINER_VAR, PASSWORD_VAR, PROCESS_VAR, SERVER_URL_VAR, USER_VAR};
use kie_harness::HarnessSettings;

use crate::output::OutputFormat;

/// Smoke checks against a KIE Server.
#[derive(Debug, Parser)]
#[command(name = "kie-smoke")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the server REST API.
    #[arg(long, global = true, env = SERVER_URL_VAR)]
    server_url: Option<String>,

    #[arg(long, global = true, env = USER_VAR)]
    user: Option<String>,

    #[arg(long, global = true, env = PASSWORD_VAR, hide_env_values = true)]
    password: Option<String>,

    /// Container the scenario targets.
    #[arg(long, global = true, env = CONTAINER_VAR)]
    container: Option<String>,

    /// Process definition the scenario starts.
    #[arg(long, global = true, env = PROCESS_VAR)]
    process: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the server lists at least one container.
    Containers(containers::ContainersCommand),

    /// Run the full process, task and rules interaction.
    Scenario(scenario::ScenarioCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        };

        let settings = HarnessSettings::resolve(|var| match var {
            SERVER_URL_VAR => self.server_url.clone(),
            USER_VAR => self.user.clone(),
            PASSWORD_VAR => self.password.clone(),
            CONTAINER_VAR => self.container.clone(),
            PROCESS_VAR => self.process.clone(),
            _ => None,
        });
        tracing::debug!(settings = ?settings, "Resolved settings");

        let ctx = CommandContext { settings, format };

        match self.command {
            Commands::Containers(cmd) => cmd.run(ctx).await,
            Commands::Scenario(cmd) => cmd.run(ctx).await,
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub settings: HarnessSettings,
    pub format: OutputFormat,
}

fn parse_format(value: &str) -> Result<MarshallingFormat, String> {
    value.parse()
}
