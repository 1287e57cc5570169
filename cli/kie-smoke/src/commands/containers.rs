//! List-containers check.

use anyhow::Result;
use clap::Args;
use kie_client::model::KieContainerResource;
use kie_client::{MarshallingFormat, RestKieClient};
use kie_harness::run_matrix;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, print_success};

use super::{parse_format, CommandContext};

#[derive(Debug, Args)]
pub struct ContainersCommand {
    /// Marshalling formats to check (repeatable).
    #[arg(long = "format", default_value = "json", value_parser = parse_format)]
    formats: Vec<MarshallingFormat>,
}

#[derive(Debug, Tabled)]
struct ContainerRow {
    #[tabled(rename = "Format")]
    format: String,

    #[tabled(rename = "Container")]
    id: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Release")]
    release: String,
}

impl ContainerRow {
    fn new(format: MarshallingFormat, container: &KieContainerResource) -> Self {
        Self {
            format: format.to_string(),
            id: container.container_id.clone(),
            status: format!("{:?}", container.status),
            release: container
                .release_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct FormatOutcome<'a> {
    format: MarshallingFormat,
    containers: &'a [KieContainerResource],
}

impl ContainersCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let outcomes = run_matrix(&ctx.settings, &self.formats, RestKieClient::new).await?;

        let rows: Vec<ContainerRow> = outcomes
            .iter()
            .flat_map(|(format, containers)| {
                containers.iter().map(|c| ContainerRow::new(*format, c))
            })
            .collect();
        let json: Vec<FormatOutcome<'_>> = outcomes
            .iter()
            .map(|(format, containers)| FormatOutcome {
                format: *format,
                containers,
            })
            .collect();

        print_output(&rows, &json, ctx.format);
        if matches!(ctx.format, crate::output::OutputFormat::Table) {
            print_success(&format!(
                "{} container(s) listed at {}",
                rows.len(),
                ctx.settings.server_url
            ));
        }
        Ok(())
    }
}
