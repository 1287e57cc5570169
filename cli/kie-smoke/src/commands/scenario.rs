//! Full interaction scenario.

use anyhow::Result;
use clap::Args;
use kie_client::MarshallingFormat;
use kie_harness::Harness;
use tabled::Tabled;

use crate::output::{print_output, print_success, OutputFormat};

use super::{parse_format, CommandContext};

#[derive(Debug, Args)]
pub struct ScenarioCommand {
    /// Marshalling format to use.
    #[arg(long, default_value = "json", value_parser = parse_format)]
    format: MarshallingFormat,
}

#[derive(Debug, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: &'static str,

    #[tabled(rename = "Result")]
    result: String,
}

impl ScenarioCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let harness = Harness::connect(ctx.settings.clone(), self.format)?;
        let report = harness.complete_interaction().await?;

        let rows = vec![
            StepRow {
                step: "process definitions",
                result: report.processes.len().to_string(),
            },
            StepRow {
                step: "definition",
                result: report.definition.process_id.clone(),
            },
            StepRow {
                step: "process instance",
                result: report.process_instance_id.to_string(),
            },
            StepRow {
                step: "task completed",
                result: report.task_id.to_string(),
            },
            StepRow {
                step: "rules",
                result: format!("{:?}", report.rules.response_type),
            },
            StepRow {
                step: "final state",
                result: format!("{:?}", report.final_instance.state),
            },
        ];

        print_output(&rows, &report, ctx.format);
        if matches!(ctx.format, OutputFormat::Table) {
            print_success(&format!(
                "scenario completed against container {}",
                ctx.settings.container_id
            ));
        }
        Ok(())
    }
}
