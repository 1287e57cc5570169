//! Error display for the runner.

use colored::Colorize;
use kie_client::KieError;
use kie_harness::HarnessError;

/// Print an error with a hint where one helps.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint(err) {
        eprintln!("\n{}", hint.yellow());
    }
}

fn hint(err: &anyhow::Error) -> Option<&'static str> {
    let client_err = match err.downcast_ref::<HarnessError>() {
        Some(HarnessError::Client(client)) => client,
        Some(HarnessError::NoTasks { .. }) => {
            return Some("Hint: The process must create a task for the configured user.");
        }
        Some(HarnessError::Assertion(_)) => {
            return Some(
                "Hint: The server must answer SUCCESS with a result listing at least one \
                 deployed container.",
            );
        }
        None => err.downcast_ref::<KieError>()?,
    };

    match client_err {
        KieError::Unauthorized => Some(
            "Hint: Check --user/--password or KIE_SERVER_ITEST_USER/KIE_SERVER_ITEST_PASSWORD.",
        ),
        KieError::Api { status: 404, .. } => {
            Some("Hint: Check that the container and process ids exist on the server.")
        }
        KieError::Transport(_) => {
            Some("Hint: Check that the server is running and --server-url is correct.")
        }
        KieError::UnsupportedMarshalling(_) => Some("Hint: Use --format json."),
        _ => None,
    }
}
