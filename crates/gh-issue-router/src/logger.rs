//! Logging to the workflow log
//!
//! Records go to stdout, where the runner picks up workflow commands:
//! errors and warnings become annotations and debug records become
//! `::debug::` lines, which the runner only shows with step debugging on.
//! The `debug` input prints debug records as plain lines instead.
//!
//! `RUST_LOG` still overrides the filter.

use env_logger::{Builder, Target};
use gh_actions_runtime::WorkflowCommand;
use log::{Level, LevelFilter};
use std::io::Write;

const OWN_CRATES: [&str; 4] = [
    "gh_issue_router",
    "gh_issue_router_config",
    "gh_client",
    "gh_actions_runtime",
];

/// Render one record as a line of the workflow log
fn render(level: Level, message: &str, verbose: bool) -> String {
    match level {
        Level::Error => WorkflowCommand::error(message).to_string(),
        Level::Warn => WorkflowCommand::warning(message).to_string(),
        Level::Info => message.to_string(),
        Level::Debug | Level::Trace if verbose => format!("[{}] {}", level, message),
        Level::Debug | Level::Trace => WorkflowCommand::debug(message).to_string(),
    }
}

/// Initialize logging
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format(move |buf, record| {
            writeln!(
                buf,
                "{}",
                render(record.level(), &record.args().to_string(), verbose)
            )
        });

    let own_level = if verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    for module in OWN_CRATES {
        builder.filter_module(module, own_level);
    }

    builder.parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
