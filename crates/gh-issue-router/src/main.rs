use anyhow::Result;
use gh_actions_runtime::{
    issue, ActionsContext, CommandParams, EnvInputs, FileOutputs, OutputSink, WorkflowCommand,
};
use gh_client::{connect, TokenResolver};
use gh_issue_router::orchestrator::output;
use gh_issue_router::{logger, Orchestrator, RunError, RunOutcome, SourceContext};
use gh_issue_router_config::{defaults, input, parse_bool, ActionConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // An invalid value is reported by the full config parse below
    let debug = parse_bool(&EnvInputs, input::DEBUG, defaults::DEBUG).unwrap_or(defaults::DEBUG);
    logger::init(debug);

    let mut outputs = FileOutputs::from_env();
    match run(&mut outputs).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            issue(&WorkflowCommand::Error {
                message: format!("{:#}", err),
                params: CommandParams::titled("Issue transfer failed"),
            });
            ExitCode::FAILURE
        }
    }
}

async fn run(sink: &mut impl OutputSink) -> Result<()> {
    let config = ActionConfig::from_inputs(&EnvInputs).map_err(RunError::from)?;
    let actions = ActionsContext::from_env();
    if let Some(ref event_name) = actions.event_name {
        log::debug!("Triggered by {} event", event_name);
    }

    let token = TokenResolver::new(config.token.clone()).resolve()?;
    issue(&WorkflowCommand::AddMask {
        value: token.clone(),
    });
    let client = connect(token, actions.api_url.as_deref())?;

    let context = match config.test {
        Some(ref test) => {
            let (owner, name) = actions.repository_slug()?;
            log::info!("Test mode: acting on {} with label '{}'", test.issue_id, test.label_name);
            SourceContext::from_test_override(&client, &owner, &name, test).await?
        }
        None => SourceContext::from_event(&actions.event()?).map_err(RunError::from)?,
    };

    issue(&WorkflowCommand::GroupStart {
        title: "Route and transfer issue".to_string(),
    });
    let result = Orchestrator::new(&client, &config).run(&context).await;
    issue(&WorkflowCommand::GroupEnd);

    match result {
        Ok(RunOutcome::NotRouted { label }) => {
            issue(&WorkflowCommand::Notice {
                message: match label {
                    Some(label) => {
                        format!("Label '{}' does not match the router, nothing to do", label)
                    }
                    None => "No trigger label, nothing to do".to_string(),
                },
                params: CommandParams::titled("Issue not routed"),
            });
            Ok(())
        }
        Ok(RunOutcome::Transferred { outputs, warnings }) => {
            for warning in warnings {
                log::warn!("{}", warning);
            }
            outputs.write(sink)?;
            Ok(())
        }
        Err(failure) => {
            log::debug!("Run failed in state {:?}", failure.state);
            for warning in &failure.warnings {
                log::warn!("{}", warning);
            }
            if let Err(err) = failure.outputs.write(sink) {
                log::warn!("Failed to write outputs: {}", err);
            }
            if let Some(status) = failure.error.status_code() {
                if let Err(err) = sink.set_output(output::STATUS, &status.to_string()) {
                    log::warn!("Failed to write outputs: {}", err);
                }
            }
            if let RunError::Bridge(ref bridge) = failure.error {
                if let Some(ref name) = bridge.bridge {
                    log::warn!("Bridge repository {} was left behind", name);
                }
            }
            Err(failure.error.into())
        }
    }
}
