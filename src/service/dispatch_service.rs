//! Dispatch service: turns one inbound frame into one outbound frame.

use crate::config::GatewayConfig;
use crate::domain::{CommandSpec, Dispatch, RequestKind};
use crate::error::GatewayError;

use super::process_runner::ProcessRunner;

/// Stateless coordinator between the websocket layer and the external
/// tools.
///
/// Every request follows the same path: classify the frame → pick the
/// configured command → run it → return its stdout verbatim.
#[derive(Debug, Clone)]
pub struct DispatchService {
    randomize_command: CommandSpec,
    simulate_command: CommandSpec,
    runner: ProcessRunner,
}

impl DispatchService {
    /// Creates a service with explicit commands and runner.
    #[must_use]
    pub fn new(
        randomize_command: CommandSpec,
        simulate_command: CommandSpec,
        runner: ProcessRunner,
    ) -> Self {
        Self {
            randomize_command,
            simulate_command,
            runner,
        }
    }

    /// Builds the service from the gateway configuration, including the
    /// optional process limit and timeout.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let runner = ProcessRunner::new()
            .with_limit(config.process_limit())
            .with_timeout(config.command_timeout());
        Self::new(
            config.randomize_command.clone(),
            config.simulate_command.clone(),
            runner,
        )
    }

    /// Returns the command configured for a request kind.
    #[must_use]
    pub const fn command_for(&self, kind: RequestKind) -> &CommandSpec {
        match kind {
            RequestKind::Randomization => &self.randomize_command,
            RequestKind::Simulation => &self.simulate_command,
        }
    }

    /// Handles one inbound text frame and returns the text to send back.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the frame cannot be classified or the
    /// tool cannot be run. A tool that exits non-zero is not an error.
    pub async fn handle_frame(&self, text: &str) -> Result<String, GatewayError> {
        tracing::debug!(request = %text, "inbound request");
        let dispatch = Dispatch::from_frame(text)?;
        self.execute(&dispatch).await
    }

    /// Runs the tool selected by an already classified request.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the tool cannot be run.
    pub async fn execute(&self, dispatch: &Dispatch) -> Result<String, GatewayError> {
        let command = self.command_for(dispatch.kind);
        match dispatch.simulation_id {
            Some(id) => tracing::info!(kind = dispatch.kind.as_str(), simulation_id = %id, "dispatching"),
            None => tracing::info!(kind = dispatch.kind.as_str(), "dispatching"),
        }
        if let Some(input) = &dispatch.stdin {
            tracing::debug!(input = %input, "child input");
        }

        let output = self.runner.run(command, dispatch.stdin.as_deref()).await?;
        if output.looks_failed() {
            tracing::warn!(
                kind = dispatch.kind.as_str(),
                exit_code = ?output.exit_code,
                "tool reported failure; relaying stdout anyway"
            );
        }

        tracing::debug!(output = %output.stdout, "outbound response");
        Ok(output.stdout)
    }
}
