//! Deployment command implementation.

use std::io::Write;

use k8ctl_proto::ResourceKind;

use crate::cli::{DeploymentCommands, response_format};
use crate::client::Dispatcher;
use crate::error::CliError;
use crate::output::write_message;

/// Handler for the deployments command.
pub struct DeploymentCommand<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> DeploymentCommand<'a> {
    /// Creates a new deployment command handler.
    #[must_use]
    pub const fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Executes a deployment subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        command: &DeploymentCommands,
    ) -> Result<(), CliError> {
        let envelope = match command {
            DeploymentCommands::List { namespace, format } => {
                self.dispatcher
                    .list(ResourceKind::Deployment, namespace, response_format(*format))
                    .await?
            }
            DeploymentCommands::Describe { name, namespace } => {
                self.dispatcher
                    .describe(ResourceKind::Deployment, name, namespace)
                    .await?
            }
            DeploymentCommands::Restart { name, namespace } => {
                self.dispatcher.restart(name, namespace).await?
            }
        };

        write_message(out, &envelope)
    }
}
