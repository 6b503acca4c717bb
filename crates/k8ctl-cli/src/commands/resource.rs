//! Read-only resource commands.
//!
//! Pods, jobs, cronjobs, ingresses, services, configmaps and secrets all
//! share the same list/describe surface; only the resource kind differs.

use std::io::Write;

use k8ctl_proto::ResourceKind;

use crate::cli::{ResourceCommands, response_format};
use crate::client::Dispatcher;
use crate::error::CliError;
use crate::output::write_message;

/// Handler for a list/describe resource command.
pub struct ResourceCommand<'a> {
    dispatcher: &'a Dispatcher,
    kind: ResourceKind,
}

impl<'a> ResourceCommand<'a> {
    /// Creates a handler for one resource kind.
    #[must_use]
    pub const fn new(dispatcher: &'a Dispatcher, kind: ResourceKind) -> Self {
        Self { dispatcher, kind }
    }

    /// Executes a resource subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        command: &ResourceCommands,
    ) -> Result<(), CliError> {
        let envelope = match command {
            ResourceCommands::List { namespace, format } => {
                self.dispatcher
                    .list(self.kind, namespace, response_format(*format))
                    .await?
            }
            ResourceCommands::Describe { name, namespace } => {
                self.dispatcher.describe(self.kind, name, namespace).await?
            }
        };

        write_message(out, &envelope)
    }
}
