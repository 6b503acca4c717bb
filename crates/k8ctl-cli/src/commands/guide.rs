//! Guide command implementation.

use std::io::Write;

use crate::client::Dispatcher;
use crate::error::CliError;
use crate::output::write_message;

/// Fetches the usage guide from the server.
pub struct GuideCommand<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> GuideCommand<'a> {
    /// Creates a new guide command handler.
    #[must_use]
    pub const fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Executes the guide command.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn execute<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let envelope = self.dispatcher.guide().await?;
        write_message(out, &envelope)
    }
}
