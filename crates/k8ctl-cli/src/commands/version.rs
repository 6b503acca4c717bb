//! Version command implementation.

use std::io::Write;

use k8ctl_proto::APPLICATION_NAME;

use crate::error::CliError;

/// Version string of the client, e.g. `k8ctl version 1.0.0`.
#[must_use]
pub fn version_string() -> String {
    format!("{APPLICATION_NAME} version {}", env!("CARGO_PKG_VERSION"))
}

/// Prints the client version. Needs neither config nor a server.
#[derive(Debug, Default, Clone, Copy)]
pub struct VersionCommand;

impl VersionCommand {
    /// Executes the version command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        writeln!(out, "{}", version_string())?;
        Ok(())
    }
}
