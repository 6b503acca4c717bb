//! Output for CLI commands.
//!
//! The server renders every message itself, so output is the envelope's
//! `message` written verbatim.

use std::io::Write;

use k8ctl_proto::Envelope;

use crate::error::CliError;

/// Writes the message of a successful envelope followed by a newline.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_message<W: Write>(writer: &mut W, envelope: &Envelope) -> Result<(), CliError> {
    writeln!(writer, "{}", envelope.message)?;
    Ok(())
}
