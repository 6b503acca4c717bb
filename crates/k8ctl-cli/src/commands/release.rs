//! Release command implementation.
//!
//! Handles listing, deploying, inspecting, deleting and rolling back helm
//! releases.

use std::io::Write;

use k8ctl_proto::ResourceKind;

use crate::cli::{ReleaseCommands, response_format};
use crate::client::Dispatcher;
use crate::error::CliError;
use crate::output::write_message;

/// Handler for the releases command.
pub struct ReleaseCommand<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ReleaseCommand<'a> {
    /// Creates a new release command handler.
    #[must_use]
    pub const fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Executes a release subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        command: &ReleaseCommands,
    ) -> Result<(), CliError> {
        let envelope = match command {
            ReleaseCommands::List { namespace, format } => {
                self.dispatcher
                    .list(ResourceKind::Release, namespace, response_format(*format))
                    .await?
            }
            ReleaseCommands::Deploy {
                chart,
                namespace,
                tag,
                memo,
            } => self.dispatcher.deploy(chart, tag, namespace, memo).await?,
            ReleaseCommands::Status {
                release,
                namespace,
                format,
            } => {
                self.dispatcher
                    .status(release, namespace, response_format(*format))
                    .await?
            }
            ReleaseCommands::Delete { release, namespace } => {
                self.dispatcher.delete(release, namespace).await?
            }
            ReleaseCommands::Rollback {
                release,
                namespace,
                revision,
            } => self.dispatcher.rollback(release, namespace, revision).await?,
            ReleaseCommands::History {
                release,
                namespace,
                format,
            } => {
                self.dispatcher
                    .history(release, namespace, response_format(*format))
                    .await?
            }
        };

        write_message(out, &envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use k8ctl_config::Endpoint;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn dispatcher_for(server: &MockServer) -> Dispatcher {
        Dispatcher::new(&Endpoint::new(server.uri(), "tok")).expect("dispatcher")
    }

    #[tokio::test]
    async fn history_prints_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/web-dev/history"))
            .and(query_param("n", "dev"))
            .and(query_param("f", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"status":"ok","message":"[{\"revision\":1}]"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server).await;
        let mut out = Vec::new();
        ReleaseCommand::new(&dispatcher)
            .execute(
                &mut out,
                &ReleaseCommands::History {
                    release: "web-dev".into(),
                    namespace: "dev".into(),
                    format: Some(Format::Json),
                },
            )
            .await
            .expect("history succeeds");

        assert_eq!(String::from_utf8(out).expect("utf8"), "[{\"revision\":1}]\n");
    }

    #[tokio::test]
    async fn deploy_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/releases"))
            .and(body_json(serde_json::json!({
                "memo": "a boring bug.",
                "name": "acme/app",
                "namespace": "dev",
                "versionTag": "k8-1.0.0-1234",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"status":"ok","message":"deployed"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server).await;
        let mut out = Vec::new();
        ReleaseCommand::new(&dispatcher)
            .execute(
                &mut out,
                &ReleaseCommands::Deploy {
                    chart: "acme/app".into(),
                    namespace: "dev".into(),
                    tag: "k8-1.0.0-1234".into(),
                    memo: "a boring bug.".into(),
                },
            )
            .await
            .expect("deploy succeeds");

        assert_eq!(out, b"deployed\n");
    }

    #[tokio::test]
    async fn failed_status_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/releases/ghost"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"status":"error","message":"release ghost not found"}"#),
            )
            .mount(&server)
            .await;

        let dispatcher = dispatcher_for(&server).await;
        let mut out = Vec::new();
        let err = ReleaseCommand::new(&dispatcher)
            .execute(
                &mut out,
                &ReleaseCommands::Delete {
                    release: "ghost".into(),
                    namespace: "dev".into(),
                },
            )
            .await
            .expect_err("server reported failure");

        assert!(matches!(
            err,
            CliError::Application { ref message, .. } if message == "release ghost not found"
        ));
        assert!(out.is_empty());
    }
}
