//! HTTP dispatcher for the k8ctl operations server.
//!
//! The [`Dispatcher`] owns the cluster endpoint and one HTTP client. Each
//! operation is a single stateless round trip: look the route up, build the
//! request, send it, decode the envelope. There are no retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use k8ctl_cli::client::Dispatcher;
//! use k8ctl_config::Endpoint;
//! use k8ctl_proto::{ResourceKind, ResponseFormat};
//!
//! # async fn example() -> Result<(), k8ctl_cli::CliError> {
//! let endpoint = Endpoint::new("https://k8ctl.nyc.example.com", "token");
//! let dispatcher = Dispatcher::new(&endpoint)?;
//! let pods = dispatcher.list(ResourceKind::Pod, "dev", ResponseFormat::Text).await?;
//! println!("{}", pods.message);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use k8ctl_config::Endpoint;
use k8ctl_proto::{
    DeployRequest, Envelope, Operation, ResourceKind, ResponseFormat, RestartRequest,
    RollbackRequest, route,
};
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::CliError;
use crate::request::{self, Call};

/// Dispatches logical operations as authenticated, versioned HTTP requests.
#[derive(Clone)]
pub struct Dispatcher {
    base: Url,
    token: String,
    http: reqwest::Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base", &self.base.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher for an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::RequestBuild`] if the base URL is malformed or
    /// cannot carry a path, and [`CliError::Transport`] if the HTTP client
    /// cannot be initialised.
    pub fn new(endpoint: &Endpoint) -> Result<Self, CliError> {
        let base = Url::parse(endpoint.url()).map_err(|e| {
            CliError::RequestBuild(format!("invalid base URL '{}': {e}", endpoint.url()))
        })?;
        if base.cannot_be_a_base() {
            return Err(CliError::RequestBuild(format!(
                "invalid base URL '{}': cannot carry a path",
                endpoint.url()
            )));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| CliError::Transport(e.to_string()))?;

        Ok(Self {
            base,
            token: endpoint.token().to_string(),
            http,
            timeout: None,
        })
    }

    /// Applies a deadline to every request sent by this dispatcher.
    ///
    /// Without one, a request waits as long as the server takes.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds the HTTP request for a call without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::RequestBuild`] if the pair has no route, a
    /// required parameter is missing, or the request cannot be assembled.
    pub fn build(&self, call: &Call<'_>) -> Result<reqwest::Request, CliError> {
        let route = route(call.kind, call.operation).ok_or_else(|| {
            CliError::RequestBuild(format!("no route for {} {}", call.operation, call.kind))
        })?;
        request::validate(route, call)?;

        let url = request::build_url(&self.base, route, call)?;
        let (headers, _) = request::standard_headers(route.kind, &self.token)?;

        let mut builder = self
            .http
            .request(request::http_method(route.method), url)
            .headers(headers);
        if let Some(body) = &call.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| CliError::RequestBuild(e.to_string()))
    }

    /// Sends a call and decodes the response envelope.
    ///
    /// The HTTP status code is not inspected: any body that decodes as an
    /// envelope is the answer, and its `status` decides success.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Transport`] on network failure,
    /// [`CliError::Decode`] if the body is not an envelope, and
    /// [`CliError::Application`] if the envelope reports failure.
    pub async fn dispatch(&self, call: &Call<'_>) -> Result<Envelope, CliError> {
        let request = self.build(call)?;
        let request_id = request
            .headers()
            .get(request::REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        debug!(
            method = %request.method(),
            url = %request.url(),
            request_id = %request_id,
            "Sending request"
        );

        let response = self
            .http
            .execute(request)
            .await
            .map_err(transport_error)?;
        let http_status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        trace!(
            request_id = %request_id,
            http_status = http_status.as_u16(),
            bytes = body.len(),
            "Received response"
        );

        let envelope = Envelope::from_slice(&body).inspect_err(|e| {
            warn!(
                request_id = %request_id,
                http_status = http_status.as_u16(),
                error = %e,
                "Undecodable response"
            );
        })?;

        if !envelope.is_success() {
            return Err(CliError::Application {
                status: envelope.status,
                message: envelope.message,
            });
        }
        Ok(envelope)
    }

    // ========================================================================
    // Resource Operations
    // ========================================================================

    /// Lists every resource of a kind in a namespace.
    pub async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
        format: ResponseFormat,
    ) -> Result<Envelope, CliError> {
        let call = Call::new(kind, Operation::List)
            .namespace(namespace)
            .format(format);
        self.dispatch(&call).await
    }

    /// Shows the details of one resource.
    pub async fn describe(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
    ) -> Result<Envelope, CliError> {
        let call = Call::new(kind, Operation::Describe)
            .name(name)
            .namespace(namespace);
        self.dispatch(&call).await
    }

    // ========================================================================
    // Release Operations
    // ========================================================================

    /// Deploys or refreshes a release.
    pub async fn deploy(
        &self,
        name: &str,
        version_tag: &str,
        namespace: &str,
        memo: &str,
    ) -> Result<Envelope, CliError> {
        let call = Call::new(ResourceKind::Release, Operation::Deploy)
            .namespace(namespace)
            .payload(&DeployRequest {
                memo: memo.to_string(),
                name: name.to_string(),
                namespace: namespace.to_string(),
                version_tag: version_tag.to_string(),
            })?;
        self.dispatch(&call).await
    }

    /// Shows the status of a release.
    pub async fn status(
        &self,
        release: &str,
        namespace: &str,
        format: ResponseFormat,
    ) -> Result<Envelope, CliError> {
        let call = Call::new(ResourceKind::Release, Operation::Status)
            .name(release)
            .namespace(namespace)
            .format(format);
        self.dispatch(&call).await
    }

    /// Deletes a release.
    pub async fn delete(&self, release: &str, namespace: &str) -> Result<Envelope, CliError> {
        let call = Call::new(ResourceKind::Release, Operation::Delete)
            .name(release)
            .namespace(namespace);
        self.dispatch(&call).await
    }

    /// Rolls a release back. An empty revision lets the server choose.
    pub async fn rollback(
        &self,
        release: &str,
        namespace: &str,
        revision: &str,
    ) -> Result<Envelope, CliError> {
        let call = Call::new(ResourceKind::Release, Operation::Rollback)
            .name(release)
            .namespace(namespace)
            .payload(&RollbackRequest {
                revision: revision.to_string(),
            })?;
        self.dispatch(&call).await
    }

    /// Shows the revision history of a release.
    pub async fn history(
        &self,
        release: &str,
        namespace: &str,
        format: ResponseFormat,
    ) -> Result<Envelope, CliError> {
        let call = Call::new(ResourceKind::Release, Operation::History)
            .name(release)
            .namespace(namespace)
            .format(format);
        self.dispatch(&call).await
    }

    // ========================================================================
    // Deployment Operations
    // ========================================================================

    /// Restarts every pod of a deployment.
    pub async fn restart(&self, deployment: &str, namespace: &str) -> Result<Envelope, CliError> {
        let call = Call::new(ResourceKind::Deployment, Operation::Restart)
            .name(deployment)
            .namespace(namespace)
            .payload(&RestartRequest {
                namespace: namespace.to_string(),
            })?;
        self.dispatch(&call).await
    }

    /// Fetches the usage guide.
    pub async fn guide(&self) -> Result<Envelope, CliError> {
        self.dispatch(&Call::new(ResourceKind::Guide, Operation::Guide))
            .await
    }
}

fn transport_error(err: reqwest::Error) -> CliError {
    if err.is_timeout() {
        CliError::Transport(format!("request timed out: {err}"))
    } else {
        CliError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT, AUTHORIZATION};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(&Endpoint::new("https://ops.example.com", "tok")).expect("valid endpoint")
    }

    fn body_of(request: &reqwest::Request) -> Option<&[u8]> {
        request.body().and_then(reqwest::Body::as_bytes)
    }

    #[test]
    fn malformed_base_url_is_build_error() {
        let err = Dispatcher::new(&Endpoint::new("not a url", "tok")).expect_err("bad url");
        assert!(matches!(err, CliError::RequestBuild(_)));
        let err = Dispatcher::new(&Endpoint::new("mailto:ops@example.com", "tok"))
            .expect_err("cannot be a base");
        assert!(matches!(err, CliError::RequestBuild(_)));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let debug = format!("{:?}", dispatcher());
        assert!(!debug.contains("tok"));
        assert!(debug.contains("ops.example.com"));
    }

    #[test]
    fn builds_every_route() {
        let dispatcher = dispatcher();
        for route in k8ctl_proto::routes() {
            let mut call = Call::new(route.kind, route.operation)
                .name("thing")
                .namespace("dev");
            if matches!(
                route.method,
                k8ctl_proto::Method::Post | k8ctl_proto::Method::Put | k8ctl_proto::Method::Patch
            ) {
                call.body = Some(b"{}".to_vec());
            }
            let request = dispatcher.build(&call).expect("request builds");

            assert_eq!(request.method().as_str(), route.method.as_str());
            let expected_path = route.template.replace("{name}", "thing");
            assert_eq!(request.url().path(), expected_path);
            assert_eq!(
                request.headers()[ACCEPT],
                k8ctl_proto::media_type(route.kind).as_str()
            );
            assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok");
        }
    }

    #[test]
    fn accept_version_follows_kind() {
        let dispatcher = dispatcher();
        let call = Call::new(ResourceKind::Configmap, Operation::List).namespace("dev");
        let request = dispatcher.build(&call).expect("request builds");
        let accept = request.headers()[ACCEPT].to_str().expect("ascii");
        assert_eq!(
            accept,
            format!(
                "application/vnd.k8ctl-server.configmaps-{}+json",
                ResourceKind::Configmap.api_version()
            )
        );
    }

    #[test]
    fn request_id_differs_between_builds() {
        let dispatcher = dispatcher();
        let call = Call::new(ResourceKind::Guide, Operation::Guide);
        let first = dispatcher.build(&call).expect("request builds");
        let second = dispatcher.build(&call).expect("request builds");
        let id = |r: &reqwest::Request| r.headers()[request::REQUEST_ID_HEADER].clone();
        assert_ne!(id(&first), id(&second));
    }

    #[test]
    fn unknown_pair_is_build_error() {
        let call = Call::new(ResourceKind::Pod, Operation::Rollback).namespace("dev");
        let err = dispatcher().build(&call).expect_err("no such route");
        assert!(matches!(err, CliError::RequestBuild(ref msg) if msg.contains("no route")));
    }

    #[test]
    fn get_routes_carry_no_body() {
        let call = Call::new(ResourceKind::Release, Operation::History)
            .name("rel1")
            .namespace("dev");
        let request = dispatcher().build(&call).expect("request builds");
        assert!(request.body().is_none());
    }

    #[test]
    fn rollback_body_is_json() {
        let call = Call::new(ResourceKind::Release, Operation::Rollback)
            .name("rel1")
            .namespace("dev")
            .payload(&RollbackRequest {
                revision: String::new(),
            })
            .expect("payload");
        let request = dispatcher().build(&call).expect("request builds");
        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(request.url().path(), "/releases/rel1/rollback");
        assert_eq!(body_of(&request), Some(&br#"{"revision":""}"#[..]));
    }

    #[test]
    fn timeout_is_attached_when_set() {
        let dispatcher = dispatcher().with_timeout(Duration::from_secs(3));
        let request = dispatcher
            .build(&Call::new(ResourceKind::Guide, Operation::Guide))
            .expect("request builds");
        assert_eq!(request.timeout(), Some(&Duration::from_secs(3)));

        let request = self::dispatcher()
            .build(&Call::new(ResourceKind::Guide, Operation::Guide))
            .expect("request builds");
        assert!(request.timeout().is_none());
    }
}
