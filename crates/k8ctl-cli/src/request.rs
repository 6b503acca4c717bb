//! Request building and header assembly.
//!
//! A [`Call`] names a (kind, operation) pair plus its parameters. Building
//! it against the route table yields the URL and the standard header set;
//! the dispatcher turns those into a `reqwest::Request`.

use k8ctl_proto::payload::to_body;
use k8ctl_proto::{Method, Operation, ResourceKind, ResponseFormat, Route, media_type};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::error::CliError;

/// Correlation header carried by every request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// One logical operation and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    /// Resource kind addressed.
    pub kind: ResourceKind,
    /// Operation performed.
    pub operation: Operation,
    /// Resource name, for routes with a `{name}` segment.
    pub name: Option<&'a str>,
    /// Namespace; required for every kind except the guide.
    pub namespace: Option<&'a str>,
    /// Rendering requested from the server.
    pub format: ResponseFormat,
    /// Serialized JSON body.
    pub body: Option<Vec<u8>>,
}

impl<'a> Call<'a> {
    /// Starts a call with no parameters.
    #[must_use]
    pub const fn new(kind: ResourceKind, operation: Operation) -> Self {
        Self {
            kind,
            operation,
            name: None,
            namespace: None,
            format: ResponseFormat::Text,
            body: None,
        }
    }

    /// Sets the resource name.
    #[must_use]
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Sets the response format.
    #[must_use]
    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Serializes `payload` as the JSON body.
    pub fn payload<T: Serialize>(mut self, payload: &T) -> Result<Self, CliError> {
        self.body = Some(to_body(payload)?);
        Ok(self)
    }
}

/// Checks that the call carries what its route needs.
pub(crate) fn validate(route: &Route, call: &Call<'_>) -> Result<(), CliError> {
    if route.kind != ResourceKind::Guide && call.namespace.is_none_or(str::is_empty) {
        return Err(CliError::RequestBuild(format!(
            "namespace is required for {} {}",
            route.kind, route.operation
        )));
    }

    if route.needs_name() && call.name.is_none_or(str::is_empty) {
        return Err(CliError::RequestBuild(format!(
            "a resource name is required for {} {}",
            route.kind, route.operation
        )));
    }

    let takes_body = matches!(route.method, Method::Post | Method::Put | Method::Patch);
    match (takes_body, call.body.is_some()) {
        (true, false) => Err(CliError::RequestBuild(format!(
            "{} {} requires a request body",
            route.method, route.template
        ))),
        (false, true) => Err(CliError::RequestBuild(format!(
            "{} {} does not take a request body",
            route.method, route.template
        ))),
        _ => Ok(()),
    }
}

/// Expands the route against the base URL.
///
/// The name is pushed as one escaped path segment, so `/` and `%` in a name
/// cannot change the route. Query keys are always `n` then `f`; `f` is sent
/// even when empty.
pub(crate) fn build_url(base: &Url, route: &Route, call: &Call<'_>) -> Result<Url, CliError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    if matches!(call.name, Some("." | "..")) {
        return Err(CliError::RequestBuild(format!(
            "invalid resource name '{}'",
            call.name.unwrap_or_default()
        )));
    }

    let segments = route.segments(call.name)?;
    url.path_segments_mut()
        .map_err(|()| CliError::RequestBuild(format!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(segments);

    if route.query.namespace || route.query.format {
        let mut pairs = url.query_pairs_mut();
        if route.query.namespace {
            pairs.append_pair("n", call.namespace.unwrap_or_default());
        }
        if route.query.format {
            pairs.append_pair("f", call.format.query_value());
        }
    }

    Ok(url)
}

/// Assembles the header set shared by every request.
///
/// Returns the headers and the fresh request id placed in them.
pub(crate) fn standard_headers(
    kind: ResourceKind,
    token: &str,
) -> Result<(HeaderMap, Uuid), CliError> {
    let request_id = Uuid::new_v4();

    let accept = HeaderValue::from_str(&media_type(kind))
        .map_err(|e| CliError::RequestBuild(format!("invalid accept header: {e}")))?;
    let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| CliError::RequestBuild("bearer token contains invalid characters".into()))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::with_capacity(4);
    headers.insert(ACCEPT, accept);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(REQUEST_ID_HEADER),
        HeaderValue::from_str(&request_id.to_string())
            .map_err(|e| CliError::RequestBuild(format!("invalid request id: {e}")))?,
    );

    Ok((headers, request_id))
}

/// Maps a route method onto the HTTP client's method type.
pub(crate) fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}
