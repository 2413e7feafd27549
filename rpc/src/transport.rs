//! Request/response transports for node calls.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RpcError;

/// One request, one response.
///
/// `params` is always a JSON object; the transport adds the action name in
/// whatever way its wire format needs. The returned value is the node's
/// `result` payload.
pub trait Transport: Send + Sync {
    fn call(&self, action: &str, params: Value) -> Result<Value, RpcError>;
}

/// Blocking HTTP JSON-RPC transport.
///
/// Each call is `POST node_url` with body `{"action": <name>, ...params}`.
/// The node replies with `{"result": ...}` or `{"error": "<message>"}`.
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    node_url: String,
}

impl HttpTransport {
    /// Default whole-request timeout.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default connection timeout.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(node_url: impl Into<String>) -> Result<Self, RpcError> {
        Self::with_timeouts(
            node_url,
            Self::DEFAULT_REQUEST_TIMEOUT,
            Self::DEFAULT_CONNECT_TIMEOUT,
        )
    }

    pub fn with_timeouts(
        node_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, RpcError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| RpcError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
        })
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }
}

impl Transport for HttpTransport {
    fn call(&self, action: &str, params: Value) -> Result<Value, RpcError> {
        let body = request_body(action, params)?;

        let response = self
            .http
            .post(&self.node_url)
            .json(&body)
            .send()
            .map_err(|e| RpcError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(action, status = status.as_u16(), "node rejected request");
            return Err(RpcError::Http(status.as_u16()));
        }

        let json: Value = response
            .json()
            .map_err(|e| RpcError::InvalidResponse(format!("invalid JSON: {e}")))?;
        debug!(action, "node call completed");
        extract_result(json)
    }
}

/// Merge the action name into the parameter object.
pub(crate) fn request_body(action: &str, params: Value) -> Result<Value, RpcError> {
    let mut body = match params {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    body.as_object_mut()
        .ok_or_else(|| RpcError::InvalidResponse("params must be a JSON object".into()))?
        .insert("action".to_string(), Value::String(action.to_string()));
    Ok(body)
}

/// Unwrap a node reply into its `result` payload.
pub(crate) fn extract_result(json: Value) -> Result<Value, RpcError> {
    if let Some(err) = json.get("error") {
        let message = err
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(RpcError::Node(message));
    }
    match json.get("result") {
        Some(Value::Null) | None => Err(RpcError::EmptyResponse),
        Some(result) => Ok(result.clone()),
    }
}
