//! HTTP client
//!
//! The single point every domain call flows through: resolves the base
//! origin, attaches the bearer header when a valid token is stored,
//! negotiates content type (JSON vs multipart), tags each request with a
//! correlation id and timing metadata, and classifies every failure into the
//! uniform [`ApiError`] shape.
//!
//! No automatic retries happen at this layer; retry policy, when wanted,
//! belongs to callers.
//!
//! ## Table of Contents
//! - **RequestDescriptor**: per-call diagnostic metadata
//! - **RequestBody**: JSON / multipart / empty payloads
//! - **HttpClient**: the request engine

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorCode, Result};
use crate::token::TokenManager;

/// Callback fired after a 401 tears down the stored session.
///
/// The UI layer uses this seam to redirect to the sign-in surface when
/// running interactively; non-interactive embeddings leave it unset.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Per-call diagnostic metadata.
///
/// Created immediately before dispatch, used only for logging and timing;
/// never alters the wire payload.
#[derive(Debug)]
pub struct RequestDescriptor {
    /// Correlation id attached to every log line for the call
    pub correlation_id: Uuid,
    /// HTTP method
    pub method: Method,
    /// Request path relative to the base origin
    pub path: String,
    /// Dispatch start time
    pub started_at: Instant,
}

impl RequestDescriptor {
    fn start(method: &Method, path: &str) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            method: method.clone(),
            path: path.to_string(),
            started_at: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Outgoing request payload.
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON body; sent with `Content-Type: application/json`
    Json(Value),
    /// Multipart body; no explicit content type so the transport sets the
    /// boundary
    Multipart(Form),
}

/// The configured request engine wrapping all network calls.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: TokenManager,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl HttpClient {
    /// Create a client from configuration and a token manager
    pub fn new(config: &ClientConfig, tokens: TokenManager) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            tokens,
            on_unauthorized: None,
        })
    }

    /// Register the unauthorized callback
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    /// The token manager backing this client
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// The resolved base origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.dispatch(Method::GET, path, &[], RequestBody::Empty).await
    }

    /// GET with query parameters
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.dispatch(Method::GET, path, query, RequestBody::Empty).await
    }

    /// POST a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.dispatch(Method::POST, path, &[], Self::json_body(body)?).await
    }

    /// POST with no body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.dispatch(Method::POST, path, &[], RequestBody::Empty).await
    }

    /// POST a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        self.dispatch(Method::POST, path, &[], RequestBody::Multipart(form)).await
    }

    /// PUT a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.dispatch(Method::PUT, path, &[], Self::json_body(body)?).await
    }

    /// DELETE a resource
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.dispatch(Method::DELETE, path, &[], RequestBody::Empty).await
    }

    fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::config(format!("unserializable request body: {}", e)))?;
        Ok(RequestBody::Json(value))
    }

    /// Dispatch a request and classify the outcome.
    ///
    /// A successful response with no body (`204 No Content` or an empty
    /// `200`) deserializes as an empty object, so acknowledgement-typed
    /// calls treat it as the success it is.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<T> {
        let desc = RequestDescriptor::start(&method, path);

        let mut request = self.client.request(method, self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.tokens.bearer() {
            request = request.bearer_auth(token);
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_failure(&desc, e)),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(self.classify_failure(&desc, status, response).await);
        }

        debug!(
            correlation_id = %desc.correlation_id,
            method = %desc.method,
            path = %desc.path,
            status = status.as_u16(),
            elapsed_ms = desc.elapsed().as_millis() as u64,
            "request completed"
        );

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    correlation_id = %desc.correlation_id,
                    path = %desc.path,
                    error = %e,
                    "response body could not be read"
                );
                return Err(ApiError::network());
            }
        };

        if bytes.is_empty() {
            return serde_json::from_value(Value::Object(serde_json::Map::new()))
                .map_err(|e| self.shape_failure(&desc, status, &e));
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| self.shape_failure(&desc, status, &e))
    }

    fn shape_failure(
        &self,
        desc: &RequestDescriptor,
        status: StatusCode,
        error: &serde_json::Error,
    ) -> ApiError {
        warn!(
            correlation_id = %desc.correlation_id,
            path = %desc.path,
            error = %error,
            "response body did not match the expected shape"
        );
        ApiError::new(
            ErrorCode::ApiError,
            format!("unexpected response shape: {}", error),
        )
        .with_status(status.as_u16())
    }

    fn transport_failure(&self, desc: &RequestDescriptor, error: reqwest::Error) -> ApiError {
        if error.is_builder() {
            warn!(
                correlation_id = %desc.correlation_id,
                path = %desc.path,
                error = %error,
                "request could not be prepared"
            );
            return ApiError::config(error.to_string());
        }

        warn!(
            correlation_id = %desc.correlation_id,
            method = %desc.method,
            path = %desc.path,
            elapsed_ms = desc.elapsed().as_millis() as u64,
            error = %error,
            "no response received"
        );
        ApiError::network()
    }

    async fn classify_failure(
        &self,
        desc: &RequestDescriptor,
        status: StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let data = response.json::<Value>().await.ok();
        let server_message = data.as_ref().and_then(extract_server_message);
        let transport_message = status.canonical_reason().map(str::to_string);

        let error = ApiError::from_status(status.as_u16(), server_message, transport_message, data);

        warn!(
            correlation_id = %desc.correlation_id,
            method = %desc.method,
            path = %desc.path,
            status = status.as_u16(),
            code = %error.code,
            elapsed_ms = desc.elapsed().as_millis() as u64,
            "request failed"
        );

        if error.is_unauthorized() {
            self.handle_unauthorized();
        }
        error
    }

    fn handle_unauthorized(&self) {
        self.tokens.clear_session();
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }
}

fn extract_server_message(data: &Value) -> Option<String> {
    for key in ["message", "error"] {
        if let Some(message) = data.get(key).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }
    None
}
