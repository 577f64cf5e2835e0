//! Talking to the content backend
//!
//! All requests go through an [`ApiClient`], which attaches the session token and signs the user
//! out when the backend rejects it. The actual HTTP exchange is delegated to a [`Transport`], so
//! the browser can plug in `fetch` and tests can plug in scripted replies.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::form::FormError;
use crate::payload::{Part, Payload};
use crate::record::ContentRecord;
use crate::schema::ResourceSchema;
use crate::session::{LoginError, LoginReply, LoginRequest, Session, SessionContext};
use crate::urls;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}
impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<F> {
    Empty,
    Json(Value),
    /// Sent as `multipart/form-data`; the transport sets the boundary
    Multipart(Vec<Part<F>>),
}
impl<F> From<Payload<F>> for RequestBody<F> {
    fn from(value: Payload<F>) -> Self {
        match value {
            Payload::Json(json) => Self::Json(json),
            Payload::Multipart(parts) => Self::Multipart(parts),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest<F> {
    pub method: Method,
    pub url: String,
    /// Token for the `Authorization: Bearer` header
    pub bearer: Option<String>,
    pub body: RequestBody<F>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}
impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    /// The view that issued the request went away
    #[error("The request was aborted")]
    Aborted,
}

/// Sends one request and hands back the raw response
#[async_trait(?Send)]
pub trait Transport {
    /// Handle of a file picked by the user
    type File: Clone;

    async fn send(&self, request: ApiRequest<Self::File>) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Transport(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A successful status with `success: false` in the body
    #[error("{message}")]
    Rejected { message: String },
    /// The session is gone; the user has been signed out
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] FormError),
    /// The view waiting for this response no longer exists
    #[error("The request was cancelled")]
    Detached,
}
impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Network(msg) => Self::Transport(msg),
            TransportError::Aborted => Self::Detached,
        }
    }
}

/// The `message` field of an error body, if there is one
fn message_of(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

fn default_true() -> bool {
    true
}

/// What create, update and delete answer with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MutationReply {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
impl Default for MutationReply {
    fn default() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}
impl MutationReply {
    fn from_body(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Pull the records of `schema` out of a list response
///
/// Accepted shapes are a bare array, an object holding the collection under the schema's
/// collection key or under `data`, and an object holding a single record under either key. A
/// missing or `null` collection is empty.
pub fn extract_collection(
    schema: &ResourceSchema,
    value: Value,
) -> Result<Vec<ContentRecord>, ApiError> {
    let items = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let found = map
                .remove(schema.collection_key)
                .or_else(|| map.remove("data"));
            match found {
                Some(Value::Array(items)) => items,
                Some(record @ Value::Object(_)) => vec![record],
                Some(Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(ApiError::Decode(format!(
                        "`{}` is neither a list nor a record",
                        schema.collection_key
                    )))
                }
            }
        }
        _ => {
            return Err(ApiError::Decode(format!(
                "Expected a collection of {}",
                schema.label
            )))
        }
    };
    items
        .into_iter()
        .map(ContentRecord::from_value)
        .collect::<Result<_, _>>()
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Client for the content backend
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    session: SessionContext,
}
impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The same client on top of another transport
    pub fn rebind<U>(&self, transport: U) -> ApiClient<U>
    where
        U: Transport<File = T::File>,
    {
        ApiClient {
            transport,
            base_url: self.base_url.clone(),
            session: self.session.clone(),
        }
    }

    async fn exchange(
        &self,
        method: Method,
        path: &str,
        bearer: Option<String>,
        body: RequestBody<T::File>,
    ) -> Result<Value, ApiError> {
        let url = urls::join(&self.base_url, path);
        debug!(%method, %url, "Sending request.");
        let sent_token = bearer.is_some();
        let response = self
            .transport
            .send(ApiRequest {
                method,
                url: url.clone(),
                bearer,
                body,
            })
            .await?;

        if response.status == 401 && sent_token {
            warn!(%method, %url, "Request was not authorized.");
            self.session.expire();
            return Err(ApiError::Unauthorized {
                message: message_of(&response.body)
                    .unwrap_or_else(|| "Your session has expired. Please log in again.".into()),
            });
        }
        if !response.is_success() {
            warn!(%method, %url, status = response.status, "Request failed.");
            return Err(ApiError::Status {
                status: response.status,
                message: message_of(&response.body).unwrap_or_else(|| {
                    format!("Request failed with status {}", response.status)
                }),
            });
        }

        let value = if response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?
        };
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(ApiError::Rejected {
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("The server rejected the request")
                    .to_string(),
            });
        }
        Ok(value)
    }

    async fn authorized(
        &self,
        method: Method,
        path: &str,
        body: RequestBody<T::File>,
    ) -> Result<Value, ApiError> {
        self.exchange(method, path, self.session.token(), body)
            .await
    }

    /// Every record of `schema`
    pub async fn fetch_collection(
        &self,
        schema: &ResourceSchema,
    ) -> Result<Vec<ContentRecord>, ApiError> {
        let value = self
            .authorized(Method::Get, schema.endpoint, RequestBody::Empty)
            .await?;
        extract_collection(schema, value)
    }

    pub async fn create(
        &self,
        schema: &ResourceSchema,
        payload: Payload<T::File>,
    ) -> Result<MutationReply, ApiError> {
        let value = self
            .authorized(Method::Post, schema.endpoint, payload.into())
            .await?;
        Ok(MutationReply::from_body(value))
    }

    pub async fn update(
        &self,
        schema: &ResourceSchema,
        id: &str,
        payload: Payload<T::File>,
    ) -> Result<MutationReply, ApiError> {
        let value = self
            .authorized(Method::Put, &schema.item_endpoint(id), payload.into())
            .await?;
        Ok(MutationReply::from_body(value))
    }

    pub async fn delete(
        &self,
        schema: &ResourceSchema,
        id: &str,
    ) -> Result<MutationReply, ApiError> {
        let value = self
            .authorized(Method::Delete, &schema.item_endpoint(id), RequestBody::Empty)
            .await?;
        Ok(MutationReply::from_body(value))
    }

    /// Exchange credentials for a session
    ///
    /// Only administrators get a session; a rejected login does not touch the current one.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, LoginError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| LoginError::Failed(ApiError::Decode(e.to_string())))?;
        let value = self
            .exchange(
                Method::Post,
                urls::LOGIN_ENDPOINT,
                None,
                RequestBody::Json(body),
            )
            .await
            .map_err(LoginError::Failed)?;
        let reply: LoginReply = serde_json::from_value(value)
            .map_err(|e| LoginError::Failed(ApiError::Decode(e.to_string())))?;
        self.session.establish(reply)
    }
}
