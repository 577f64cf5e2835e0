//! Forward `/api` and `/media` to the REST backend
//!
//! The browser only ever talks to the console's own origin, so the backend needs no CORS setup.

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderName, Method, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use fitdesk_shared::urls;
use thiserror::Error;
use tracing::{debug, warn};

/// Uploads (videos in particular) are far larger than axum's default body limit
pub const UPLOAD_LIMIT: usize = 512 * 1024 * 1024;

/// Request headers passed on to the backend
const FORWARDED_REQUEST: &[HeaderName] = &[AUTHORIZATION, CONTENT_TYPE, CACHE_CONTROL, ACCEPT];
/// Response headers passed back to the browser
const FORWARDED_RESPONSE: &[HeaderName] = &[CONTENT_TYPE, CACHE_CONTROL];

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Unable to build the upstream http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),
}
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        warn!("{self}");
        (StatusCode::BAD_GATEWAY, "The content backend is not reachable.").into_response()
    }
}

/// One backend base url together with the client used to reach it
#[derive(Debug, Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base_url: String,
}
impl Upstream {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ProxyError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// The backend url for a request to `uri`, which is relative to the proxy's mount point
pub fn upstream_url(base_url: &str, uri: &Uri) -> String {
    let url = urls::join(base_url, uri.path());
    match uri.query() {
        Some(query) if !query.is_empty() => format!("{url}?{query}"),
        _ => url,
    }
}

fn copy_headers(from: &HeaderMap, names: &[HeaderName]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in names {
        for value in from.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}

/// Axum handler passing a request through to the backend and its answer back
pub async fn forward(
    State(upstream): State<Upstream>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&upstream.base_url, &uri);
    debug!("Forwarding {method} {url}");
    let reply = upstream
        .client
        .request(method, &url)
        .headers(copy_headers(&headers, FORWARDED_REQUEST))
        .body(body)
        .send()
        .await
        .map_err(ProxyError::Upstream)?;

    let status = reply.status();
    let headers = copy_headers(reply.headers(), FORWARDED_RESPONSE);
    let body = reply.bytes().await.map_err(ProxyError::Upstream)?;
    debug!("{url} answered {status}");
    Ok((status, headers, body).into_response())
}
