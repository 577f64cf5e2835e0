use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::api::{ApiRequest, ApiResponse, Transport, TransportError};

/// A file handle as far as the tests are concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload(pub &'static str);

/// Records every request and answers with scripted replies, in order
#[derive(Default)]
pub struct MockTransport {
    pub requests: RefCell<Vec<ApiRequest<Upload>>>,
    replies: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
}
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn reply_raw(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest<Upload>> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    type File = Upload;

    async fn send(&self, request: ApiRequest<Upload>) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply left".into())))
    }
}

/// Shares one mock between a client and the test inspecting it
#[async_trait(?Send)]
impl<'a> Transport for &'a MockTransport {
    type File = Upload;

    async fn send(&self, request: ApiRequest<Upload>) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}
