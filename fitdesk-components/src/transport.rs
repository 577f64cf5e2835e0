//! Sending api requests from the browser with `fetch`

use async_trait::async_trait;
use fitdesk_shared::api::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};
use fitdesk_shared::payload::Part;
use reqwasm::http::Request;
use send_wrapper::SendWrapper;
use web_sys::wasm_bindgen::JsValue;
use web_sys::{AbortSignal, File, FormData, Url};

/// A file picked in a file input, together with what the form shows about it
///
/// [`SendWrapper`] is only ever accessed on the browser's single thread.
#[derive(Debug, Clone)]
pub struct PickedFile {
    file: SendWrapper<File>,
    pub name: String,
    pub size: f64,
    /// Object url for previewing the file before it is uploaded
    pub preview: Option<String>,
}
impl PickedFile {
    pub fn new(file: File) -> Self {
        let preview = Url::create_object_url_with_blob(&file).ok();
        Self {
            name: file.name(),
            size: file.size(),
            preview,
            file: SendWrapper::new(file),
        }
    }

    pub fn file(&self) -> &File {
        &self.file
    }

}

/// Free an object url created for a preview
pub fn revoke_preview(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        tracing::debug!("Unable to revoke {url}: {e:?}");
    }
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::Network(format!("{value:?}"))
}

/// Build the `multipart/form-data` body; the browser picks the boundary
fn form_data(parts: &[Part<PickedFile>]) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(js_error)?;
    for part in parts {
        match part {
            Part::Text { name, value } => data.append_with_str(name, value),
            Part::File { name, file } => {
                data.append_with_blob_and_filename(name, file.file(), &file.name)
            }
        }
        .map_err(js_error)?;
    }
    Ok(data)
}

/// [`Transport`] on top of the browser's `fetch`
///
/// A transport created with [`BrowserTransport::scoped`] aborts its requests once the reactive
/// owner it was created in is cleaned up.
#[derive(Debug, Clone, Default)]
pub struct BrowserTransport {
    signal: Option<SendWrapper<AbortSignal>>,
}
impl BrowserTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "hydrate")]
    pub fn scoped() -> Self {
        use leptos::prelude::on_cleanup;

        match web_sys::AbortController::new() {
            Ok(controller) => {
                let signal = SendWrapper::new(controller.signal());
                let controller = SendWrapper::new(controller);
                on_cleanup(move || controller.abort());
                Self {
                    signal: Some(signal),
                }
            }
            Err(e) => {
                tracing::warn!("Unable to create an AbortController: {e:?}");
                Self::default()
            }
        }
    }

    /// Nothing is ever sent from the server, so there is nothing to abort
    #[cfg(not(feature = "hydrate"))]
    pub fn scoped() -> Self {
        Self::default()
    }

    fn aborted(&self) -> bool {
        self.signal.as_ref().is_some_and(|s| s.aborted())
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    type File = PickedFile;

    async fn send(&self, request: ApiRequest<PickedFile>) -> Result<ApiResponse, TransportError> {
        if self.aborted() {
            return Err(TransportError::Aborted);
        }
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .header("Cache-Control", "no-cache")
        .abort_signal(self.signal.as_deref());
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder
                .header("Content-Type", "application/json")
                .body(value.to_string()),
            RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(_) if self.aborted() => return Err(TransportError::Aborted),
            Err(e) => return Err(TransportError::Network(e.to_string())),
        };
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}
