//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{
        FormPart, FormValue, HttpClient, HttpMethod, HttpRequest, HttpResponse,
        ProgressCallback, TransferProgress,
    },
};
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Size of the chunks a body is streamed in when progress is requested
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Whole-request timeout, upload included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - Multipart form bodies
/// - Chunked body streaming when a progress callback is attached
///
/// Requests are sent exactly once; there is no retry at this layer.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(4)
            .user_agent(concat!("uploadcare-bridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BridgeError::OperationFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> Result<reqwest::RequestBuilder> {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.multipart(build_form(body.parts, request.progress)?);
        }

        Ok(req)
    }
}

/// Stream `data` in fixed-size chunks, reporting each chunk as it is handed
/// to the connection. Without a callback the body is sent in one piece.
fn progress_body(data: Bytes, progress: Option<ProgressCallback>) -> reqwest::Body {
    match progress {
        Some(callback) => reqwest::Body::wrap_stream(progress_stream(data, callback)),
        None => reqwest::Body::from(data),
    }
}

fn progress_stream(
    data: Bytes,
    callback: ProgressCallback,
) -> impl futures_util::Stream<Item = std::result::Result<Bytes, std::io::Error>> + Send + 'static
{
    let total = data.len() as u64;
    let chunks: Vec<Bytes> = (0..data.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| data.slice(start..(start + UPLOAD_CHUNK_SIZE).min(data.len())))
        .collect();

    let mut written = 0u64;
    futures_util::stream::iter(chunks).map(move |chunk| {
        written += chunk.len() as u64;
        callback(TransferProgress::new(written, total));
        Ok(chunk)
    })
}

fn build_form(parts: Vec<FormPart>, progress: Option<ProgressCallback>) -> Result<Form> {
    let mut form = Form::new();

    for part in parts {
        form = match part.value {
            FormValue::Text(text) => form.text(part.name, text),
            FormValue::File {
                file_name,
                mime_type,
                data,
            } => {
                let length = data.len() as u64;
                let body = progress_body(data, progress.clone());
                let file_part = Part::stream_with_length(body, length)
                    .file_name(file_name)
                    .mime_str(&mime_type)
                    .map_err(|e| {
                        BridgeError::OperationFailed(format!(
                            "Invalid content type '{}': {}",
                            mime_type, e
                        ))
                    })?;
                form.part(part.name, file_part)
            }
        };
    }

    Ok(form)
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = ?request.method, url = %request.url, "Executing HTTP request");

        let response = self.build_request(request)?.send().await.map_err(|e| {
            warn!(error = %e, "HTTP request failed");
            if e.is_timeout() {
                BridgeError::OperationFailed("Request timed out".to_string())
            } else if e.is_connect() {
                BridgeError::OperationFailed(format!("Connection failed: {}", e))
            } else {
                BridgeError::OperationFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| BridgeError::OperationFailed(e.to_string()))?;

        debug!(status, bytes = body.len(), "HTTP response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
