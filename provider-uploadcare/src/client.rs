//! Uploadcare Upload API client
//!
//! Holds the process-wide client configuration and performs direct uploads
//! through the injected `HttpClient`.

use bridge_traits::http::{
    FormPart, HttpClient, HttpMethod, HttpRequest, HttpResponse, ProgressCallback,
    TransferProgress,
};
use bridge_traits::picker::{ResourceHandle, ResourceResolver};
use bridge_traits::time::Clock;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, UploadcareError};
use crate::signing::UploadSignature;
use crate::types::{BaseUploadResponse, ClientConfig, FileDescriptor, FileInfo};

/// Content type sent when the caller cannot name one
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Uploadcare client
///
/// Unconfigured until [`configure`](Self::configure) is called; every
/// upload before that fails with [`UploadcareError::NotConfigured`].
/// Uploads are sent once with `UPLOADCARE_STORE=1` so files persist.
///
/// # Example
///
/// ```ignore
/// let client = UploadcareClient::new(http_client, resolver, clock);
/// client.configure(ClientConfig::new("demopublickey")).await;
/// let file = client.upload_bytes(bytes, "cat.png", Some("image/png")).await?;
/// println!("{}", file.cdn_url);
/// ```
pub struct UploadcareClient {
    http_client: Arc<dyn HttpClient>,
    resolver: Arc<dyn ResourceResolver>,
    clock: Arc<dyn Clock>,
    config: RwLock<Option<ClientConfig>>,
}

impl UploadcareClient {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        resolver: Arc<dyn ResourceResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http_client,
            resolver,
            clock,
            config: RwLock::new(None),
        }
    }

    /// Replaces the active configuration. Last write wins.
    pub async fn configure(&self, config: ClientConfig) {
        if config.debug {
            debug!(
                public_key = %config.public_key,
                upload_base = %config.upload_base,
                "Configuring Uploadcare client"
            );
        }
        info!(access = ?config.access(), debug = config.debug, "Uploadcare client configured");

        *self.config.write().await = Some(config);
    }

    pub async fn is_configured(&self) -> bool {
        self.config.read().await.is_some()
    }

    /// Snapshot of the active configuration
    pub async fn current_config(&self) -> Result<ClientConfig> {
        self.config
            .read()
            .await
            .clone()
            .ok_or(UploadcareError::NotConfigured)
    }

    /// Uploads an in-memory payload.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn upload_bytes(
        &self,
        data: Bytes,
        file_name: &str,
        mime_type: Option<&str>,
    ) -> Result<FileDescriptor> {
        let config = self.current_config().await?;
        let mime_type = mime_type.unwrap_or(DEFAULT_MIME_TYPE);
        self.store(&config, data, file_name, mime_type).await
    }

    /// Resolves a picker handle and uploads its contents.
    ///
    /// Payloads larger than `max_file_size` are rejected before any request
    /// is made. A resource without a name is uploaded as
    /// `image-<unix seconds>.jpg`.
    #[instrument(skip(self, handle))]
    pub async fn upload_from_handle(
        &self,
        handle: &ResourceHandle,
        max_file_size: Option<u64>,
    ) -> Result<FileDescriptor> {
        let config = self.current_config().await?;
        let resource = self.resolver.resolve(handle).await?;

        let size = resource.data.len() as u64;
        if let Some(limit) = max_file_size {
            if size > limit {
                return Err(UploadcareError::FileTooLarge { size, limit });
            }
        }

        let file_name = resource
            .file_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("image-{}.jpg", self.clock.unix_timestamp()));
        let mime_type = resource
            .mime_type
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        self.store(&config, resource.data, &file_name, &mime_type)
            .await
    }

    async fn store(
        &self,
        config: &ClientConfig,
        data: Bytes,
        file_name: &str,
        mime_type: &str,
    ) -> Result<FileDescriptor> {
        let mut parts = vec![
            FormPart::text("UPLOADCARE_PUB_KEY", config.public_key.as_str()),
            FormPart::text("UPLOADCARE_STORE", "1"),
        ];

        if let Some(secret_key) = config.secret_key() {
            let signed = UploadSignature::generate(secret_key, self.clock.unix_timestamp())?;
            parts.push(FormPart::text("signature", signed.signature));
            parts.push(FormPart::text("expire", signed.expire.to_string()));
        }

        parts.push(FormPart::file("file", file_name, mime_type, data));

        let mut request = HttpRequest::new(HttpMethod::Post, config.upload_endpoint("base/"))
            .header("Accept", "application/json")
            .multipart(parts);

        if config.debug {
            request = request.on_progress(progress_logger(file_name.to_string()));
        }

        let response = self.http_client.execute(request).await?;
        let uploaded: BaseUploadResponse = parse_response(response)?;

        debug!(uuid = %uploaded.file, "File stored");

        match self.file_info(config, &uploaded.file).await {
            Ok(info) => Ok(FileDescriptor::from_info(info, &uploaded.file, config)),
            Err(err) => {
                warn!(uuid = %uploaded.file, error = %err, "File info unavailable, using upload result only");
                Ok(FileDescriptor::from_uuid(uploaded.file, config))
            }
        }
    }

    async fn file_info(&self, config: &ClientConfig, uuid: &str) -> Result<FileInfo> {
        let url = format!(
            "{}?pub_key={}&file_id={}",
            config.upload_endpoint("info/"),
            urlencoding::encode(&config.public_key),
            urlencoding::encode(uuid)
        );

        let request =
            HttpRequest::new(HttpMethod::Get, url).header("Accept", "application/json");
        let response = self.http_client.execute(request).await?;
        parse_response(response)
    }
}

fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    if !response.is_success() {
        let message = response
            .text()
            .ok()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        return Err(UploadcareError::Api {
            status_code: response.status,
            message,
        });
    }

    serde_json::from_slice(&response.body).map_err(|e| UploadcareError::Parse(e.to_string()))
}

fn progress_logger(file_name: String) -> ProgressCallback {
    Arc::new(move |progress: TransferProgress| {
        if progress.content_length > 0 {
            debug!(
                file = %file_name,
                bytes_written = progress.bytes_written,
                content_length = progress.content_length,
                percent = progress.percent(),
                "Upload progress"
            );
        }
    })
}
