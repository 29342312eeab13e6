//! Upload plugin façade
//!
//! Validates calls from the application layer, guards the interactive picker
//! flow with a single pending-call latch, and maps upload outcomes into the
//! `{success, cancelled, files}` response shape.

use bridge_traits::picker::{ImagePicker, PickerData, PickerOptions, PickerResult, PickerResultCode};
use core_runtime::config::PluginConfig;
use core_runtime::logging::strip_path;
use provider_uploadcare::{ClientConfig, UploadcareClient};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, instrument, warn};

use crate::data_uri::decode_data_uri;
use crate::error::{PluginError, Result};
use crate::types::{ConfigureRequest, DataUriRequest, UploadOptions, UploadResult};

/// The caller waiting on the picker flow currently in flight.
struct PendingCall {
    /// Identifies the `open_picker` call that took the latch.
    launch: u64,
    responder: oneshot::Sender<Result<UploadResult>>,
    max_file_size: Option<u64>,
}

struct PluginInner {
    client: UploadcareClient,
    picker: Arc<dyn ImagePicker>,
    picker_defaults: PickerOptions,
    pending: Mutex<Option<PendingCall>>,
    launches: AtomicU64,
}

/// Upload plugin exposed to the application layer.
///
/// Cheap to clone; clones share the client configuration and the pending
/// picker call.
#[derive(Clone)]
pub struct UploadPlugin {
    inner: Arc<PluginInner>,
}

impl UploadPlugin {
    pub fn new(config: PluginConfig) -> Self {
        let client = UploadcareClient::new(
            config.http_client,
            config.resource_resolver,
            config.clock,
        );

        Self {
            inner: Arc::new(PluginInner {
                client,
                picker: config.image_picker,
                picker_defaults: config.picker_options,
                pending: Mutex::new(None),
                launches: AtomicU64::new(0),
            }),
        }
    }

    /// Configures (or reconfigures) the Uploadcare client.
    ///
    /// # Errors
    ///
    /// `InvalidArgument("publicKey is required")` when the key is missing or
    /// empty.
    #[instrument(skip(self, request))]
    pub async fn configure(&self, request: ConfigureRequest) -> Result<()> {
        let public_key = request
            .public_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PluginError::missing("publicKey"))?;

        let mut config = ClientConfig::new(public_key).with_debug(request.debug.unwrap_or(false));

        if let Some(secret_key) = request.secret_key {
            config = config.with_secret_key(secret_key);
        }
        if let Some(cdn_base) = request.cdn_base.filter(|base| !base.is_empty()) {
            config = config.with_cdn_base(cdn_base);
        }
        if let Some(api_base) = request.api_base.filter(|base| !base.is_empty()) {
            config = config.with_upload_base(api_base);
        }

        self.inner.client.configure(config).await;
        Ok(())
    }

    /// Shows the platform image picker and uploads the chosen image.
    ///
    /// Resolves once the picker flow finishes. Only one picker flow may be
    /// in flight; a second call fails with `AlreadyInProgress` until the
    /// first one completes, whatever its outcome.
    #[instrument(skip(self, options))]
    pub async fn open_picker(&self, options: UploadOptions) -> Result<UploadResult> {
        let (launch, receiver) = {
            let mut pending = self.inner.pending.lock().await;
            if pending.is_some() {
                warn!("Picker requested while another upload is pending");
                return Err(PluginError::AlreadyInProgress);
            }

            let launch = self.inner.launches.fetch_add(1, Ordering::Relaxed) + 1;
            let (responder, receiver) = oneshot::channel();
            *pending = Some(PendingCall {
                launch,
                responder,
                max_file_size: options.max_file_size_bytes,
            });
            (launch, receiver)
        };

        if options.multiple == Some(true) {
            warn!(
                max_files = ?options.max_files,
                "Multiple selection is not supported, picking a single image"
            );
        }

        let picker_options = options.picker_options(&self.inner.picker_defaults);
        let plugin = self.clone();

        tokio::spawn(async move {
            debug!(launch, mime_types = ?picker_options.mime_types, "Launching image picker");
            match plugin.inner.picker.pick_image(picker_options).await {
                Ok(result) => {
                    if let Some(pending) = plugin.take_pending(Some(launch)).await {
                        plugin.finish(pending, result).await;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "Image picker failed to launch");
                    if let Some(pending) = plugin.take_pending(Some(launch)).await {
                        deliver(
                            pending,
                            Err(PluginError::PickerUnavailable(err.to_string())),
                        );
                    }
                }
            }
        });

        receiver
            .await
            .unwrap_or_else(|_| Err(PluginError::UploadFailed(String::new())))
    }

    /// Completes the pending picker call with the platform's result.
    ///
    /// A call with no picker flow pending is ignored, so late or duplicate
    /// deliveries are harmless. The latch is released before any upload
    /// starts. Once a result has been delivered here, whatever the picker
    /// launched for the same call later returns is dropped.
    pub async fn handle_picker_result(&self, result: PickerResult) {
        if let Some(pending) = self.take_pending(None).await {
            self.finish(pending, result).await;
        }
    }

    /// Releases the latch and hands back its call.
    ///
    /// With a `launch` id, only the call that launch created is taken; a
    /// picker finishing after its call was completed some other way must not
    /// touch a newer call.
    async fn take_pending(&self, launch: Option<u64>) -> Option<PendingCall> {
        let mut pending = self.inner.pending.lock().await;
        let current = pending.as_ref().map(|call| call.launch);
        match (current, launch) {
            (None, _) => {
                debug!(?launch, "Picker result arrived with no pending call, ignoring");
                None
            }
            (Some(current), Some(launch)) if current != launch => {
                debug!(launch, current, "Stale picker result, ignoring");
                None
            }
            _ => pending.take(),
        }
    }

    async fn finish(&self, pending: PendingCall, result: PickerResult) {
        let outcome = match result {
            PickerResult {
                code: PickerResultCode::Cancelled,
                ..
            }
            | PickerResult { data: None, .. } => {
                info!("Image picker cancelled");
                Ok(UploadResult::cancelled())
            }
            PickerResult {
                data: Some(PickerData { resource: None }),
                ..
            } => Err(PluginError::NoImageSelected),
            PickerResult {
                data: Some(PickerData {
                    resource: Some(handle),
                }),
                ..
            } => {
                info!(resource = %strip_path(handle.as_str()), "Image picked, uploading");
                self.inner
                    .client
                    .upload_from_handle(&handle, pending.max_file_size)
                    .await
                    .map(UploadResult::uploaded)
                    .map_err(PluginError::from)
            }
        };

        if let Err(err) = &outcome {
            warn!(error = %err, "Picker upload failed");
        }

        deliver(pending, outcome);
    }

    /// `true` while a picker flow holds the latch.
    pub async fn is_picker_pending(&self) -> bool {
        self.inner.pending.lock().await.is_some()
    }

    /// Decodes a data URI and uploads it.
    ///
    /// Not subject to the picker latch; may run alongside a picker flow.
    #[instrument(skip(self, request), fields(file_name = ?request.file_name))]
    pub async fn upload_data_uri(&self, request: DataUriRequest) -> Result<UploadResult> {
        let data_uri = request
            .data_uri
            .filter(|value| !value.is_empty())
            .ok_or_else(|| PluginError::missing("dataUri"))?;
        let file_name = request
            .file_name
            .filter(|value| !value.is_empty())
            .ok_or_else(|| PluginError::missing("fileName"))?;

        let decoded = decode_data_uri(&data_uri)?;
        debug!(bytes = decoded.data.len(), mime_type = ?decoded.mime_type, "Decoded data URI");

        let file = self
            .inner
            .client
            .upload_bytes(decoded.data, &file_name, decoded.mime_type.as_deref())
            .await
            .map_err(|err| {
                warn!(error = %err, "Data URI upload failed");
                PluginError::from(err)
            })?;

        Ok(UploadResult::uploaded(file))
    }

    /// Dispatches a call by method name with JSON arguments, for bridge
    /// runtimes that marshal calls as JSON.
    ///
    /// `null` arguments are treated as an empty object.
    pub async fn handle_call(&self, method: &str, args: Value) -> Result<Value> {
        match method {
            "configure" => {
                self.configure(parse_args(args)?).await?;
                Ok(Value::Object(serde_json::Map::new()))
            }
            "openUploader" | "openPicker" => to_json(self.open_picker(parse_args(args)?).await?),
            "uploadDataUri" => to_json(self.upload_data_uri(parse_args(args)?).await?),
            other => Err(PluginError::UnknownMethod(other.to_string())),
        }
    }
}

fn deliver(pending: PendingCall, outcome: Result<UploadResult>) {
    let launch = pending.launch;
    if pending.responder.send(outcome).is_err() {
        debug!(launch, "Picker caller went away before the result was delivered");
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| PluginError::InvalidRequest(e.to_string()))
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| PluginError::UploadFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
    use bridge_traits::picker::{PickedResource, ResourceHandle, ResourceResolver};
    use serde_json::json;
    use std::sync::Mutex as StdMutex;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct OfflineHttpClient;

    #[async_trait]
    impl HttpClient for OfflineHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Err(BridgeError::OperationFailed("offline".to_string()))
        }
    }

    struct CancellingPicker;

    #[async_trait]
    impl ImagePicker for CancellingPicker {
        async fn pick_image(&self, _options: PickerOptions) -> BridgeResult<PickerResult> {
            Ok(PickerResult::cancelled())
        }
    }

    struct BrokenPicker;

    #[async_trait]
    impl ImagePicker for BrokenPicker {
        async fn pick_image(&self, _options: PickerOptions) -> BridgeResult<PickerResult> {
            Err(BridgeError::NotAvailable("no display".to_string()))
        }
    }

    struct NoResolver;

    #[async_trait]
    impl ResourceResolver for NoResolver {
        async fn resolve(&self, handle: &ResourceHandle) -> BridgeResult<PickedResource> {
            Err(BridgeError::ResourceNotFound(handle.to_string()))
        }
    }

    fn plugin_with(picker: Arc<dyn ImagePicker>) -> UploadPlugin {
        let config = PluginConfig::builder()
            .http_client(Arc::new(OfflineHttpClient))
            .image_picker(picker)
            .resource_resolver(Arc::new(NoResolver))
            .build()
            .unwrap();
        UploadPlugin::new(config)
    }

    #[tokio::test]
    async fn test_configure_requires_public_key() {
        let plugin = plugin_with(Arc::new(CancellingPicker));

        let err = plugin.configure(ConfigureRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "publicKey is required");

        let err = plugin.configure(ConfigureRequest::new("")).await.unwrap_err();
        assert_eq!(err.to_string(), "publicKey is required");
    }

    #[tokio::test]
    async fn test_configure_accepts_whitespace_public_key() {
        let plugin = plugin_with(Arc::new(CancellingPicker));
        plugin.configure(ConfigureRequest::new("  ")).await.unwrap();

        let config = plugin.inner.client.current_config().await.unwrap();
        assert_eq!(config.public_key, "  ");
    }

    #[tokio::test]
    async fn test_configure_applies_overrides() {
        let plugin = plugin_with(Arc::new(CancellingPicker));
        let request = ConfigureRequest {
            cdn_base: Some("https://cdn.example.com".to_string()),
            api_base: Some("https://upload.example.com".to_string()),
            ..ConfigureRequest::new("demopublickey").with_secret_key("")
        };
        plugin.configure(request).await.unwrap();

        let config = plugin.inner.client.current_config().await.unwrap();
        assert_eq!(config.cdn_base, "https://cdn.example.com");
        assert_eq!(config.upload_base, "https://upload.example.com");
        assert_eq!(config.secret_key(), None);
    }

    #[tokio::test]
    async fn test_cancelled_picker_resolves_and_releases() {
        let plugin = plugin_with(Arc::new(CancellingPicker));

        let result = plugin.open_picker(UploadOptions::default()).await.unwrap();
        assert_eq!(result, UploadResult::cancelled());
        assert!(!plugin.is_picker_pending().await);
    }

    #[tokio::test]
    async fn test_picker_launch_failure_rejects_and_releases() {
        let plugin = plugin_with(Arc::new(BrokenPicker));

        let err = plugin.open_picker(UploadOptions::default()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not open image picker: Bridge capability not available: no display"
        );
        assert!(!plugin.is_picker_pending().await);
    }

    #[tokio::test]
    async fn test_stale_launch_does_not_take_newer_call() {
        let plugin = plugin_with(Arc::new(CancellingPicker));
        let (responder, mut receiver) = oneshot::channel();
        *plugin.inner.pending.lock().await = Some(PendingCall {
            launch: 2,
            responder,
            max_file_size: None,
        });

        assert!(plugin.take_pending(Some(1)).await.is_none());
        assert!(plugin.is_picker_pending().await);

        let pending = plugin.take_pending(Some(2)).await.unwrap();
        deliver(pending, Err(PluginError::NoImageSelected));
        assert_eq!(receiver.try_recv().unwrap(), Err(PluginError::NoImageSelected));
        assert!(!plugin.is_picker_pending().await);
    }

    /// Records the message of every event that reaches the subscriber.
    #[derive(Clone, Default)]
    struct MessageLog(Arc<StdMutex<Vec<String>>>);

    impl<S: tracing::Subscriber> Layer<S> for MessageLog {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            struct Message<'a>(&'a mut Vec<String>);

            impl Visit for Message<'_> {
                fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                    if field.name() == "message" {
                        self.0.push(format!("{:?}", value));
                    }
                }
            }

            if let Ok(mut messages) = self.0.lock() {
                event.record(&mut Message(&mut messages));
            }
        }
    }

    #[test]
    fn test_delivery_to_departed_caller_is_logged() {
        let log = MessageLog::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let (responder, receiver) = oneshot::channel();
        drop(receiver);
        deliver(
            PendingCall {
                launch: 1,
                responder,
                max_file_size: None,
            },
            Err(PluginError::PickerUnavailable("no display".to_string())),
        );

        let messages = log.0.lock().unwrap();
        assert_eq!(
            messages.as_slice(),
            ["Picker caller went away before the result was delivered"]
        );
    }

    #[tokio::test]
    async fn test_result_without_pending_call_is_ignored() {
        let plugin = plugin_with(Arc::new(CancellingPicker));
        plugin
            .handle_picker_result(PickerResult::picked(ResourceHandle::new("/tmp/a.png")))
            .await;
        assert!(!plugin.is_picker_pending().await);
    }

    #[tokio::test]
    async fn test_data_uri_validation_order() {
        let plugin = plugin_with(Arc::new(CancellingPicker));

        let err = plugin
            .upload_data_uri(DataUriRequest {
                data_uri: Some(String::new()),
                file_name: Some("a.png".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "dataUri is required");

        let err = plugin
            .upload_data_uri(DataUriRequest {
                data_uri: Some("data:image/png;base64,aGk=".to_string()),
                file_name: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "fileName is required");
    }

    #[tokio::test]
    async fn test_data_uri_before_configure_is_not_configured() {
        let plugin = plugin_with(Arc::new(CancellingPicker));
        let err = plugin
            .upload_data_uri(DataUriRequest::new("data:image/png;base64,aGk=", "a.png"))
            .await
            .unwrap_err();
        assert_eq!(err, PluginError::NotConfigured);
    }

    #[tokio::test]
    async fn test_transport_failure_passes_through() {
        let plugin = plugin_with(Arc::new(CancellingPicker));
        plugin.configure(ConfigureRequest::new("k")).await.unwrap();

        let err = plugin
            .upload_data_uri(DataUriRequest::new("data:image/png;base64,aGk=", "a.png"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PluginError::UploadFailed("Bridge operation failed: offline".to_string())
        );
    }

    #[tokio::test]
    async fn test_handle_call_dispatch() {
        let plugin = plugin_with(Arc::new(CancellingPicker));

        let configured = plugin
            .handle_call("configure", json!({"publicKey": "demopublickey"}))
            .await
            .unwrap();
        assert_eq!(configured, json!({}));

        let cancelled = plugin.handle_call("openUploader", Value::Null).await.unwrap();
        assert_eq!(cancelled, json!({"success": false, "cancelled": true, "files": []}));

        let err = plugin.handle_call("deleteFile", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Method not implemented: deleteFile");

        let err = plugin
            .handle_call("uploadDataUri", json!({"dataUri": 5}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_REQUEST");
    }
}
