use crate::constants::{DEFAULT_PINATA_NETWORK, FALLBACK_CONTENT_TYPE};
use crate::error::UploadError;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct UploadOptions {
    /// Display name; defaults to the filename.
    pub name: Option<String>,
    /// `public` unless set.
    pub network: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PinataUploadResponse {
    data: Option<PinataFile>,
}

#[derive(Debug, Deserialize)]
struct PinataFile {
    cid: Option<String>,
}

/// Extension (with leading dot, lowercase) to MIME type for the image
/// formats Pinata uploads accept here.
pub fn image_mime_type(extension: &str) -> Option<&'static str> {
    match extension {
        ".jpg" | ".jpeg" => Some("image/jpeg"),
        ".png" => Some("image/png"),
        ".gif" => Some("image/gif"),
        ".webp" => Some("image/webp"),
        ".svg" => Some("image/svg+xml"),
        ".bmp" => Some("image/bmp"),
        _ => None,
    }
}

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

pub struct PinataUploader<'a> {
    client: &'a Client,
    jwt_token: &'a str,
    api_url: &'a str,
}

impl<'a> PinataUploader<'a> {
    pub fn new(client: &'a Client, jwt_token: &'a str, api_url: &'a str) -> Self {
        Self {
            client,
            jwt_token,
            api_url: api_url.trim_end_matches('/'),
        }
    }

    /// Uploads any file and returns its CID.
    pub async fn upload_file_buffer(
        &self,
        file_buffer: Vec<u8>,
        filename: &str,
        options: UploadOptions,
    ) -> Result<String, UploadError> {
        let display_name = options.name.unwrap_or_else(|| filename.to_string());
        let mime_type = options
            .content_type
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        let network = options
            .network
            .unwrap_or_else(|| DEFAULT_PINATA_NETWORK.to_string());

        let file_part = Part::bytes(file_buffer)
            .file_name(display_name.clone())
            .mime_str(&mime_type)?;
        let form = Form::new()
            .part("file", file_part)
            .text("network", network)
            .text("name", display_name.clone());

        let url = format!("{}/files", self.api_url);
        log::debug!("POST {} ({})", url, display_name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.jwt_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Pinata upload failed ({}): {}", status, error_text);
            return Err(UploadError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &error_text),
            });
        }

        let bytes = response.bytes().await?;
        let body: PinataUploadResponse =
            serde_json::from_slice(&bytes).map_err(|_| UploadError::MalformedResponse)?;
        body.data
            .and_then(|file| file.cid)
            .filter(|cid| !cid.is_empty())
            .ok_or(UploadError::MalformedResponse)
    }

    /// Uploads an image, deriving its content type from the extension.
    /// Unknown extensions are rejected before anything is sent.
    pub async fn upload_image_buffer(
        &self,
        image_buffer: Vec<u8>,
        filename: &str,
        options: UploadOptions,
    ) -> Result<String, UploadError> {
        let extension = file_extension(filename);
        let mime_type =
            image_mime_type(&extension).ok_or_else(|| UploadError::UnsupportedFormat(extension))?;

        self.upload_file_buffer(
            image_buffer,
            filename,
            UploadOptions {
                content_type: Some(mime_type.to_string()),
                ..options
            },
        )
        .await
    }
}

/// Most specific message available: body `error`, then body `message`,
/// then the status reason.
pub fn api_error_message(status: StatusCode, error_text: &str) -> String {
    let body = serde_json::from_str::<serde_json::Value>(error_text).ok();
    let field = |name: &str| {
        body.as_ref()
            .and_then(|body| body.get(name))
            .and_then(|value| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(text) if text.is_empty() => None,
                serde_json::Value::String(text) => Some(text.clone()),
                other => Some(other.to_string()),
            })
    };

    field("error")
        .or_else(|| field("message"))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown API error".to_string())
}
