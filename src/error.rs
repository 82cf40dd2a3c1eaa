use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Which of the two downloads a fetch failure belongs to. The same failure
/// is the caller's fault for the input image and ours for the generated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStage {
    Input,
    Generated,
}

impl ImageStage {
    fn label(self) -> &'static str {
        match self {
            ImageStage::Input => "input",
            ImageStage::Generated => "generated",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ImageStage::Input => "Input",
            ImageStage::Generated => "Generated",
        }
    }

    fn status(self) -> StatusCode {
        match self {
            ImageStage::Input => StatusCode::BAD_REQUEST,
            ImageStage::Generated => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ImageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Remote responded with status {0}")]
    Status(u16),

    #[error("Remote returned an empty body")]
    EmptyBody,

    #[error("Body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API key header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid tool arguments: {0}")]
    ToolArguments(#[from] serde_json::Error),

    #[error("No image was generated")]
    NoImage,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Pinata API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed Pinata response: missing data.cid")]
    MalformedResponse,

    #[error("Failed to upload file buffer to Pinata: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request body is required")]
    MissingBody,

    #[error("Invalid JSON in request body")]
    MalformedJson,

    #[error("Missing required fields")]
    MissingField,

    #[error("Invalid image URL")]
    InvalidUrl,

    #[error("Unsupported image MIME type")]
    UnsupportedMimeType,

    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("Failed to fetch {stage} image")]
    FetchFailed { stage: ImageStage },

    #[error("{} image too large", .stage.title())]
    PayloadTooLarge { stage: ImageStage },

    #[error("Failed to generate image description{}", cause_suffix(.0))]
    DescriptionFailed(#[source] Option<OpenAiError>),

    #[error("Failed to generate image: {0}")]
    GenerationFailed(#[source] OpenAiError),

    #[error("Failed to upload to Pinata: {0}")]
    UploadFailed(#[from] UploadError),

    #[error("{0}")]
    Unhandled(String),
}

fn cause_suffix(cause: &Option<OpenAiError>) -> String {
    cause
        .as_ref()
        .map(|e| format!(": {}", e))
        .unwrap_or_default()
}

impl ApiError {
    pub fn from_fetch(stage: ImageStage, err: FetchError) -> Self {
        match err {
            FetchError::TooLarge { .. } => ApiError::PayloadTooLarge { stage },
            other => {
                log::warn!("Fetching {} image failed: {}", stage, other);
                ApiError::FetchFailed { stage }
            }
        }
    }

    /// Client-side body failures (e.g. over the size limit) keep the
    /// extractor's status; anything else is unhandled.
    pub fn from_body_rejection(rejection: BytesRejection) -> Self {
        let status = rejection.status();
        if status.is_client_error() {
            ApiError::BodyRejected {
                status,
                message: rejection.body_text(),
            }
        } else {
            ApiError::Unhandled(rejection.body_text())
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingBody
            | ApiError::MalformedJson
            | ApiError::MissingField
            | ApiError::InvalidUrl
            | ApiError::UnsupportedMimeType => StatusCode::BAD_REQUEST,
            ApiError::BodyRejected { status, .. } => *status,
            ApiError::FetchFailed { stage } | ApiError::PayloadTooLarge { stage } => {
                stage.status()
            }
            ApiError::DescriptionFailed(_)
            | ApiError::GenerationFailed(_)
            | ApiError::UploadFailed(_)
            | ApiError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Error processing request: {}", self);
        } else {
            log::warn!("Rejected request: {}", self);
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
