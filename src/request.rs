use crate::constants::SUPPORTED_MIME_TYPES;
use crate::error::ApiError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request that passed validation. Credentials are opaque and only
/// forwarded.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub openai_api_key: String,
    pub pinata_jwt: String,
    pub image_url: String,
    pub image_mimetype: String,
    pub pinata_gateway: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub image_url: String,
    pub prompt: String,
    pub openai_image_url: String,
}

/// Reads a field the way a loosely typed client would send it: falsy values
/// (absent, null, false, 0, "") are missing, other non-strings are taken as
/// their JSON text.
fn required(body: &Value, name: &str) -> Result<String, ApiError> {
    match body.get(name) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(ApiError::MissingField),
        Some(Value::String(value)) if value.is_empty() => Err(ApiError::MissingField),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => {
            Err(ApiError::MissingField)
        }
        Some(other) => Ok(other.to_string()),
    }
}

pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

pub fn is_valid_mime_type(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime_type)
}

pub fn validate_request_body(body: &[u8]) -> Result<IncomingRequest, ApiError> {
    if body.is_empty() {
        return Err(ApiError::MissingBody);
    }

    let raw: Value = serde_json::from_slice(body).map_err(|_| ApiError::MalformedJson)?;
    // `null` has no fields to read at all; any other non-object simply
    // lacks them.
    if raw.is_null() {
        return Err(ApiError::MalformedJson);
    }

    let request = IncomingRequest {
        openai_api_key: required(&raw, "openaiApiKey")?,
        pinata_jwt: required(&raw, "pinataJwt")?,
        image_url: required(&raw, "imageUrl")?,
        image_mimetype: required(&raw, "imageMimetype")?,
        pinata_gateway: required(&raw, "pinataGateway")?,
    };

    if !is_valid_url(&request.image_url) {
        return Err(ApiError::InvalidUrl);
    }

    if !is_valid_mime_type(&request.image_mimetype) {
        return Err(ApiError::UnsupportedMimeType);
    }

    Ok(request)
}
