use crate::constants::{
    DALLE_MODEL, DALLE_RESPONSE_FORMAT, DALLE_SIZE, PROMPT_ARGUMENT_DESCRIPTION,
    PROMPT_TOOL_DESCRIPTION, PROMPT_TOOL_NAME, VISION_INSTRUCTIONS, VISION_MAX_TOKENS,
    VISION_MODEL, VISION_TEMPERATURE,
};
use crate::error::OpenAiError;
use crate::images::{DalleApiResponse, OpenAiDalleRequestBody};
use crate::vision::{
    FunctionDefinition, ImageUrl, OpenAiVisionRequestBody, PromptArguments, Tool, ToolChoice,
    ToolChoiceFunction, VisionApiResponse, VisionContent, VisionMessageRole,
};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::Serialize;
use serde_json::json;

pub fn build_headers(api_key: &str) -> Result<HeaderMap, OpenAiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

pub fn create_spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{}}} {{msg}}", color)),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

pub fn encode_image(bytes: &[u8]) -> String {
    base64::encode(bytes)
}

pub fn build_vision_request(mime_type: &str, image_base64: &str) -> OpenAiVisionRequestBody {
    OpenAiVisionRequestBody {
        model: VISION_MODEL.to_string(),
        messages: vec![VisionMessageRole {
            role: "user".to_string(),
            content: vec![
                VisionContent::Text {
                    text: VISION_INSTRUCTIONS.to_string(),
                },
                VisionContent::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{};base64,{}", mime_type, image_base64),
                    },
                },
            ],
        }],
        tools: vec![Tool {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: PROMPT_TOOL_NAME.to_string(),
                description: PROMPT_TOOL_DESCRIPTION.to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "prompt": {
                            "type": "string",
                            "description": PROMPT_ARGUMENT_DESCRIPTION,
                        }
                    },
                    "required": ["prompt"],
                }),
            },
        }],
        tool_choice: ToolChoice {
            kind: "function".to_string(),
            function: ToolChoiceFunction {
                name: PROMPT_TOOL_NAME.to_string(),
            },
        },
        temperature: VISION_TEMPERATURE,
        max_tokens: VISION_MAX_TOKENS,
    }
}

pub fn build_dalle_request(prompt: &str) -> OpenAiDalleRequestBody {
    OpenAiDalleRequestBody {
        model: DALLE_MODEL.to_string(),
        prompt: prompt.to_string(),
        n: 1,
        size: DALLE_SIZE.to_string(),
        response_format: DALLE_RESPONSE_FORMAT.to_string(),
    }
}

/// Pulls the forced tool call's `prompt` argument out of a chat response.
/// A response without a tool call yields an empty string.
pub fn process_vision_response(api_response: VisionApiResponse) -> Result<String, OpenAiError> {
    let call = api_response.choices.into_iter().next().and_then(|choice| {
        choice
            .message
            .tool_calls
            .into_iter()
            .flatten()
            .find(|call| call.function.name == PROMPT_TOOL_NAME)
    });

    match call {
        Some(call) => {
            let arguments: PromptArguments = serde_json::from_str(&call.function.arguments)?;
            Ok(arguments.prompt.trim().to_string())
        }
        None => Ok(String::new()),
    }
}

pub fn process_dalle_response(api_response: DalleApiResponse) -> Result<String, OpenAiError> {
    api_response
        .data
        .into_iter()
        .next()
        .and_then(|image_gen| image_gen.url)
        .filter(|url| !url.is_empty())
        .ok_or(OpenAiError::NoImage)
}

pub async fn make_openai_request<B: Serialize>(
    client: &Client,
    api_key: &str,
    api_url: &str,
    request_body: &B,
) -> Result<reqwest::Response, OpenAiError> {
    let headers = build_headers(api_key)?;
    log::debug!("POST {}", api_url);

    let response = client
        .post(api_url)
        .headers(headers)
        .json(request_body)
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&error_text)
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if error_text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                error_text
            }
        });

    Err(OpenAiError::Api {
        status: status.as_u16(),
        message,
    })
}

pub async fn describe_image(
    client: &Client,
    api_url: &str,
    api_key: &str,
    mime_type: &str,
    image_base64: &str,
) -> Result<String, OpenAiError> {
    let request_body = build_vision_request(mime_type, image_base64);
    let response = make_openai_request(client, api_key, api_url, &request_body).await?;
    let api_response = response.json::<VisionApiResponse>().await?;
    process_vision_response(api_response)
}

pub async fn generate_image(
    client: &Client,
    api_url: &str,
    api_key: &str,
    prompt: &str,
) -> Result<String, OpenAiError> {
    let request_body = build_dalle_request(prompt);
    let response = make_openai_request(client, api_key, api_url, &request_body).await?;
    let api_response = response.json::<DalleApiResponse>().await?;
    process_dalle_response(api_response)
}
