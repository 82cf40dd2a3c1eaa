use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct VisionApiResponse {
    pub choices: Vec<VisionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct VisionChoice {
    pub message: VisionMessage,
}

#[derive(Debug, Deserialize)]
pub struct VisionMessage {
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, as sent by the model.
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct PromptArguments {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum VisionContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct VisionMessageRole {
    pub role: String,
    pub content: Vec<VisionContent>,
}

#[derive(Debug, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Serialize)]
pub struct ToolChoiceFunction {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolChoiceFunction,
}

#[derive(Debug, Serialize)]
pub struct OpenAiVisionRequestBody {
    pub model: String,
    pub messages: Vec<VisionMessageRole>,
    pub tools: Vec<Tool>,
    pub tool_choice: ToolChoice,
    pub temperature: f32,
    pub max_tokens: u32,
}
