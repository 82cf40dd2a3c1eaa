use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct OpenAiDalleRequestBody {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
    pub response_format: String,
}

#[derive(Debug, Deserialize)]
pub struct DalleImageGeneration {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DalleApiResponse {
    #[serde(default)]
    pub data: Vec<DalleImageGeneration>,
}
