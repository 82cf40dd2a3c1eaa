pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_PINATA_API_URL: &str = "https://uploads.pinata.cloud/v3";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

pub const VISION_MODEL: &str = "gpt-4.1-mini";
pub const VISION_TEMPERATURE: f32 = 1.5;
pub const VISION_MAX_TOKENS: u32 = 300;
pub const VISION_INSTRUCTIONS: &str = "Create a prompt that can be used to generate an image depending on your interpretation of the image provided. Keep it short and concise but your interpretation does not have to be literal.";
pub const PROMPT_TOOL_NAME: &str = "generatePrompt";
pub const PROMPT_TOOL_DESCRIPTION: &str = "Generate a prompt that can be given to an ai so that you can recreate your interpretation of the image. Keep it short and concise but your interpretation does not have to be literal.";
pub const PROMPT_ARGUMENT_DESCRIPTION: &str =
    "The prompt that can be given to an ai so that you can recreate your interpretation of the image.";

pub const DALLE_MODEL: &str = "dall-e-3";
pub const DALLE_SIZE: &str = "1024x1024";
pub const DALLE_RESPONSE_FORMAT: &str = "url";

/// Hard ceiling for both the source and the generated image.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

pub const SUPPORTED_MIME_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/bmp",
];

pub const GENERATED_IMAGE_FILENAME: &str = "generated-image.png";
pub const DEFAULT_PINATA_NETWORK: &str = "public";
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub const CMD_SERVE: &str = "serve";
pub const CMD_RUN: &str = "run";
