use crate::config::Config;
use crate::constants::{GENERATED_IMAGE_FILENAME, MAX_IMAGE_SIZE};
use crate::error::{ApiError, ImageStage};
use crate::fetch::fetch_image;
use crate::pinata::{PinataUploader, UploadOptions};
use crate::request::{IncomingRequest, ResponseBody};
use crate::utils::{describe_image, encode_image, generate_image};
use reqwest::Client;

/// Fetch, describe, generate, fetch again, upload. Each step runs only after
/// the previous one succeeded.
pub async fn run_pipeline(
    client: &Client,
    config: &Config,
    request: &IncomingRequest,
) -> Result<ResponseBody, ApiError> {
    let image = fetch_image(client, &request.image_url, MAX_IMAGE_SIZE)
        .await
        .map_err(|e| ApiError::from_fetch(ImageStage::Input, e))?;
    log::info!("Fetched input image ({} bytes)", image.len());

    let image_base64 = encode_image(&image.bytes);
    let description = describe_image(
        client,
        &config.chat_completions_url(),
        &request.openai_api_key,
        &request.image_mimetype,
        &image_base64,
    )
    .await
    .map_err(|e| ApiError::DescriptionFailed(Some(e)))?;

    if description.is_empty() {
        return Err(ApiError::DescriptionFailed(None));
    }
    log::info!("Generated prompt: {}", description);

    let generated_image_url = generate_image(
        client,
        &config.image_generations_url(),
        &request.openai_api_key,
        &description,
    )
    .await
    .map_err(ApiError::GenerationFailed)?;
    log::info!("Generated image at {}", generated_image_url);

    let generated_image = fetch_image(client, &generated_image_url, MAX_IMAGE_SIZE)
        .await
        .map_err(|e| ApiError::from_fetch(ImageStage::Generated, e))?;
    log::info!("Fetched generated image ({} bytes)", generated_image.len());

    let uploader = PinataUploader::new(client, &request.pinata_jwt, &config.pinata_api_url);
    let cid = uploader
        .upload_image_buffer(
            generated_image.bytes,
            GENERATED_IMAGE_FILENAME,
            UploadOptions::default(),
        )
        .await?;
    log::info!("Pinned generated image as {}", cid);

    Ok(ResponseBody {
        image_url: format!("{}/ipfs/{}", request.pinata_gateway, cid),
        prompt: description,
        openai_image_url: generated_image_url,
    })
}
