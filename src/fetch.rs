use crate::error::FetchError;
use futures::stream::StreamExt;
use reqwest::Client;

#[derive(Debug)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
}

impl FetchedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Downloads `url` into memory. The body is streamed and the download is
/// abandoned as soon as it grows past `limit` bytes.
pub async fn fetch_image(client: &Client, url: &str, limit: usize) -> Result<FetchedImage, FetchError> {
    log::debug!("GET {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(item) = stream.next().await {
        let chunk = item?;
        if bytes.len() + chunk.len() > limit {
            return Err(FetchError::TooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    Ok(FetchedImage { bytes })
}
