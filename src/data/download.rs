use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{CropError, Result};

/// Make sure the dataset CSV exists at `dest`, downloading it from `url` when missing.
///
/// Returns `true` when a download happened. An existing file is never overwritten.
pub fn ensure_dataset(dest: &Path, url: Option<&str>) -> Result<bool> {
    if dest.exists() {
        info!(path = %dest.display(), "using local dataset");
        return Ok(false);
    }
    let Some(url) = url else {
        return Err(CropError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "dataset {} not found; pass --dataset-url or set CROP_DATASET_URL to download it",
                dest.display()
            ),
        )));
    };

    info!(%url, path = %dest.display(), "downloading dataset");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(CropError::DownloadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes()?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, &body)?;
    info!(bytes = body.len(), "dataset saved");
    Ok(true)
}
