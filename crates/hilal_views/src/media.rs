use hilal_core::media::upload_filename;
use hilal_core::{ArticleSource, Error, Result, UploadRequest};
use tracing::{info, warn};

/// Validates a media file locally, then hands it to the source. Returns the
/// name the file was stored under.
pub async fn upload_media(source: &dyn ArticleSource, request: UploadRequest) -> Result<String> {
    let expected = upload_filename(&request.file_name, request.kind, &request.entity_id)?;
    if request.bytes.is_empty() {
        return Err(Error::InvalidFile(format!("{} is empty", request.file_name)));
    }

    let receipt = source.upload_file(&request).await.map_err(|e| {
        warn!("Upload of {} to {} failed: {}", request.file_name, source.name(), e);
        e
    })?;

    let stored = receipt.filename.unwrap_or(expected);
    info!(
        "📤 Uploaded {} ({} bytes) as {}/{}",
        request.file_name,
        request.bytes.len(),
        request.kind,
        stored
    );
    Ok(stored)
}
