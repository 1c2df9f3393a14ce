//! Staging of uploaded files under internal names.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Client extension reduced to lowercase ASCII alphanumerics, if any remain.
pub fn sanitized_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    let cleaned: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// `<dir>/<id>.<ext>`, or `<dir>/<id>` when the name has no usable extension.
///
/// The client filename never contributes anything but the extension, so two
/// uploads can only collide if their ids do.
pub fn staging_path(dir: &Path, id: Uuid, filename: &str) -> PathBuf {
    match sanitized_extension(filename) {
        Some(ext) => dir.join(format!("{id}.{ext}")),
        None => dir.join(id.to_string()),
    }
}

/// Write `bytes` to the staging path for `id`, creating `dir` if needed.
pub async fn stage(
    dir: &Path,
    id: Uuid,
    filename: &str,
    bytes: &[u8],
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = staging_path(dir, id, filename);
    tokio::fs::write(&path, bytes).await?;
    debug!("staged upload (path={}, size={})", path.display(), bytes.len());
    Ok(path)
}

/// Remove a staged upload; failures are logged only.
pub async fn discard(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        warn!("failed to remove staged upload (path={}): {err}", path.display());
    }
}
