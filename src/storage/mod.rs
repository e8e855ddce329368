use std::path::{Path, PathBuf};
use uuid::Uuid;
use chrono::Utc;

/// Key prefix for stored uploads: date plus a short random suffix.
pub fn generate_file_key() -> String {
    format!(
        "{}_{}",
        Utc::now().format("%Y%m%d"),
        Uuid::new_v4().to_string()[..8].to_string()
    )
}

pub fn ensure_dirs(upload_folder: &PathBuf) -> std::io::Result<()> {
    std::fs::create_dir_all(upload_folder)?;
    Ok(())
}

/// Write uploaded bytes under the upload folder and return the stored
/// filename (the string persisted on the owning row).
pub fn store_file(upload_folder: &Path, filename: &str, data: &[u8]) -> std::io::Result<String> {
    let stored_name = format!("{}_{}", generate_file_key(), filename);
    std::fs::write(upload_folder.join(&stored_name), data)?;
    Ok(stored_name)
}

/// Remove a stored file. Missing files are not an error; the row is the
/// source of truth and a dangling pointer just means nothing to delete.
pub fn delete_file(upload_folder: &Path, stored_name: &str) {
    let path = upload_folder.join(stored_name);
    if path.exists() {
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("Failed to delete stored file {}: {}", stored_name, e);
        }
    }
}
