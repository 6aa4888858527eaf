use std::path::{Path, PathBuf};

/// Get the base storage directory following XDG Base Directory Specification.
/// Returns `$XDG_DATA_HOME/logbook`, falling back to the platform data dir.
pub fn get_storage_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data).join("logbook");
    }

    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logbook")
}

/// Get the default logs directory path.
/// Returns `{storage_dir}/logs`.
pub fn get_log_dir() -> PathBuf {
    get_storage_dir().join("logs")
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Builds `{dir}/{id}.{ext}`.
pub fn record_path(dir: &Path, id: &str, ext: &str) -> PathBuf {
    dir.join(format!("{}.{}", id, ext))
}
