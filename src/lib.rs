pub mod core;
pub mod records;
pub mod shared;
pub mod store;
pub mod tracker;

use std::path::Path;

use crate::core::logging::init_logging;
use crate::core::settings::load_settings;
use crate::records::Kind;
use crate::shared::errors::AppError;
use crate::tracker::Tracker;

/// Loads the configuration, opens every store and keeps the caches fresh
/// until Ctrl-C.
pub async fn run(config_path: &Path) -> Result<(), AppError> {
    let settings = load_settings(config_path)?;
    let _logging_guards = init_logging(&settings.log_dir)?;

    tracing::info!(
        target: "system",
        config = %config_path.display(),
        interval_secs = settings.refresh_interval_secs,
        extension = %settings.file_extension,
        "Configuration loaded"
    );

    let tracker = Tracker::open(&settings)?;
    for kind in Kind::ALL {
        tracing::info!(
            target: "system",
            kind = %kind,
            dir = %settings.dir_for(kind).display(),
            "Serving records"
        );
    }

    tracker.start_refreshing();

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "system", error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!(target: "system", "Shutting down");
    tracker.shutdown().await;
    Ok(())
}
