use crate::shared::paths::ensure_dir;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Targets that get a log file of their own. Everything else goes to `system.log`.
pub const ROUTED_TARGETS: [&str; 2] = ["store", "refresh"];

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to set global tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Keeps the non-blocking writers flushing. Drop it only at shutdown.
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

struct TargetWriter {
    writers: HashMap<&'static str, NonBlocking>,
    system_writer: NonBlocking,
}

impl TargetWriter {
    fn writer_for(&self, target: &str) -> &NonBlocking {
        self.writers
            .iter()
            .find(|(name, _)| routes_to(target, name))
            .map(|(_, writer)| writer)
            .unwrap_or(&self.system_writer)
    }
}

fn routes_to(target: &str, name: &str) -> bool {
    target == name
        || target
            .strip_prefix(name)
            .map_or(false, |rest| rest.starts_with("::"))
}

impl<'a> MakeWriter<'a> for TargetWriter {
    type Writer = NonBlocking;

    fn make_writer(&'a self) -> Self::Writer {
        self.system_writer.clone()
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        self.writer_for(meta.target()).clone()
    }
}

pub fn init_logging(log_dir: &Path) -> Result<LoggingGuards, LoggingError> {
    ensure_dir(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let mut guards = Vec::new();
    let mut writers = HashMap::new();

    for target in ROUTED_TARGETS {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{}.log", target));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        writers.insert(target, non_blocking);
        guards.push(guard);
    }

    let system_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "system.log");
    let (system_writer, system_guard) = tracing_appender::non_blocking(system_appender);
    guards.push(system_guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(TargetWriter {
                    writers,
                    system_writer,
                })
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(target: "system", "Logging initialized at {:?}", log_dir);

    Ok(LoggingGuards { _guards: guards })
}
