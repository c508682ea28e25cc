use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use arcode::kernel::services::adapters::ensure_log_dir;
use arcode::kernel::services::ports::Settings;

const DEFAULT_FILTER: &str = "arcode=info";
const LOG_FILE_PREFIX: &str = "arcode.log";

/// Keeps the file writer alive; logs are flushed when it is dropped.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Picks the first usable directive: `RUST_LOG`, then the settings file,
/// then the built-in default. Unparsable directives are skipped.
fn select_filter(env: Option<&str>, configured: Option<&str>) -> String {
    [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty() && EnvFilter::try_new(directive).is_ok())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

fn log_dir() -> Option<PathBuf> {
    ensure_log_dir()
        .or_else(|_| -> std::io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("arcode").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .ok()
}

/// Installs the global subscriber writing to a daily log file. Returns `None`
/// when no log directory is usable or a subscriber is already set.
pub fn init(settings: &Settings) -> Option<LoggingGuard> {
    let log_dir = log_dir()?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::new(select_filter(
        env.as_deref(),
        settings.log_filter.as_deref(),
    ));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true),
    );
    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    tracing::info!(
        log_dir = %log_dir.display(),
        sync = ?settings.editor.sync,
        seeded = settings.workspace.seed_sample_project,
        "arcode starting"
    );

    Some(LoggingGuard {
        _worker: worker,
        log_dir,
    })
}
