use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// File name used when the configured log path is a directory.
pub const DEFAULT_LOG_FILE: &str = "boardview.log";

fn env_filter(debug: bool) -> EnvFilter {
    // With debug logging off `RUST_LOG` is ignored so a stray variable in the
    // user's environment cannot make the viewer verbose.
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    }
}

/// Directory and file name the log is written to for `path`.
pub fn log_file_location(path: &Path) -> (PathBuf, PathBuf) {
    if path.is_dir() {
        return (path.to_path_buf(), PathBuf::from(DEFAULT_LOG_FILE));
    }
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    (dir, name)
}

/// Build the subscriber [`init`] installs. Log files are written without
/// ANSI colours; stderr keeps them.
pub fn subscriber(
    debug: bool,
    log_file: Option<PathBuf>,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let (writer, ansi) = match log_file {
        Some(path) => {
            let (dir, name) = log_file_location(&path);
            let appender = tracing_appender::rolling::never(dir, name);
            (BoxMakeWriter::new(appender), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_writer(writer)
        .with_ansi(ansi)
        .finish()
}

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// via the settings file, in which case `RUST_LOG` may override it.
/// When `log_file` is given, output is written there instead of stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let _ = subscriber(debug, log_file).try_init();
}
