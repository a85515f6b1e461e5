use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use atlassian_backup::AppContext;
use tracing_subscriber::EnvFilter;

/// Appends plain-text log lines (timestamp, level, message) to the log file next to
/// the executable. `RUST_LOG` overrides the default `info` level.
pub(crate) fn init(context: &AppContext) -> io::Result<()> {
  let file = OpenOptions::new().create(true).append(true).open(context.log_path())?;
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .with_target(false)
    .init();

  Ok(())
}
