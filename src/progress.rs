use std::time::Duration;

use indicatif::style::TemplateError;
use indicatif::{ProgressBar, ProgressStyle};

/// Phase a spinner is shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// Waiting for the vendor; can take hours, so the elapsed time is shown.
  Polling,
  Download,
}

impl Phase {
  fn template(&self) -> &'static str {
    match self {
      Phase::Polling => "{spinner:.blue} [{elapsed_precise}] {msg}",
      Phase::Download => "{spinner:.green} {msg}",
    }
  }

  // The last tick string is the one left on screen once the spinner is finished.
  fn tick_strings(&self) -> &'static [&'static str] {
    match self {
      Phase::Polling => &["◴", "◷", "◶", "◵", "✔"],
      Phase::Download => &["▁", "▃", "▅", "▇", "▅", "▃", "✔"],
    }
  }

  fn tick_interval(&self) -> Duration {
    match self {
      Phase::Polling => Duration::from_millis(250),
      Phase::Download => Duration::from_millis(100),
    }
  }
}

pub struct SpinnerHelper;

impl SpinnerHelper {
  pub fn create(phase: Phase, message: String) -> Result<ProgressBar, TemplateError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
      ProgressStyle::default_spinner()
        .tick_strings(phase.tick_strings())
        .template(phase.template())?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(phase.tick_interval());
    Ok(spinner)
  }
}
