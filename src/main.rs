mod cli;
mod logging;

use std::process::{self, ExitCode};

use atlassian_backup::wizard::TerminalPrompter;
use atlassian_backup::{AppContext, RunOptions};
use clap::Parser;
use cli::Cli;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  let context = match AppContext::from_executable() {
    Ok(context) => context,
    Err(e) => {
      println!("ERROR: {e}");
      return ExitCode::FAILURE;
    }
  };
  if let Err(e) = logging::init(&context) {
    println!("ERROR: Could not open log file `{}`: {e}", context.log_path().display());
    return ExitCode::FAILURE;
  }

  info!("Starting");
  let options = RunOptions { force_wizard: cli.wizard, product: cli.product() };

  tokio::select! {
    result = atlassian_backup::run(options, &context, TerminalPrompter) => match result {
      Ok(path) => {
        println!("{}", path.display());
        info!("Exiting.");
        ExitCode::SUCCESS
      }
      Err(e) => {
        println!("ERROR: {e}");
        error!(kind = e.kind(), "{e}");
        ExitCode::FAILURE
      }
    },
    _ = tokio::signal::ctrl_c() => {
      println!("Cancelled by user.");
      info!("Cancelled by user.");
      // A wizard prompt may still hold a blocking thread the runtime would wait for.
      process::exit(0)
    }
  }
}
