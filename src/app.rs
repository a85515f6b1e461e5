use std::io;
use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::context::AppContext;
use crate::error::{ConfigError, Error};
use crate::model::Product;
use crate::service::{BackupLoader, BackupService};
use crate::wizard::{self, Prompter};

pub struct RunOptions {
  /// Ask for the settings even if a config file exists.
  pub force_wizard: bool,
  pub product: Product,
}

/// Loads (or first captures) the config and runs one backup. Returns the path of the
/// downloaded archive.
pub async fn run<P>(options: RunOptions, context: &AppContext, prompter: P) -> Result<PathBuf, Error>
where
  P: Prompter + Send + 'static,
{
  let config_path = context.config_path();
  if options.force_wizard || !config_path.exists() {
    info!(path = %config_path.display(), "Running config wizard");
    let path = config_path.clone();
    // The prompts block, keep them off the runtime so Ctrl-C is still noticed.
    tokio::task::spawn_blocking(move || wizard::capture(&prompter, &path))
      .await
      .map_err(|join_error| ConfigError::Prompt(io::Error::other(join_error)))??;
  }

  let config = load_config(context)?;
  println!(
    "-> Starting backup; include attachments: {attachments}",
    attachments = config.include_attachments
  );

  BackupService::new(config, context.backups_dir())?
    .get_backup(options.product)
    .await
}

/// Reads the config and rejects the shipped placeholder tenant.
pub fn load_config(context: &AppContext) -> Result<Config, ConfigError> {
  let config = Config::load(&context.config_path())?;
  config.validate()?;
  Ok(config)
}
