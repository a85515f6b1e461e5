use atlassian_backup::Product;
use clap::Parser;

/// Trigger an Atlassian cloud backup and download the archive into the `backups`
/// directory next to the executable. Runs the Jira backup unless `-c` is given.
#[derive(Parser)]
#[command(version)]
pub(crate) struct Cli {
  /// Run the config wizard, even if a `config.yaml` already exists.
  #[arg(short = 'w')]
  pub(crate) wizard: bool,
  /// Back up Confluence.
  #[arg(short = 'c')]
  pub(crate) confluence: bool,
  /// Back up Jira. This is also what happens without any product flag.
  #[arg(short = 'j')]
  pub(crate) jira: bool,
}

impl Cli {
  pub(crate) fn product(&self) -> Product {
    match (self.confluence, self.jira) {
      (true, _) => Product::Confluence,
      (false, _) => Product::Jira,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn given_no_flags_when_product_then_jira() {
    let cli = Cli::parse_from(["atlassian-backup"]);

    assert_eq!(cli.product(), Product::Jira);
    assert!(!cli.wizard);
  }

  #[test]
  fn given_confluence_flag_when_product_then_confluence() {
    let cli = Cli::parse_from(["atlassian-backup", "-c", "-j"]);

    assert_eq!(cli.product(), Product::Confluence);
  }

  #[test]
  fn given_jira_and_wizard_flags_when_parse_then_jira_with_wizard() {
    let cli = Cli::parse_from(["atlassian-backup", "-w", "-j"]);

    assert_eq!(cli.product(), Product::Jira);
    assert!(cli.wizard);
  }
}
