use std::path::Path;

use dialoguer::{Input, Password};
use tracing::info;

use crate::config::Config;
use crate::error::ConfigError;

pub trait Prompter {
    fn input(&self, prompt: &str) -> Result<String, ConfigError>;
    /// Like `input`, without echoing the answer.
    fn secret(&self, prompt: &str) -> Result<String, ConfigError>;
}

/// Asks on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> Result<String, ConfigError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(ConfigError::Prompt)
    }

    fn secret(&self, prompt: &str) -> Result<String, ConfigError> {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(ConfigError::Prompt)
    }
}

/// Asks for the four settings, writes them to `path` and returns them.
pub fn capture<P: Prompter + ?Sized>(prompter: &P, path: &Path) -> Result<Config, ConfigError> {
    let tenant = prompter.input("What is your Atlassian tenant name?")?;
    let email = prompter.input("What is your Atlassian cloud account email address?")?;
    let api_token = prompter.secret("Paste your Atlassian API token")?;
    let attachments = prompter.input("Do you want to include attachments? (true / false)")?;

    let config = Config {
        tenant: tenant.trim().to_string(),
        email: email.trim().to_string(),
        api_token: api_token.trim().to_string(),
        include_attachments: attachments.trim().to_lowercase(),
    };
    config.save(path)?;
    info!(path = %path.display(), "Config written");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    struct ScriptedPrompter {
        answers: RefCell<VecDeque<&'static str>>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&'static str]) -> ScriptedPrompter {
            ScriptedPrompter { answers: RefCell::new(answers.iter().copied().collect()) }
        }

        fn next(&self) -> Result<String, ConfigError> {
            self.answers
                .borrow_mut()
                .pop_front()
                .map(String::from)
                .ok_or_else(|| ConfigError::Prompt(std::io::ErrorKind::UnexpectedEof.into()))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&self, _prompt: &str) -> Result<String, ConfigError> {
            self.next()
        }

        fn secret(&self, _prompt: &str) -> Result<String, ConfigError> {
            self.next()
        }
    }

    #[test]
    fn given_answers_when_capture_then_persisted_config_loads_back_equal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let prompter =
            ScriptedPrompter::new(&["acme.atlassian.net", "jane@acme.io", "s3cr3t", "TRUE"]);

        let captured = capture(&prompter, &path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, captured);
        assert_eq!(loaded.tenant, "acme.atlassian.net");
        assert_eq!(loaded.email, "jane@acme.io");
        assert_eq!(loaded.api_token, "s3cr3t");
        assert_eq!(loaded.include_attachments, "true");
    }

    #[test]
    fn given_existing_config_when_capture_then_it_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "ATLASSIAN_TENANT: old.atlassian.net\n").unwrap();
        let prompter =
            ScriptedPrompter::new(&["new.atlassian.net", "jane@acme.io", "s3cr3t", "False"]);

        capture(&prompter, &path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded.tenant, "new.atlassian.net");
        assert_eq!(loaded.include_attachments, "false");
    }

    #[test]
    fn given_aborted_prompt_when_capture_then_nothing_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let prompter = ScriptedPrompter::new(&["acme.atlassian.net"]);

        let error = capture(&prompter, &path).unwrap_err();

        assert!(matches!(error, ConfigError::Prompt(_)));
        assert!(!path.exists());
    }
}
