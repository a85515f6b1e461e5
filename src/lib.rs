//! Triggers an Atlassian cloud backup for Jira or Confluence, waits for the vendor to
//! finish the export and downloads the archive next to the executable.

pub mod app;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod progress;
pub mod service;
pub mod wizard;

pub use app::{run, RunOptions};
pub use context::AppContext;
pub use error::Error;
pub use model::Product;
