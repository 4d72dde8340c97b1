//! Command dispatch: bridges CLI args -> core controllers -> output formatting.

pub mod config_cmd;
pub mod products;
pub mod providers;
pub mod resource;
pub mod util;

use std::sync::Arc;

use orangebox_core::{ApiClient, AppState, PageSize};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Resolved backend connection and presentation settings.
pub struct Session {
    pub client: ApiClient,
    pub state: Arc<AppState>,
    pub output: OutputFormat,
    pub color: bool,
    /// Rows per page when `--per-page` is not given.
    pub page_size: PageSize,
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(session, args, global).await,
        Command::Providers(args) => providers::handle(session, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before dispatch".into(),
        )),
    }
}
