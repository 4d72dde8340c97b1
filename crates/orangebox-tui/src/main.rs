//! `orangebox-tui`: terminal front-end for the products/providers inventory.
//!
//! Logs go to a file (default under the platform data directory) so they
//! never corrupt the screen.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use orangebox_config::{Config, DEFAULT_API_URL};
use orangebox_core::{ClientConfig, PageSize, TlsVerification};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "orangebox-tui", version, about = "Browse and edit products and providers")]
struct Cli {
    /// Configuration profile to use
    #[arg(short, long, env = "ORANGEBOX_PROFILE")]
    profile: Option<String>,

    /// API base URL, overriding the profile (e.g. http://localhost:8000/api)
    #[arg(short = 'u', long, env = "ORANGEBOX_API_URL")]
    api_url: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long, env = "ORANGEBOX_INSECURE")]
    insecure: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File logging only. The guard must live until exit so buffered lines
/// are flushed.
fn setup_tracing(cli: &Cli) -> Result<WorkerGuard> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("orangebox_tui={level},orangebox_core={level},orangebox_api={level}"))
    });

    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| orangebox_config::data_dir().join("orangebox-tui.log"));
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("cannot create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "orangebox-tui.log".into(), ToOwned::to_owned);

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}

/// Flags override the selected profile. Without either, the local
/// development backend is assumed.
fn client_config(cli: &Cli, cfg: &Config) -> Result<ClientConfig> {
    let mut client = match cfg.profile(cli.profile.as_deref())? {
        Some((name, profile)) => {
            info!(profile = %name, "using profile");
            orangebox_config::profile_to_client_config(profile, &cfg.defaults)?
        }
        None => {
            let mut client = ClientConfig::new(url::Url::parse(DEFAULT_API_URL)?);
            client.timeout = Duration::from_secs(cfg.defaults.timeout);
            client
        }
    };

    if let Some(raw) = cli.api_url.as_deref() {
        client.api_url = url::Url::parse(raw).wrap_err_with(|| format!("invalid API URL: {raw}"))?;
    } else if cfg.profiles.is_empty() {
        warn!(api_url = DEFAULT_API_URL, "no profile configured; using the default backend");
    }
    if cli.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli)?;

    let cfg = orangebox_config::load_config_or_default();
    let page_size = cfg.page_size().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring configured page size");
        PageSize::default()
    });
    let client = client_config(&cli, &cfg)?.build_client()?;

    info!(api_url = %client.base_url(), %page_size, "starting orangebox-tui");

    App::new(client, page_size).run().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orangebox_config::Profile;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("orangebox-tui").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn falls_back_to_default_backend() {
        let mut cfg = Config::starter();
        cfg.profiles.clear();
        cfg.default_profile = None;
        let client = client_config(&cli(&[]), &cfg).unwrap();
        assert_eq!(client.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(client.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn flags_override_profile() {
        let mut cfg = Config::starter();
        cfg.profiles
            .insert("staging".into(), Profile::new("http://10.0.0.9/api"));
        let client = client_config(
            &cli(&["-p", "staging", "-u", "http://127.0.0.1:9000/api", "-k"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(client.api_url.as_str(), "http://127.0.0.1:9000/api");
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        assert!(client_config(&cli(&["-p", "nope"]), &Config::starter()).is_err());
    }
}
