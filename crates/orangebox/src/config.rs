//! Profile resolution: config file + global flags -> a ready `Session`.
//!
//! Flags win over the profile, the profile wins over `[defaults]`.

use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use orangebox_config::{Config, profile_to_client_config};
use orangebox_core::{AppState, ClientConfig, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::commands::Session;
use crate::error::CliError;
use crate::output;

/// Comma-separated profile names from the config on disk, for help text.
pub fn available_profiles() -> String {
    let cfg = orangebox_config::load_config_or_default();
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// `--output`, else `defaults.output`, else table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

/// `--color`, else `defaults.color`, else auto.
pub fn color_mode(global: &GlobalOpts, config: &Config) -> ColorMode {
    global.color.unwrap_or_else(|| {
        ColorMode::from_str(&config.defaults.color, true).unwrap_or(ColorMode::Auto)
    })
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Translate profile + global flags into a `ClientConfig`.
///
/// Without any profile, `--api-url` alone is enough.
pub fn resolve_client_config(global: &GlobalOpts, config: &Config) -> Result<ClientConfig, CliError> {
    let profile = config.profile(global.profile.as_deref())?;

    let mut client = match (profile, global.api_url.as_deref()) {
        (Some((_, profile)), _) => profile_to_client_config(profile, &config.defaults)?,
        (None, Some(url)) => ClientConfig {
            timeout: Duration::from_secs(config.defaults.timeout),
            ..ClientConfig::new(parse_url(url)?)
        },
        (None, None) => {
            return Err(CliError::NoConfig {
                path: orangebox_config::config_path().display().to_string(),
            });
        }
    };

    if let Some(url) = global.api_url.as_deref() {
        client.api_url = parse_url(url)?;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(client)
}

/// Everything a resource command needs, built once per invocation.
pub fn build_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let config = orangebox_config::load_config()?;
    let client_config = resolve_client_config(global, &config)?;
    tracing::debug!(
        profile = %active_profile_name(global, &config),
        api_url = %client_config.api_url,
        "resolved backend"
    );

    Ok(Session {
        client: client_config.build_client()?,
        state: Arc::new(AppState::new()),
        output: output_format(global, &config),
        color: output::should_color(color_mode(global, &config)),
        page_size: config.page_size()?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use orangebox_config::Profile;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["orangebox"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "path"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile() {
        let mut cfg = Config::starter();
        cfg.profiles.get_mut("default").unwrap().timeout = Some(5);

        let resolved = resolve_client_config(
            &global(&["--api-url", "http://10.1.1.1/api", "--timeout", "9", "-k"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(resolved.api_url.as_str(), "http://10.1.1.1/api");
        assert_eq!(resolved.timeout, Duration::from_secs(9));
        assert_eq!(resolved.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let mut cfg = Config::starter();
        cfg.profiles.insert(
            "staging".into(),
            Profile {
                timeout: Some(4),
                ..Profile::new("https://staging.example.com/api")
            },
        );
        let resolved = resolve_client_config(&global(&["--profile", "staging"]), &cfg).unwrap();
        assert_eq!(resolved.api_url.as_str(), "https://staging.example.com/api");
        assert_eq!(resolved.timeout, Duration::from_secs(4));
        assert_eq!(resolved.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn missing_profile_and_url_is_no_config() {
        let err = resolve_client_config(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn output_falls_back_to_config_defaults() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Yaml);
        assert_eq!(output_format(&global(&["-o", "plain"]), &cfg), OutputFormat::Plain);

        cfg.defaults.output = "nonsense".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Table);
    }
}
