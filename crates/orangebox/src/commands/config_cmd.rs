//! Config subcommand handlers.

use dialoguer::Input;
use orangebox_config::{self as config, Config, DEFAULT_API_URL, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_or(value: Option<&str>, prompt: &str, default: &str) -> Result<String, CliError> {
    if let Some(value) = value {
        return Ok(value.to_owned());
    }
    Input::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()
        .map_err(prompt_err)
}

/// Add (or replace) one profile and make it the default.
fn upsert_profile(mut cfg: Config, name: &str, api_url: &str, global: &GlobalOpts) -> Config {
    let mut profile = Profile::new(api_url);
    profile.timeout = global.timeout;
    if global.insecure {
        profile.insecure = Some(true);
    }
    cfg.profiles.insert(name.to_owned(), profile);
    cfg.default_profile = Some(name.to_owned());
    cfg
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: flags first, prompt for the rest ──────────────────
        ConfigCommand::Init => {
            let path = config::config_path();
            if !global.quiet {
                eprintln!("orangebox configuration");
                eprintln!("   Config path: {}\n", path.display());
            }

            let name = prompt_or(global.profile.as_deref(), "Profile name", "default")?;
            let api_url = prompt_or(global.api_url.as_deref(), "API base URL", DEFAULT_API_URL)?;
            if url::Url::parse(&api_url).is_err() {
                return Err(CliError::Validation {
                    field: "api_url".into(),
                    reason: format!("invalid URL: {api_url}"),
                });
            }

            let cfg = upsert_profile(config::load_config_or_default(), &name, &api_url, global);
            let written = config::save_config(&cfg)?;

            output::print_success(
                &format!("Configuration written to {}", written.display()),
                false,
                global.quiet,
            );
            if !global.quiet {
                eprintln!("  Active profile: {name}");
                eprintln!("\n  Test it: orangebox products list");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = crate::config::output_format(global, &cfg);
            let text = toml::to_string_pretty(&cfg).map_err(|e| CliError::Render {
                format: "toml",
                message: e.to_string(),
            })?;
            let out = output::render_single(format, &cfg, |_| text.trim_end().to_owned(), |c| {
                crate::config::active_profile_name(global, c)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
