//! Clap derive structures for the `orangebox` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use orangebox_core::{EntityId, PageSize, SortDirection};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// orangebox -- manage products and providers from the command line
#[derive(Debug, Parser)]
#[command(
    name = "orangebox",
    version,
    about = "Manage orangebox inventory from the command line",
    long_about = "Browse, create, edit and delete products and providers held by an\n\
        orangebox inventory backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "ORANGEBOX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "ORANGEBOX_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "ORANGEBOX_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ORANGEBOX_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ORANGEBOX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage products
    #[command(alias = "prod")]
    Products(ResourceArgs),

    /// Manage providers
    #[command(alias = "prov")]
    Providers(ResourceArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Resource commands ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

/// Products and providers share one command shape.
#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// List one page, sorted and filtered by the backend
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single record
    Get {
        /// Record id
        id: EntityId,
    },

    /// Create a record
    #[command(alias = "create")]
    Add(FieldArgs),

    /// Update fields of an existing record
    #[command(alias = "update")]
    Edit {
        /// Record id
        id: EntityId,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a record (asks for confirmation unless --yes)
    #[command(alias = "rm")]
    Delete {
        /// Record id
        id: EntityId,
    },
}

/// Pagination, sort and search for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page: 5, 10 or 20 [default: from config]
    #[arg(long, short = 'n', value_parser = parse_page_size)]
    pub per_page: Option<PageSize>,

    /// Column to sort by (e.g. id, name, price)
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(long, short = 'd', value_enum)]
    pub direction: Option<DirectionArg>,

    /// Search text, matched by the backend
    #[arg(long, short = 'f')]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => Self::Asc,
            DirectionArg::Desc => Self::Desc,
        }
    }
}

/// Field assignments for add/edit.
#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Field assignment, repeatable (e.g. --field name=Anvil --field price=9.5)
    #[arg(
        long = "field",
        short = 'F',
        value_name = "KEY=VALUE",
        required = true,
        value_parser = parse_assignment
    )]
    pub fields: Vec<(String, String)>,
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let n: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    PageSize::try_from(n)
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file (prompts for anything not given
    /// via --profile / --api-url)
    Init,

    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
