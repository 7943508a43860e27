use crate::constants::{
    DEFAULT_ITEMS_PAGE_SIZE, MAX_ITEMS_PAGE_SIZE, MONDAY_API_KEY_ENV, MONDAY_API_URL,
    MONDAY_API_URL_ENV, MONDAY_API_VERSION, MONDAY_API_VERSION_ENV, REQUEST_TIMEOUT_SECS,
};
use crate::error::AppError;
use crate::types::{ApiKey, ApiVersion, ValidatedUrl, ValidationError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Items requested per page while traversing a board
    #[arg(long, global = true, default_value_t = DEFAULT_ITEMS_PAGE_SIZE)]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a board's schema (columns, groups, item count) as JSON
    Schema(BoardArgs),
    /// Fetch a whole board as one JSON tree
    Tree(BoardArgs),
    /// Stream board nodes as JSON lines
    Stream {
        #[command(flatten)]
        board: BoardArgs,
        /// Skip subitems
        #[arg(long, default_value_t = false)]
        no_subitems: bool,
    },
    /// Export a board's items as CSV
    Export(BoardArgs),
    /// Search boards by (partial) name
    Search {
        term: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Suggest recent items from boards matching a project
    Suggest {
        project: String,
        /// Items per board
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show the account the token belongs to
    Me,
    /// Create an item on a board
    CreateItem {
        #[command(flatten)]
        board: BoardArgs,
        name: String,
        #[arg(long)]
        group: Option<String>,
        /// Column values as a JSON object, e.g. '{"status": {"label": "Done"}}'
        #[arg(long)]
        values: Option<String>,
    },
    /// Change column values of an existing item
    UpdateItem {
        #[command(flatten)]
        board: BoardArgs,
        item: String,
        /// Column values as a JSON object
        values: String,
    },
    /// Post an update (comment) to an item
    PostUpdate { item: String, body: String },
}

#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Board id or board URL (e.g. "https://acme.monday.com/boards/123")
    pub board: String,
}

/// Resolved connector configuration: validated and ready to build a client.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub api_key: ApiKey,
    pub api_url: ValidatedUrl,
    pub api_version: ApiVersion,
    pub timeout: Duration,
    pub page_size: u32,
}

impl ConnectorConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key_str = lookup(MONDAY_API_KEY_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "{} environment variable not set",
                    MONDAY_API_KEY_ENV
                ))
            })?;
        let api_key = ApiKey::new(api_key_str)?;

        let api_url = ValidatedUrl::parse(
            &lookup(MONDAY_API_URL_ENV).unwrap_or_else(|| MONDAY_API_URL.to_string()),
        )?;
        let api_version = ApiVersion::new(
            lookup(MONDAY_API_VERSION_ENV).unwrap_or_else(|| MONDAY_API_VERSION.to_string()),
        )?;

        Ok(Self {
            api_key,
            api_url,
            api_version,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            page_size: DEFAULT_ITEMS_PAGE_SIZE,
        })
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Sets the items page size, rejecting values the API would refuse.
    pub fn with_page_size(self, page_size: u32) -> Result<Self, AppError> {
        if page_size == 0 || page_size > MAX_ITEMS_PAGE_SIZE {
            return Err(ValidationError::OutOfBounds {
                value: page_size,
                min: 1,
                max: MAX_ITEMS_PAGE_SIZE,
            }
            .into());
        }
        Ok(Self { page_size, ..self })
    }

    /// Applies the CLI's tuning flags on top of the environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        Self::from_env()?
            .with_timeout(Duration::from_secs(cli.timeout))
            .with_page_size(cli.page_size)
    }
}
