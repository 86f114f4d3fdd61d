//! Command line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

const MEMORY_URL: &str = "sqlite::memory:";
const SQLITE_SCHEME: &str = "sqlite://";

/// Personal finance tracker: expenses, monthly budgets and spending insights
#[derive(Parser, Debug)]
#[command(name = "fintrack")]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Database location: a file path, sqlite://<path> or sqlite::memory:
    #[arg(long = "database", env = "FINTRACK_DATABASE_URL", global = true)]
    pub(crate) database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FINTRACK_LOG_LEVEL", default_value = "info", global = true)]
    pub(crate) log_level: String,

    /// Log format
    #[arg(
        long,
        env = "FINTRACK_LOG_FORMAT",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub(crate) log_format: LogFormat,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub(crate) enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind to
        #[arg(long, env = "FINTRACK_HOST", default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port to listen on
        #[arg(long, env = "FINTRACK_PORT", default_value_t = 3000)]
        port: u16,

        /// Allow cross-origin requests from any origin
        #[arg(long, env = "FINTRACK_CORS")]
        cors: bool,
    },
    /// Print the overview, budget summary and category breakdown for a month
    Summary {
        /// Month as YYYY-MM (default: current month)
        month: Option<String>,
    },
    /// Print spending insights for a month
    Insights {
        /// Month as YYYY-MM (default: current month)
        month: Option<String>,
    },
    /// List the expense categories
    Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseLocation {
    pub(crate) fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingDatabase);
        }
        if raw == MEMORY_URL {
            return Ok(Self::Memory);
        }
        let path = raw.strip_prefix(SQLITE_SCHEME).unwrap_or(raw);
        if path.is_empty() {
            return Err(ConfigError::InvalidDatabase(raw.to_string()));
        }
        Ok(Self::File(PathBuf::from(path)))
    }
}

impl std::fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => write!(f, "{MEMORY_URL}"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("no database configured: pass --database or set FINTRACK_DATABASE_URL")]
    MissingDatabase,
    #[error("invalid database location: {0}")]
    InvalidDatabase(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoggingConfig {
    pub(crate) level: String,
    pub(crate) format: LogFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ServerConfig {
    pub(crate) host: IpAddr,
    pub(crate) port: u16,
    pub(crate) cors: bool,
}

impl ServerConfig {
    pub(crate) fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Resolved configuration. Built once at startup, before anything touches
/// the database.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) database: DatabaseLocation,
    pub(crate) logging: LoggingConfig,
    pub(crate) command: Command,
}

impl Config {
    pub(crate) fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let database = cli
            .database
            .as_deref()
            .ok_or(ConfigError::MissingDatabase)
            .and_then(DatabaseLocation::parse)?;

        Ok(Self {
            database,
            logging: LoggingConfig {
                level: cli.log_level,
                format: cli.log_format,
            },
            command: cli.command,
        })
    }
}

impl Command {
    /// `Some` only for `serve`.
    pub(crate) fn server(&self) -> Option<ServerConfig> {
        match self {
            Self::Serve { host, port, cors } => Some(ServerConfig {
                host: *host,
                port: *port,
                cors: *cors,
            }),
            _ => None,
        }
    }
}
