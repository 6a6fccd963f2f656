//! Configuration for the `cmswebhooks` tool.
//!
//! Loaded from a YAML file with environment variable overrides. The file path
//! defaults to `cmswebhooks.yaml` and can be set with `-f` or
//! `CMSWEBHOOKS_CONFIG`. A missing file is not an error; every value can come
//! from the environment instead.
//!
//! ## Loading Priority
//!
//! 1. **YAML config file**
//! 2. **Environment variables** prefixed with `CMSWEBHOOKS_`
//!
//! ```bash
//! CMSWEBHOOKS_SECRET="hx3snVrI9E2Lgpi1LaL+WfiPWCh88OjI7Bv/3ihq+Qo="
//! CMSWEBHOOKS_LOG_FORMAT=json
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use cmswebhooks::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//! println!("Signatures are read from the {} header", config.signature_header);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::errors::Error;
use crate::secret::WebhookSecret;

/// Header the platform puts the signature in.
pub const DEFAULT_SIGNATURE_HEADER: &str = "x-webhook-signature";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "CMSWEBHOOKS_CONFIG", default_value = "cmswebhooks.yaml")]
    pub config: String,

    /// Validate configuration and exit.
    #[arg(long)]
    pub validate: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Verify a signed webhook body and print the parsed notifications
    Verify {
        /// Signature header value sent with the body
        #[arg(short, long, env = "CMSWEBHOOKS_SIGNATURE")]
        signature: String,

        /// File holding the raw body, `-` for stdin
        #[arg(short, long, default_value = "-")]
        payload: PathBuf,
    },
    /// Print the signature the platform would send for a body
    Sign {
        /// File holding the raw body, `-` for stdin
        #[arg(short, long, default_value = "-")]
        payload: PathBuf,
    },
}

// Args are logged at startup; the signature stays out of the logs.
impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Verify { payload, .. } => f
                .debug_struct("Verify")
                .field("signature", &"<redacted>")
                .field("payload", payload)
                .finish(),
            Command::Sign { payload } => f.debug_struct("Sign").field("payload", payload).finish(),
        }
    }
}

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Webhook secret shared with the platform
    pub secret: WebhookSecret,
    /// Name of the header carrying the signature. Informational for transports
    pub signature_header: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret: WebhookSecret::default(),
            signature_header: DEFAULT_SIGNATURE_HEADER.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.secret.is_empty() {
            return Err(Error::InvalidConfig {
                message: "secret is not configured. Set CMSWEBHOOKS_SECRET or add secret to the config file.".to_string(),
            });
        }

        if self.signature_header.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "signature_header cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            // CMSWEBHOOKS_CONFIG and CMSWEBHOOKS_SIGNATURE belong to the CLI
            .merge(Env::prefixed("CMSWEBHOOKS_").split("__").ignore(&["config", "signature"]))
    }
}
