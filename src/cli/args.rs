//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::consts::DEFAULT_JOB_FILE;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "jobshim")]
#[command(
    about = "Validate a GPU job request and launch its entrypoint with a timestamped log directory",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Job file describing resources and the program to launch
    #[arg(short = 'f', long, global = true, value_name = "FILE")]
    pub(crate) job: Option<PathBuf>,

    /// Parent directory of logs/ (defaults to the job's log_parent or workdir)
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) log_parent: Option<PathBuf>,

    /// Timezone for the run directory stamp (e.g., "UTC", "Europe/Berlin")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.log_parent.is_none() {
            self.log_parent = config.log_parent.clone();
        }
        if self.job.is_none() {
            self.job = config.job.clone();
        }

        self
    }

    pub(crate) fn command(&self) -> Commands {
        self.command.unwrap_or_default()
    }

    pub(crate) fn job_path(&self) -> PathBuf {
        self.job
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JOB_FILE))
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
