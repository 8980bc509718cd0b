//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Commands {
    /// Create the run log directory and launch the entrypoint (default)
    Run {
        /// Print the resolved launch plan without creating or running anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate the resource request against the partition limits
    Check,
    /// Print the scheduler header for the job file
    Directives {
        /// Emit a complete batch script that calls `jobshim run`
        #[arg(long)]
        script: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run { dry_run: false }
    }
}
