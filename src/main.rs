mod app;
mod cli;
mod config;
mod consts;
mod error;
mod job;
mod launch;
mod output;
mod resources;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use consts::LAUNCHER_FAILURE_CODE;
use utils::init_logging;

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);
    init_logging(cli.debug);

    let code = match app::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            LAUNCHER_FAILURE_CODE
        }
    };
    std::process::exit(code);
}
