mod app;
mod cli;
mod config;
mod effects;
mod notify;
mod render;

use std::process::ExitCode;

use clap::Parser;
use sampler_logging::sampler_error;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let config = match config::SamplerConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(&cli),
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    sampler_logging::initialize(config.log_destination.into(), config.level_filter(cli.verbose));

    match app::run(&config, cli.command) {
        Ok(code) => code,
        Err(err) => {
            sampler_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
