mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod render;

use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    app::run(cli::Cli::parse())
}
