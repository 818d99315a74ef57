use clap::Parser;

use larder_cli::args::Cli;
use larder_cli::commands;

fn main() -> anyhow::Result<()> {
    larder_observability::init();
    commands::run(Cli::parse())
}


