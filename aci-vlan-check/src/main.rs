use anyhow::Result;
use clap::Parser;

mod cli;
mod inspect_cmd;
mod logging;
mod path_guard;
mod validate_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Endpoint(args) => inspect_cmd::run_endpoint(args),
        Command::Attachments(args) => inspect_cmd::run_attachments(args),
        Command::Validate(args) => validate_cmd::run_validate(args, cli.verbose > 0),
    }
}
