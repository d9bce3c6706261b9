//! autorun CLI
//!
//! Usage: autorun [-f FILE]... [-d DIR]... [--config PATH] [--debug] [--no-clear] -- <CMD>...

mod cli;
mod commands;
mod ui;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::watch::cmd_watch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error::print_error(&err);
            ExitCode::from(ui::error::exit_code(&err))
        }
    }
}
