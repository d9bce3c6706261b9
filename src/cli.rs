use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// autorun - run a command whenever watched files change
#[derive(Parser, Debug)]
#[command(name = "autorun")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "With no -f or -d, the current directory is watched.")]
pub struct Cli {
    /// Watch files individually (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Watch directory trees (repeatable)
    #[arg(short = 'd', long = "dir", value_name = "DIR", num_args = 1..)]
    pub dirs: Vec<PathBuf>,

    /// Settings file (default: ./.autorun.toml, then the user config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log every event to stderr and never clear the screen
    #[arg(long)]
    pub debug: bool,

    /// Never clear the screen before a run
    #[arg(long)]
    pub no_clear: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Command to run after each change
    #[arg(last = true, required = true, value_name = "CMD")]
    pub command: Vec<String>,
}

impl Cli {
    /// The command words joined into one shell command line.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}
