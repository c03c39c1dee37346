//! CLI module

pub mod config;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "In-memory task board HTTP API")]
pub struct Cli {
    /// Config file (defaults to ~/.taskboard/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server (and the frontend, if one is found)
    Serve(serve::ServeArgs),
    /// Print the effective configuration as TOML
    Config,
}
