use std::path::PathBuf;

use clap::Parser;

use crate::host::Drift;

/// Panorama: one scene spread across every open window.
#[derive(Parser, Debug)]
#[command(name = "panorama", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. "panorama=debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Shared store directory override.
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Wipe the shared store before joining.
    #[arg(long)]
    pub clear: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Window position and size in screen pixels.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub x: i32,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub y: i32,
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Move the window by DX,DY pixels every tick.
    #[arg(long, allow_hyphen_values = true)]
    pub drift: Option<Drift>,

    /// Exit after this many ticks instead of waiting for Ctrl-C.
    #[arg(long)]
    pub ticks: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}
