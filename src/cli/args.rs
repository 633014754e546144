use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "station-aggregator")]
#[command(about = "High-performance per-station statistics over large delimited files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a measurements file and report per-station statistics
    Aggregate {
        #[arg(short, long, help = "Input measurements file")]
        input: PathBuf,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Write the full statistics map to stdout as JSON")]
        json: bool,

        #[arg(short, long, help = "Suppress progress output")]
        quiet: bool,
    },

    /// Parse a measurements file end to end without reporting statistics
    Validate {
        #[arg(short, long, help = "Input measurements file")]
        input: PathBuf,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },
}
