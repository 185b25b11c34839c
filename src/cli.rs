//! CLI argument parsing

use clap::Parser;

#[derive(Parser)]
#[command(name = "fanline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
