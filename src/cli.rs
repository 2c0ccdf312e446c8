use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "loopcast")]
#[command(about = "Loop local videos to live ingest endpoints, one terminal per stream key", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a folder and summarize what was found
    Scan(RootArgs),
    /// Write one stream script per key/video pair
    Generate(GenerateArgs),
    /// Open existing scripts in terminals and tile the windows
    Run(RootArgs),
    /// Run existing scripts, generating them first when there are none
    Stream(StreamArgs),
    /// Tile already-open terminal windows
    Arrange(ArrangeArgs),
    /// Interactive session with generate, run and reset
    Interactive,
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct RootArgs {
    /// Folder holding the videos, the keys file and the transcoder
    pub root: PathBuf,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub root: RootArgs,
    /// Script name prefix
    #[arg(short, long)]
    pub prefix: Option<String>,
    /// Number of loops; omit to loop forever
    #[arg(short, long)]
    pub loops: Option<u32>,
}

#[derive(Debug, Args)]
pub struct StreamArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,
    /// Generate without asking when no scripts exist
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ArrangeArgs {
    /// How many windows to tile
    #[arg(short, long, default_value_t = 10)]
    pub count: usize,
}
