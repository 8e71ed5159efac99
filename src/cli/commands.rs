use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pg", about = concat!("pagegrid v", env!("CARGO_PKG_VERSION"), " - drive the page/asset grid from the command line"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: pagegrid.toml next to the document)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the visible grid
    Show(ShowArgs),
    /// Run an event script through the grid engine
    Replay(ReplayArgs),
    /// Hide a column or row
    Hide(HideArgs),
    /// Show a hidden column or row again
    Unhide(UnhideArgs),
    /// Validate document integrity
    Check(CheckArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Document (JSON)
    pub document: PathBuf,
    /// UI state file (hidden rows/columns, cursor)
    #[arg(long)]
    pub state: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Document (JSON)
    pub document: PathBuf,
    /// Events: up down left right enter esc delete backspace space f2
    /// ctrl+c ctrl+v ctrl+enter blur click:PAGE:ASSET|preview type:TEXT
    /// drag:ASSET:INDEX delete-page:PAGE close-editor
    #[arg(required = true)]
    pub script: Vec<String>,
    /// UI state file to start from
    #[arg(long)]
    pub state: Option<PathBuf>,
    /// Save the final UI state back to --state
    #[arg(long, requires = "state")]
    pub save_state: bool,
    /// Write document changes back to the document file
    #[arg(long)]
    pub write: bool,
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["column", "row"])))]
pub struct HideArgs {
    /// Document (JSON)
    pub document: PathBuf,
    /// Asset id of the column to hide
    #[arg(long)]
    pub column: Option<String>,
    /// Page id of the row to hide
    #[arg(long)]
    pub row: Option<String>,
    /// UI state file to update
    #[arg(long)]
    pub state: PathBuf,
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["column", "row", "all"])))]
pub struct UnhideArgs {
    /// Document (JSON)
    pub document: PathBuf,
    /// Asset id of the column to show
    #[arg(long)]
    pub column: Option<String>,
    /// Page id of the row to show
    #[arg(long)]
    pub row: Option<String>,
    /// Show every hidden column and row
    #[arg(long)]
    pub all: bool,
    /// UI state file to update
    #[arg(long)]
    pub state: PathBuf,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Document (JSON)
    pub document: PathBuf,
}
