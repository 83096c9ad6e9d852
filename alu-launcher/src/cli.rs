use clap::Parser;
use std::path::PathBuf;

/// ALU Telemetry launcher - prepares the Python environment and starts the app
///
/// Normally run without arguments. Each option can also be set through the
/// matching ALU_LAUNCHER_* environment variable or a `.env` file beside the
/// launcher; command-line values win.
#[derive(Parser, Debug)]
#[command(name = "alu-launcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding venv/ and main.py (default: the launcher's own directory)
    #[arg(long, value_name = "DIR")]
    pub launcher_dir: Option<PathBuf>,

    /// Python interpreter used to create the environment (default: first python on PATH)
    #[arg(long, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Package index URL passed to pip
    #[arg(long, value_name = "URL")]
    pub index_url: Option<String>,

    /// Exit immediately on failure instead of waiting for Enter
    #[arg(long)]
    pub no_pause: bool,
}
