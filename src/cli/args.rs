//! Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// codelens - line counts and import graphs for code repositories
#[derive(Parser, Debug)]
#[command(name = "codelens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan repository archives for per-file line counts and an import dependency graph")]
#[command(long_about = "codelens downloads a repository's ZIP archive, counts the lines of every text file \
into a directory tree, and builds a best-effort dependency graph from JavaScript/TypeScript and Python \
import statements. Results are stored so they can be shown again later by scan id.")]
#[command(after_help = "EXAMPLES:

Scanning:
    # Scan a GitHub repository
    codelens scan https://github.com/expressjs/express

    # Scan several repositories in parallel
    codelens scan https://github.com/psf/requests https://github.com/pallets/flask

    # Scan a zipball already on disk, attributing it to a repository
    codelens scan --archive ./express-main.zip --repo https://github.com/expressjs/express

    # Print the dependency graph as JSON
    codelens --output json scan https://github.com/psf/requests --part graph

Limits:
    # Refuse repositories larger than 20 MiB or with more than 1000 files
    codelens --max-bytes 20971520 --max-files 1000 scan https://github.com/owner/repo

Stored scans:
    # List stored scans
    codelens list

    # Show the file tree of a stored scan
    codelens show <SCAN_ID> --part tree

    # Render a stored graph with Graphviz
    codelens --output dot show <SCAN_ID> --part graph --output-file deps.dot

Configuration:
    # Create .codelens.toml in the current directory
    codelens init
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to configuration file (defaults to .codelens.toml in the current directory, then the home and config directories)")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, help = "Output format: 'text' for people, 'json' for programs, 'csv' for spreadsheets, 'dot' for Graphviz")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, global = true, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Byte ceiling per scan
    #[arg(long, global = true, value_name = "BYTES", help = "Abort a scan once the archive holds more than this many bytes (default: 104857600)")]
    pub max_bytes: Option<u64>,

    /// File ceiling per scan
    #[arg(long, global = true, value_name = "COUNT", help = "Abort a scan once the archive holds more than this many files (default: 5000)")]
    pub max_files: Option<usize>,

    /// Scan store directory
    #[arg(long, global = true, value_name = "DIR", help = "Directory where scan records are stored")]
    pub data_dir: Option<PathBuf>,

    /// Do not store scan results
    #[arg(long, global = true, help = "Do not write successful scans to the scan store")]
    pub no_persist: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, help = "Suppress non-essential output (one line per scan, no progress bars)")]
    pub quiet: bool,

    /// Show more detail
    #[arg(short, long, global = true, help = "Show more detail (edge lists, info-level logging)")]
    pub verbose: bool,

    /// Debug logging
    #[arg(long, global = true, help = "Enable debug-level logging on stderr (RUST_LOG takes precedence)")]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output (useful for piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, global = true, help = "Disable progress bars (useful for CI environments)")]
    pub no_progress: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch and scan one or more repositories
    Scan {
        /// Repository URLs such as https://github.com/<owner>/<repo>
        #[arg(value_name = "REPO_URL", required_unless_present = "archive")]
        urls: Vec<String>,

        /// Scan a ZIP archive on disk instead of downloading
        #[arg(long, value_name = "FILE", conflicts_with = "urls")]
        archive: Option<PathBuf>,

        /// Repository the archive belongs to (with --archive)
        #[arg(long, value_name = "REPO_URL", requires = "archive")]
        repo: Option<String>,

        /// Part of the result to print
        #[arg(long, value_enum, default_value_t = Part::Summary)]
        part: Part,
    },

    /// Show a stored scan
    Show {
        /// Scan id, as printed by `scan` or `list`
        #[arg(value_name = "SCAN_ID")]
        id: String,

        /// Part of the scan to print
        #[arg(long, value_enum, default_value_t = Part::Summary)]
        part: Part,
    },

    /// List stored scans
    List,

    /// Create a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Graphviz DOT (dependency graph only)
    Dot,
}

/// Which part of a scan to print
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Part {
    Summary,
    Tree,
    Graph,
    All,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
