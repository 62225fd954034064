use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `autolink-title` - Turn URLs into titled markdown links.
#[derive(Parser, Debug)]
#[command(name = "autolink-title")]
#[command(version)]
#[command(about = "Paste URLs as links titled with the page they point to.", long_about = None)]
pub struct Cli {
    /// Path to config.toml (default: ~/.autolink-title/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the title a link to URL would get
    Fetch {
        /// URL to look up
        url: String,
    },

    /// Paste URL into FILE at a position, as a link with the fetched title
    Paste {
        /// Markdown file to edit in place
        file: PathBuf,

        /// Text to paste (usually a URL)
        text: String,

        /// Line to paste at (1-based)
        #[arg(long, default_value = "1")]
        line: usize,

        /// Column to paste at (1-based)
        #[arg(long, default_value = "1")]
        column: usize,

        /// Paste verbatim without fetching
        #[arg(long)]
        plain: bool,
    },

    /// Give the URL or link at a position in FILE a freshly fetched title
    Enhance {
        /// Markdown file to edit in place
        file: PathBuf,

        /// Line of the URL (1-based)
        #[arg(long)]
        line: usize,

        /// Column inside the URL (1-based)
        #[arg(long)]
        column: usize,
    },

    /// Print the effective configuration
    Config,
}
