use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "IMDb popular movies ranking and trends")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 5000)
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },
    /// Scrape the popular movies chart once and store it as a new scrape file
    Scrape,
    /// Show the latest ranking and the rating trends from a running backend
    Dashboard {
        /// Backend base URL (defaults to API_BASE_URL or http://localhost:5000)
        #[arg(short, long)]
        api_url: Option<String>,
        /// Ask the backend for a new scrape before showing the data
        #[arg(short, long)]
        scrape: bool,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
