use anyhow::Result;

use movie_ranking_trends::cli::Command;
use movie_ranking_trends::{handle_completions, handle_dashboard, handle_scrape, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Scrape => handle_scrape(),
        Command::Dashboard { api_url, scrape } => handle_dashboard(api_url.as_deref(), *scrape),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
