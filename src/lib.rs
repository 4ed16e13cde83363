pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod fetchers;
pub mod http;
pub mod presentation;
pub mod rate_limiter;
pub mod rating;
pub mod render;
pub mod series;
pub mod services;
pub mod sources;
pub mod storage;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::rating::RatingNormalizer;
use crate::render::TerminalRenderer;
use crate::services::{CollectionService, DashboardService, ServerService};
use crate::sources::ApiClient;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_scrape() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = CollectionService::new(&config)?;
        service.run().await?;
        Ok(())
    })
}

pub fn handle_dashboard(api_url: Option<&str>, scrape: bool) -> Result<()> {
    let mut config = AppConfig::new();
    if let Some(api_url) = api_url {
        config = config.with_api_base_url(api_url);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = ApiClient::new(&config.dashboard)?;
        info!("Reading from {}", client.base_url());

        let service = DashboardService::new(client.clone(), client.clone(), RatingNormalizer::new());
        let mut renderer = TerminalRenderer::new(std::io::stdout().lock());

        if scrape {
            service.collect_and_refresh(&client, &mut renderer).await?;
        } else {
            service.refresh(&mut renderer).await?;
        }
        Ok(())
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
