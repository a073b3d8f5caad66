use anyhow::Context;
use clap::Parser;
use colored::*;
use profile_explorer::actors::{ExplorerHandle, ProfileExplorer};
use profile_explorer::cli::{Cli, ReplCommand};
use profile_explorer::github::GitHubClient;
use profile_explorer::render::render;
use profile_explorer::state::Notification;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str = "Commands:
  lookup <name>   look up a user and list page 1 of their repositories
  page <n>        show another page of repositories
  theme           toggle light/dark mode
  show            print the current view
  quit            exit";

fn print_notifications(receiver: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = receiver.try_recv() {
        eprintln!("{} {}", "✖".red().bold(), notification.to_string().red());
    }
}

async fn show(
    explorer: &ExplorerHandle,
    notifications: &mut mpsc::UnboundedReceiver<Notification>,
) -> anyhow::Result<()> {
    let view = explorer.settled(POLL_INTERVAL).await?;
    print_notifications(notifications);
    print!("{}", render(&view));
    Ok(())
}

async fn run_interactive(
    explorer: &ExplorerHandle,
    notifications: &mut mpsc::UnboundedReceiver<Notification>,
) -> anyhow::Result<()> {
    println!("{}", HELP.dimmed());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match ReplCommand::parse(&line) {
            Ok(ReplCommand::Lookup(query)) => explorer.lookup_subject(query)?,
            Ok(ReplCommand::Page(page)) => explorer.change_page(page)?,
            Ok(ReplCommand::Theme) => explorer.toggle_theme()?,
            Ok(ReplCommand::Show) => {}
            Ok(ReplCommand::Help) => {
                println!("{}", HELP);
                continue;
            }
            Ok(ReplCommand::Quit) => break,
            Err(message) => {
                eprintln!("{}", message.yellow());
                continue;
            }
        }
        show(explorer, notifications).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    debug!(?config, "Loaded configuration");

    let client = GitHubClient::new(&config)?;
    let (explorer, mut notifications) = ProfileExplorer::spawn_with_client(client)
        .await
        .context("Failed to start profile explorer")?;

    if cli.dark {
        explorer.toggle_theme()?;
    }

    if let Some(query) = &cli.query {
        explorer.lookup_subject(query.clone())?;
        if let Some(page) = cli.page {
            // wait for page 1 so the subject is known before paging
            explorer.settled(POLL_INTERVAL).await?;
            explorer.change_page(page)?;
        }
        show(&explorer, &mut notifications).await?;
    }

    if cli.interactive || cli.query.is_none() {
        run_interactive(&explorer, &mut notifications).await?;
    }

    info!("Exiting");
    explorer.shutdown().await?;

    Ok(())
}
