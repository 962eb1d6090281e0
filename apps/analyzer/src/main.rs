use std::{num::NonZeroU32, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{AnalysisCoordinator, CoordinatorEvent, HttpAnalysisService};
use shared::domain::LabelPolicy;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
    task::JoinHandle,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod view;

use commands::{Command, HELP};
use config::load_settings;
use view::{describe_failure, render, Controls};

#[derive(Parser, Debug)]
#[command(about = "Browse comment sentiment for a video, page by page")]
struct Args {
    /// Base url of the analysis service.
    #[arg(long)]
    service_url: Option<String>,
    /// Comments per page.
    #[arg(long)]
    limit: Option<NonZeroU32>,
    #[arg(long)]
    label_policy: Option<LabelPolicy>,
    #[arg(long, default_value = "analyzer.toml")]
    config: PathBuf,
    /// Video to analyze right away.
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(v) = args.service_url {
        settings.service_url = v;
    }
    if let Some(v) = args.limit {
        settings.page_limit = v;
    }
    if let Some(v) = args.label_policy {
        settings.label_policy = v;
    }
    info!(
        service_url = %settings.service_url,
        page_limit = settings.page_limit.get(),
        label_policy = ?settings.label_policy,
        "analyzer: starting"
    );

    let service = HttpAnalysisService::new(
        &settings.service_url,
        settings.request_timeout(),
        settings.label_policy,
    )
    .with_context(|| {
        format!(
            "failed to configure analysis service '{}'",
            settings.service_url
        )
    })?;
    let coordinator = AnalysisCoordinator::new(Arc::new(service), settings.page_limit);
    let renderer = spawn_renderer(&coordinator);

    println!("{HELP}");
    if let Some(url) = args.url {
        dispatch(&coordinator, Command::Analyze(url)).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => dispatch(&coordinator, command).await,
            Ok(None) => {}
            Err(message) => println!("{message}"),
        }
    }

    coordinator.dispose().await;
    renderer.abort();
    Ok(())
}

async fn dispatch(coordinator: &Arc<AnalysisCoordinator>, command: Command) {
    let snapshot = coordinator.snapshot().await;
    let loading = coordinator.is_loading().await;
    let controls = Controls::from_state(&snapshot, loading);
    debug!(command = command.name(), loading, "analyzer: dispatching command");

    match command {
        Command::Analyze(_) | Command::Next | Command::Previous if loading => {
            println!("Still analyzing; wait for the current request to finish.");
        }
        Command::Analyze(url) => {
            coordinator.spawn_submit(url);
        }
        Command::Next if controls.next => {
            coordinator.spawn_next();
        }
        Command::Previous if controls.previous => {
            coordinator.spawn_previous();
        }
        Command::Next | Command::Previous => {
            println!("Nothing to page to.");
        }
        Command::Show => print!("{}", render(&snapshot, loading)),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn spawn_renderer(coordinator: &Arc<AnalysisCoordinator>) -> JoinHandle<()> {
    let mut events = coordinator.subscribe_events();
    // Weak so the renderer never keeps a disposed coordinator alive.
    let coordinator = Arc::downgrade(coordinator);
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(CoordinatorEvent::LoadingChanged(true)) => println!("Analyzing..."),
                Ok(CoordinatorEvent::LoadingChanged(false)) => {}
                Ok(CoordinatorEvent::SnapshotUpdated(snapshot)) => {
                    let loading = match coordinator.upgrade() {
                        Some(coordinator) => coordinator.is_loading().await,
                        None => false,
                    };
                    print!("{}", render(&snapshot, loading));
                }
                Ok(CoordinatorEvent::FetchFailed(err)) => println!("{}", describe_failure(&err)),
                Ok(CoordinatorEvent::ResponseDiscarded { page }) => {
                    debug!(page, "analyzer: stale response ignored");
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "analyzer: render events lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
