// src/lib.rs

pub mod api;
pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod identifier;
pub mod layout;
pub mod logging;
pub mod render;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::{fetch_snapshot, ExplorerSnapshot, HttpGraphSource};
use crate::cli::CliArgs;
use crate::config::{load_or_default, ConfigFile};
use crate::dag::TaskGraph;
use crate::engine::{CoreExplorer, ExplorerEvent, Runtime, RuntimeOptions};
use crate::identifier::Identifier;
use crate::render::HeadlessRenderer;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus the `--server` override)
/// - the HTTP graph source
/// - core explorer / runtime
/// - the headless renderer
/// - periodic refresh and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let mut raw = load_or_default(args.config.as_deref())?;
    if let Some(url) = &args.server {
        raw.server.url = url.clone();
    }
    let cfg = ConfigFile::try_from(raw)?;
    info!(server = %cfg.server.url, "using engine API");

    let source = Arc::new(HttpGraphSource::new(&cfg.server.url)?);

    if args.dry_run {
        let snapshot = fetch_snapshot(source.as_ref()).await?;
        let graph = TaskGraph::from_raw(&snapshot.task_graph)?;
        print_dry_run(&cfg, &graph, &snapshot);
        return Ok(());
    }

    let (ev_tx, ev_rx) = mpsc::channel::<ExplorerEvent>(256);

    // Every frame is streamed in watch mode; `--once` prints only the last.
    let renderer = HeadlessRenderer::stdout(ev_tx.clone(), cfg.render, !args.once);

    // Ctrl-C → graceful shutdown.
    {
        let tx = ev_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(ExplorerEvent::ShutdownRequested).await;
        });
    }

    if !args.once && cfg.server.refresh_secs > 0 {
        spawn_refresh_timer(ev_tx.clone(), Duration::from_secs(cfg.server.refresh_secs));
    }

    ev_tx.send(ExplorerEvent::RefreshRequested).await?;

    let options = RuntimeOptions {
        exit_when_converged: args.once,
    };

    // Construct the pure core (single source of truth for semantics).
    let core = CoreExplorer::new(cfg.layout, options);

    // Construct the async IO shell around the core.
    let runtime = Runtime::new(core, ev_rx, ev_tx, renderer, source);
    runtime.run().await?;
    Ok(())
}

/// Send `RefreshRequested` every `period`, starting one period from now.
fn spawn_refresh_timer(tx: mpsc::Sender<ExplorerEvent>, period: Duration) {
    debug!(?period, "starting refresh timer");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately; the initial fetch is sent separately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.send(ExplorerEvent::RefreshRequested).await.is_err() {
                break;
            }
        }
    });
}

/// Simple dry-run output: print tasks, their types, deps and result counts.
fn print_dry_run(cfg: &ConfigFile, graph: &TaskGraph, snapshot: &ExplorerSnapshot) {
    let mut version_counts: HashMap<Identifier, usize> = HashMap::new();
    for entry in &snapshot.versions {
        *version_counts
            .entry(Identifier::from(&entry.identifier))
            .or_default() += entry.versions.len();
    }

    println!("taskgraph-explorer dry-run");
    println!("  server.url = {}", cfg.server.url);
    println!("  layout.direction = {:?}", cfg.layout.direction);
    println!();

    println!("roots ({}):", graph.roots().len());
    for root in graph.roots() {
        println!("  - {root}");
    }
    println!();

    println!("tasks ({}):", graph.len());
    for node in graph.nodes() {
        println!("  - {} [{}]", node.id, node.task_type);
        if !node.dependencies.is_empty() {
            let deps: Vec<String> = node.dependencies.iter().map(|d| d.to_string()).collect();
            println!("      deps: {}", deps.join(", "));
        }
        if let Some(count) = version_counts.get(&node.id) {
            println!("      result versions: {count}");
        }
    }

    debug!("dry-run complete (no layout)");
}
