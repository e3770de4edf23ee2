//! # greenmeter - Main Entry Point
//!
//! Supports two operational modes:
//! - **Display** (default): full-screen kiosk view, Escape to quit
//! - **Headless** (`--headless`): one line per reading on stdout
//!
//! Configuration comes from `PROMETHEUS_URL` and `PULL_DURATION`.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam_channel::{bounded, TrySendError};
use env_logger::Env;
use log::{debug, info, warn};

use greenmeter::cli::Args;
use greenmeter::config::Config;
use greenmeter::poller::Poller;
use greenmeter::reading::Reading;
use greenmeter::tui;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

/// Readings buffered between poller and display
const READING_QUEUE: usize = 16;

/// Log filter when `RUST_LOG` is unset; fetch failures are logged at warn
const DEFAULT_LOG_FILTER: &str = "warn";

fn logger(env: Env) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or(DEFAULT_LOG_FILTER))
}

fn main() {
    logger(Env::default()).init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();

    if !args.quiet {
        println!("greenmeter v{}", env!("CARGO_PKG_VERSION"));
        println!("endpoint: {}", display_endpoint(&config));
        println!("interval: {}s", config.pull_period.as_secs());
    }
    info!(
        "Polling {} at {} every {}s",
        config.metric_name,
        display_endpoint(&config),
        config.pull_period.as_secs()
    );
    if config.prometheus_url.trim().is_empty() {
        warn!("PROMETHEUS_URL is not set, every reading will be grey");
    }

    let poller = Poller::new(config);

    if args.headless {
        return run_headless(poller).await;
    }

    let (reading_tx, reading_rx) = bounded::<Reading>(READING_QUEUE);
    let (closed_tx, closed_rx) = tokio::sync::oneshot::channel::<()>();

    // Display owns the terminal on its own thread; dropping closed_tx tells
    // the poller it is gone.
    let tui_handle = std::thread::spawn(move || {
        let result = tui::run_kiosk(reading_rx);
        drop(closed_tx);
        result
    });

    let deliver = move |reading: Reading| match reading_tx.try_send(reading) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            warn!("Display is not keeping up, dropping reading");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    };
    let display_closed = async {
        // Err means the sender was dropped, which is the only signal sent
        let _ = closed_rx.await;
    };

    // Leaving the select drops the poller and its sender, which ends the display
    let interrupted = tokio::select! {
        reason = poller.run(deliver, display_closed) => {
            debug!("Poller stopped: {reason:?}");
            Ok(())
        }
        result = wait_for_interrupt() => result,
    };

    tui_handle
        .join()
        .map_err(|_| anyhow!("display thread panicked"))?
        .context("display failed")?;

    interrupted
}

async fn run_headless(poller: Poller) -> Result<()> {
    let print = |reading: Reading| {
        println!("{}", reading.summary());
        true
    };

    tokio::select! {
        reason = poller.run(print, std::future::pending()) => debug!("Poller stopped: {reason:?}"),
        result = wait_for_interrupt() => result?,
    }
    Ok(())
}

/// Resolves on Ctrl+C. Fails instead if the signal handler cannot be installed.
async fn wait_for_interrupt() -> Result<()> {
    tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl+C")?;
    info!("Interrupted");
    Ok(())
}

fn display_endpoint(config: &Config) -> &str {
    if config.prometheus_url.is_empty() {
        "<unset>"
    } else {
        &config.prometheus_url
    }
}
