//! # greenmeter - Green-Energy Kiosk Display
//!
//! Polls a Prometheus-compatible backend for the share of green generation
//! (`entsoe_generation_eco`), classifies it, and shows the value full-screen
//! on a background whose color reflects the status.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐  instant query   ┌──────────────────────┐
//! │    Poller    │─────────────────▶│ Prometheus /api/v1/  │
//! │ (tokio task) │◀─────────────────│       query          │
//! └──────┬───────┘   first sample   └──────────────────────┘
//!        │ classify (greenmeter-common)
//!        ▼
//!   ┌─────────┐  crossbeam channel  ┌──────────────────────┐
//!   │ Reading │────────────────────▶│  Kiosk display (TUI) │
//!   └─────────┘                     │   own thread, Esc    │
//!                                   └──────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`config`]: `PROMETHEUS_URL` / `PULL_DURATION`, loaded once
//! - [`prometheus`]: HTTP client, response decoding, percentage rounding
//! - [`reading`]: one poll cycle's number, color and timestamp
//! - [`poller`]: the fetch-classify-deliver loop
//! - [`tui`]: full-screen terminal display
//! - [`cli`]: presentation flags
//! - [`domain`]: error types

pub mod cli;
pub mod config;
pub mod domain;
pub mod poller;
pub mod prometheus;
pub mod reading;
pub mod tui;
