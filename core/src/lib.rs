//! Session lifecycle tracking and an event middleware pipeline for client
//! telemetry.
//!
//! Activities move through `opened -> started <-> paused -> completed |
//! canceled`; every approved transition produces one event, which runs
//! through global and per-sink middleware before reaching the sinks.

pub mod activity;
pub mod api;
pub mod attributes;
pub mod config;
pub mod error;
pub mod event;
pub mod middleware;
pub mod reporting;
pub mod state;
pub mod tentacles;

pub use error::TentaclesError;
pub use tentacles::{LifecycleReport, Tentacles, TentaclesOptions, TrackReport};
