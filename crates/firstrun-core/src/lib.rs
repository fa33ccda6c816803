//! Firstrun Core Library
//!
//! This crate builds a feed of recently-aired TV episodes from
//! TheTVDB.
//!
//! # Features
//! - Search for TV series by name
//! - Paged episode retrieval grouped by season
//! - Descending scan of the newest season against a cutoff date
//! - Single-array JSON output plus per-show diagnostics

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod schedule;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, TvdbClient};
pub use config::Config;
pub use error::{FirstrunError, Result};
pub use provider::{SeriesSource, TvdbProvider};
pub use schedule::{recent_episodes, Schedule};
pub use types::{AiredEpisode, Episode, SeasonEpisodes, Series};
