//! Statbanner Core — shared error type, configuration, metric snapshot types.

pub mod config;
pub mod error;
pub mod stats;

pub use config::{BannerConfig, DataPaths, SourceEndpoints, TwitterCredentials};
pub use error::{Error, Result};
pub use stats::{CombinedStats, NewsStats, VimStats};
