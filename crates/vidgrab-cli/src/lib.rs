//! # vidgrab-cli
//!
//! Command line front end and composition root for vidgrab.
//!
//! - `vidgrab serve` runs the HTTP service
//! - `vidgrab fetch` runs a single download in the foreground
//! - `vidgrab check-deps` reports whether yt-dlp and ffmpeg are usable
//! - `vidgrab paths` prints the resolved output directories

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by main.rs binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;
pub mod progress;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, SettingsArgs};
pub use parser::Cli;
