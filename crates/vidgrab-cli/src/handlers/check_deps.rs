//! Check system dependencies handler.
//!
//! yt-dlp is required. ffmpeg is optional but needed for audio extraction
//! and for merging separate video and audio streams.

use anyhow::{Result, bail};
use vidgrab_core::Settings;
use vidgrab_ytdlp::locate_ffmpeg;

use crate::bootstrap::build_engine;

// ANSI color codes for better UX
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

enum Status {
    Found(String),
    Missing(String),
}

struct Dependency {
    name: &'static str,
    required: bool,
    status: Status,
}

/// Execute the check-deps command.
///
/// Fails when a required dependency is missing.
pub async fn execute(settings: &Settings) -> Result<()> {
    println!("{BOLD}{BLUE}Checking system dependencies...{RESET}\n");

    let dependencies = [check_ytdlp(settings).await, check_ffmpeg(settings)];

    println!("{BOLD}{:<12} {:<10} {:<50}{RESET}", "DEPENDENCY", "STATUS", "NOTES");
    println!("{}", "=".repeat(72));
    for dep in &dependencies {
        print_dependency(dep);
    }
    println!();

    let missing: Vec<&str> = dependencies
        .iter()
        .filter(|d| d.required && matches!(d.status, Status::Missing(_)))
        .map(|d| d.name)
        .collect();

    if missing.is_empty() {
        println!("{GREEN}✓ All required dependencies are available{RESET}");
        Ok(())
    } else {
        println!("Install yt-dlp with `pipx install yt-dlp` or point VIDGRAB_YTDLP at it.");
        bail!("Missing required dependencies: {}", missing.join(", "))
    }
}

async fn check_ytdlp(settings: &Settings) -> Dependency {
    let status = match build_engine(settings) {
        Ok(engine) => match engine.version().await {
            Ok(version) => Status::Found(format!("{version} ({})", engine.program().display())),
            Err(e) => Status::Missing(e.to_string()),
        },
        Err(e) => Status::Missing(e.to_string()),
    };
    Dependency {
        name: "yt-dlp",
        required: true,
        status,
    }
}

fn check_ffmpeg(settings: &Settings) -> Dependency {
    let status = match locate_ffmpeg(settings.ffmpeg_location.as_deref()) {
        Some(path) => Status::Found(path.display().to_string()),
        None => Status::Missing("audio extraction and stream merging unavailable".to_string()),
    };
    Dependency {
        name: "ffmpeg",
        required: false,
        status,
    }
}

fn print_dependency(dep: &Dependency) {
    let (color, label, note) = match &dep.status {
        Status::Found(note) => (GREEN, "found", note.as_str()),
        Status::Missing(note) if dep.required => (RED, "missing", note.as_str()),
        Status::Missing(note) => (YELLOW, "optional", note.as_str()),
    };
    println!("{:<12} {color}{label:<10}{RESET} {note}", dep.name);
}
