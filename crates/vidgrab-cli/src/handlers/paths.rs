//! Paths command handler.
//!
//! Displays the resolved output directories in `key = value` format.

use anyhow::Result;
use vidgrab_core::Settings;

/// Execute the paths command.
pub fn execute(settings: &Settings) -> Result<()> {
    for (key, value) in resolved_paths(settings)? {
        println!("{key} = {value}");
    }
    Ok(())
}

fn resolved_paths(settings: &Settings) -> Result<Vec<(&'static str, String)>> {
    let policy = settings.output_policy()?;
    Ok(vec![
        ("default_output_dir", policy.default_dir().display().to_string()),
        ("output_root", policy.root().display().to_string()),
        (
            "download_timeout_secs",
            settings.effective_timeout().as_secs().to_string(),
        ),
    ])
}
