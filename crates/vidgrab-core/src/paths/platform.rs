//! Platform default for the download directory.

use std::path::PathBuf;

use super::error::OutputDirError;

/// The user's download directory, falling back to `$HOME/Downloads`.
pub fn default_output_dir() -> Result<PathBuf, OutputDirError> {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or(OutputDirError::NoHomeDir)
}
