//! Executable discovery.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const YTDLP_BINARY: &str = "yt-dlp";
pub const FFMPEG_BINARY: &str = "ffmpeg";

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("yt-dlp executable not found: {0}")]
    Missing(PathBuf),

    #[error("yt-dlp not found on PATH (install it or set VIDGRAB_YTDLP)")]
    NotOnPath,
}

/// Resolve the yt-dlp executable.
///
/// An explicit path may be absolute, relative or a bare command name; bare
/// names are looked up on `PATH`.
pub fn locate_ytdlp(explicit: Option<&Path>) -> Result<PathBuf, LocateError> {
    match explicit {
        Some(path) => which::which(path).map_err(|_| LocateError::Missing(path.to_path_buf())),
        None => which::which(YTDLP_BINARY).map_err(|_| LocateError::NotOnPath),
    }
}

/// Resolve ffmpeg. yt-dlp needs it for audio extraction and format merging.
pub fn locate_ffmpeg(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) if path.is_dir() => Some(path.to_path_buf()),
        Some(path) => which::which(path).ok(),
        None => which::which(FFMPEG_BINARY).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-yt-dlp");
        match locate_ytdlp(Some(&missing)) {
            Err(LocateError::Missing(path)) => assert_eq!(path, missing),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn explicit_executable_is_accepted() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("yt-dlp");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(locate_ytdlp(Some(&exe)).unwrap(), exe);
    }

    #[test]
    fn ffmpeg_directory_is_taken_as_is() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(locate_ffmpeg(Some(dir.path())), Some(dir.path().to_path_buf()));
    }
}
