//! Subtitle file detection in an output directory.

use std::ffi::OsStr;
use std::io;
use std::path::Path;

const SUBTITLE_EXTENSIONS: [&str; 2] = [".vtt", ".srt"];

/// Whether a file name ends in a subtitle extension (case-sensitive).
pub fn is_subtitle_file(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    SUBTITLE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Whether `dir` holds any `.vtt` or `.srt` file.
///
/// Scans the whole directory, not just files written by the current request.
pub async fn contains_subtitle_files(dir: &Path) -> io::Result<bool> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if is_subtitle_file(&entry.file_name()) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_subtitle_extensions() {
        assert!(is_subtitle_file(OsStr::new("Talk.en.vtt")));
        assert!(is_subtitle_file(OsStr::new("Talk.de.srt")));
        assert!(!is_subtitle_file(OsStr::new("Talk.mp4")));
        assert!(!is_subtitle_file(OsStr::new("Talk.VTT")));
        assert!(!is_subtitle_file(OsStr::new("vtt")));
    }

    #[tokio::test]
    async fn empty_directory_has_no_subtitles() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!contains_subtitle_files(dir.path()).await.unwrap());
    }

    #[tokio::test]
    async fn finds_subtitle_among_media() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Clip.mp4"), b"media").unwrap();
        std::fs::write(dir.path().join("Clip.en.vtt"), b"WEBVTT").unwrap();
        assert!(contains_subtitle_files(dir.path()).await.unwrap());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(contains_subtitle_files(&missing).await.is_err());
    }
}
