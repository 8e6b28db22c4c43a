//! Parsing of the `--dump-single-json` document.

use std::path::Path;

use serde::Deserialize;
use vidgrab_core::{EngineError, ExtractedInfo};

/// The subset of yt-dlp's info dictionary we read.
#[derive(Debug, Deserialize)]
struct RawInfo {
    title: Option<String>,
    duration: Option<serde_json::Number>,
    ext: Option<String>,
    #[serde(rename = "_filename")]
    prepared_filename: Option<String>,
    filename: Option<String>,
    requested_downloads: Option<Vec<RequestedDownload>>,
}

#[derive(Debug, Deserialize)]
struct RequestedDownload {
    filepath: Option<String>,
}

/// Placeholder yt-dlp writes for missing template fields.
const MISSING_FIELD: &str = "NA";

/// Parse the info document.
///
/// `null` means yt-dlp extracted nothing and yields `Ok(None)`. The filename
/// falls back to rendering `template` when yt-dlp did not report one.
pub fn parse_info(json: &str, template: &Path) -> Result<Option<ExtractedInfo>, EngineError> {
    let raw: Option<RawInfo> = serde_json::from_str(json.trim())
        .map_err(|e| EngineError::Protocol(format!("invalid info JSON: {e}")))?;

    Ok(raw.map(|raw| {
        let filename = raw
            .prepared_filename
            .clone()
            .or_else(|| raw.filename.clone())
            .or_else(|| {
                raw.requested_downloads
                    .as_ref()
                    .and_then(|downloads| downloads.first())
                    .and_then(|d| d.filepath.clone())
            })
            .unwrap_or_else(|| render_template(template, &raw));

        ExtractedInfo {
            title: raw.title,
            duration: raw.duration,
            filename,
        }
    }))
}

fn render_template(template: &Path, raw: &RawInfo) -> String {
    template
        .to_string_lossy()
        .replace("%(title)s", raw.title.as_deref().unwrap_or(MISSING_FIELD))
        .replace("%(ext)s", raw.ext.as_deref().unwrap_or(MISSING_FIELD))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "/srv/media/%(title)s.%(ext)s";

    fn parse(json: &str) -> Option<ExtractedInfo> {
        parse_info(json, Path::new(TEMPLATE)).unwrap()
    }

    #[test]
    fn null_document_is_empty() {
        assert_eq!(parse("null\n"), None);
    }

    #[test]
    fn prepared_filename_wins() {
        let info = parse(
            r#"{"title": "Talk", "duration": 61, "_filename": "/srv/media/Talk.webm",
                "filename": "/srv/media/other.webm"}"#,
        )
        .unwrap();
        assert_eq!(info.title.as_deref(), Some("Talk"));
        assert_eq!(info.duration, Some(serde_json::Number::from(61)));
        assert_eq!(info.filename, "/srv/media/Talk.webm");
    }

    #[test]
    fn float_duration_is_kept() {
        let info = parse(r#"{"title": "t", "duration": 12.5, "filename": "x"}"#).unwrap();
        assert_eq!(info.duration.unwrap().as_f64(), Some(12.5));
    }

    #[test]
    fn requested_downloads_fallback() {
        let info = parse(
            r#"{"title": "Song", "requested_downloads": [{"filepath": "/srv/media/Song.mp3"}]}"#,
        )
        .unwrap();
        assert_eq!(info.filename, "/srv/media/Song.mp3");
    }

    #[test]
    fn template_fallback_uses_title_and_ext() {
        let info = parse(r#"{"title": "Clip", "ext": "mp4", "duration": null}"#).unwrap();
        assert_eq!(info.filename, "/srv/media/Clip.mp4");
        assert_eq!(info.duration, None);
    }

    #[test]
    fn missing_fields_render_as_na() {
        let info = parse(r#"{"_type": "playlist"}"#).unwrap();
        assert_eq!(info.title, None);
        assert_eq!(info.filename, "/srv/media/NA.NA");
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        let err = parse_info("{not json", Path::new(TEMPLATE)).unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
    }
}
