//! Typed configuration handed to the extraction engine.
//!
//! An `EngineConfig` is built once per request by [`EngineConfig::from_options`]
//! and discarded when the engine call returns.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::options::ParsedOptions;
use crate::progress::ProgressCallback;

/// Subtitle format preference, most preferred first.
pub const SUBTITLE_FORMAT: &str = "vtt/srt/best";

/// Audio codec used by `-x` when `--audio-format` is absent.
pub const DEFAULT_AUDIO_CODEC: &str = "mp3";

/// Audio quality used by `-x` when `--audio-quality` is absent.
pub const DEFAULT_AUDIO_QUALITY: &str = "192";

/// File name template; the engine fills in title and extension.
pub const OUTPUT_NAME_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Subtitle retrieval settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleOptions {
    /// Also fetch auto-generated captions.
    pub include_automatic: bool,
    /// Format preference expression.
    pub format: String,
    /// Language restriction; `None` leaves the choice to the engine.
    pub languages: Option<Vec<String>>,
}

impl SubtitleOptions {
    fn new(include_automatic: bool, language: Option<&String>) -> Self {
        Self {
            include_automatic,
            format: SUBTITLE_FORMAT.to_string(),
            languages: language.map(|lang| vec![lang.clone()]),
        }
    }
}

/// A transformation the engine applies after download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key")]
pub enum PostProcessor {
    /// Transcode to an audio-only file.
    #[serde(rename = "audio-extract")]
    ExtractAudio { codec: String, quality: String },
}

/// Per-request engine configuration.
#[derive(Clone, Serialize)]
pub struct EngineConfig {
    pub output_dir: PathBuf,
    /// `<output_dir>/%(title)s.%(ext)s`
    pub output_template: PathBuf,
    /// Format selector, passed through verbatim.
    pub format: Option<String>,
    pub subtitles: Option<SubtitleOptions>,
    pub skip_download: bool,
    pub post_processors: Vec<PostProcessor>,
    pub write_thumbnail: bool,
    pub no_playlist: bool,
    pub keep_video: bool,
    pub prefer_ffmpeg: bool,
    #[serde(skip)]
    pub progress: Option<ProgressCallback>,
}

impl EngineConfig {
    /// Configuration that downloads with engine defaults into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let output_template = output_dir.join(OUTPUT_NAME_TEMPLATE);
        Self {
            output_dir,
            output_template,
            format: None,
            subtitles: None,
            skip_download: false,
            post_processors: Vec::new(),
            write_thumbnail: false,
            no_playlist: false,
            keep_video: false,
            prefer_ffmpeg: true,
            progress: None,
        }
    }

    /// Apply the flag table to produce a configuration.
    ///
    /// In subtitle-only mode the format selector and audio extraction are
    /// ignored. `--sub-lang` only matters when subtitles are enabled, and the
    /// audio overrides only matter with `-x`.
    pub fn from_options(output_dir: &Path, options: &ParsedOptions) -> Self {
        let mut config = Self::new(output_dir);

        if options.subtitle_only() {
            config.subtitles = Some(SubtitleOptions::new(true, options.sub_lang.as_ref()));
            config.skip_download = true;
        } else {
            config.format.clone_from(&options.format);

            if options.extract_audio {
                config.post_processors.push(PostProcessor::ExtractAudio {
                    codec: options
                        .audio_format
                        .clone()
                        .unwrap_or_else(|| DEFAULT_AUDIO_CODEC.to_string()),
                    quality: options
                        .audio_quality
                        .clone()
                        .unwrap_or_else(|| DEFAULT_AUDIO_QUALITY.to_string()),
                });
            }

            if options.write_sub {
                config.subtitles = Some(SubtitleOptions::new(false, options.sub_lang.as_ref()));
            }
        }

        config.write_thumbnail = options.write_thumbnail;
        config.no_playlist = options.no_playlist;
        config.keep_video = options.keep_video;
        config
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Whether subtitle files are expected in the output directory.
    pub const fn writes_subtitles(&self) -> bool {
        self.subtitles.is_some()
    }

    /// Subtitles only, no media download.
    pub const fn is_subtitle_only(&self) -> bool {
        self.skip_download && self.subtitles.is_some()
    }

    /// Codec and quality of the audio extraction step, if requested.
    pub fn audio_extraction(&self) -> Option<(&str, &str)> {
        self.post_processors.iter().find_map(|pp| match pp {
            PostProcessor::ExtractAudio { codec, quality } => {
                Some((codec.as_str(), quality.as_str()))
            }
        })
    }

    /// Invoke the progress callback, if any.
    pub fn report_progress(&self, update: crate::progress::ProgressUpdate) {
        if let Some(callback) = &self.progress {
            callback(update);
        }
    }

    /// One-line JSON rendering for logs.
    pub fn summary(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable: {e}>"))
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("output_dir", &self.output_dir)
            .field("output_template", &self.output_template)
            .field("format", &self.format)
            .field("subtitles", &self.subtitles)
            .field("skip_download", &self.skip_download)
            .field("post_processors", &self.post_processors)
            .field("write_thumbnail", &self.write_thumbnail)
            .field("no_playlist", &self.no_playlist)
            .field("keep_video", &self.keep_video)
            .field("prefer_ffmpeg", &self.prefer_ffmpeg)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::parse_options;

    fn config_for(tokens: &[&str]) -> EngineConfig {
        let parsed = parse_options(tokens).unwrap();
        EngineConfig::from_options(Path::new("/srv/media"), &parsed)
    }

    #[test]
    fn format_best_sets_selector_only() {
        let config = config_for(&["-f", "best"]);

        assert_eq!(config.format.as_deref(), Some("best"));
        assert!(config.subtitles.is_none());
        assert!(config.post_processors.is_empty());
        assert!(!config.write_thumbnail);
        assert!(!config.skip_download);
    }

    #[test]
    fn output_template_lives_in_output_dir() {
        let config = config_for(&[]);
        assert_eq!(
            config.output_template,
            PathBuf::from("/srv/media/%(title)s.%(ext)s")
        );
        assert!(config.prefer_ffmpeg);
    }

    #[test]
    fn subtitle_only_mode_regardless_of_order() {
        for tokens in [
            ["--write-sub", "--skip-download"],
            ["--skip-download", "--write-sub"],
        ] {
            let config = config_for(&tokens);
            let subs = config.subtitles.as_ref().unwrap();
            assert!(config.skip_download);
            assert!(config.is_subtitle_only());
            assert!(subs.include_automatic);
            assert_eq!(subs.format, "vtt/srt/best");
        }
    }

    #[test]
    fn subtitle_only_mode_with_language() {
        let config = config_for(&["--write-sub", "--skip-download", "--sub-lang", "en"]);
        let subs = config.subtitles.unwrap();
        assert_eq!(subs.languages, Some(vec!["en".to_string()]));
        assert!(config.skip_download);
    }

    #[test]
    fn subtitle_only_mode_ignores_format_and_audio() {
        let config = config_for(&["--write-sub", "--skip-download", "-f", "best", "-x"]);
        assert!(config.format.is_none());
        assert!(config.post_processors.is_empty());
    }

    #[test]
    fn extract_audio_defaults() {
        let config = config_for(&["-x"]);
        assert_eq!(config.audio_extraction(), Some(("mp3", "192")));
    }

    #[test]
    fn extract_audio_with_format_override() {
        let config = config_for(&["-x", "--audio-format", "wav"]);
        assert_eq!(
            config.post_processors,
            vec![PostProcessor::ExtractAudio {
                codec: "wav".to_string(),
                quality: "192".to_string(),
            }]
        );
        let json = serde_json::to_value(&config.post_processors[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "audio-extract", "codec": "wav", "quality": "192"})
        );
    }

    #[test]
    fn extract_audio_with_both_overrides() {
        let config = config_for(&["--audio-quality", "320", "-x", "--audio-format", "opus"]);
        assert_eq!(config.audio_extraction(), Some(("opus", "320")));
    }

    #[test]
    fn audio_overrides_without_extract_have_no_effect() {
        let config = config_for(&["--audio-format", "wav", "--audio-quality", "5"]);
        assert!(config.post_processors.is_empty());
    }

    #[test]
    fn write_sub_alongside_download() {
        let config = config_for(&["-f", "best", "--write-sub", "--sub-lang", "de"]);
        let subs = config.subtitles.as_ref().unwrap();
        assert!(!config.skip_download);
        assert!(!subs.include_automatic);
        assert_eq!(subs.languages, Some(vec!["de".to_string()]));
        assert_eq!(config.format.as_deref(), Some("best"));
    }

    #[test]
    fn sub_lang_without_write_sub_has_no_effect() {
        let config = config_for(&["--sub-lang", "en"]);
        assert!(config.subtitles.is_none());
        assert!(!config.writes_subtitles());
    }

    #[test]
    fn skip_download_alone_has_no_effect() {
        let config = config_for(&["--skip-download"]);
        assert!(!config.skip_download);
    }

    #[test]
    fn boolean_flags_apply_in_every_mode() {
        let config = config_for(&[
            "--write-sub",
            "--skip-download",
            "--write-thumbnail",
            "--no-playlist",
            "--keep-video",
        ]);
        assert!(config.write_thumbnail);
        assert!(config.no_playlist);
        assert!(config.keep_video);
    }

    #[test]
    fn summary_omits_progress_callback() {
        let config = config_for(&["-x"]).with_progress(std::sync::Arc::new(|_| {}));
        let summary = config.summary();
        assert!(summary.contains("audio-extract"));
        assert!(!summary.contains("progress"));
        assert!(format!("{config:?}").contains("progress: true"));
    }
}
