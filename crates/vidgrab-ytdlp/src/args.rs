//! Command line rendering.

use std::ffi::OsString;
use std::path::Path;

use vidgrab_core::EngineConfig;

/// Marker at the start of every progress line we ask yt-dlp to print.
pub const PROGRESS_PREFIX: &str = "vidgrab-progress";

/// `--progress-template` value: marker, downloaded, total, estimate.
pub fn progress_template() -> String {
    format!(
        "download:{PROGRESS_PREFIX} %(progress.downloaded_bytes)s \
         %(progress.total_bytes)s %(progress.total_bytes_estimate)s"
    )
}

/// Render `config` as yt-dlp arguments for `url`.
///
/// The URL always comes last, after `--`, so it is never read as a flag.
pub fn build_args(
    config: &EngineConfig,
    ffmpeg_location: Option<&Path>,
    url: &str,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-o".into(), config.output_template.clone().into()];

    if let Some(format) = &config.format {
        args.extend([OsString::from("-f"), OsString::from(format)]);
    }

    if let Some(subs) = &config.subtitles {
        args.push("--write-subs".into());
        if subs.include_automatic {
            args.push("--write-auto-subs".into());
        }
        args.extend([OsString::from("--sub-format"), OsString::from(&subs.format)]);
        if let Some(languages) = &subs.languages {
            args.extend([OsString::from("--sub-langs"), OsString::from(languages.join(","))]);
        }
    }

    if config.skip_download {
        args.push("--skip-download".into());
    }

    if let Some((codec, quality)) = config.audio_extraction() {
        args.extend(
            ["-x", "--audio-format", codec, "--audio-quality", quality].map(OsString::from),
        );
    }

    for (enabled, flag) in [
        (config.write_thumbnail, "--write-thumbnail"),
        (config.no_playlist, "--no-playlist"),
        (config.keep_video, "--keep-video"),
    ] {
        if enabled {
            args.push(flag.into());
        }
    }

    if let Some(location) = ffmpeg_location {
        args.extend([OsString::from("--ffmpeg-location"), location.as_os_str().to_os_string()]);
    }

    args.extend(
        [
            "--dump-single-json",
            "--no-simulate",
            "--progress",
            "--newline",
            "--progress-template",
        ]
        .map(OsString::from),
    );
    args.push(progress_template().into());

    args.extend(["--", url].map(OsString::from));
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidgrab_core::parse_options;

    fn render(options: &[&str], ffmpeg: Option<&Path>) -> Vec<String> {
        let parsed = parse_options(options).unwrap();
        let config = EngineConfig::from_options(Path::new("/srv/media"), &parsed);
        build_args(&config, ffmpeg, "https://example.com/v/1")
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn position(args: &[String], flag: &str) -> Option<usize> {
        args.iter().position(|a| a == flag)
    }

    #[test]
    fn plain_request_has_template_and_url_last() {
        let args = render(&[], None);

        assert_eq!(&args[..2], ["-o", "/srv/media/%(title)s.%(ext)s"]);
        assert_eq!(&args[args.len() - 2..], ["--", "https://example.com/v/1"]);
        assert!(position(&args, "--dump-single-json").is_some());
        assert!(position(&args, "--no-simulate").is_some());
        assert!(position(&args, "-f").is_none());
        assert!(position(&args, "--write-subs").is_none());
    }

    #[test]
    fn format_selector_is_passed_verbatim() {
        let args = render(&["-f", "bestvideo[height<=480]+bestaudio/best"], None);
        let at = position(&args, "-f").unwrap();
        assert_eq!(args[at + 1], "bestvideo[height<=480]+bestaudio/best");
    }

    #[test]
    fn subtitle_only_skips_download_and_includes_automatic() {
        let args = render(
            &["--write-sub", "--skip-download", "--sub-lang", "de", "-f", "best"],
            None,
        );

        assert!(position(&args, "--write-subs").is_some());
        assert!(position(&args, "--write-auto-subs").is_some());
        assert!(position(&args, "--skip-download").is_some());
        let langs = position(&args, "--sub-langs").unwrap();
        assert_eq!(args[langs + 1], "de");
        let format = position(&args, "--sub-format").unwrap();
        assert_eq!(args[format + 1], "vtt/srt/best");
        assert!(position(&args, "-f").is_none());
    }

    #[test]
    fn subtitles_with_media_skip_automatic_captions() {
        let args = render(&["--write-sub"], None);
        assert!(position(&args, "--write-subs").is_some());
        assert!(position(&args, "--write-auto-subs").is_none());
        assert!(position(&args, "--sub-langs").is_none());
        assert!(position(&args, "--skip-download").is_none());
    }

    #[test]
    fn audio_extraction_uses_defaults() {
        let args = render(&["-x"], None);
        let at = position(&args, "-x").unwrap();
        assert_eq!(
            &args[at..at + 5],
            ["-x", "--audio-format", "mp3", "--audio-quality", "192"]
        );
    }

    #[test]
    fn switches_and_ffmpeg_location() {
        let args = render(
            &["--write-thumbnail", "--no-playlist", "--keep-video"],
            Some(Path::new("/opt/ffmpeg/bin")),
        );
        assert!(position(&args, "--write-thumbnail").is_some());
        assert!(position(&args, "--no-playlist").is_some());
        assert!(position(&args, "--keep-video").is_some());
        let at = position(&args, "--ffmpeg-location").unwrap();
        assert_eq!(args[at + 1], "/opt/ffmpeg/bin");
    }

    #[test]
    fn progress_template_is_requested() {
        let args = render(&[], None);
        let at = position(&args, "--progress-template").unwrap();
        assert!(args[at + 1].starts_with("download:vidgrab-progress "));
    }
}
