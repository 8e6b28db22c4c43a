//! Command-line style option parsing.
//!
//! Clients send a flat list of yt-dlp style flags. This module turns that
//! list into a typed [`ParsedOptions`] in a single validating pass, which
//! [`EngineConfig::from_options`](crate::EngineConfig::from_options) then
//! maps onto the engine configuration.
//!
//! Flag presence is checked anywhere in the list. A value flag takes the
//! token right after its first occurrence, verbatim, even if that token looks
//! like another flag.

use thiserror::Error;

pub const WRITE_SUB: &str = "--write-sub";
pub const SKIP_DOWNLOAD: &str = "--skip-download";
pub const SUB_LANG: &str = "--sub-lang";
pub const FORMAT: &str = "-f";
pub const EXTRACT_AUDIO: &str = "-x";
pub const AUDIO_FORMAT: &str = "--audio-format";
pub const AUDIO_QUALITY: &str = "--audio-quality";
pub const WRITE_THUMBNAIL: &str = "--write-thumbnail";
pub const NO_PLAYLIST: &str = "--no-playlist";
pub const KEEP_VIDEO: &str = "--keep-video";

const VALUE_FLAGS: [&str; 4] = [FORMAT, SUB_LANG, AUDIO_FORMAT, AUDIO_QUALITY];

const SWITCH_FLAGS: [&str; 6] = [
    WRITE_SUB,
    SKIP_DOWNLOAD,
    EXTRACT_AUDIO,
    WRITE_THUMBNAIL,
    NO_PLAYLIST,
    KEEP_VIDEO,
];

/// Errors produced while parsing an option list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// A value flag was the last token.
    #[error("Malformed option: '{flag}' expects a value")]
    MalformedOption { flag: String },
}

/// Typed view of a client option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    pub write_sub: bool,
    pub skip_download: bool,
    pub sub_lang: Option<String>,
    pub format: Option<String>,
    pub extract_audio: bool,
    pub audio_format: Option<String>,
    pub audio_quality: Option<String>,
    pub write_thumbnail: bool,
    pub no_playlist: bool,
    pub keep_video: bool,
    /// Tokens that were neither a known flag nor a consumed value.
    pub unrecognized: Vec<String>,
}

impl ParsedOptions {
    /// `--write-sub` together with `--skip-download`.
    pub const fn subtitle_only(&self) -> bool {
        self.write_sub && self.skip_download
    }
}

/// Parse a client option list.
///
/// Unknown tokens are kept in [`ParsedOptions::unrecognized`] and otherwise
/// ignored. A value flag without a following token fails with
/// [`OptionsError::MalformedOption`].
pub fn parse_options<S: AsRef<str>>(tokens: &[S]) -> Result<ParsedOptions, OptionsError> {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    let mut consumed = vec![false; tokens.len()];

    let mut value_of = |flag: &str| -> Result<Option<String>, OptionsError> {
        let Some(index) = tokens.iter().position(|t| *t == flag) else {
            return Ok(None);
        };
        let value = tokens
            .get(index + 1)
            .ok_or_else(|| OptionsError::MalformedOption {
                flag: flag.to_string(),
            })?;
        consumed[index + 1] = true;
        Ok(Some((*value).to_string()))
    };

    let format = value_of(FORMAT)?;
    let sub_lang = value_of(SUB_LANG)?;
    let audio_format = value_of(AUDIO_FORMAT)?;
    let audio_quality = value_of(AUDIO_QUALITY)?;

    let has = |flag: &str| tokens.contains(&flag);

    let unrecognized = tokens
        .iter()
        .zip(&consumed)
        .filter(|(token, used)| {
            !**used && !VALUE_FLAGS.contains(*token) && !SWITCH_FLAGS.contains(*token)
        })
        .map(|(token, _)| (*token).to_string())
        .collect();

    Ok(ParsedOptions {
        write_sub: has(WRITE_SUB),
        skip_download: has(SKIP_DOWNLOAD),
        sub_lang,
        format,
        extract_audio: has(EXTRACT_AUDIO),
        audio_format,
        audio_quality,
        write_thumbnail: has(WRITE_THUMBNAIL),
        no_playlist: has(NO_PLAYLIST),
        keep_video: has(KEEP_VIDEO),
        unrecognized,
    })
}
