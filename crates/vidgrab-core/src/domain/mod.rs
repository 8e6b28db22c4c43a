//! Domain types shared by every vidgrab adapter.

mod engine_config;
mod request;

pub use engine_config::{
    DEFAULT_AUDIO_CODEC, DEFAULT_AUDIO_QUALITY, EngineConfig, OUTPUT_NAME_TEMPLATE, PostProcessor,
    SUBTITLE_FORMAT, SubtitleOptions,
};
pub use request::{
    DEFAULT_OUTPUT_DIR_KEY, DownloadRequest, DownloadResponse, MSG_DOWNLOAD_COMPLETED,
    MSG_NO_SUBTITLES, MediaDuration, UNKNOWN,
};
