//! Output directory resolution for downloads.
//!
//! - `"default"` maps to a configured default directory
//! - every other value is confined to a configured root
//! - directories are created on demand and re-checked after symlink resolution
//!
//! OS-specific lookup of the default directory is kept in `platform`.

mod error;
mod platform;
mod policy;
mod subtitles;

pub use error::OutputDirError;
pub use platform::default_output_dir;
pub use policy::OutputDirPolicy;
pub use subtitles::{contains_subtitle_files, is_subtitle_file};
