//! Progress line parsing.
//!
//! yt-dlp prints one line per progress tick using the template from
//! [`progress_template`](crate::progress_template):
//!
//! ```text
//! vidgrab-progress 1048576 4194304 NA
//! ```
//!
//! Fields are downloaded bytes, total bytes and estimated total bytes. Any of
//! them may be `NA` when yt-dlp does not know the value yet.

use vidgrab_core::ProgressUpdate;

use crate::args::PROGRESS_PREFIX;

/// Parse one output line. Returns `None` for anything that is not a progress line.
pub fn parse_progress_line(line: &str) -> Option<ProgressUpdate> {
    let rest = line.trim().strip_prefix(PROGRESS_PREFIX)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut fields = rest.split_whitespace();
    let downloaded = parse_bytes(fields.next()?)?;
    let total = fields.next().and_then(parse_bytes);
    let total_estimate = fields.next().and_then(parse_bytes);

    Some(ProgressUpdate {
        downloaded,
        total,
        total_estimate,
    })
}

/// Byte counts are integers, except estimates which yt-dlp may print as floats.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_bytes(field: &str) -> Option<u64> {
    if field == "NA" {
        return None;
    }
    field.parse::<u64>().ok().or_else(|| {
        field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}
