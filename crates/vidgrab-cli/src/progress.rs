//! Terminal progress rendering for `vidgrab fetch`.
//!
//! Draws an indicatif bar on a terminal and throttled plain lines otherwise.
//! Output goes to stderr so `--json` results on stdout stay clean.

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

/// Progress display that selects terminal or plain output.
pub struct CliProgressPrinter {
    inner: ProgressRender,
}

enum ProgressRender {
    Fancy(FancyProgress),
    Plain(PlainProgress),
}

impl CliProgressPrinter {
    pub fn new(label: &str) -> Self {
        let inner = if io::stderr().is_terminal() {
            ProgressRender::Fancy(FancyProgress::new(label))
        } else {
            ProgressRender::Plain(PlainProgress::new(label))
        };
        Self { inner }
    }

    /// `total` of 0 means the size is not known yet.
    pub fn update(&mut self, downloaded: u64, total: u64) {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.update(downloaded, total),
            ProgressRender::Plain(inner) => inner.update(downloaded, total),
        }
    }

    pub fn finish(&mut self) {
        match &mut self.inner {
            ProgressRender::Fancy(inner) => inner.finish(),
            ProgressRender::Plain(inner) => inner.finish(),
        }
    }
}

struct FancyProgress {
    bar: ProgressBar,
    saw_length: bool,
}

impl FancyProgress {
    fn new(label: &str) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(spinner_style());
        bar.set_message(format_label(label));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            saw_length: false,
        }
    }

    fn update(&mut self, downloaded: u64, total: u64) {
        if total == 0 {
            self.bar.set_position(downloaded);
            return;
        }
        if !self.saw_length {
            self.bar.set_style(bar_style());
            self.saw_length = true;
        }
        if self.bar.length() != Some(total) {
            self.bar.set_length(total);
        }
        self.bar.set_position(downloaded.min(total));
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} {spinner} {bytes}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{msg} {bar:28.cyan/blue} {human_bytes:>9} / {human_total:>9} ({percent:>3}%) @ {binary_bytes_per_sec} ETA {eta}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .with_key("human_bytes", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
        let _ = write!(w, "{}", HumanBytes(state.pos()));
    })
    .with_key("human_total", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
        let value = state
            .len()
            .map_or_else(|| "?".to_string(), |len| HumanBytes(len).to_string());
        let _ = write!(w, "{value}");
    })
}

fn format_label(raw: &str) -> String {
    const MAX_LABEL: usize = 40;
    if raw.chars().count() <= MAX_LABEL {
        return raw.to_string();
    }
    let mut buf: String = raw.chars().take(MAX_LABEL - 1).collect();
    buf.push('…');
    buf
}

struct PlainProgress {
    label: String,
    last_emit: Option<Instant>,
}

impl PlainProgress {
    const MIN_INTERVAL: Duration = Duration::from_secs(1);

    fn new(label: &str) -> Self {
        Self {
            label: format_label(label),
            last_emit: None,
        }
    }

    fn update(&mut self, downloaded: u64, total: u64) {
        let now = Instant::now();
        let done = total > 0 && downloaded >= total;
        if !done
            && self
                .last_emit
                .is_some_and(|last| now.duration_since(last) < Self::MIN_INTERVAL)
        {
            return;
        }
        self.last_emit = Some(now);

        let _ = writeln!(io::stderr(), "{}", progress_line(&self.label, downloaded, total));
    }

    fn finish(&mut self) {
        self.last_emit = None;
    }
}

fn progress_line(label: &str, downloaded: u64, total: u64) -> String {
    if total == 0 {
        return format!("{label}: {} downloaded", HumanBytes(downloaded));
    }
    let percent = downloaded.min(total).saturating_mul(100) / total;
    format!(
        "{label}: {} / {} ({percent}%)",
        HumanBytes(downloaded),
        HumanBytes(total)
    )
}
