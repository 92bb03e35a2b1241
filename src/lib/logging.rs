//! Logging utilities for formatted output.
//!
//! Helpers for consistent, human-readable log lines: thousands separators, durations, a
//! simple operation timer, and a one-glance summary of a parsed header.

use std::time::{Duration, Instant};

use crate::header::BamHeader;

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use pbheader_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a duration in human-readable form.
///
/// Sub-second durations are shown in milliseconds.
///
/// # Examples
///
/// ```
/// use pbheader_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Logs the size of each header section at info level.
///
/// # Arguments
///
/// * `label` - Names the header in the log line, e.g. the input path
/// * `header` - The header to summarize
pub fn log_header_summary(label: &str, header: &BamHeader) {
    log::info!("{label}:");
    log::info!(
        "  @HD VN:{} SO:{} pb:{}",
        header.version(),
        display_or_unset(header.sort_order()),
        display_or_unset(header.pacbio_bam_version())
    );
    log::info!("  Sequences: {}", format_count(header.sequences().len() as u64));
    log::info!("  Read groups: {}", format_count(header.read_group_ids().len() as u64));
    log::info!("  Programs: {}", format_count(header.program_ids().len() as u64));
    log::info!("  Comments: {}", format_count(header.comments().len() as u64));
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "<unset>" } else { value }
}

/// Operation timing helper.
///
/// # Examples
///
/// ```no_run
/// use pbheader_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Merging headers");
///
/// // ... do work ...
///
/// timer.log_completion(3); // Log with item count
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Time elapsed since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the completion with an item count.
    pub fn log_completion(&self, count: u64) {
        log::info!(
            "{} completed: {} item(s) in {}",
            self.operation,
            format_count(count),
            format_duration(self.elapsed())
        );
    }
}
