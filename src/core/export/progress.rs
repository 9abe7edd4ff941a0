//! Progress reporting for long-running exports

use std::sync::Arc;

/// Callback receiving human-readable status lines
///
/// Advisory only; the export never depends on what the sink does.
pub type ProgressSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Format a byte count as a human-readable size
///
/// # Examples
///
/// ```
/// use onexport::core::export::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        b => format!("{b} B"),
    }
}
