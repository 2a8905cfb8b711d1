//! Formatting utilities

use chrono::{DateTime, Local};
use std::time::SystemTime;

use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a file modification time
pub fn format_modified(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Local>::from(time)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "N/A".to_string(),
    }
}

/// Format a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a frame range as `first-last`
pub fn format_frame_range(start: usize, end: usize) -> String {
    if end <= start + 1 {
        start.to_string()
    } else {
        format!("{start}-{}", end - 1)
    }
}
