//! Plain-text rendering of catalog data for the terminal.

use dhikr_catalog::{FileStatus, SyncReport};
use dhikr_core::{Playlist, Track};
use std::fmt::Write;

/// `m:ss` for a duration in seconds; unknown durations render as `--:--`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "--:--".to_string();
    }
    let total = seconds.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// One line per track.
pub fn track_line(track: &Track) -> String {
    let mut line = format!(
        "{:>6}  {:<40}  {:<20}  {:>6}",
        track.id.as_str(),
        track.title,
        track.artist,
        format_duration(track.duration)
    );
    if !track.is_playable() {
        line.push_str("  (no audio)");
    }
    line
}

/// Playlist header followed by its tracks in order.
pub fn playlist_block(playlist: &Playlist) -> String {
    let mut out = format!("{} [{}] ({} tracks)\n", playlist.name, playlist.id, playlist.len());
    for (index, track) in playlist.tracks.iter().enumerate() {
        let _ = writeln!(out, "  {:>3}. {}", index + 1, track.title);
    }
    out
}

/// Per-file sync results followed by totals.
pub fn sync_summary(report: &SyncReport) -> String {
    let mut out = String::new();
    for file in &report.files {
        let status = match &file.status {
            FileStatus::Inserted { id } => format!("added as {id}"),
            FileStatus::SkippedNotAudio => "skipped (not audio)".to_string(),
            FileStatus::SkippedExisting => "skipped (already in catalog)".to_string(),
            FileStatus::Failed { message } => format!("failed: {message}"),
        };
        let _ = writeln!(out, "{:<40}  {}", file.file, status);
    }
    let _ = write!(
        out,
        "{}: {} added, {} skipped, {} failed",
        report.bucket,
        report.inserted(),
        report.skipped(),
        report.failed()
    );
    out
}
