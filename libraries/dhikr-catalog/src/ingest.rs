//! Storage-sync ingestion
//!
//! Registers audio files uploaded to a storage bucket as catalog rows. Each
//! file gets a title derived from its name, an artist/album guessed from
//! keywords in the name, and its public object URL as `audiourl`. Files that
//! are already registered (same `audiourl`) are left alone.

use crate::client::CatalogClient;
use crate::error::Result;
use crate::types::NewTrackRow;
use dhikr_core::title::title_from_filename;
use dhikr_core::Track;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "audio";

/// Extensions treated as audio (compared case-insensitively).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// Artist and album assigned to an ingested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub artist: &'static str,
    pub album: &'static str,
}

const PRAYERS: Category = Category {
    artist: "Daily Prayers",
    album: "Islamic Prayers",
};
const DZIKIR: Category = Category {
    artist: "Daily Dzikir",
    album: "Islamic Recitations",
};
const QURAN: Category = Category {
    artist: "Quran Recitation",
    album: "Islamic Audio Collection",
};
const UNKNOWN: Category = Category {
    artist: "Unknown Artist",
    album: "Unknown Album",
};

/// Whether `name` has an audio extension.
pub fn is_audio_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    AUDIO_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Guess artist and album from keywords in the file name.
///
/// Rules are checked in order and the first match wins.
pub fn classify(name: &str) -> Category {
    let lower = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    if has(&["doa"]) {
        PRAYERS
    } else if has(&["dzikir", "tahmid", "istighfar"]) {
        DZIKIR
    } else if has(&["quran", "ayat", "al-"]) {
        QURAN
    } else {
        UNKNOWN
    }
}

/// Public URL of an object in a storage bucket.
pub fn public_object_url(base_url: &str, bucket: &str, name: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        name
    )
}

/// Row to insert for an uploaded file.
pub fn new_track_row(base_url: &str, bucket: &str, name: &str) -> NewTrackRow {
    let category = classify(name);
    NewTrackRow {
        title: title_from_filename(name),
        artist: category.artist.to_string(),
        album: category.album.to_string(),
        audiourl: public_object_url(base_url, bucket, name),
        duration: 0.0,
    }
}

/// Result of ingesting one file.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// A new row was created
    Inserted(Track),
    /// The file does not have an audio extension
    SkippedNotAudio,
    /// A row with the same audio URL already exists
    SkippedExisting,
}

/// Per-file status in a bucket sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FileStatus {
    Inserted { id: String },
    SkippedNotAudio,
    SkippedExisting,
    Failed { message: String },
}

/// One file's entry in a [`SyncReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Outcome of syncing a whole bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub bucket: String,
    pub files: Vec<FileReport>,
}

impl SyncReport {
    /// Number of rows created.
    pub fn inserted(&self) -> usize {
        self.count(|status| matches!(status, FileStatus::Inserted { .. }))
    }

    /// Number of files left alone.
    pub fn skipped(&self) -> usize {
        self.count(|status| {
            matches!(
                status,
                FileStatus::SkippedExisting | FileStatus::SkippedNotAudio
            )
        })
    }

    /// Number of files whose insert failed.
    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, FileStatus::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|file| predicate(&file.status)).count()
    }
}

impl CatalogClient {
    /// Register one uploaded file.
    pub async fn ingest_object(&self, bucket: &str, name: &str) -> Result<IngestOutcome> {
        if !is_audio_file(name) {
            debug!(bucket, name, "Not an audio file, skipping");
            return Ok(IngestOutcome::SkippedNotAudio);
        }

        let row = new_track_row(self.url(), bucket, name);
        if let Some(id) = self.find_track_by_audio_url(&row.audiourl).await? {
            debug!(bucket, name, id = %id, "Already in catalog, skipping");
            return Ok(IngestOutcome::SkippedExisting);
        }

        let stored = self.insert_track(&row).await?;
        info!(bucket, name, id = %stored.id, title = %row.title, "Added track to catalog");
        Ok(IngestOutcome::Inserted(stored.into_track()))
    }

    /// Register every audio file at the root of `bucket`.
    ///
    /// Folders are skipped. A failure on one file is recorded in the report
    /// and the sync moves on; only listing the bucket can fail the whole call.
    pub async fn sync_bucket(&self, bucket: &str) -> Result<SyncReport> {
        let objects = self.list_objects(bucket).await?;
        let mut report = SyncReport {
            bucket: bucket.to_string(),
            files: Vec::with_capacity(objects.len()),
        };

        for object in objects.into_iter().filter(|object| !object.is_folder()) {
            let status = match self.ingest_object(bucket, &object.name).await {
                Ok(IngestOutcome::Inserted(track)) => FileStatus::Inserted {
                    id: track.id.as_str().to_string(),
                },
                Ok(IngestOutcome::SkippedNotAudio) => FileStatus::SkippedNotAudio,
                Ok(IngestOutcome::SkippedExisting) => FileStatus::SkippedExisting,
                Err(e) => {
                    warn!(bucket, file = %object.name, error = %e, "Failed to ingest file");
                    FileStatus::Failed {
                        message: e.to_string(),
                    }
                }
            };
            report.files.push(FileReport {
                file: object.name,
                status,
            });
        }

        info!(
            bucket,
            inserted = report.inserted(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Bucket sync finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_extensions() {
        assert!(is_audio_file("doa_pagi.mp3"));
        assert!(is_audio_file("Tahmid.WAV"));
        assert!(is_audio_file("a.ogg"));
        assert!(is_audio_file("a.m4a"));
        assert!(!is_audio_file("cover.jpg"));
        assert!(!is_audio_file("mp3"));
        assert!(!is_audio_file("notes.mp3.txt"));
    }

    #[test]
    fn test_classification_rules() {
        assert_eq!(classify("Doa_Sebelum_Tidur.mp3"), PRAYERS);
        assert_eq!(classify("dzikir-pagi.mp3"), DZIKIR);
        assert_eq!(classify("tahmid.mp3"), DZIKIR);
        assert_eq!(classify("istighfar_100x.ogg"), DZIKIR);
        assert_eq!(classify("Quran_Juz30.mp3"), QURAN);
        assert_eq!(classify("ayat-kursi.mp3"), QURAN);
        assert_eq!(classify("al-mulk.mp3"), QURAN);
        assert_eq!(classify("nasheed.mp3"), UNKNOWN);
    }

    #[test]
    fn test_first_rule_wins() {
        // contains both "doa" and "dzikir"
        assert_eq!(classify("doa_dan_dzikir.mp3"), PRAYERS);
    }

    #[test]
    fn test_public_object_url() {
        assert_eq!(
            public_object_url("https://x.supabase.co/", "audio", "doa.mp3"),
            "https://x.supabase.co/storage/v1/object/public/audio/doa.mp3"
        );
    }

    #[test]
    fn test_new_track_row() {
        let row = new_track_row("https://x.supabase.co", "audio", "dzikir_pagi.mp3");
        assert_eq!(row.title, "Dzikir Pagi");
        assert_eq!(row.artist, "Daily Dzikir");
        assert_eq!(row.album, "Islamic Recitations");
        assert_eq!(row.duration, 0.0);
        assert!(row.audiourl.ends_with("/audio/dzikir_pagi.mp3"));
    }

    #[test]
    fn test_report_counts() {
        let report = SyncReport {
            bucket: "audio".into(),
            files: vec![
                FileReport {
                    file: "a.mp3".into(),
                    status: FileStatus::Inserted { id: "1".into() },
                },
                FileReport {
                    file: "b.mp3".into(),
                    status: FileStatus::SkippedExisting,
                },
                FileReport {
                    file: "c.jpg".into(),
                    status: FileStatus::SkippedNotAudio,
                },
                FileReport {
                    file: "d.mp3".into(),
                    status: FileStatus::Failed {
                        message: "boom".into(),
                    },
                },
            ],
        };

        assert_eq!(report.inserted(), 1);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.failed(), 1);
    }
}
