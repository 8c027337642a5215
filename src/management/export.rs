use std::{
    fmt,
    io::Error,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Local};

use crate::{
    logging::{self, LogSink},
    types::{ExportDocument, ExportPaths, NormalizedSong, RawSongRecord},
    utils,
};

pub const EXPORT_FILE_PREFIX: &str = "apple_music";

#[derive(Debug)]
pub enum ExportError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for ExportError {
    fn from(err: Error) -> Self {
        ExportError::IoError(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::SerdeError(err)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "I/O error: {}", e),
            ExportError::SerdeError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Fallback texts for songs without artist or title.
///
/// The text and JSON files use different placeholders, so each has its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLabels {
    pub text_unknown_artist: String,
    pub text_unknown_title: String,
    pub json_unknown_artist: String,
    pub json_unknown_title: String,
}

impl Default for ExportLabels {
    fn default() -> Self {
        Self {
            text_unknown_artist: "Unknown Artist".to_string(),
            text_unknown_title: "Unknown Title".to_string(),
            json_unknown_artist: "Unknown".to_string(),
            json_unknown_title: "Unknown".to_string(),
        }
    }
}

/// Writes a fetched library to `apple_music_<timestamp>.txt` and `.json`.
pub struct ExportWriter {
    output_dir: PathBuf,
    labels: ExportLabels,
    log: Arc<dyn LogSink>,
}

impl ExportWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            labels: ExportLabels::default(),
            log: logging::tracing_sink(),
        }
    }

    pub fn with_labels(mut self, labels: ExportLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_log(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes both export files, stamped with the current local time.
    ///
    /// Returns `Ok(None)` without touching the disk when `songs` is empty.
    pub fn write(&self, songs: &[RawSongRecord]) -> Result<Option<ExportPaths>, ExportError> {
        self.write_at(songs, Local::now())
    }

    /// Like [`write`](Self::write) with an explicit timestamp.
    ///
    /// A failed write is logged before the error is returned.
    pub fn write_at(
        &self,
        songs: &[RawSongRecord],
        now: DateTime<Local>,
    ) -> Result<Option<ExportPaths>, ExportError> {
        if songs.is_empty() {
            return Ok(None);
        }

        match self.write_files(songs, &now) {
            Ok(paths) => {
                self.log.info(&format!(
                    "Saved to {} and {}",
                    file_name(&paths.text),
                    file_name(&paths.json)
                ));
                Ok(Some(paths))
            }
            Err(e) => {
                self.log.error(&format!(
                    "Failed to write export to {}: {}",
                    self.output_dir.display(),
                    e
                ));
                Err(e)
            }
        }
    }

    fn write_files(
        &self,
        songs: &[RawSongRecord],
        now: &DateTime<Local>,
    ) -> Result<ExportPaths, ExportError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let timestamp = utils::export_timestamp(now);
        let paths = ExportPaths {
            text: self
                .output_dir
                .join(format!("{}_{}.txt", EXPORT_FILE_PREFIX, timestamp)),
            json: self
                .output_dir
                .join(format!("{}_{}.json", EXPORT_FILE_PREFIX, timestamp)),
        };

        std::fs::write(&paths.text, self.render_text(songs))?;

        let document = ExportDocument {
            export_date: utils::iso_timestamp(now),
            total_songs: songs.len(),
            songs: songs.iter().map(|song| self.normalize(song)).collect(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        std::fs::write(&paths.json, json)?;

        Ok(paths)
    }

    /// One `Artist - Clean Title` line per song.
    pub fn render_text(&self, songs: &[RawSongRecord]) -> String {
        songs
            .iter()
            .map(|song| {
                let artist = song
                    .artist_name()
                    .unwrap_or(self.labels.text_unknown_artist.as_str());
                let title = utils::clean_title(
                    song.title().unwrap_or(self.labels.text_unknown_title.as_str()),
                );
                format!("{} - {}\n", artist, title)
            })
            .collect()
    }

    pub fn normalize(&self, song: &RawSongRecord) -> NormalizedSong {
        let title = song
            .title()
            .unwrap_or(self.labels.json_unknown_title.as_str())
            .to_string();

        NormalizedSong {
            artist: song
                .artist_name()
                .unwrap_or(self.labels.json_unknown_artist.as_str())
                .to_string(),
            title_clean: utils::clean_title(&title),
            title,
            album: song.album_name().unwrap_or_default().to_string(),
            genres: song.genre_names(),
            duration_seconds: utils::duration_seconds(song.duration_millis()),
            year: utils::year_from_release_date(song.release_date()),
        }
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
