//! File-based feed source.
//!
//! Reads a GeoJSON feed document from a local file, for offline inspection
//! and for tests. Re-reads when the file changes on disk or when a refresh
//! or timeframe change is requested.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{FeedDocument, FeedError, FeedPayload, FeedSource, FetchOutcome};
use crate::data::Timeframe;

/// A feed source that reads feed documents from a JSON file.
///
/// Outcomes are tagged with the currently selected timeframe so the file mode
/// behaves like the live feed from the application's point of view.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    timeframe: Timeframe,
    last_modified: Option<SystemTime>,
    /// Forces a re-read on the next poll regardless of mtime.
    dirty: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P, timeframe: Timeframe) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            timeframe,
            last_modified: None,
            dirty: true,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&self) -> Result<FeedPayload, FeedError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| FeedError::Network(e.to_string()))?;
        let document: FeedDocument =
            serde_json::from_str(&content).map_err(|e| FeedError::Malformed(e.to_string()))?;
        Ok(document.into())
    }
}

impl FeedSource for FileSource {
    fn poll(&mut self) -> Option<FetchOutcome> {
        let current_modified = self.modified_time();

        let changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,
            (Some(_), None) => false, // file disappeared, keep what we have
            (Some(last), Some(current)) => current > last,
        };

        if !self.dirty && !changed {
            return None;
        }
        self.dirty = false;
        self.last_modified = current_modified;

        Some(FetchOutcome {
            timeframe: self.timeframe,
            result: self.read_file(),
        })
    }

    fn select(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
        self.dirty = true;
    }

    fn refresh(&mut self) {
        self.dirty = true;
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "metadata": { "title": "Test Feed" },
            "features": [
                {
                    "id": "ev1",
                    "properties": { "mag": 4.4, "place": "somewhere", "time": 1000, "tsunami": 0 },
                    "geometry": { "coordinates": [1.0, 2.0, 3.0] }
                }
            ]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/feed.geojson", Timeframe::Day);
        assert_eq!(source.path(), Path::new("/tmp/feed.geojson"));
        assert_eq!(source.description(), "file: /tmp/feed.geojson");
    }

    #[test]
    fn test_file_source_poll_reads_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path(), Timeframe::Day);

        let outcome = source.poll().unwrap();
        assert_eq!(outcome.timeframe, Timeframe::Day);
        let payload = outcome.result.unwrap();
        assert_eq!(payload.events.len(), 1);
        assert_eq!(payload.title.as_deref(), Some("Test Feed"));

        // No change, no new outcome.
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_select_retags_and_rereads() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path(), Timeframe::Day);
        let _ = source.poll();

        source.select(Timeframe::Week);
        let outcome = source.poll().unwrap();
        assert_eq!(outcome.timeframe, Timeframe::Week);
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/feed.geojson", Timeframe::Day);
        let outcome = source.poll().unwrap();
        assert!(matches!(outcome.result, Err(FeedError::Network(_))));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path(), Timeframe::Day);
        let outcome = source.poll().unwrap();
        assert!(matches!(outcome.result, Err(FeedError::Malformed(_))));
    }

    #[test]
    fn test_file_source_refresh_rereads() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path(), Timeframe::Day);
        let _ = source.poll();
        assert!(source.poll().is_none());

        source.refresh();
        assert!(source.poll().is_some());
    }
}
