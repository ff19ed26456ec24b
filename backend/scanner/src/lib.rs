//! # Scanner
//!
//! Scan orchestration without the camera. An external decoder (`zbarimg`, a phone, a person
//! typing) produces the payload text, the scanner classifies it, records it and renders the
//! result panel.
//!
//!
//!
//! ## Flow
//!
//! 1. Payload arrives, blank payloads count as "no QR detected"
//! 2. Classify
//! 3. Push to history, drop anything past the 10 most recent
//! 4. Persist history under `qrScanHistory`
//! 5. Render panel with type-specific actions
//!
//! ## Watch
//!
//! Stand-in for the per-frame decode loop. Every stdin line is a decode attempt, the loop stops
//! at the first non-blank one or when input ends.
use std::{fs, io::BufRead, path::Path, time::Duration};

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use payload::{ClassifiedPayload, KeyValueStore, ScanHistory, classify};
use tracing::{debug, info};

pub mod error;
pub mod render;
pub mod utils;

use error::ScanError;

pub struct Scanner<S: KeyValueStore> {
    store: S,
    history: ScanHistory,
}

impl<S: KeyValueStore> Scanner<S> {
    pub fn open(store: S) -> Result<Self, ScanError> {
        let history = ScanHistory::load(&store)?;
        debug!("Loaded {} history entries", history.len());

        Ok(Self { store, history })
    }

    pub fn process(&mut self, raw: &str) -> Result<ClassifiedPayload, ScanError> {
        self.process_at(raw, Utc::now())
    }

    pub fn process_at(
        &mut self,
        raw: &str,
        scanned_at: DateTime<Utc>,
    ) -> Result<ClassifiedPayload, ScanError> {
        if raw.trim().is_empty() {
            return Err(ScanError::NoPayload);
        }

        let payload = classify(raw);
        info!("QR detected - {}", payload.category());

        self.history.record(&payload, scanned_at);
        self.history.save(&mut self.store)?;

        Ok(payload)
    }

    /// Polls `frames` line by line until one carries a payload.
    pub fn watch(&mut self, frames: impl BufRead) -> Result<ClassifiedPayload, ScanError> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Enfoca cualquier código QR");
        spinner.enable_steady_tick(Duration::from_millis(120));

        let mut attempts = 0;

        for frame in frames.lines() {
            let frame = frame?;
            attempts += 1;

            let frame = frame.trim_end_matches('\r');
            if frame.trim().is_empty() {
                continue;
            }

            spinner.finish_and_clear();
            debug!("Payload found after {attempts} attempts");

            return self.process(frame);
        }

        spinner.finish_and_clear();
        Err(ScanError::NoPayload)
    }

    /// One payload per non-blank line.
    pub fn batch(&mut self, path: &Path) -> Result<Vec<ClassifiedPayload>, ScanError> {
        let contents = fs::read_to_string(path).map_err(|source| ScanError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;

        let lines: Vec<&str> = contents
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return Err(ScanError::NoPayload);
        }

        let pb = ProgressBar::new(lines.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        ) {
            pb.set_style(style.progress_chars("=> "));
        }

        let mut payloads = Vec::with_capacity(lines.len());

        for line in lines {
            let payload = self.process(line)?;
            pb.set_message(payload.category().to_string());
            payloads.push(payload);

            pb.inc(1);
        }

        pb.finish_with_message("Done");
        Ok(payloads)
    }

    pub fn history(&self) -> &ScanHistory {
        &self.history
    }

    pub fn clear_history(&mut self) -> Result<(), ScanError> {
        self.history.clear();
        self.history.save(&mut self.store)?;

        info!("History cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use chrono::{TimeDelta, TimeZone, Utc};
    use payload::{Category, FileStore, MemoryStore, ScanHistory};
    use tempfile::tempdir;

    use super::{Scanner, error::ScanError};

    #[test]
    fn test_process_records_history() {
        let mut scanner = Scanner::open(MemoryStore::new()).unwrap();

        let payload = scanner.process("tel:+593987654321").unwrap();

        assert_eq!(payload.category(), Category::Phone);
        assert_eq!(scanner.history().len(), 1);
        assert_eq!(
            scanner.history().entries().next().unwrap().display_data,
            "+593987654321"
        );
    }

    #[test]
    fn test_blank_payload_is_not_recorded() {
        let mut scanner = Scanner::open(MemoryStore::new()).unwrap();

        assert!(matches!(scanner.process("  \n"), Err(ScanError::NoPayload)));
        assert!(scanner.history().is_empty());
    }

    #[test]
    fn test_history_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let mut scanner = Scanner::open(FileStore::new(&path)).unwrap();
        for i in 0..11 {
            scanner
                .process_at(&format!("codigo {i}"), start + TimeDelta::seconds(i))
                .unwrap();
        }

        let reopened = Scanner::open(FileStore::new(&path)).unwrap();
        let data: Vec<String> = reopened
            .history()
            .entries()
            .map(|entry| entry.data.clone())
            .collect();

        assert_eq!(data.len(), 10);
        assert_eq!(data.first().map(String::as_str), Some("codigo 10"));
        assert_eq!(data.last().map(String::as_str), Some("codigo 1"));
    }

    #[test]
    fn test_watch_stops_at_first_payload() {
        let mut scanner = Scanner::open(MemoryStore::new()).unwrap();
        let frames = Cursor::new("\n   \r\nhttps://wa.me/593\nhttps://example.com\n");

        let payload = scanner.watch(frames).unwrap();

        assert_eq!(payload.category(), Category::Whatsapp);
        assert_eq!(scanner.history().len(), 1);
    }

    #[test]
    fn test_watch_without_payload() {
        let mut scanner = Scanner::open(MemoryStore::new()).unwrap();

        assert!(matches!(
            scanner.watch(Cursor::new("\n\n")),
            Err(ScanError::NoPayload)
        ));
    }

    #[test]
    fn test_batch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("decoded.txt");
        fs::write(&path, "mailto:a@utb.edu.ec\r\n\nWIFI:S:Lab;;\nsai_utb.edu.ec/v?key=1\n").unwrap();

        let mut scanner = Scanner::open(MemoryStore::new()).unwrap();
        let categories: Vec<Category> = scanner
            .batch(&path)
            .unwrap()
            .iter()
            .map(|payload| payload.category())
            .collect();

        assert_eq!(
            categories,
            [Category::Email, Category::Wifi, Category::InstitutionalId]
        );
        assert_eq!(
            scanner.history().entries().next().unwrap().category,
            Category::InstitutionalId
        );
    }

    #[test]
    fn test_batch_unreadable_file() {
        let dir = tempdir().unwrap();
        let mut scanner = Scanner::open(MemoryStore::new()).unwrap();

        assert!(matches!(
            scanner.batch(&dir.path().join("missing.txt")),
            Err(ScanError::UnreadableFile { .. })
        ));
    }

    #[test]
    fn test_clear_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut scanner = Scanner::open(FileStore::new(&path)).unwrap();
        scanner.process("hola").unwrap();
        scanner.clear_history().unwrap();

        let store = FileStore::new(&path);
        assert_eq!(ScanHistory::load(&store).unwrap(), ScanHistory::new());
    }
}
