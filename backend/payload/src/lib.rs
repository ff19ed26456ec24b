//! # Payload
//!
//! Everything the scanner knows about a decoded QR payload once the decoder hands it over.
//!
//!
//!
//! ## Classification
//!
//! - Pure and total, a payload always gets a category
//! - Ordered chain of prefix/substring checks, first match wins
//! - Order matters, a WhatsApp link also starts with `https://`
//! - WiFi and vCard payloads get a parsed multi-line summary
//!
//!
//!
//! ## History
//!
//! - Last 10 scans, newest first
//! - Persisted as one JSON list under the `qrScanHistory` key
//! - Display data truncated to 100 characters plus `...`
//!
//! ## Storage
//!
//! Key-value storage standing in for the browser's `localStorage`. In-memory for tests,
//! a single JSON file for the CLI.

pub mod actions;
pub mod classify;
pub mod history;
pub mod store;
pub mod vcard;
pub mod wifi;

pub use actions::Action;
pub use classify::{Category, ClassifiedPayload, classify};
pub use history::{HistoryEntry, ScanHistory};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
