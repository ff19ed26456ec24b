use std::{
    io::{self, Read},
    path::PathBuf,
};

use tracing::warn;

const STORE_DIR: &str = "scaneo";
const STORE_FILE: &str = "storage.json";

/// `<data dir>/scaneo/storage.json`, or the working directory when the platform has no data dir.
pub fn default_store_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(STORE_DIR).join(STORE_FILE),
        None => {
            warn!("No data directory found, storing history in the working directory");
            PathBuf::from(STORE_FILE)
        }
    }
}

/// Whole input as one payload, a vCard spans several lines.
pub fn read_payload(mut input: impl Read) -> io::Result<String> {
    let mut payload = String::new();
    input.read_to_string(&mut payload)?;

    Ok(payload.trim_end_matches(['\n', '\r']).to_string())
}
