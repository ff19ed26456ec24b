use std::{io, path::PathBuf};

use payload::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No se pudo detectar un código QR")]
    NoPayload,

    #[error("Error al leer el archivo {}: {source}", .path.display())]
    UnreadableFile { path: PathBuf, source: io::Error },

    #[error("Error al leer la entrada: {0}")]
    Input(#[from] io::Error),

    #[error("Error de almacenamiento: {0}")]
    Storage(#[from] StoreError),
}
