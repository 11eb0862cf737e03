use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to list log directory {}: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open {name}: {source}")]
    FileOpen {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to decompress {name}: {source}")]
    Decompression {
        name: String,
        source: std::io::Error,
    },

    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },
}
