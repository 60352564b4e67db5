use std::io;
use std::path::PathBuf;

use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum QuickstartError {
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("CA certificate at {} is not readable: {source}", path.display())]
    CaCertificate { path: PathBuf, source: io::Error },

    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        source: SqlxError,
    },

    #[error("database error: {0}")]
    Database(#[from] SqlxError),
}
