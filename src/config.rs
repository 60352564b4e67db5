use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::QuickstartError;

/// Connection parameters for the target TiDB/MySQL endpoint.
///
/// Populated once at startup from `TIDB_HOST`, `TIDB_PORT`, `TIDB_USER`,
/// `TIDB_PASSWORD`, `TIDB_DB_NAME`, and the optional `CA_PATH`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub db_name: String,
    /// Trust anchor for a TLS-secured channel. Plaintext when absent.
    #[serde(default)]
    pub ca_path: Option<PathBuf>,
}

impl Config {
    /// Read and validate the connection parameters from the environment.
    ///
    /// Every `TIDB_*` variable is required; an absent variable or a port
    /// that does not parse as an integer is a configuration error, raised
    /// before any network activity.
    pub fn from_env() -> Result<Self, QuickstartError> {
        let figment = Figment::new()
            .merge(Env::prefixed("TIDB_"))
            .merge(Env::raw().only(&["CA_PATH"]));
        Ok(figment.extract()?)
    }
}
