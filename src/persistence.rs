//! Configuration persistence: save and load engine defaults to/from JSON.
//!
//! Figures themselves are never persisted; only the plain-data
//! [`ResamplerConfig`] round-trips through a file so hosts can ship a
//! tweakable defaults file next to their application.

use std::io;
use std::path::Path;

use crate::config::ResamplerConfig;

/// Write the configuration as pretty-printed JSON.
pub fn save_config<P: AsRef<Path>>(config: &ResamplerConfig, path: P) -> io::Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Read a configuration previously written by [`save_config`].
pub fn load_config<P: AsRef<Path>>(path: P) -> io::Result<ResamplerConfig> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
