// crates/aplatam-core/src/loader.rs

//! # Catalog Loader
//!
//! Handles the physical layer (file I/O, decompression) and hands a plain
//! reader to the JSON parser in [`crate::catalog`].

use crate::error::{MapError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// File name of the catalog shipped with the crate.
pub const DEFAULT_CATALOG_FILENAME: &str = "cities.json";

/// Directory holding the bundled catalog, resolved relative to the crate root.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when the file name
/// ends in `.gz`. Callers get a generic reader and don't care about compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        MapError::NotFound(format!("Catalog not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }

        #[cfg(not(feature = "compact"))]
        {
            return Err(MapError::NotFound(format!(
                "{} is gzip-compressed but the `compact` feature is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
