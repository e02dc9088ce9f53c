//! JSON numeric vector files.

use std::path::Path;

use crate::error::FlowErrorKind;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FlowErrorKind> {
    let text = std::fs::read_to_string(path).map_err(|e| FlowErrorKind::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| FlowErrorKind::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Reads a JSON array of numbers.
pub fn read_vector(path: &Path) -> Result<Vec<f64>, FlowErrorKind> {
    read_json(path)
}

/// Reads a JSON array of exactly `len` numbers.
pub fn read_vector_exact(path: &Path, len: usize) -> Result<Vec<f64>, FlowErrorKind> {
    let v = read_vector(path)?;
    if v.len() != len {
        return Err(FlowErrorKind::VectorLength {
            path: path.to_path_buf(),
            expected: len,
            found: v.len(),
        });
    }
    Ok(v)
}

/// Reads a single JSON number.
pub fn read_scalar(path: &Path) -> Result<f64, FlowErrorKind> {
    read_json(path)
}

/// Writes `values` as a compact JSON array, creating parent directories.
pub fn write_vector(path: &Path, values: &[f64]) -> Result<(), FlowErrorKind> {
    let io_err = |e| FlowErrorKind::Io {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = serde_json::to_string(values).map_err(|e| FlowErrorKind::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    std::fs::write(path, text).map_err(io_err)
}
