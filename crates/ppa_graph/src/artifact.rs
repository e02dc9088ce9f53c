//! Checksummed binary persistence of a signal graph.
//!
//! A design is stored as two files in one directory, named from its
//! [`DesignKey`]: the adjacency structure in `{stem}.graph.bin` and the node
//! registry in `{stem}_node_dict.bin`. Each file is a 4-byte little-endian
//! header length, a bincode header (magic bytes, format version, payload
//! kind, payload checksum) and the bincode payload.
//!
//! Unlike a cache, a bad artifact is not a miss: the analyses have nothing
//! else to run on, so every validation failure is reported as an error.

use crate::error::GraphError;
use crate::graph::SignalGraph;
use crate::node::Node;
use ppa_common::{ContentHash, DesignKey};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Magic bytes identifying a graph artifact.
const ARTIFACT_MAGIC: [u8; 4] = *b"PPAG";

/// Current artifact format version. Increment on breaking changes to the
/// header or payload format.
const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Which half of the graph a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PayloadKind {
    Adjacency,
    Registry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArtifactHeader {
    magic: [u8; 4],
    format_version: u32,
    kind: PayloadKind,
    checksum: ContentHash,
}

type Adjacency = BTreeMap<String, Vec<String>>;
type Registry = BTreeMap<String, Node>;

/// Writes both halves of `graph` into `dir`, creating it if needed.
///
/// Returns the paths of the adjacency and registry files.
pub fn write_graph(
    dir: &Path,
    key: &DesignKey,
    graph: &SignalGraph,
) -> Result<(PathBuf, PathBuf), GraphError> {
    std::fs::create_dir_all(dir).map_err(|e| GraphError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let adjacency_path = dir.join(key.adjacency_file());
    let registry_path = dir.join(key.registry_file());
    write_payload(&adjacency_path, PayloadKind::Adjacency, graph.adjacency())?;
    write_payload(&registry_path, PayloadKind::Registry, graph.registry())?;
    Ok((adjacency_path, registry_path))
}

/// Loads the graph of `key` from `dir`.
pub fn read_graph(dir: &Path, key: &DesignKey) -> Result<SignalGraph, GraphError> {
    let adjacency: Adjacency = read_payload(&dir.join(key.adjacency_file()), PayloadKind::Adjacency)?;
    let registry = read_registry(dir, key)?;
    Ok(SignalGraph::from_parts(adjacency, registry))
}

/// Loads only the node registry of `key` from `dir`.
pub fn read_registry(dir: &Path, key: &DesignKey) -> Result<Registry, GraphError> {
    read_payload(&dir.join(key.registry_file()), PayloadKind::Registry)
}

fn write_payload<T: Serialize>(path: &Path, kind: PayloadKind, value: &T) -> Result<(), GraphError> {
    let config = bincode::config::standard();
    let data = bincode::serde::encode_to_vec(value, config).map_err(|e| {
        GraphError::Serialization {
            reason: e.to_string(),
        }
    })?;

    let header = ArtifactHeader {
        magic: ARTIFACT_MAGIC,
        format_version: ARTIFACT_FORMAT_VERSION,
        kind,
        checksum: ContentHash::from_bytes(&data),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, config).map_err(|e| {
        GraphError::Serialization {
            reason: e.to_string(),
        }
    })?;

    // 4-byte header length (little-endian) + header + payload
    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + data.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(&data);

    std::fs::write(path, &output).map_err(|e| GraphError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_payload<T: DeserializeOwned>(path: &Path, kind: PayloadKind) -> Result<T, GraphError> {
    let invalid = |reason: &str| GraphError::InvalidArtifact {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let raw = std::fs::read(path).map_err(|e| GraphError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let Some((len_bytes, rest)) = raw.split_first_chunk::<4>() else {
        return Err(invalid("file too short for header length"));
    };
    let header_len = u32::from_le_bytes(*len_bytes) as usize;
    if rest.len() < header_len {
        return Err(invalid("truncated header"));
    }
    let (header_bytes, payload) = rest.split_at(header_len);

    let config = bincode::config::standard();
    let (header, _): (ArtifactHeader, usize) =
        bincode::serde::decode_from_slice(header_bytes, config)
            .map_err(|e| invalid(&format!("undecodable header: {e}")))?;

    if header.magic != ARTIFACT_MAGIC {
        return Err(invalid("bad magic"));
    }
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(invalid(&format!(
            "format version {} (expected {ARTIFACT_FORMAT_VERSION})",
            header.format_version
        )));
    }
    if header.kind != kind {
        return Err(invalid(&format!(
            "holds {:?} data, expected {kind:?}",
            header.kind
        )));
    }
    if ContentHash::from_bytes(payload) != header.checksum {
        return Err(invalid("checksum mismatch"));
    }

    let (value, _) = bincode::serde::decode_from_slice(payload, config)
        .map_err(|e| invalid(&format!("undecodable payload: {e}")))?;
    Ok(value)
}
