//! Output file lifecycle.
//!
//! Serializes the document as 4-space indented JSON, writes it to a `.part`
//! sibling, syncs, and renames over the final path so readers never observe a
//! half-written file.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::WriteError;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

const INDENT: &[u8] = b"    ";

/// Serialize `doc` with 4-space indentation. Keys keep document order; no
/// trailing newline.
pub fn to_pretty_json(doc: &Value) -> Result<Vec<u8>, WriteError> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    doc.serialize(&mut ser).map_err(WriteError::Serialize)?;
    Ok(buf)
}

/// Replace `final_path` with the serialized `doc`. Returns bytes written.
///
/// On error the final path is untouched and the temp file is removed.
pub fn write_document(doc: &Value, final_path: &Path) -> Result<u64, WriteError> {
    let bytes = to_pretty_json(doc)?;
    let tmp = temp_path(final_path);

    if let Err(e) = write_synced(&tmp, &bytes) {
        discard(&tmp);
        return Err(e);
    }
    if let Err(source) = std::fs::rename(&tmp, final_path) {
        discard(&tmp);
        return Err(WriteError::io("rename into", final_path, source));
    }

    tracing::debug!(path = %final_path.display(), bytes = bytes.len(), "document written");
    Ok(bytes.len() as u64)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| WriteError::io("create", path, e))?;
    file.write_all(bytes)
        .map_err(|e| WriteError::io("write", path, e))?;
    file.sync_all()
        .map_err(|e| WriteError::io("sync", path, e))?;
    Ok(())
}

fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

/// Path for the temp file: appends `.part` to the final path (e.g. `feed.json` → `feed.json.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
