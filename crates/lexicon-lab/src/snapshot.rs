//! Snapshot files: a built [`Lexicon`] keyed by the fingerprint of the
//! records it came from.
//!
//! Callers compare the stored fingerprint with the one of the current corpus
//! and rebuild on mismatch; nothing here decides invalidation policy.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use lexicon_store::{LoadMode, read_bytes};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;

use crate::engine::Lexicon;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    fingerprint: String,
    lexicon: Vec<u8>,
}

/// Write the snapshot atomically: a temp file in the target directory is
/// renamed over `path` once fully written.
pub fn save(path: impl AsRef<Path>, fingerprint: &str, lexicon: &Lexicon) -> Result<()> {
    let path = path.as_ref();
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;

    let file = SnapshotFile {
        version: FORMAT_VERSION,
        fingerprint: fingerprint.to_string(),
        lexicon: lexicon.to_bytes()?,
    };

    let temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        bincode::serialize_into(&mut writer, &file).context("encode snapshot")?;
        writer.flush().context("flush snapshot")?;
    }
    temp.persist(path)
        .with_context(|| format!("persist snapshot to {}", path.display()))?;
    info!(
        "snapshot saved to {} ({} entries)",
        path.display(),
        lexicon.store().len()
    );
    Ok(())
}

/// Read a snapshot, returning its fingerprint and the restored lexicon.
pub fn load(path: impl AsRef<Path>, mode: LoadMode) -> Result<(String, Lexicon)> {
    let path = path.as_ref();
    let buffer = read_bytes(path, mode)?;
    let file: SnapshotFile = bincode::deserialize(buffer.as_slice())
        .with_context(|| format!("decode snapshot {}", path.display()))?;
    if file.version != FORMAT_VERSION {
        bail!(
            "snapshot {} has format version {}, expected {FORMAT_VERSION}",
            path.display(),
            file.version
        );
    }
    let lexicon = Lexicon::from_bytes(&file.lexicon)
        .with_context(|| format!("restore snapshot {}", path.display()))?;
    Ok((file.fingerprint, lexicon))
}
