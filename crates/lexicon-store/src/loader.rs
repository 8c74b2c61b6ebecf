//! JSON corpus loading.
//!
//! A corpus is either one JSON file or a directory holding any of
//! `idiom.json`, `word.json`, `xiehouyu.json` and `ci.json`. Each file is a
//! JSON array of records or one record per line. Records without a category
//! take the one implied by the file name.
//!
//! Records that ship without pinyin (`ci.json`, `xiehouyu.json`) get their
//! readings derived from the text, every heteronym combination included.
//!
//! The loader is lenient where the store is strict: records the store would
//! still reject (no derivable reading, a reading that does not line up with
//! the text) are skipped with a warning so that one bad line does not take the
//! corpus down.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use lexicon_types::{Category, RawRecord};
use memmap2::Mmap;
use tracing::{debug, info, warn};

use crate::derive::{MAX_DERIVED_READINGS, derive_readings};
use crate::entry_from_record;

/// Files read from a corpus directory, in id order.
pub const CORPUS_FILES: [&str; 4] = ["idiom.json", "word.json", "xiehouyu.json", "ci.json"];

/// Strategy for reading corpus and snapshot files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file.
    Mmap,
    /// Read the file into an owned buffer.
    Owned,
}

impl LoadMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mmap" => Some(LoadMode::Mmap),
            "owned" => Some(LoadMode::Owned),
            _ => None,
        }
    }
}

/// File contents, either mapped or owned.
pub enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

pub fn read_bytes(path: impl AsRef<Path>, mode: LoadMode) -> Result<Buffer> {
    let path = path.as_ref();
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            // empty files cannot be mapped on every platform
            if file.metadata().map(|m| m.len() == 0).unwrap_or(false) {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Parse a JSON array of records, or JSON lines when the input does not start with `[`.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'[') {
        return serde_json::from_slice(bytes).context("parse JSON array of records");
    }

    let mut records = Vec::new();
    for (lineno, line) in bytes.split(|b| *b == b'\n').enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let record = serde_json::from_slice(line)
            .with_context(|| format!("parse record on line {}", lineno + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Category implied by a corpus file name, if any.
pub fn category_for_file(path: &Path) -> Option<Category> {
    match path.file_stem()?.to_str()? {
        "idiom" => Some(Category::Idiom),
        "word" | "ci" => Some(Category::Word),
        "xiehouyu" => Some(Category::Xiehouyu),
        _ => None,
    }
}

/// Load records from a corpus file or directory, filling in missing readings
/// and dropping records the store would reject.
///
/// The returned records are the store's input, not entries: each one is
/// test-built here only to decide whether to keep it, and
/// [`EntryStore::build`](crate::EntryStore::build) derives the entries again.
pub fn load_records(path: impl AsRef<Path>, mode: LoadMode) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let files: Vec<PathBuf> = if path.is_dir() {
        let present: Vec<PathBuf> = CORPUS_FILES
            .iter()
            .map(|name| path.join(name))
            .filter(|p| p.is_file())
            .collect();
        if present.is_empty() {
            bail!(
                "no corpus files ({}) in {}",
                CORPUS_FILES.join(", "),
                path.display()
            );
        }
        present
    } else {
        vec![path.to_path_buf()]
    };

    let mut records = Vec::new();
    for file in files {
        let buffer = read_bytes(&file, mode)?;
        let parsed =
            parse_records(buffer.as_slice()).with_context(|| format!("load {}", file.display()))?;
        let default_category = category_for_file(&file);
        let total = parsed.len();
        let mut skipped = 0usize;
        let mut derived = 0usize;
        for mut record in parsed {
            if record.category.is_none()
                && let Some(category) = default_category
            {
                record.category = Some(category.label().to_string());
            }
            if record.readings.iter().all(|r| r.trim().is_empty()) {
                record.readings = derive_readings(record.text.trim(), MAX_DERIVED_READINGS);
                derived += 1;
            }
            // validation only, the entry itself is rebuilt by the store
            match entry_from_record(&record) {
                Ok(_) => records.push(record),
                Err(err) => {
                    skipped += 1;
                    debug!(file = %file.display(), error = %err, "skipping record");
                }
            }
        }
        if skipped > 0 {
            warn!(
                file = %file.display(),
                skipped,
                total,
                "skipped records without a usable reading"
            );
        }
        info!(
            file = %file.display(),
            kept = total - skipped,
            derived,
            "loaded corpus file"
        );
    }
    Ok(records)
}
