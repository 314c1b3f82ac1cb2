//! On-disk artifacts: the item table and the fitted index.
//!
//! Layout of an artifact directory:
//! - `items.json`: ordered item table
//! - `vocabulary.json`: vocabulary term list
//! - `similarity.bin`: bincode-encoded similarity matrix
//! - `manifest.json`: format version and sizes, written last
//!
//! A directory without a manifest is treated as incomplete.

use crate::error::{IndexError, Result};
use crate::index::{DenseCosineIndex, SimilarityIndex};
use crate::matrix::SimilarityMatrix;
use crate::vectorizer::Vocabulary;
use data_loader::ItemTable;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const ITEMS_FILE: &str = "items.json";
pub const VOCABULARY_FILE: &str = "vocabulary.json";
pub const MATRIX_FILE: &str = "similarity.bin";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Version written into new manifests
pub const FORMAT_VERSION: u32 = 1;

const STAGING_DIR: &str = ".staging";
const BACKUP_DIR: &str = ".previous";

/// Swap order; the manifest goes in last and comes out first
const ARTIFACT_FILES: [&str; 4] = [ITEMS_FILE, VOCABULARY_FILE, MATRIX_FILE, MANIFEST_FILE];

/// Summary of a saved artifact set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub items: usize,
    pub vocabulary: usize,
}

/// Reads and writes the artifact pair in one directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `items` and `index`, replacing any previous artifacts.
    ///
    /// Everything is written to a staging directory first, then swapped in
    /// with the manifest last. The previous set is parked in a backup
    /// directory during the swap and put back if any step fails, so the
    /// target directory ends up holding either the old set or the new one.
    pub fn save(&self, items: &ItemTable, index: &DenseCosineIndex) -> Result<Manifest> {
        if items.len() != index.len() {
            return Err(IndexError::Misaligned {
                items: items.len(),
                rows: index.len(),
            });
        }

        let manifest = Manifest {
            format_version: FORMAT_VERSION,
            items: items.len(),
            vocabulary: index.vocabulary().len(),
        };

        fs::create_dir_all(&self.dir)?;
        let staging = self.dir.join(STAGING_DIR);
        let backup = self.dir.join(BACKUP_DIR);
        reset_dir(&backup)?;
        if let Err(e) = reset_dir(&staging) {
            discard(&[&backup]);
            return Err(e.into());
        }

        let staged = write_json(&staging, ITEMS_FILE, items)
            .and_then(|_| write_json(&staging, VOCABULARY_FILE, index.vocabulary()))
            .and_then(|_| write_bincode(&staging, MATRIX_FILE, index.matrix()))
            .and_then(|_| write_json(&staging, MANIFEST_FILE, &manifest));
        if let Err(e) = staged {
            discard(&[&staging, &backup]);
            return Err(e);
        }

        let swapped = swap_in(&self.dir, &staging, &backup, &ARTIFACT_FILES);
        discard(&[&staging, &backup]);
        swapped?;

        info!(
            "Saved {} items and {} terms to {}",
            manifest.items,
            manifest.vocabulary,
            self.dir.display()
        );
        Ok(manifest)
    }

    /// Load the item table and index, checking that they line up
    pub fn load(&self) -> Result<(ItemTable, DenseCosineIndex)> {
        let manifest: Manifest = read_json(&self.dir, MANIFEST_FILE)?;
        if manifest.format_version != FORMAT_VERSION {
            return Err(IndexError::Serialization {
                file: MANIFEST_FILE.to_string(),
                reason: format!("unsupported format version {}", manifest.format_version),
            });
        }

        let items: ItemTable = read_json(&self.dir, ITEMS_FILE)?;
        let vocabulary: Vocabulary = read_json(&self.dir, VOCABULARY_FILE)?;
        let matrix: SimilarityMatrix = read_bincode(&self.dir, MATRIX_FILE)?;

        if !matrix.is_well_formed() {
            return Err(IndexError::Serialization {
                file: MATRIX_FILE.to_string(),
                reason: "storage does not match matrix dimension".to_string(),
            });
        }
        if items.len() != matrix.len() {
            return Err(IndexError::Misaligned {
                items: items.len(),
                rows: matrix.len(),
            });
        }
        if manifest.items != items.len() {
            return Err(IndexError::Misaligned {
                items: manifest.items,
                rows: matrix.len(),
            });
        }
        if manifest.vocabulary != vocabulary.len() {
            return Err(IndexError::Serialization {
                file: VOCABULARY_FILE.to_string(),
                reason: format!(
                    "manifest lists {} terms, found {}",
                    manifest.vocabulary,
                    vocabulary.len()
                ),
            });
        }

        info!(
            "Loaded {} items and {} terms from {}",
            items.len(),
            vocabulary.len(),
            self.dir.display()
        );
        Ok((items, DenseCosineIndex::from_parts(vocabulary, matrix)))
    }
}

/// Remove whatever is at `path` and create an empty directory there
fn reset_dir(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir(path)
}

/// Best-effort removal of scratch directories
fn discard(dirs: &[&Path]) {
    for dir in dirs {
        if let Err(e) = fs::remove_dir_all(dir) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove {}: {}", dir.display(), e);
            }
        }
    }
}

/// Move `files` from `staging` into `dir`, parking the current ones in `backup`.
///
/// On error every file already moved is returned to where it came from.
fn swap_in(dir: &Path, staging: &Path, backup: &Path, files: &[&str]) -> Result<()> {
    let mut parked = Vec::new();
    let mut installed = Vec::new();

    let result: io::Result<()> = (|| {
        for &file in files.iter().rev() {
            let current = dir.join(file);
            if fs::symlink_metadata(&current).is_ok() {
                fs::rename(&current, backup.join(file))?;
                parked.push(file);
            }
        }
        for &file in files {
            fs::rename(staging.join(file), dir.join(file))?;
            installed.push(file);
        }
        Ok(())
    })();

    if let Err(e) = result {
        for file in installed.into_iter().rev() {
            if let Err(undo) = fs::remove_file(dir.join(file)) {
                warn!("Failed to remove half-installed {}: {}", file, undo);
            }
        }
        for file in parked {
            if let Err(undo) = fs::rename(backup.join(file), dir.join(file)) {
                warn!("Failed to restore previous {}: {}", file, undo);
            }
        }
        return Err(e.into());
    }
    Ok(())
}

fn serialization(file: &str, reason: impl ToString) -> IndexError {
    IndexError::Serialization {
        file: file.to_string(),
        reason: reason.to_string(),
    }
}

fn open(dir: &Path, file: &str) -> Result<BufReader<File>> {
    let path = dir.join(file);
    match File::open(&path) {
        Ok(f) => Ok(BufReader::new(f)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(IndexError::MissingArtifact {
            path: path.display().to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    serde_json::from_reader(open(dir, file)?).map_err(|e| serialization(file, e))
}

fn read_bincode<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    bincode::deserialize_from(open(dir, file)?).map_err(|e| serialization(file, e))
}

fn write_json<T: Serialize + ?Sized>(dir: &Path, file: &str, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(dir.join(file))?);
    serde_json::to_writer(&mut writer, value).map_err(|e| serialization(file, e))?;
    writer.flush()?;
    Ok(())
}

fn write_bincode<T: Serialize + ?Sized>(dir: &Path, file: &str, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(dir.join(file))?);
    bincode::serialize_into(&mut writer, value).map_err(|e| serialization(file, e))?;
    writer.flush()?;
    Ok(())
}
