//! Loading design documents from files.
//!
//! Each file holds one design document as JSON. [`load_directory`] walks a directory
//! tree and loads every accepted file in file-name order.

mod config;

pub use config::*;

use crate::common::{ensure_design_prefix, WireFormat};
use crate::design::DesignDocument;
use crate::errors::{DesignError, DesignResult};
use std::path::Path;
use walkdir::WalkDir;

/// Loads the design document stored in a single file.
///
/// # Errors
/// Fails when the file cannot be read, is not UTF-8, does not hold a design document or
/// does not validate. The error message names the file and the error kind is that of
/// the underlying failure.
pub fn load_file(path: impl AsRef<Path>, config: &LoaderConfig) -> DesignResult<DesignDocument> {
    let path = path.as_ref();
    log::debug!("Loading design document from {}", path.display());

    let document = read_document(path, config).map_err(|err| {
        log::error!("Failed to load design document {}: {}", path.display(), err);
        DesignError::new_with_cause(
            &format!("Failed to load design document from {}", path.display()),
            err.kind().clone(),
            err,
        )
    })?;

    log::debug!("Loaded {} from {}", document.id(), path.display());
    Ok(document)
}

/// Loads every design document below `path`.
///
/// The directory is walked recursively and files are visited in file-name order, so the
/// result is stable across platforms. Only files accepted by
/// [`LoaderConfig::accepts`] are read. When `path` is a file, that single file is loaded
/// whatever its extension.
pub fn load_directory(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> DesignResult<Vec<DesignDocument>> {
    let root = path.as_ref();
    let metadata = std::fs::metadata(root).map_err(|err| {
        log::error!("Cannot access {}: {}", root.display(), err);
        DesignError::from(err)
    })?;
    if metadata.is_file() {
        return Ok(vec![load_file(root, config)?]);
    }

    let walker = WalkDir::new(root)
        .follow_links(config.is_follow_symlinks())
        .sort_by_file_name();

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !config.accepts(entry.path()) {
            continue;
        }
        documents.push(load_file(entry.path(), config)?);
    }

    log::debug!(
        "Loaded {} design documents from {}",
        documents.len(),
        root.display()
    );
    Ok(documents)
}

fn read_document(path: &Path, config: &LoaderConfig) -> DesignResult<DesignDocument> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    let mut document = DesignDocument::from_json(&text)?;

    if config.is_ensure_prefix() {
        let id = ensure_design_prefix(document.id());
        document = document.with_id(&id);
    }
    if config.is_validate() {
        document.validate()?;
    }
    Ok(document)
}
