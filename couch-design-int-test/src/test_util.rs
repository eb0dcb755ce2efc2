use couch_design::errors::{DesignError, DesignResult, ErrorKind};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DESIGN_FILES: &str = "design-files";
pub const QUERY_TESTS: &str = "query-tests";

/// Absolute path of a file or directory under `fixtures/`.
pub fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(relative)
}

/// Reads a fixture file as text.
pub fn read_fixture(relative: &str) -> DesignResult<String> {
    Ok(fs::read_to_string(fixture_path(relative))?)
}

/// Reads a fixture file as a JSON value, for comparing against what the crate writes.
pub fn fixture_value(relative: &str) -> DesignResult<Value> {
    Ok(serde_json::from_str(&read_fixture(relative)?)?)
}

/// Copies every file of a fixture directory into a fresh temporary directory.
///
/// The directory is deleted when the returned handle is dropped.
pub fn copy_fixture_dir(relative: &str) -> DesignResult<TempDir> {
    let dir = tempfile::tempdir()?;
    for entry in fs::read_dir(fixture_path(relative))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::copy(entry.path(), dir.path().join(entry.file_name()))?;
        }
    }
    Ok(dir)
}

/// Writes `content` to `name` inside `dir`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> DesignResult<PathBuf> {
    let path = dir.join(name);
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent)?,
        None => {
            return Err(DesignError::new(
                &format!("No parent directory for {}", path.display()),
                ErrorKind::IOError,
            ))
        }
    }
    fs::write(&path, content)?;
    Ok(path)
}
