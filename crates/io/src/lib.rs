//! `rigmatch-io` - dictionary and name-list file IO.
//!
//! The engine never touches the file system; everything that reads or
//! writes dictionaries and name lists lives here. The dictionary cache
//! sits under the user config directory so a fetched dictionary
//! survives across sessions.

use std::fs;
use std::path::{Path, PathBuf};

use rigmatch_engine::{MappingDictionary, MatchError};

pub const CACHE_DIR: &str = "rigmatch";
pub const CACHE_FILE: &str = "dictionary.json";

/// Read and validate a dictionary JSON file.
pub fn load_dictionary(path: &Path) -> Result<MappingDictionary, MatchError> {
    let data = fs::read_to_string(path)
        .map_err(|e| MatchError::Io(format!("cannot read {}: {e}", path.display())))?;
    MappingDictionary::from_json(&data)
}

/// Where the cached dictionary lives: `<config_dir>/rigmatch/dictionary.json`.
/// None when the platform reports no user config directory.
pub fn cache_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CACHE_DIR).join(CACHE_FILE))
}

/// Write a validated dictionary payload to the cache, creating the
/// directory on first use. Returns the cache file path.
pub fn save_cache(payload: &str) -> Result<PathBuf, MatchError> {
    let path = cache_path().ok_or_else(|| MatchError::Io("no user config directory".into()))?;
    write_dictionary(&path, payload)?;
    Ok(path)
}

/// Write a dictionary payload to an explicit path.
pub fn write_dictionary(path: &Path, payload: &str) -> Result<(), MatchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| MatchError::Io(format!("cannot create {}: {e}", parent.display())))?;
    }
    fs::write(path, payload)
        .map_err(|e| MatchError::Io(format!("cannot write {}: {e}", path.display())))
}

/// Load the cached dictionary, if one has been fetched before.
pub fn load_cached_dictionary() -> Result<Option<MappingDictionary>, MatchError> {
    match cache_path() {
        Some(path) if path.exists() => load_dictionary(&path).map(Some),
        _ => Ok(None),
    }
}

/// Read a newline-delimited name list. Lines are trimmed, blank lines
/// skipped, order preserved.
pub fn read_name_list(path: &Path) -> Result<Vec<String>, MatchError> {
    let data = fs::read_to_string(path)
        .map_err(|e| MatchError::Io(format!("cannot read {}: {e}", path.display())))?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
