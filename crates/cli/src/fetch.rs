//! `rigmatch fetch` - download the mapping dictionary.
//!
//! The payload is validated before it touches the cache; a failed
//! fetch never clobbers a working cached dictionary.

use std::path::PathBuf;
use std::time::Duration;

use rigmatch_engine::MappingDictionary;

use crate::exit_codes::{EXIT_FETCH_NETWORK, EXIT_FETCH_PAYLOAD};
use crate::CliError;

/// Community-maintained bone mapping feed.
pub const DEFAULT_DICTIONARY_URL: &str =
    "https://raw.githubusercontent.com/LgcChina/Text/refs/heads/main/%E9%AA%A8%E9%AA%BC.json";

/// Hard cap on the downloaded payload. Real dictionaries are a few KB.
const MAX_RESPONSE_BYTES: u64 = 4 * 1024 * 1024;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn cmd_fetch(
    url: Option<String>,
    output: Option<PathBuf>,
    no_cache: bool,
) -> Result<(), CliError> {
    let url = url.unwrap_or_else(|| DEFAULT_DICTIONARY_URL.to_string());

    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| network(format!("cannot build HTTP client: {e}")))?;

    let response = client
        .get(&url)
        .send()
        .map_err(|e| network(format!("cannot reach {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(network(format!("{url} returned {status}")));
    }
    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_BYTES {
            return Err(payload(format!("response too large ({len} bytes)")));
        }
    }

    let body = response
        .text()
        .map_err(|e| network(format!("cannot read response from {url}: {e}")))?;
    if body.len() as u64 > MAX_RESPONSE_BYTES {
        return Err(payload(format!("response too large ({} bytes)", body.len())));
    }

    let dict = MappingDictionary::from_json(&body).map_err(|e| payload(e.to_string()))?;

    let path = match (output, no_cache) {
        (Some(path), _) => {
            rigmatch_io::write_dictionary(&path, &body).map_err(|e| CliError::io(e.to_string()))?;
            Some(path)
        }
        (None, true) => None,
        (None, false) => {
            Some(rigmatch_io::save_cache(&body).map_err(|e| CliError::io(e.to_string()))?)
        }
    };

    let version = if dict.version.is_empty() {
        "unversioned".to_string()
    } else {
        format!("v{}", dict.version)
    };
    let stats = format!("{} bones, {} regions", dict.bone_count(), dict.regions.len());
    match path {
        Some(path) => eprintln!("fetched dictionary {version} ({stats}) -> {}", path.display()),
        None => eprintln!("fetched dictionary {version} ({stats}), not cached"),
    }
    Ok(())
}

fn network(msg: String) -> CliError {
    CliError::with_code(EXIT_FETCH_NETWORK, msg)
}

fn payload(msg: String) -> CliError {
    CliError::with_code(EXIT_FETCH_PAYLOAD, msg)
}
