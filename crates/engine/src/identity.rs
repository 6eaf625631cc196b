use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dictionary::{region_matches_by_containment, MappingDictionary, REGION_OTHER};

/// Separators recognized as token boundaries in bone names.
const SEPARATORS: &[char] = &['.', '_', '-', ' '];

/// Bare `l`/`r` at the very end of a name, after a separator.
static TRAILING_SIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\._\- ]([lr])$").unwrap());

/// Numeric suffix runs such as `.001` or `_02`. The run must start
/// with a separator: synonym names with embedded digits (`Arm1`)
/// keep them.
static TRAILING_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\._\- ][\d\._\- ]*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Laterality {
    Left,
    Right,
    None,
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::None => write!(f, "none"),
        }
    }
}

/// The normalized identity of one raw bone name. Derived fresh on
/// every call; never cached across calls.
#[derive(Debug, Clone)]
pub struct BoneIdentity {
    pub raw_name: String,
    pub base_name: String,
    pub laterality: Laterality,
    pub canonical_name: String,
    pub region: String,
}

impl BoneIdentity {
    pub fn resolve(dict: &MappingDictionary, raw_name: &str) -> Self {
        let (base_name, laterality) = extract_base_and_side(dict, raw_name);
        let (canonical_name, region) = canonicalize(dict, &base_name);
        Self {
            raw_name: raw_name.to_string(),
            base_name,
            laterality,
            canonical_name,
            region,
        }
    }
}

/// Split a raw name into its base name and laterality.
///
/// Right-side tokens are tried before left-side tokens, each in
/// dictionary list order; a name carrying both markers resolves as
/// right. A matched token is removed (both boundary separators are
/// kept and cleaned up by the suffix strip). When no listed token
/// matches, a trailing `_l`/`_r` is recognized as a last resort.
pub fn extract_base_and_side(dict: &MappingDictionary, raw_name: &str) -> (String, Laterality) {
    let mut base = raw_name.to_string();
    let mut side = Laterality::None;

    for token in dict.side_tokens() {
        if token.pattern.is_match(raw_name) {
            base = token
                .pattern
                .replace_all(raw_name, "${1}${2}")
                .trim_matches(SEPARATORS)
                .to_string();
            side = token.side;
            break;
        }
    }

    if side == Laterality::None {
        if let Some(caps) = TRAILING_SIDE.captures(raw_name) {
            side = if caps[1].eq_ignore_ascii_case("l") {
                Laterality::Left
            } else {
                Laterality::Right
            };
            base = TRAILING_SIDE
                .replace(raw_name, "")
                .trim_matches(SEPARATORS)
                .to_string();
        }
    }

    let base = TRAILING_SUFFIX
        .replace(&base, "")
        .trim_matches(SEPARATORS)
        .to_string();

    (base, side)
}

/// Resolve a base name to its canonical name and region.
///
/// Regions and bones are scanned in dictionary order; the first match
/// wins. A base name equal to a canonical name resolves to it even
/// when absent from its own synonym list. Containment-matching
/// regions (fingers) also accept the canonical name as a substring of
/// the base name. Unresolved names pass through with region "other".
pub fn canonicalize(dict: &MappingDictionary, base_name: &str) -> (String, String) {
    let base_lower = base_name.to_lowercase();

    for region in &dict.regions {
        let loose = region_matches_by_containment(&region.name);
        for (canonical, synonyms) in &region.bones {
            let canonical_lower = canonical.to_lowercase();
            if base_lower == canonical_lower
                || synonyms.iter().any(|s| s.to_lowercase() == base_lower)
            {
                return (canonical.clone(), region.name.clone());
            }
            if loose && base_lower.contains(&canonical_lower) {
                return (canonical.clone(), region.name.clone());
            }
        }
    }

    (base_name.to_string(), REGION_OTHER.to_string())
}
