use regex::Regex;
use serde_json::Value;

use crate::error::MatchError;
use crate::identity::Laterality;

/// Sentinel region for names the dictionary cannot classify.
pub const REGION_OTHER: &str = "other";

/// Finger bones: matched loosely (substring containment) and excluded
/// from planning unless peripheral bones are opted in.
pub const REGION_FINGERS: &str = "fingers";

/// Regions whose canonical names match by substring containment
/// instead of exact synonym equality. Finger names vary too much
/// (numbered phalanx segments) for synonym enumeration.
pub fn region_matches_by_containment(region: &str) -> bool {
    region == REGION_FINGERS
}

/// Regions skipped by the planner unless `include_peripheral` is set.
pub fn region_is_peripheral(region: &str) -> bool {
    region == REGION_FINGERS
}

/// One laterality token with its precompiled boundary pattern.
/// Patterns match the token case-insensitively, bounded by
/// start/end-of-string or a separator (`.` `_` `-` space).
#[derive(Debug, Clone)]
pub(crate) struct SideToken {
    pub side: Laterality,
    pub pattern: Regex,
}

/// A named group of bones. `bones` preserves dictionary insertion
/// order; that order is the tie-break contract for canonicalization.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub display_name: String,
    /// canonical name → synonym list, in dictionary order.
    pub bones: Vec<(String, Vec<String>)>,
}

/// The synonym/region dictionary. Immutable once constructed; safe to
/// share across any number of plan calls.
#[derive(Debug, Clone)]
pub struct MappingDictionary {
    pub version: String,
    pub last_updated: String,
    pub left_tokens: Vec<String>,
    pub right_tokens: Vec<String>,
    pub regions: Vec<Region>,
    /// Right tokens first, then left, each in list order. Extraction
    /// precedence lives here so the extractor is a plain scan.
    side_tokens: Vec<SideToken>,
}

impl MappingDictionary {
    /// Parse and validate a dictionary JSON payload.
    ///
    /// `bone_regions` is required; every other field defaults to empty.
    /// Object key order is preserved (regions and bones are matched in
    /// the order the JSON lists them).
    pub fn from_json(input: &str) -> Result<Self, MatchError> {
        let root: Value = serde_json::from_str(input)
            .map_err(|e| MatchError::DictionaryParse(e.to_string()))?;
        let obj = root
            .as_object()
            .ok_or_else(|| validation("dictionary root must be a JSON object"))?;

        let regions_obj = obj
            .get("bone_regions")
            .ok_or_else(|| validation("missing bone_regions field"))?
            .as_object()
            .ok_or_else(|| validation("bone_regions must be an object"))?;

        let version = str_field(obj, "version");
        let last_updated = str_field(obj, "last_updated");

        let (left_tokens, right_tokens) = match obj.get("side_identifiers") {
            Some(value) => {
                let side = value
                    .as_object()
                    .ok_or_else(|| validation("side_identifiers must be an object"))?;
                (token_list(side, "left")?, token_list(side, "right")?)
            }
            None => (Vec::new(), Vec::new()),
        };

        let mut regions = Vec::with_capacity(regions_obj.len());
        for (region_name, region_value) in regions_obj {
            let region_obj = region_value
                .as_object()
                .ok_or_else(|| validation(format!("region '{region_name}' must be an object")))?;

            // The public feed uses "name" for the display label; the
            // schema says "display_name". Accept both, key as fallback.
            let display_name = region_obj
                .get("display_name")
                .or_else(|| region_obj.get("name"))
                .and_then(Value::as_str)
                .unwrap_or(region_name)
                .to_string();

            let mut bones = Vec::new();
            if let Some(bones_value) = region_obj.get("bones") {
                let bones_obj = bones_value.as_object().ok_or_else(|| {
                    validation(format!("region '{region_name}': bones must be an object"))
                })?;
                for (canonical, variants_value) in bones_obj {
                    let variants_arr = variants_value.as_array().ok_or_else(|| {
                        validation(format!(
                            "region '{region_name}', bone '{canonical}': variants must be an array"
                        ))
                    })?;
                    let mut variants = Vec::with_capacity(variants_arr.len());
                    for v in variants_arr {
                        let s = v.as_str().ok_or_else(|| {
                            validation(format!(
                                "region '{region_name}', bone '{canonical}': variants must be strings"
                            ))
                        })?;
                        variants.push(s.to_string());
                    }
                    bones.push((canonical.clone(), variants));
                }
            }

            regions.push(Region {
                name: region_name.clone(),
                display_name,
                bones,
            });
        }

        let side_tokens = compile_side_tokens(&right_tokens, &left_tokens)?;

        Ok(Self {
            version,
            last_updated,
            left_tokens,
            right_tokens,
            regions,
            side_tokens,
        })
    }

    pub(crate) fn side_tokens(&self) -> &[SideToken] {
        &self.side_tokens
    }

    /// Is `name` a defined canonical name in some region?
    /// Case-sensitive: canonical names are dictionary keys, verbatim.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.regions
            .iter()
            .any(|r| r.bones.iter().any(|(canonical, _)| canonical == name))
    }

    pub fn bone_count(&self) -> usize {
        self.regions.iter().map(|r| r.bones.len()).sum()
    }

    pub fn synonym_count(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| r.bones.iter())
            .map(|(_, variants)| variants.len())
            .sum()
    }
}

fn validation(msg: impl Into<String>) -> MatchError {
    MatchError::DictionaryValidation(msg.into())
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn token_list(
    side: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Vec<String>, MatchError> {
    let Some(value) = side.get(key) else {
        return Ok(Vec::new());
    };
    let arr = value
        .as_array()
        .ok_or_else(|| validation(format!("side_identifiers.{key} must be an array")))?;
    let mut tokens = Vec::with_capacity(arr.len());
    for v in arr {
        let s = v
            .as_str()
            .ok_or_else(|| validation(format!("side_identifiers.{key} must contain strings")))?;
        if s.is_empty() {
            return Err(validation(format!(
                "side_identifiers.{key} must not contain empty tokens"
            )));
        }
        tokens.push(s.to_string());
    }
    Ok(tokens)
}

/// Right tokens are compiled before left: a name carrying both side
/// markers resolves as right. Within a side, list order is precedence.
fn compile_side_tokens(
    right_tokens: &[String],
    left_tokens: &[String],
) -> Result<Vec<SideToken>, MatchError> {
    let mut side_tokens = Vec::with_capacity(right_tokens.len() + left_tokens.len());
    for (side, tokens) in [
        (Laterality::Right, right_tokens),
        (Laterality::Left, left_tokens),
    ] {
        for token in tokens {
            let pattern = format!(r"(?i)(^|[\._\- ]){}([\._\- ]|$)", regex::escape(token));
            let pattern = Regex::new(&pattern).map_err(|e| {
                validation(format!("side identifier '{token}' is not matchable: {e}"))
            })?;
            side_tokens.push(SideToken { side, pattern });
        }
    }
    Ok(side_tokens)
}
