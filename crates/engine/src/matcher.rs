use crate::dictionary::{region_is_peripheral, MappingDictionary};
use crate::identity::{BoneIdentity, Laterality};

/// Laterality-confirmed fuzzy matches get a 20% boost, capped at 1.0.
pub const SIDE_BONUS: f64 = 1.2;

/// A candidate is only tracked during the fuzzy scan when its score
/// strictly exceeds this floor.
pub const CANDIDATE_FLOOR: f64 = 0.8;

/// The tracked best is only accepted when its score strictly exceeds
/// this threshold. Stricter than the floor on purpose: a bone kept
/// under its original name is recoverable, a bad rename is not.
pub const ACCEPT_THRESHOLD: f64 = 0.9;

/// Find the reference name that best matches `target_name`.
///
/// Phase one looks for an exact canonical-identity match (canonical
/// name and laterality both equal); the first such candidate in input
/// order wins with confidence 1.0. Phase two falls back to normalized
/// edit similarity between canonical names, gated by
/// [`CANDIDATE_FLOOR`] and [`ACCEPT_THRESHOLD`].
///
/// Candidates whose laterality is defined and differs from the
/// target's defined laterality are never considered.
pub fn find_best_match<'a>(
    dict: &MappingDictionary,
    target_name: &str,
    candidate_names: &'a [String],
    include_peripheral: bool,
) -> Option<(&'a str, f64)> {
    let target = BoneIdentity::resolve(dict, target_name);

    if !include_peripheral && region_is_peripheral(&target.region) {
        return None;
    }

    let candidates: Vec<(usize, BoneIdentity)> = candidate_names
        .iter()
        .enumerate()
        .map(|(i, name)| (i, BoneIdentity::resolve(dict, name)))
        .filter(|(_, c)| sides_compatible(target.laterality, c.laterality))
        .collect();

    // Exact phase: first candidate with the same canonical identity.
    for (i, cand) in &candidates {
        if cand.canonical_name == target.canonical_name && cand.laterality == target.laterality {
            return Some((candidate_names[*i].as_str(), 1.0));
        }
    }

    // Fuzzy phase.
    let target_lower = target.canonical_name.to_lowercase();
    let mut best: Option<(usize, f64)> = None;

    for (i, cand) in &candidates {
        let mut score =
            strsim::normalized_levenshtein(&target_lower, &cand.canonical_name.to_lowercase());
        if cand.laterality == target.laterality {
            score = (score * SIDE_BONUS).min(1.0);
        }
        if score > CANDIDATE_FLOOR && best.is_none_or(|(_, b)| score > b) {
            best = Some((*i, score));
        }
    }

    match best {
        Some((i, score)) if score > ACCEPT_THRESHOLD => {
            Some((candidate_names[i].as_str(), score))
        }
        _ => None,
    }
}

fn sides_compatible(a: Laterality, b: Laterality) -> bool {
    a == Laterality::None || b == Laterality::None || a == b
}
