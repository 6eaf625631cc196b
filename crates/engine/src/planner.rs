use crate::dictionary::{region_is_peripheral, MappingDictionary};
use crate::identity::BoneIdentity;
use crate::matcher::find_best_match;
use crate::model::{MatchResult, PlanMeta, PlanReport, PlanSummary};

/// Plan renames for every target name, in target-list order.
///
/// Peripheral names are invisible to the plan unless opted in: no
/// result is emitted for them. Every other target yields exactly one
/// result, matched or kept-as-is with zero confidence. The planner
/// is a pure function of its inputs and performs no IO.
pub fn plan(
    dict: &MappingDictionary,
    target_names: &[String],
    reference_names: &[String],
    include_peripheral: bool,
) -> Vec<MatchResult> {
    let mut results = Vec::with_capacity(target_names.len());

    for name in target_names {
        let identity = BoneIdentity::resolve(dict, name);

        if !include_peripheral && region_is_peripheral(&identity.region) {
            continue;
        }

        // Only names the dictionary defines are candidates for a
        // rename; unclassified names are kept as-is.
        let best = if dict.is_canonical(&identity.canonical_name) {
            find_best_match(dict, name, reference_names, include_peripheral)
        } else {
            None
        };

        let result = match best {
            Some((proposed, confidence)) => MatchResult {
                original_name: name.clone(),
                proposed_name: proposed.to_string(),
                confidence,
            },
            None => MatchResult {
                original_name: name.clone(),
                proposed_name: name.clone(),
                confidence: 0.0,
            },
        };
        results.push(result);
    }

    results
}

/// Run a full planning pass and wrap the results with meta and
/// summary for the JSON report contract.
pub fn run(
    dict: &MappingDictionary,
    target_names: &[String],
    reference_names: &[String],
    include_peripheral: bool,
) -> PlanReport {
    let results = plan(dict, target_names, reference_names, include_peripheral);
    let summary = compute_summary(target_names.len(), &results);

    PlanReport {
        meta: PlanMeta {
            dictionary_version: dict.version.clone(),
            dictionary_updated: dict.last_updated.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            include_peripheral,
        },
        summary,
        results,
    }
}

fn compute_summary(total_targets: usize, results: &[MatchResult]) -> PlanSummary {
    let matched = results.iter().filter(|r| r.confidence > 0.0).count();

    PlanSummary {
        total_targets,
        planned: results.len(),
        matched,
        kept: results.len() - matched,
        peripheral_skipped: total_targets - results.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> MappingDictionary {
        MappingDictionary::from_json(
            r#"{
            "version": "1.4",
            "side_identifiers": {
                "left": ["L", "Left"],
                "right": ["R", "Right"]
            },
            "bone_regions": {
                "arms": {
                    "bones": {
                        "upper_arm": ["UpperArm", "Arm1"],
                        "forearm": ["ForeArm", "Arm2"]
                    }
                },
                "fingers": {
                    "bones": {
                        "thumb": ["Thumb"]
                    }
                }
            }
        }"#,
        )
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plan_preserves_target_order() {
        let targets = names(&["ForeArm.L", "UpperArm.R", "UpperArm.L"]);
        let refs = names(&["Arm1.L", "Arm1.R", "Arm2.L"]);
        let results = plan(&dict(), &targets, &refs, false);

        let originals: Vec<_> = results.iter().map(|r| r.original_name.as_str()).collect();
        assert_eq!(originals, vec!["ForeArm.L", "UpperArm.R", "UpperArm.L"]);
        assert_eq!(results[0].proposed_name, "Arm2.L");
        assert_eq!(results[1].proposed_name, "Arm1.R");
        assert_eq!(results[2].proposed_name, "Arm1.L");
        assert!(results.iter().all(|r| r.confidence == 1.0));
    }

    #[test]
    fn unmatched_target_kept_as_is() {
        let targets = names(&["UpperArm.R"]);
        let refs = names(&["Shoulder.R"]);
        let results = plan(&dict(), &targets, &refs, false);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].original_name, "UpperArm.R");
        assert_eq!(results[0].proposed_name, "UpperArm.R");
        assert_eq!(results[0].confidence, 0.0);
    }

    #[test]
    fn peripheral_target_skipped_entirely() {
        let targets = names(&["Thumb_01.L", "UpperArm.L"]);
        let refs = names(&["Thumb.L", "Arm1.L"]);

        let results = plan(&dict(), &targets, &refs, false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].original_name, "UpperArm.L");

        let results = plan(&dict(), &targets, &refs, true);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].original_name, "Thumb_01.L");
        assert_eq!(results[0].proposed_name, "Thumb.L");
    }

    #[test]
    fn empty_dictionary_keeps_everything() {
        let d = MappingDictionary::from_json(r#"{"bone_regions": {}}"#).unwrap();
        let targets = names(&["Hips", "Spine", "Head"]);
        let refs = names(&["pelvis", "chest", "skull"]);
        let results = plan(&d, &targets, &refs, false);

        assert_eq!(results.len(), 3);
        for (result, target) in results.iter().zip(&targets) {
            assert_eq!(&result.original_name, target);
            assert_eq!(&result.proposed_name, target);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn unclassified_target_never_matched() {
        // "Prop_Sword" resolves to region "other": kept even when an
        // identical reference name exists.
        let targets = names(&["Prop_Sword"]);
        let refs = names(&["Prop_Sword"]);
        let results = plan(&dict(), &targets, &refs, false);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].confidence, 0.0);
    }

    #[test]
    fn run_assembles_meta_and_summary() {
        let targets = names(&["UpperArm.R", "Thumb_01.L", "Prop_Sword"]);
        let refs = names(&["Arm1.R"]);
        let report = run(&dict(), &targets, &refs, false);

        assert_eq!(report.meta.dictionary_version, "1.4");
        assert_eq!(report.meta.engine_version, env!("CARGO_PKG_VERSION"));
        assert!(!report.meta.include_peripheral);

        assert_eq!(report.summary.total_targets, 3);
        assert_eq!(report.summary.planned, 2);
        assert_eq!(report.summary.matched, 1);
        assert_eq!(report.summary.kept, 1);
        assert_eq!(report.summary.peripheral_skipped, 1);
    }
}
