use std::path::PathBuf;

use rigmatch_engine::identity::BoneIdentity;
use rigmatch_engine::{find_best_match, plan, run, Laterality, MappingDictionary};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn humanoid_dict() -> MappingDictionary {
    let path = fixtures_dir().join("humanoid.dict.json");
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    MappingDictionary::from_json(&data).unwrap()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Target rig in one naming convention, reference rig in another.
fn target_rig() -> Vec<String> {
    names(&[
        "Hips",
        "Spine",
        "Head",
        "UpperArm.L",
        "UpperArm.R",
        "LowerArm.L",
        "LowerArm.R",
        "Wrist.L",
        "Wrist.R",
        "UpLeg.L",
        "UpLeg.R",
        "Thumb_01.L",
        "IndexFinger_02.R",
        "IKTarget.L",
    ])
}

fn reference_rig() -> Vec<String> {
    names(&[
        "Pelvis", "Spine1", "Head", "Arm1_L", "Arm1_R", "Arm2_L", "Arm2_R", "Hand_L", "Hand_R",
        "Leg1_L", "Leg1_R", "Thumb_L", "Index_R",
    ])
}

// ---------------------------------------------------------------------------
// Cross-convention rename plans
// ---------------------------------------------------------------------------

#[test]
fn cross_convention_plan_matches_exactly() {
    let dict = humanoid_dict();
    let results = plan(&dict, &target_rig(), &reference_rig(), false);

    let expect = [
        ("Hips", "Pelvis"),
        ("Spine", "Spine1"),
        ("Head", "Head"),
        ("UpperArm.L", "Arm1_L"),
        ("UpperArm.R", "Arm1_R"),
        ("LowerArm.L", "Arm2_L"),
        ("LowerArm.R", "Arm2_R"),
        ("Wrist.L", "Hand_L"),
        ("Wrist.R", "Hand_R"),
        ("UpLeg.L", "Leg1_L"),
        ("UpLeg.R", "Leg1_R"),
    ];

    // Finger bones are skipped, so 14 targets yield 12 results
    // (11 skeleton bones + the unmapped IK helper).
    assert_eq!(results.len(), expect.len() + 1);

    for (result, (original, proposed)) in results.iter().zip(expect) {
        assert_eq!(result.original_name, original);
        assert_eq!(result.proposed_name, proposed, "for {original}");
        assert_eq!(result.confidence, 1.0, "for {original}");
    }

    // The IK helper is unclassified: kept as-is, zero confidence.
    let last = results.last().unwrap();
    assert_eq!(last.original_name, "IKTarget.L");
    assert_eq!(last.proposed_name, "IKTarget.L");
    assert_eq!(last.confidence, 0.0);
}

#[test]
fn peripheral_bones_appear_only_when_opted_in() {
    let dict = humanoid_dict();

    let without = plan(&dict, &target_rig(), &reference_rig(), false);
    assert!(without
        .iter()
        .all(|r| !r.original_name.starts_with("Thumb") && !r.original_name.starts_with("Index")));

    let with = plan(&dict, &target_rig(), &reference_rig(), true);
    let thumb = with
        .iter()
        .find(|r| r.original_name == "Thumb_01.L")
        .expect("thumb planned");
    assert_eq!(thumb.proposed_name, "Thumb_L");
    assert_eq!(thumb.confidence, 1.0);

    let index = with
        .iter()
        .find(|r| r.original_name == "IndexFinger_02.R")
        .expect("index planned");
    assert_eq!(index.proposed_name, "Index_R");
}

#[test]
fn report_summary_and_meta() {
    let dict = humanoid_dict();
    let report = run(&dict, &target_rig(), &reference_rig(), false);

    assert_eq!(report.meta.dictionary_version, "2.10");
    assert_eq!(report.meta.dictionary_updated, "2026-03-14");
    assert_eq!(report.meta.engine_version, env!("CARGO_PKG_VERSION"));

    assert_eq!(report.summary.total_targets, 14);
    assert_eq!(report.summary.planned, 12);
    assert_eq!(report.summary.matched, 11);
    assert_eq!(report.summary.kept, 1);
    assert_eq!(report.summary.peripheral_skipped, 2);

    // The report round-trips through its JSON contract.
    let json = serde_json::to_string(&report).unwrap();
    let back: rigmatch_engine::PlanReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.results.len(), report.results.len());
    assert_eq!(back.summary.matched, 11);
}

// ---------------------------------------------------------------------------
// Identity resolution against the full dictionary
// ---------------------------------------------------------------------------

#[test]
fn identities_across_conventions() {
    let dict = humanoid_dict();

    let cases = [
        ("Arm1_L", "upper_arm", "arms", Laterality::Left),
        ("UpperArm.R.001", "upper_arm", "arms", Laterality::Right),
        ("Left_Calf", "shin", "legs", Laterality::Left),
        ("Pelvis", "hips", "core", Laterality::None),
        ("Thumb_02_R", "thumb", "fingers", Laterality::Right),
        ("ring_3.L", "ring", "fingers", Laterality::Left),
    ];

    for (raw, canonical, region, side) in cases {
        let id = BoneIdentity::resolve(&dict, raw);
        assert_eq!(id.canonical_name, canonical, "for {raw}");
        assert_eq!(id.region, region, "for {raw}");
        assert_eq!(id.laterality, side, "for {raw}");
    }
}

#[test]
fn numbered_finger_segments_resolve_by_containment() {
    let dict = humanoid_dict();
    let id = BoneIdentity::resolve(&dict, "pinky_02_master.L");
    assert_eq!(id.canonical_name, "pinky");
    assert_eq!(id.region, "fingers");
}

// ---------------------------------------------------------------------------
// Fuzzy fallback
// ---------------------------------------------------------------------------

#[test]
fn near_canonical_reference_accepted_with_side_bonus() {
    let dict = humanoid_dict();
    // "upper_arm1" is not a listed synonym (the digit has no leading
    // separator, so it survives suffix stripping). One edit away from
    // the target's canonical name, same side: the bonus lifts it over
    // the acceptance threshold.
    let refs = names(&["upper_arm1.L"]);
    let (best, score) = find_best_match(&dict, "UpperArm.L", &refs, false).unwrap();
    assert_eq!(best, "upper_arm1.L");
    assert!(score > 0.9);
}

#[test]
fn distant_reference_rejected() {
    let dict = humanoid_dict();
    let refs = names(&["Prop_Sword.L"]);
    assert!(find_best_match(&dict, "UpperArm.L", &refs, false).is_none());
}
