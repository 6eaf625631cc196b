//! Human-readable plan output, grouped by dictionary region.

use rigmatch_engine::{BoneIdentity, MappingDictionary, MatchResult, PlanReport};

pub fn print_plan(dict: &MappingDictionary, report: &PlanReport) {
    let mut grouped: Vec<(&str, Vec<&MatchResult>)> = dict
        .regions
        .iter()
        .map(|r| (r.display_name.as_str(), Vec::new()))
        .collect();
    let mut other: Vec<&MatchResult> = Vec::new();

    for result in &report.results {
        let id = BoneIdentity::resolve(dict, &result.original_name);
        match dict.regions.iter().position(|r| r.name == id.region) {
            Some(i) => grouped[i].1.push(result),
            None => other.push(result),
        }
    }
    grouped.push(("Unclassified", other));

    // Pad by character count, matching how the formatter measures
    // width; byte lengths would misalign non-ASCII names.
    let width = report
        .results
        .iter()
        .map(|r| r.original_name.chars().count())
        .max()
        .unwrap_or(0);

    for (label, results) in grouped {
        if results.is_empty() {
            continue;
        }
        println!("{label}:");
        for r in results {
            if r.is_rename() {
                println!(
                    "  {:<width$} -> {}  ({:.3})",
                    r.original_name, r.proposed_name, r.confidence
                );
            } else {
                println!("  {:<width$}    (kept)", r.original_name);
            }
        }
    }
}
