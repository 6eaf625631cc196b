use serde::{Deserialize, Serialize};

/// One planned rename. `proposed_name == original_name` with zero
/// confidence means "kept as-is": an explicit outcome, not an
/// omission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub original_name: String,
    pub proposed_name: String,
    pub confidence: f64,
}

impl MatchResult {
    pub fn is_rename(&self) -> bool {
        self.original_name != self.proposed_name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMeta {
    pub dictionary_version: String,
    pub dictionary_updated: String,
    pub engine_version: String,
    pub run_at: String,
    pub include_peripheral: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Target names examined, including skipped peripheral ones.
    pub total_targets: usize,
    /// Results emitted (matched + kept).
    pub planned: usize,
    /// Results with a matched reference name.
    pub matched: usize,
    /// Kept-as-is results (no match, or unclassified name).
    pub kept: usize,
    /// Peripheral names skipped because they were not opted in.
    pub peripheral_skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub meta: PlanMeta,
    pub summary: PlanSummary,
    pub results: Vec<MatchResult>,
}
