//! `rigmatch-engine` - skeleton bone-name normalization and matching.
//!
//! Pure engine crate: receives a mapping dictionary and two name
//! lists, returns a rename plan. No CLI, network, or file-system
//! dependencies.

pub mod dictionary;
pub mod error;
pub mod identity;
pub mod matcher;
pub mod model;
pub mod planner;

pub use dictionary::{MappingDictionary, Region};
pub use error::MatchError;
pub use identity::{BoneIdentity, Laterality};
pub use matcher::find_best_match;
pub use model::{MatchResult, PlanReport};
pub use planner::{plan, run};
