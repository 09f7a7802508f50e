pub mod filter;
pub mod result;
pub mod solver;

use serde::{Deserialize, Serialize};

pub use filter::{constraint_filter_group, filter_results, FilteredResult};
pub use result::{ResultIndex, SagTensionAnalysisResult};
pub use solver::{SagTensionSolver, SolverError};

/// Which stress-strain relationship of the cable governs an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CableCondition {
    /// As-strung cable on its initial load-strain curve
    Initial,
    /// After long-term creep at everyday loading
    Creep,
    /// After heavy loading, on the final elastic line
    Load,
}

impl CableCondition {
    /// Tag string used in XML files
    pub fn as_str(&self) -> &'static str {
        match self {
            CableCondition::Initial => "Initial",
            CableCondition::Creep => "Creep",
            CableCondition::Load => "Load",
        }
    }

    pub fn from_str_attr(s: &str) -> Option<CableCondition> {
        match s {
            "Initial" => Some(CableCondition::Initial),
            "Creep" => Some(CableCondition::Creep),
            "Load" => Some(CableCondition::Load),
            _ => None,
        }
    }
}

/// One analysis row: a cable condition under a weathercase.
///
/// The weathercase is referenced by description, never owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFilter {
    pub condition: CableCondition,
    pub weathercase: String,
}

/// Named ordered set of analysis filters; the order defines output row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFilterGroup {
    pub name: String,
    pub filters: Vec<AnalysisFilter>,
}
