use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::CableCondition;
use crate::types::Vector3d;

/// Solver output for one (cable, weathercase, condition) combination.
///
/// Immutable once produced; owned by the result index that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SagTensionAnalysisResult {
    /// Resultant unit weight the solution hangs under (lbs/ft)
    pub weight_unit: Vector3d,
    /// Solved horizontal tension (lbs)
    pub tension_horizontal: f64,
    /// Portion of the horizontal tension carried by the core (lbs)
    pub tension_horizontal_core: f64,
    /// Portion of the horizontal tension carried by the shell (lbs)
    pub tension_horizontal_shell: f64,
    /// Cable length with all load and thermal strain removed (ft)
    pub length_unloaded: f64,
    /// Weathercase description this result was solved for
    pub weathercase: String,
    /// Cable condition this result was solved at
    pub condition: CableCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResultKey {
    weathercase: String,
    condition: CableCondition,
}

/// Solver outputs keyed by (weathercase description, condition).
///
/// A missing entry means "no result computed" for that combination, which
/// is distinct from any numeric value; filtering layers must observe the
/// absence, never substitute placeholders.
#[derive(Debug, Clone, Default)]
pub struct ResultIndex {
    results: HashMap<ResultKey, SagTensionAnalysisResult>,
}

impl ResultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Store a result under its own weathercase/condition key
    pub fn insert(&mut self, result: SagTensionAnalysisResult) {
        let key = ResultKey {
            weathercase: result.weathercase.clone(),
            condition: result.condition,
        };
        self.results.insert(key, result);
    }

    pub fn get(
        &self,
        weathercase: &str,
        condition: CableCondition,
    ) -> Option<&SagTensionAnalysisResult> {
        let key = ResultKey {
            weathercase: weathercase.to_string(),
            condition,
        };
        self.results.get(&key)
    }

    pub fn contains(&self, weathercase: &str, condition: CableCondition) -> bool {
        self.get(weathercase, condition).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(weathercase: &str, condition: CableCondition) -> SagTensionAnalysisResult {
        SagTensionAnalysisResult {
            weight_unit: Vector3d::new(0.0, 0.0, 1.5),
            tension_horizontal: 1000.0,
            tension_horizontal_core: 400.0,
            tension_horizontal_shell: 600.0,
            length_unloaded: 500.0,
            weathercase: weathercase.into(),
            condition,
        }
    }

    #[test]
    fn test_absence_is_observable() {
        let mut index = ResultIndex::new();
        index.insert(result("Everyday", CableCondition::Initial));

        assert!(index.contains("Everyday", CableCondition::Initial));
        assert!(!index.contains("Everyday", CableCondition::Creep));
        assert!(!index.contains("Heavy", CableCondition::Initial));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_reinsert_replaces() {
        let mut index = ResultIndex::new();
        index.insert(result("Everyday", CableCondition::Initial));
        let mut updated = result("Everyday", CableCondition::Initial);
        updated.tension_horizontal = 2000.0;
        index.insert(updated);

        assert_eq!(index.len(), 1);
        assert_eq!(
            index
                .get("Everyday", CableCondition::Initial)
                .unwrap()
                .tension_horizontal,
            2000.0
        );
    }
}
