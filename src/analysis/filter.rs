//! Ordered filtering of solver results.
//!
//! Output rows are explicit (filter, result) pairs rather than a bare
//! parallel list: a combination with no computed result simply contributes
//! no pair, and downstream positional matching can never drift out of
//! alignment with the filters that produced the rows.

use crate::analysis::result::{ResultIndex, SagTensionAnalysisResult};
use crate::analysis::{AnalysisFilter, AnalysisFilterGroup};
use crate::span::CableConstraint;

/// One output row: the filter that selected it and the matching result
#[derive(Debug, Clone, Copy)]
pub struct FilteredResult<'a> {
    pub filter: &'a AnalysisFilter,
    pub result: &'a SagTensionAnalysisResult,
}

/// Select results in filter-group order, skipping combinations with no
/// computed result (never inserting placeholders)
pub fn filter_results<'a>(
    index: &'a ResultIndex,
    group: &'a AnalysisFilterGroup,
) -> Vec<FilteredResult<'a>> {
    group
        .filters
        .iter()
        .filter_map(|filter| {
            index
                .get(&filter.weathercase, filter.condition)
                .map(|result| FilteredResult { filter, result })
        })
        .collect()
}

/// Derive the implicit filter group from a document's constraint list,
/// preserving constraint order
pub fn constraint_filter_group<'a, I>(constraints: I) -> AnalysisFilterGroup
where
    I: IntoIterator<Item = &'a CableConstraint>,
{
    AnalysisFilterGroup {
        name: "Constraints".to_string(),
        filters: constraints
            .into_iter()
            .map(|constraint| AnalysisFilter {
                condition: constraint.condition,
                weathercase: constraint.weathercase.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CableCondition;
    use crate::span::ConstraintLimitType;
    use crate::types::Vector3d;

    fn result(weathercase: &str, condition: CableCondition) -> SagTensionAnalysisResult {
        SagTensionAnalysisResult {
            weight_unit: Vector3d::new(0.0, 0.0, 1.5),
            tension_horizontal: 1000.0,
            tension_horizontal_core: 0.0,
            tension_horizontal_shell: 1000.0,
            length_unloaded: 500.0,
            weathercase: weathercase.into(),
            condition,
        }
    }

    fn group() -> AnalysisFilterGroup {
        AnalysisFilterGroup {
            name: "Report".into(),
            filters: vec![
                AnalysisFilter {
                    condition: CableCondition::Initial,
                    weathercase: "Everyday".into(),
                },
                AnalysisFilter {
                    condition: CableCondition::Initial,
                    weathercase: "Heavy".into(),
                },
                AnalysisFilter {
                    condition: CableCondition::Creep,
                    weathercase: "Everyday".into(),
                },
            ],
        }
    }

    #[test]
    fn test_order_preserved_with_gap() {
        let mut index = ResultIndex::new();
        index.insert(result("Everyday", CableCondition::Initial));
        index.insert(result("Everyday", CableCondition::Creep));
        // "Heavy" never converged: no entry

        let group = group();
        let rows = filter_results(&index, &group);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].filter.weathercase, "Everyday");
        assert_eq!(rows[0].result.condition, CableCondition::Initial);
        assert_eq!(rows[1].filter.condition, CableCondition::Creep);

        // Each surviving row still knows which filter produced it
        assert!(std::ptr::eq(rows[1].filter, &group.filters[2]));
    }

    #[test]
    fn test_empty_index_yields_no_rows() {
        let index = ResultIndex::new();
        let group = group();
        assert!(filter_results(&index, &group).is_empty());
    }

    #[test]
    fn test_constraint_mode_group() {
        let constraints = [
            CableConstraint {
                limit_type: ConstraintLimitType::Sag,
                limit: 10.0,
                weathercase: "Heavy".into(),
                condition: CableCondition::Load,
            },
            CableConstraint {
                limit_type: ConstraintLimitType::HorizontalTension,
                limit: 2000.0,
                weathercase: "Everyday".into(),
                condition: CableCondition::Initial,
            },
        ];
        let group = constraint_filter_group(constraints.iter());
        assert_eq!(group.filters.len(), 2);
        assert_eq!(group.filters[0].weathercase, "Heavy");
        assert_eq!(group.filters[0].condition, CableCondition::Load);
        assert_eq!(group.filters[1].weathercase, "Everyday");
    }
}
