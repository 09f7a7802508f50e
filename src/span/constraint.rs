use serde::{Deserialize, Serialize};

use crate::analysis::CableCondition;
use crate::types::conversion::*;
use crate::types::UnitSystem;

/// Quantity a design constraint limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintLimitType {
    /// Catenary constant H/w (ft)
    CatenaryConstant,
    /// Horizontal tension (lbs)
    HorizontalTension,
    /// Curve length (ft)
    Length,
    /// Sag below the chord (ft)
    Sag,
    /// Largest support tension (lbs)
    SupportTension,
}

impl ConstraintLimitType {
    /// Tag string used in XML files
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintLimitType::CatenaryConstant => "CatenaryConstant",
            ConstraintLimitType::HorizontalTension => "HorizontalTension",
            ConstraintLimitType::Length => "Length",
            ConstraintLimitType::Sag => "Sag",
            ConstraintLimitType::SupportTension => "SupportTension",
        }
    }

    pub fn from_str_attr(s: &str) -> Option<ConstraintLimitType> {
        match s {
            "CatenaryConstant" => Some(ConstraintLimitType::CatenaryConstant),
            "HorizontalTension" => Some(ConstraintLimitType::HorizontalTension),
            "Length" => Some(ConstraintLimitType::Length),
            "Sag" => Some(ConstraintLimitType::Sag),
            "SupportTension" => Some(ConstraintLimitType::SupportTension),
            _ => None,
        }
    }
}

/// A named design limit the solver must satisfy at its reference condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableConstraint {
    pub limit_type: ConstraintLimitType,
    pub limit: f64,
    /// Weathercase the limit applies under, by description
    pub weathercase: String,
    /// Cable condition the limit applies at
    pub condition: CableCondition,
}

impl Default for CableConstraint {
    fn default() -> Self {
        Self {
            limit_type: ConstraintLimitType::HorizontalTension,
            limit: 0.0,
            weathercase: String::new(),
            condition: CableCondition::Initial,
        }
    }
}

/// Convert a constraint between unit systems; the limit converts by kind
pub fn convert_unit_system(
    constraint: &mut CableConstraint,
    system_from: UnitSystem,
    system_to: UnitSystem,
) {
    constraint.limit = match constraint.limit_type {
        ConstraintLimitType::CatenaryConstant
        | ConstraintLimitType::Length
        | ConstraintLimitType::Sag => convert_length(constraint.limit, system_from, system_to),
        ConstraintLimitType::HorizontalTension | ConstraintLimitType::SupportTension => {
            convert_force(constraint.limit, system_from, system_to)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_limit_converts_by_kind() {
        let mut sag = CableConstraint {
            limit_type: ConstraintLimitType::Sag,
            limit: 10.0,
            weathercase: "Everyday".into(),
            condition: CableCondition::Initial,
        };
        convert_unit_system(&mut sag, UnitSystem::Imperial, UnitSystem::Metric);
        assert_relative_eq!(sag.limit, 3.048, max_relative = 1e-9);

        let mut tension = CableConstraint {
            limit_type: ConstraintLimitType::HorizontalTension,
            limit: 1000.0,
            ..Default::default()
        };
        convert_unit_system(&mut tension, UnitSystem::Imperial, UnitSystem::Metric);
        assert_relative_eq!(tension.limit, 4448.2216, epsilon = 0.001);
    }
}
