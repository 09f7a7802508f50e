pub mod constraint;
pub mod list;

use serde::{Deserialize, Serialize};

use crate::types::conversion::*;
use crate::types::{UnitSystem, Vector3d};

pub use constraint::{CableConstraint, ConstraintLimitType};
pub use list::{SpanId, SpanList};

/// A cable strung on a line: which cable, under what design constraint,
/// across what attachment spacing.
///
/// The cable and the constraint's weathercase are referenced by name, never
/// owned; the application data set owns both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineCable {
    /// Cable name, resolved against the cable file list
    pub cable: String,
    /// Design limit governing the tension solve
    pub constraint: CableConstraint,
    /// Attachment spacing vector: x along line, y transverse, z vertical rise (ft)
    pub spacing_attachments: Vector3d,
}

/// A physical transmission-line span
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub name: String,
    pub line_cable: LineCable,
    /// Weathercase that governs permanent creep stretch (schema v2)
    pub weathercase_stretch_creep: Option<String>,
    /// Weathercase that governs heavy-load stretch (schema v2)
    pub weathercase_stretch_load: Option<String>,
}

/// Convert a span between unit systems.
///
/// `is_recursive` descends into the owned line cable (spacing + constraint).
pub fn convert_unit_system(
    span: &mut Span,
    system_from: UnitSystem,
    system_to: UnitSystem,
    is_recursive: bool,
) {
    if !is_recursive {
        return;
    }
    let spacing = &mut span.line_cable.spacing_attachments;
    spacing.x = convert_length(spacing.x, system_from, system_to);
    spacing.y = convert_length(spacing.y, system_from, system_to);
    spacing.z = convert_length(spacing.z, system_from, system_to);
    constraint::convert_unit_system(&mut span.line_cable.constraint, system_from, system_to);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CableCondition;
    use approx::assert_relative_eq;

    #[test]
    fn test_recursive_conversion_reaches_line_cable() {
        let mut span = Span {
            name: "Crossing".into(),
            line_cable: LineCable {
                cable: "795 ACSR".into(),
                constraint: CableConstraint {
                    limit_type: ConstraintLimitType::Sag,
                    limit: 10.0,
                    weathercase: "Everyday".into(),
                    condition: CableCondition::Initial,
                },
                spacing_attachments: Vector3d::new(500.0, 0.0, 20.0),
            },
            ..Default::default()
        };

        convert_unit_system(&mut span, UnitSystem::Imperial, UnitSystem::Metric, true);
        assert_relative_eq!(span.line_cable.spacing_attachments.x, 152.4, epsilon = 1e-9);
        assert_relative_eq!(span.line_cable.constraint.limit, 3.048, epsilon = 1e-9);

        // Non-recursive touches nothing on the span itself
        let mut other = span.clone();
        convert_unit_system(&mut other, UnitSystem::Metric, UnitSystem::Imperial, false);
        assert_relative_eq!(
            other.line_cable.spacing_attachments.x,
            span.line_cable.spacing_attachments.x
        );
    }
}
