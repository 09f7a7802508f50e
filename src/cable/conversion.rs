//! Unit handling for cables.
//!
//! System conversion moves a cable between the Imperial and Metric
//! consistent bases. Style conversion moves a cable between the
//! human-friendly units its file format uses (`Different`) and the
//! consistent calculation basis, and is schema-version specific: each file
//! version converts exactly the fields it carries.

use crate::cable::{Cable, CableComponent};
use crate::types::conversion::*;
use crate::types::*;

pub use crate::types::conversion::ConversionError;

/// Latest cable schema version; also the target of the version-0 sentinel
pub const VERSION_LATEST: u32 = 2;

/// Convert a consistent-style cable between unit systems.
///
/// `is_recursive` controls whether the contained core/shell components are
/// converted along with the cable-level fields.
pub fn convert_unit_system(
    cable: &mut Cable,
    system_from: UnitSystem,
    system_to: UnitSystem,
    is_recursive: bool,
) {
    cable.area_electrical = convert_area(cable.area_electrical, system_from, system_to);
    cable.area_physical = convert_area(cable.area_physical, system_from, system_to);
    cable.diameter = convert_length(cable.diameter, system_from, system_to);
    cable.strength_rated = convert_force(cable.strength_rated, system_from, system_to);
    cable.temperature_components =
        convert_temperature(cable.temperature_components, system_from, system_to);
    cable.weight_unit = convert_force_per_length(cable.weight_unit, system_from, system_to);

    if is_recursive {
        convert_component_unit_system(&mut cable.component_core, system_from, system_to);
        convert_component_unit_system(&mut cable.component_shell, system_from, system_to);
    }
}

fn convert_component_unit_system(
    component: &mut CableComponent,
    system_from: UnitSystem,
    system_to: UnitSystem,
) {
    component.coefficient_expansion_thermal = convert_temperature_coefficient(
        component.coefficient_expansion_thermal,
        system_from,
        system_to,
    );
    component.modulus_tension_elastic =
        convert_force(component.modulus_tension_elastic, system_from, system_to);
    component.modulus_compression_elastic =
        convert_force(component.modulus_compression_elastic, system_from, system_to);
    for coefficient in component.coefficients_loadstrain.iter_mut() {
        *coefficient = convert_force(*coefficient, system_from, system_to);
    }
    for coefficient in component.coefficients_creep.iter_mut() {
        *coefficient = convert_force(*coefficient, system_from, system_to);
    }
    component.load_limit_loadstrain =
        convert_force(component.load_limit_loadstrain, system_from, system_to);
    component.load_limit_creep = convert_force(component.load_limit_creep, system_from, system_to);
}

type StyleConverter = fn(&mut Cable, UnitSystem, bool);

// Registry of version-specific style converters; extended, never edited,
// when a schema revision changes the file units
const STYLE_CONVERTERS: &[(u32, StyleConverter)] =
    &[(1, convert_unit_style_v1), (2, convert_unit_style_v2)];

/// Convert a cable into the target unit style for the given schema
/// version: `Consistent` rewrites file values onto the calculation basis,
/// `Different` rewrites them back into file units.
///
/// Version 0 is an explicit sentinel meaning "latest"; any other
/// unrecognized version is an error, never a silent fallback.
pub fn convert_unit_style(
    cable: &mut Cable,
    version: u32,
    system: UnitSystem,
    style_to: UnitStyle,
) -> Result<(), ConversionError> {
    let version = if version == 0 { VERSION_LATEST } else { version };
    let converter = STYLE_CONVERTERS
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, f)| *f)
        .ok_or(ConversionError::UnsupportedVersion(version))?;
    converter(cable, system, style_to == UnitStyle::Consistent);
    Ok(())
}

// v1 files carry diameter and physical area only
fn convert_unit_style_v1(cable: &mut Cable, system: UnitSystem, to_consistent: bool) {
    match system {
        UnitSystem::Metric => {
            if to_consistent {
                cable.diameter = Length::new::<millimeter>(cable.diameter).get::<meter>();
                cable.area_physical =
                    Area::new::<square_millimeter>(cable.area_physical).get::<square_meter>();
            } else {
                cable.diameter = Length::new::<meter>(cable.diameter).get::<millimeter>();
                cable.area_physical =
                    Area::new::<square_meter>(cable.area_physical).get::<square_millimeter>();
            }
        }
        _ => {
            if to_consistent {
                cable.diameter = Length::new::<inch>(cable.diameter).get::<foot>();
                cable.area_physical =
                    Area::new::<square_inch>(cable.area_physical).get::<square_foot>();
            } else {
                cable.diameter = Length::new::<foot>(cable.diameter).get::<inch>();
                cable.area_physical =
                    Area::new::<square_foot>(cable.area_physical).get::<square_inch>();
            }
        }
    }
}

// v2 added the electrical area field (kcmil / mm^2 in files)
fn convert_unit_style_v2(cable: &mut Cable, system: UnitSystem, to_consistent: bool) {
    convert_unit_style_v1(cable, system, to_consistent);
    match system {
        UnitSystem::Metric => {
            if to_consistent {
                cable.area_electrical =
                    Area::new::<square_millimeter>(cable.area_electrical).get::<square_meter>();
            } else {
                cable.area_electrical =
                    Area::new::<square_meter>(cable.area_electrical).get::<square_millimeter>();
            }
        }
        _ => {
            if to_consistent {
                cable.area_electrical = Area::new::<circular_mil>(cable.area_electrical * 1000.0)
                    .get::<square_foot>();
            } else {
                cable.area_electrical =
                    Area::new::<square_foot>(cable.area_electrical).get::<circular_mil>() / 1000.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_cable() -> Cable {
        Cable {
            name: "795 ACSR".into(),
            construction: "ACSR 26/7".into(),
            area_electrical: 795.0, // kcmil, different style
            area_physical: 0.7264,  // in^2, different style
            diameter: 1.108,        // in, different style
            strength_rated: 31500.0,
            temperature_components: 70.0,
            weight_unit: 1.094,
            component_core: CableComponent {
                coefficient_expansion_thermal: 6.4e-6,
                modulus_tension_elastic: 27000.0,
                ..Default::default()
            },
            component_shell: CableComponent {
                coefficient_expansion_thermal: 1.28e-5,
                modulus_tension_elastic: 64000.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_style_roundtrip_latest() {
        let mut cable = sample_cable();
        let original = cable.clone();

        convert_unit_style(&mut cable, 0, UnitSystem::Imperial, UnitStyle::Consistent).unwrap();
        // Consistent basis holds feet and square feet
        assert_relative_eq!(cable.diameter, 1.108 / 12.0, max_relative = 1e-9);
        assert_relative_eq!(cable.area_physical, 0.7264 / 144.0, max_relative = 1e-9);

        convert_unit_style(&mut cable, 0, UnitSystem::Imperial, UnitStyle::Different).unwrap();
        assert_relative_eq!(cable.diameter, original.diameter, max_relative = 1e-9);
        assert_relative_eq!(
            cable.area_electrical,
            original.area_electrical,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_style_v1_leaves_electrical_area_alone() {
        let mut cable = sample_cable();
        convert_unit_style(&mut cable, 1, UnitSystem::Imperial, UnitStyle::Consistent).unwrap();
        assert_relative_eq!(cable.area_electrical, 795.0);
    }

    #[test]
    fn test_style_unknown_version_is_an_error() {
        let mut cable = sample_cable();
        assert!(convert_unit_style(&mut cable, 99, UnitSystem::Imperial, UnitStyle::Consistent).is_err());
    }

    #[test]
    fn test_system_roundtrip() {
        let mut cable = sample_cable();
        convert_unit_style(&mut cable, 0, UnitSystem::Imperial, UnitStyle::Consistent).unwrap();
        let original = cable.clone();

        convert_unit_system(&mut cable, UnitSystem::Imperial, UnitSystem::Metric, true);
        convert_unit_system(&mut cable, UnitSystem::Metric, UnitSystem::Imperial, true);

        assert_relative_eq!(cable.diameter, original.diameter, max_relative = 1e-9);
        assert_relative_eq!(
            cable.strength_rated,
            original.strength_rated,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            cable.component_core.modulus_tension_elastic,
            original.component_core.modulus_tension_elastic,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            cable.component_shell.coefficient_expansion_thermal,
            original.component_shell.coefficient_expansion_thermal,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_nonrecursive_skips_components() {
        let mut cable = sample_cable();
        convert_unit_system(&mut cable, UnitSystem::Imperial, UnitSystem::Metric, false);
        assert_relative_eq!(cable.component_core.modulus_tension_elastic, 27000.0);
    }
}
