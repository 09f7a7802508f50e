pub mod component;
pub mod conversion;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use component::{CableComponent, PolynomialType};

/// Physical and electrical description of a transmission cable.
///
/// Field values are kept in the consistent unit basis of the attributed
/// system (feet/lbs/deg F for Imperial); the XML layer converts to and from
/// the human-friendly file units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cable {
    /// Cable name, e.g. "795 ACSR"
    pub name: String,
    /// Construction type string, e.g. "ACSR 26/7"
    pub construction: String,
    /// Electrical conductor area (ft^2 consistent, kcmil in files)
    pub area_electrical: f64,
    /// Physical cross-section area (ft^2 consistent, in^2 in files)
    pub area_physical: f64,
    /// Outside diameter (ft consistent, in in files)
    pub diameter: f64,
    /// Rated breaking strength (lbs)
    pub strength_rated: f64,
    /// Reference temperature of the component polynomials (deg F)
    pub temperature_components: f64,
    /// Bare unit weight (lbs/ft)
    pub weight_unit: f64,
    /// Inner structural component
    pub component_core: CableComponent,
    /// Outer structural component
    pub component_shell: CableComponent,
}

impl Cable {
    /// Combined tension elastic modulus-area of both components
    /// (lbs per percent strain)
    pub fn modulus_tension_combined(&self) -> f64 {
        self.component_core.modulus_tension_elastic + self.component_shell.modulus_tension_elastic
    }

    /// Modulus-weighted equivalent thermal expansion coefficient (1/deg F)
    pub fn coefficient_expansion_thermal_combined(&self) -> f64 {
        let modulus = self.modulus_tension_combined();
        if modulus == 0.0 {
            return 0.0;
        }
        (self.component_core.coefficient_expansion_thermal
            * self.component_core.modulus_tension_elastic
            + self.component_shell.coefficient_expansion_thermal
                * self.component_shell.modulus_tension_elastic)
            / modulus
    }
}

/// A cable paired with the file it was loaded from.
///
/// The owning list's order is user-significant and must not be resorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableFile {
    pub path: PathBuf,
    pub cable: Cable,
}
