//! Sag-tension solver.
//!
//! For a cable, a design constraint, and attachment spacing, finds the
//! horizontal tension at any target weathercase/condition: the constraint
//! fixes the reference state, the reference state fixes the unloaded cable
//! length, and the target tension is the one whose catenary length matches
//! the unloaded length stretched by the condition's load-strain behavior at
//! the target temperature. Every solve is stateless and independent.

use thiserror::Error;

use crate::analysis::result::{ResultIndex, SagTensionAnalysisResult};
use crate::analysis::{AnalysisFilterGroup, CableCondition};
use crate::cable::{Cable, CableComponent, PolynomialType};
use crate::catenary::{Catenary3d, CatenaryError};
use crate::span::{CableConstraint, ConstraintLimitType};
use crate::types::Vector3d;
use crate::weather::{UnitLoadAnalysis, WeatherLoadCase};

/// Relative tolerance on solved tension
const TOLERANCE_RELATIVE: f64 = 1e-6;
/// Hard ceiling on root-find iterations
const ITERATIONS_MAX: usize = 100;
/// Strain search window for stress-strain inversion, percent
const STRAIN_SEARCH_MIN: f64 = -5.0;
const STRAIN_SEARCH_MAX: f64 = 20.0;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Failed to converge within {0} iterations")]
    Convergence(usize),
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),
    #[error(transparent)]
    Catenary(#[from] CatenaryError),
}

// Reference state the Load-condition elastic line is anchored at
struct ReferenceAnchor {
    strain: f64,
    temperature: f64,
    load_core: f64,
    load_shell: f64,
}

// Composite stress-strain behavior of the whole cable for one condition
// and temperature. Strain is in percent throughout; component curves shift
// with temperature through their thermal expansion coefficients.
struct CableElongationModel<'a> {
    cable: &'a Cable,
    condition: CableCondition,
    temperature: f64,
    anchor: Option<&'a ReferenceAnchor>,
}

impl<'a> CableElongationModel<'a> {
    fn new(
        cable: &'a Cable,
        condition: CableCondition,
        temperature: f64,
        anchor: Option<&'a ReferenceAnchor>,
    ) -> Self {
        Self {
            cable,
            condition,
            temperature,
            anchor,
        }
    }

    fn polynomial_type(&self) -> PolynomialType {
        match self.condition {
            CableCondition::Creep => PolynomialType::Creep,
            _ => PolynomialType::LoadStrain,
        }
    }

    fn load_component(
        &self,
        component: &CableComponent,
        anchor_load: impl Fn(&ReferenceAnchor) -> f64,
        strain: f64,
    ) -> f64 {
        match (self.condition, self.anchor) {
            (CableCondition::Load, Some(anchor)) => {
                // Final elastic line from the reference loading point
                let shift = component.coefficient_expansion_thermal
                    * (self.temperature - anchor.temperature)
                    * 100.0;
                anchor_load(anchor)
                    + component.modulus_tension_elastic * (strain - anchor.strain - shift)
            }
            _ => {
                let shift = component.coefficient_expansion_thermal
                    * (self.temperature - self.cable.temperature_components)
                    * 100.0;
                component.load_at_strain(strain - shift, self.polynomial_type())
            }
        }
    }

    fn load_core(&self, strain: f64) -> f64 {
        self.load_component(&self.cable.component_core, |a| a.load_core, strain)
    }

    fn load_shell(&self, strain: f64) -> f64 {
        self.load_component(&self.cable.component_shell, |a| a.load_shell, strain)
    }

    fn load_total(&self, strain: f64) -> f64 {
        self.load_core(strain) + self.load_shell(strain)
    }

    /// Strain (percent) at which the cable carries `load`, by bisection of
    /// the monotone composite curve
    fn strain_at_load(&self, load: f64) -> f64 {
        let mut low = STRAIN_SEARCH_MIN;
        let mut high = STRAIN_SEARCH_MAX;
        for _ in 0..2 * ITERATIONS_MAX {
            let mid = 0.5 * (low + high);
            if self.load_total(mid) < load {
                low = mid;
            } else {
                high = mid;
            }
        }
        0.5 * (low + high)
    }
}

/// Sag-tension analysis driver for one line cable.
///
/// All collaborating data is passed in explicitly; the solver holds no
/// global state and keeps nothing between calls.
#[derive(Debug)]
pub struct SagTensionSolver<'a> {
    cable: &'a Cable,
    constraint: &'a CableConstraint,
    weathercase_constraint: &'a WeatherLoadCase,
    spacing_attachments: Vector3d,
}

impl<'a> SagTensionSolver<'a> {
    pub fn new(
        cable: &'a Cable,
        constraint: &'a CableConstraint,
        weathercase_constraint: &'a WeatherLoadCase,
        spacing_attachments: Vector3d,
    ) -> Self {
        Self {
            cable,
            constraint,
            weathercase_constraint,
            spacing_attachments,
        }
    }

    /// Solve horizontal tension and component split for one target
    /// weathercase and condition
    pub fn solve(
        &self,
        weathercase: &WeatherLoadCase,
        condition: CableCondition,
    ) -> Result<SagTensionAnalysisResult, SolverError> {
        let weight_constraint =
            UnitLoadAnalysis::new(self.cable, self.weathercase_constraint).unit_load();
        let weight_target = UnitLoadAnalysis::new(self.cable, weathercase).unit_load();

        // Reference state: tension satisfying the design constraint
        let tension_constraint = self.solve_constraint_tension(&weight_constraint)?;
        let catenary_constraint = Catenary3d::new(
            tension_constraint,
            weight_constraint,
            self.spacing_attachments,
        );
        catenary_constraint.validate()?;

        // Unloaded length from the reference strain. A Load-condition
        // constraint anchors on the initial curve (no prior state exists).
        let condition_anchor = match self.constraint.condition {
            CableCondition::Load => CableCondition::Initial,
            other => other,
        };
        let model_reference = CableElongationModel::new(
            self.cable,
            condition_anchor,
            self.weathercase_constraint.temperature_cable,
            None,
        );
        let strain_reference = model_reference.strain_at_load(catenary_constraint.tension_average());
        let length_unloaded = catenary_constraint.length() / (1.0 + strain_reference / 100.0);

        let anchor = ReferenceAnchor {
            strain: strain_reference,
            temperature: self.weathercase_constraint.temperature_cable,
            load_core: model_reference.load_core(strain_reference),
            load_shell: model_reference.load_shell(strain_reference),
        };

        // Target state: catenary length equals elongated unloaded length
        let model_target = CableElongationModel::new(
            self.cable,
            condition,
            weathercase.temperature_cable,
            Some(&anchor),
        );
        let tension_horizontal =
            self.solve_target_tension(&weight_target, length_unloaded, &model_target)?;
        let catenary_target =
            Catenary3d::new(tension_horizontal, weight_target, self.spacing_attachments);

        // Split between components at the solution strain
        let strain_target = model_target.strain_at_load(catenary_target.tension_average());
        let load_core = model_target.load_core(strain_target);
        let load_shell = model_target.load_shell(strain_target);
        let load_total = load_core + load_shell;
        let (fraction_core, fraction_shell) = if load_total > 0.0 {
            (load_core / load_total, load_shell / load_total)
        } else {
            (0.0, 0.0)
        };

        Ok(SagTensionAnalysisResult {
            weight_unit: weight_target,
            tension_horizontal,
            tension_horizontal_core: tension_horizontal * fraction_core,
            tension_horizontal_shell: tension_horizontal * fraction_shell,
            length_unloaded,
            weathercase: weathercase.description.clone(),
            condition,
        })
    }

    /// Solve every filter of a group, omitting combinations that fail to
    /// converge; omissions are logged and observable as index absences.
    pub fn solve_filter_group(
        &self,
        weathercases: &[WeatherLoadCase],
        group: &AnalysisFilterGroup,
    ) -> ResultIndex {
        let mut index = ResultIndex::new();
        for filter in &group.filters {
            if index.contains(&filter.weathercase, filter.condition) {
                continue;
            }
            let Some(weathercase) = weathercases
                .iter()
                .find(|case| case.description == filter.weathercase)
            else {
                log::warn!(
                    "weathercase '{}' is not in the data set; filter skipped",
                    filter.weathercase
                );
                continue;
            };
            match self.solve(weathercase, filter.condition) {
                Ok(result) => index.insert(result),
                Err(error) => log::warn!(
                    "no result for ({}, {}): {}",
                    weathercase.description,
                    filter.condition.as_str(),
                    error
                ),
            }
        }
        index
    }

    // Horizontal tension meeting the constraint under the constraint's
    // weathercase loading
    fn solve_constraint_tension(&self, weight: &Vector3d) -> Result<f64, SolverError> {
        let limit = self.constraint.limit;
        if !(limit > 0.0) {
            return Err(SolverError::InvalidConstraint(format!(
                "limit must be positive (got {limit})"
            )));
        }
        let weight_magnitude = weight.magnitude();
        let chord = self.spacing_attachments.magnitude();

        match self.constraint.limit_type {
            ConstraintLimitType::HorizontalTension => Ok(limit),
            ConstraintLimitType::CatenaryConstant => Ok(limit * weight_magnitude),
            ConstraintLimitType::Sag => self.bisect_decreasing(
                |h| Catenary3d::new(h, *weight, self.spacing_attachments).sag() - limit,
                weight_magnitude * chord / 1000.0,
            ),
            ConstraintLimitType::Length => self.bisect_decreasing(
                |h| Catenary3d::new(h, *weight, self.spacing_attachments).length() - limit,
                weight_magnitude * chord / 1000.0,
            ),
            ConstraintLimitType::SupportTension => self.solve_support_tension(weight, limit),
        }
    }

    // Support tension grows without bound on both the slack and the taut
    // side; pick the taut branch by searching downward from the limit
    fn solve_support_tension(&self, weight: &Vector3d, limit: f64) -> Result<f64, SolverError> {
        let tension_max =
            |h: f64| Catenary3d::new(h, *weight, self.spacing_attachments).tension_max();

        // tension_max(h) >= h, so the taut root lies at or below the limit
        let mut high = limit;
        let mut low = limit;
        let mut bracketed = false;
        for _ in 0..ITERATIONS_MAX {
            low /= 2.0;
            if tension_max(low) < limit {
                bracketed = true;
                break;
            }
            high = low;
        }
        if !bracketed {
            return Err(SolverError::Convergence(ITERATIONS_MAX));
        }
        for _ in 0..ITERATIONS_MAX {
            let mid = 0.5 * (low + high);
            if tension_max(mid) < limit {
                low = mid;
            } else {
                high = mid;
            }
            if (high - low) <= TOLERANCE_RELATIVE * high {
                return Ok(0.5 * (low + high));
            }
        }
        Err(SolverError::Convergence(ITERATIONS_MAX))
    }

    // Root of a function that decreases monotonically with tension.
    // `low` must start on the positive side (slack cable).
    fn bisect_decreasing(
        &self,
        f: impl Fn(f64) -> f64,
        low_start: f64,
    ) -> Result<f64, SolverError> {
        let mut low = low_start;
        if !(f(low) > 0.0) {
            return Err(SolverError::Convergence(0));
        }

        // Expand upward until the function goes negative
        let mut high = low_start.max(1.0);
        let mut bracketed = false;
        for _ in 0..ITERATIONS_MAX {
            high *= 2.0;
            if f(high) < 0.0 {
                bracketed = true;
                break;
            }
        }
        if !bracketed {
            return Err(SolverError::Convergence(ITERATIONS_MAX));
        }

        for _ in 0..ITERATIONS_MAX {
            let mid = 0.5 * (low + high);
            if f(mid) > 0.0 {
                low = mid;
            } else {
                high = mid;
            }
            if (high - low) <= TOLERANCE_RELATIVE * high {
                return Ok(0.5 * (low + high));
            }
        }
        Err(SolverError::Convergence(ITERATIONS_MAX))
    }

    // Tension whose catenary length equals the unloaded length elongated by
    // the condition's strain at that tension's average loading
    fn solve_target_tension(
        &self,
        weight: &Vector3d,
        length_unloaded: f64,
        model: &CableElongationModel,
    ) -> Result<f64, SolverError> {
        let weight_magnitude = weight.magnitude();
        let chord = self.spacing_attachments.magnitude();
        self.bisect_decreasing(
            |h| {
                let catenary = Catenary3d::new(h, *weight, self.spacing_attachments);
                let strain = model.strain_at_load(catenary.tension_average());
                catenary.length() - length_unloaded * (1.0 + strain / 100.0)
            },
            weight_magnitude * chord / 1000.0,
        )
    }
}
