use serde::{Deserialize, Serialize};

/// Which fitted curve of a component to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolynomialType {
    /// Initial load-strain curve
    LoadStrain,
    /// Long-term creep curve
    Creep,
}

/// One structural part of a cable (core or shell).
///
/// Load-strain behavior is a 5-term polynomial fitted against strain in
/// percent, valid up to the matching load limit; above the limit the curve
/// continues linearly along the tension elastic modulus-area. Below zero
/// strain the component follows its compression modulus-area. Moduli are in
/// lbs per percent strain, the thermal expansion coefficient in unit strain
/// per degree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableComponent {
    /// Linear thermal expansion coefficient (1/deg F)
    pub coefficient_expansion_thermal: f64,
    /// Tension elastic modulus-area (lbs per percent strain)
    pub modulus_tension_elastic: f64,
    /// Compression elastic modulus-area (lbs per percent strain)
    pub modulus_compression_elastic: f64,
    /// Load-strain polynomial a0..a4 (lbs, strain argument in percent).
    /// Always length 5; missing trailing terms are zero.
    pub coefficients_loadstrain: [f64; 5],
    /// Creep polynomial b0..b4 (lbs, strain argument in percent)
    pub coefficients_creep: [f64; 5],
    /// Load above which the load-strain polynomial no longer applies (lbs)
    pub load_limit_loadstrain: f64,
    /// Load above which the creep polynomial no longer applies (lbs)
    pub load_limit_creep: f64,
}

// Strain search window for polynomial inversion, percent
const STRAIN_MIN: f64 = -5.0;
const STRAIN_MAX: f64 = 20.0;
const INVERSION_ITERATIONS: usize = 200;

fn polynomial(coefficients: &[f64; 5], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}

impl CableComponent {
    fn coefficients(&self, polynomial_type: PolynomialType) -> &[f64; 5] {
        match polynomial_type {
            PolynomialType::LoadStrain => &self.coefficients_loadstrain,
            PolynomialType::Creep => &self.coefficients_creep,
        }
    }

    fn load_limit(&self, polynomial_type: PolynomialType) -> f64 {
        match polynomial_type {
            PolynomialType::LoadStrain => self.load_limit_loadstrain,
            PolynomialType::Creep => self.load_limit_creep,
        }
    }

    /// Load carried at a given strain (percent), at the component's
    /// polynomial reference temperature.
    ///
    /// Precondition: the fitted polynomial is monotonically increasing over
    /// its load-limit domain (true for physical stress-strain fits).
    pub fn load_at_strain(&self, strain: f64, polynomial_type: PolynomialType) -> f64 {
        if strain < 0.0 {
            return strain * self.modulus_compression_elastic;
        }

        let coefficients = self.coefficients(polynomial_type);
        let load = polynomial(coefficients, strain);
        let limit = self.load_limit(polynomial_type);
        if limit <= 0.0 || load <= limit {
            return load;
        }

        // Past the polynomial domain: continue along the tension modulus
        // from the strain where the fit reaches its limit
        match self.strain_at_polynomial_load(limit, polynomial_type) {
            Some(strain_limit) => limit + (strain - strain_limit) * self.modulus_tension_elastic,
            None => load,
        }
    }

    /// Strain (percent) at which the raw polynomial reaches `load`, found by
    /// bisection over the positive-strain domain. None when the polynomial
    /// never reaches the load inside the search window.
    fn strain_at_polynomial_load(&self, load: f64, polynomial_type: PolynomialType) -> Option<f64> {
        let coefficients = self.coefficients(polynomial_type);
        let mut low = 0.0;
        let mut high = STRAIN_MAX;
        if polynomial(coefficients, high) < load {
            return None;
        }
        for _ in 0..INVERSION_ITERATIONS {
            let mid = 0.5 * (low + high);
            if polynomial(coefficients, mid) < load {
                low = mid;
            } else {
                high = mid;
            }
        }
        Some(0.5 * (low + high))
    }

    /// Strain (percent) at which the component carries `load`, inverting
    /// `load_at_strain` by bisection.
    pub fn strain_at_load(&self, load: f64, polynomial_type: PolynomialType) -> f64 {
        let mut low = STRAIN_MIN;
        let mut high = STRAIN_MAX;
        for _ in 0..INVERSION_ITERATIONS {
            let mid = 0.5 * (low + high);
            if self.load_at_strain(mid, polynomial_type) < load {
                low = mid;
            } else {
                high = mid;
            }
        }
        0.5 * (low + high)
    }
}
