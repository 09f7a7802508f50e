//! 3D catenary geometry.
//!
//! A catenary is fully determined by horizontal tension, unit weight vector,
//! and endpoint spacing. Every query is a pure function of those three
//! inputs, recomputed on demand.
//!
//! Axis convention: x along the line, y transverse horizontal, z vertical
//! (up positive for spacing). The unit weight vector carries its vertical
//! component positive DOWNWARD (gravity plus ice) and its transverse
//! component along +y (wind); the x component is always zero.
//!
//! Degenerate inputs (non-positive tension, zero weight) produce NaN/Inf
//! results rather than errors; callers validate before constructing.

use crate::types::{Point3d, Vector3d};

/// Which support of the span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanEnd {
    /// End 0, the back-on-line support
    Back,
    /// End 1, the ahead-on-line support
    Ahead,
}

/// Orientation of a tension/tangent vector along the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    /// Toward decreasing span fraction
    Negative,
    /// Toward increasing span fraction
    Positive,
}

#[derive(Debug, thiserror::Error)]
pub enum CatenaryError {
    #[error("Horizontal tension must be positive (got {0})")]
    NonPositiveTension(f64),
    #[error("Unit weight magnitude must be positive")]
    ZeroWeight,
    #[error("Endpoint spacing has no in-plane horizontal extent")]
    DegenerateSpacing,
}

/// The hanging-cable curve between two supports
#[derive(Debug, Clone, PartialEq)]
pub struct Catenary3d {
    /// Horizontal tension component, constant along the span (lbs)
    pub tension_horizontal: f64,
    /// Unit weight vector (lbs/ft), vertical component positive downward
    pub weight_unit: Vector3d,
    /// Endpoint spacing vector from end 0 to end 1 (ft), z up positive
    pub spacing_endpoints: Vector3d,
}

// In-plane frame of the swung load plane: the curve lies in the plane
// containing the chord and the load direction.
struct PlaneFrame {
    /// In-plane horizontal unit vector (3D)
    unit_horizontal: Vector3d,
    /// In-plane "up" unit vector, opposing the load resultant (3D)
    unit_vertical: Vector3d,
    /// Horizontal chord extent in the plane
    a: f64,
    /// Vertical chord rise end 0 -> end 1 in the plane
    b: f64,
    /// Catenary parameter H / |w|
    c: f64,
    /// End positions relative to the curve vertex
    x_back: f64,
    x_ahead: f64,
}

impl Catenary3d {
    pub fn new(
        tension_horizontal: f64,
        weight_unit: Vector3d,
        spacing_endpoints: Vector3d,
    ) -> Self {
        Self {
            tension_horizontal,
            weight_unit,
            spacing_endpoints,
        }
    }

    /// Check the construction preconditions
    pub fn validate(&self) -> Result<(), CatenaryError> {
        if !(self.tension_horizontal > 0.0) {
            return Err(CatenaryError::NonPositiveTension(self.tension_horizontal));
        }
        if !(self.weight_unit.magnitude() > 0.0) {
            return Err(CatenaryError::ZeroWeight);
        }
        let frame = self.plane_frame();
        if !(frame.a > 0.0) {
            return Err(CatenaryError::DegenerateSpacing);
        }
        Ok(())
    }

    fn plane_frame(&self) -> PlaneFrame {
        let w = &self.weight_unit;
        let spacing = &self.spacing_endpoints;
        let weight = w.magnitude();
        let c = self.tension_horizontal / weight;

        // In-plane up opposes the resultant load
        let unit_vertical = Vector3d::new(0.0, -w.y / weight, w.z / weight);
        let b = spacing.dot(&unit_vertical);
        let chord = spacing.magnitude();
        let a = (chord * chord - b * b).sqrt();
        let unit_horizontal = (spacing - b * unit_vertical) / a;

        // Position the vertex: cosh(x1/c) - cosh(x0/c) must equal b/c
        let half = a / (2.0 * c);
        let mid = c * (b / (2.0 * c * half.sinh())).asinh();
        PlaneFrame {
            unit_horizontal,
            unit_vertical,
            a,
            b,
            c,
            x_back: mid - a / 2.0,
            x_ahead: mid + a / 2.0,
        }
    }

    fn end_position(frame: &PlaneFrame, end: SpanEnd) -> f64 {
        match end {
            SpanEnd::Back => frame.x_back,
            SpanEnd::Ahead => frame.x_ahead,
        }
    }

    /// Catenary constant H / |w| (ft)
    pub fn constant(&self) -> f64 {
        self.tension_horizontal / self.weight_unit.magnitude()
    }

    /// Angle of the load-resultant plane from vertical (degrees)
    pub fn swing_angle(&self) -> f64 {
        self.weight_unit.y.atan2(self.weight_unit.z).to_degrees()
    }

    /// Arc length along the curve (ft)
    pub fn length(&self) -> f64 {
        let frame = self.plane_frame();
        frame.c * ((frame.x_ahead / frame.c).sinh() - (frame.x_back / frame.c).sinh())
    }

    /// Arc length in excess of the chord (ft)
    pub fn length_slack(&self) -> f64 {
        self.length() - self.spacing_endpoints.magnitude()
    }

    /// Largest in-plane droop of the curve below the chord (ft)
    pub fn sag(&self) -> f64 {
        let frame = self.plane_frame();
        // Deepest point is where the tangent parallels the chord
        let slope_chord = frame.b / frame.a;
        let x_tangent = frame.c * slope_chord.asinh();
        let y_back = frame.c * (frame.x_back / frame.c).cosh();
        let y_chord = y_back + slope_chord * (x_tangent - frame.x_back);
        let y_curve = frame.c * (x_tangent / frame.c).cosh();
        y_chord - y_curve
    }

    /// Tension vector at a support, oriented along the curve (lbs)
    pub fn tension(&self, end: SpanEnd, direction: AxisDirection) -> Vector3d {
        let frame = self.plane_frame();
        let x = Self::end_position(&frame, end);
        let horizontal = self.tension_horizontal;
        let vertical = horizontal * (x / frame.c).sinh();
        let tension = horizontal * frame.unit_horizontal + vertical * frame.unit_vertical;
        match direction {
            AxisDirection::Positive => tension,
            AxisDirection::Negative => -tension,
        }
    }

    /// Largest support tension magnitude (lbs)
    pub fn tension_max(&self) -> f64 {
        let frame = self.plane_frame();
        let x = frame.x_back.abs().max(frame.x_ahead.abs());
        self.tension_horizontal * (x / frame.c).cosh()
    }

    /// Arc-length-averaged tension magnitude (lbs).
    ///
    /// T(x) = H cosh(x/c) and ds = cosh(x/c) dx, so the average over the
    /// curve is H * integral(cosh^2) / integral(cosh), both in closed form.
    pub fn tension_average(&self) -> f64 {
        let frame = self.plane_frame();
        let c = frame.c;
        let cosh2_integral = |x: f64| x / 2.0 + (c / 4.0) * (2.0 * x / c).sinh();
        let cosh_integral = |x: f64| c * (x / c).sinh();
        let numerator = cosh2_integral(frame.x_ahead) - cosh2_integral(frame.x_back);
        let denominator = cosh_integral(frame.x_ahead) - cosh_integral(frame.x_back);
        self.tension_horizontal * numerator / denominator
    }

    /// Angle of the tangent line from vertical at a support (degrees)
    pub fn tangent_angle_vertical(&self, end: SpanEnd, direction: AxisDirection) -> f64 {
        let tension = self.tension(end, direction);
        let frame = self.plane_frame();
        let vertical = tension.dot(&frame.unit_vertical);
        let horizontal = tension.dot(&frame.unit_horizontal);
        horizontal.abs().atan2(vertical).to_degrees()
    }

    /// Position on the curve at an arc-length fraction from end 0,
    /// relative to end 0 (ft). `coordinate(0)` is the origin and
    /// `coordinate(1)` the spacing vector.
    pub fn coordinate(&self, fraction: f64) -> Point3d {
        let frame = self.plane_frame();
        let c = frame.c;
        let sinh_back = (frame.x_back / c).sinh();
        let length = c * ((frame.x_ahead / c).sinh() - sinh_back);
        let s = fraction * length;
        let x = c * (s / c + sinh_back).asinh();
        let dh = x - frame.x_back;
        let dv = c * ((x / c).cosh() - (frame.x_back / c).cosh());
        let position = dh * frame.unit_horizontal + dv * frame.unit_vertical;
        Point3d::from(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn level_span() -> Catenary3d {
        Catenary3d::new(
            1000.0,
            Vector3d::new(0.0, 0.0, 1.5),
            Vector3d::new(500.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_constant() {
        // H=1000 lbs, |w|=1.5 lbs/ft
        assert_relative_eq!(level_span().constant(), 666.67, epsilon = 0.01);
    }

    #[test]
    fn test_level_span_closed_forms() {
        let catenary = level_span();
        // Independently derived: sag = c(cosh(a/2c) - 1),
        // length = 2c sinh(a/2c) with c = 666.667, a = 500
        assert_relative_eq!(catenary.sag(), 47.4269, epsilon = 1e-3);
        assert_relative_eq!(catenary.length(), 511.8014, epsilon = 1e-3);
        assert_relative_eq!(catenary.length_slack(), 11.8014, epsilon = 1e-3);
        assert_relative_eq!(catenary.swing_angle(), 0.0);
    }

    #[test]
    fn test_length_exceeds_chord() {
        for spacing in [
            Vector3d::new(500.0, 0.0, 0.0),
            Vector3d::new(500.0, 0.0, 100.0),
            Vector3d::new(800.0, 25.0, -60.0),
        ] {
            let catenary = Catenary3d::new(2000.0, Vector3d::new(0.0, 0.4, 1.2), spacing);
            assert!(catenary.length() > spacing.magnitude());
        }
    }

    #[test]
    fn test_sag_decreases_with_tension() {
        let weight = Vector3d::new(0.0, 0.0, 1.5);
        let spacing = Vector3d::new(500.0, 0.0, 0.0);
        let mut previous = f64::MAX;
        for h in [500.0, 1000.0, 2000.0, 4000.0, 8000.0] {
            let sag = Catenary3d::new(h, weight, spacing).sag();
            assert!(sag < previous);
            previous = sag;
        }
    }

    #[test]
    fn test_support_tension_balances_cable_weight() {
        let catenary = level_span();
        // Level span: vertical support load on each end carries half the
        // cable weight
        let tension = catenary.tension(SpanEnd::Ahead, AxisDirection::Positive);
        let weight_half = 1.5 * catenary.length() / 2.0;
        assert_relative_eq!(tension.z, weight_half, epsilon = 1e-6);
        assert_relative_eq!(tension.x, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(tension.y, 0.0, epsilon = 1e-12);

        // Both ends carry the same magnitude on a level span
        let back = catenary.tension(SpanEnd::Back, AxisDirection::Negative);
        assert_relative_eq!(back.magnitude(), tension.magnitude(), epsilon = 1e-9);
        assert_relative_eq!(catenary.tension_max(), tension.magnitude(), epsilon = 1e-9);
    }

    #[test]
    fn test_average_tension_between_horizontal_and_max() {
        let catenary = level_span();
        let average = catenary.tension_average();
        assert!(average > catenary.tension_horizontal);
        assert!(average < catenary.tension_max());
    }

    #[test]
    fn test_swing_angle_under_wind() {
        let catenary = Catenary3d::new(
            1000.0,
            Vector3d::new(0.0, 1.5, 1.5),
            Vector3d::new(500.0, 0.0, 0.0),
        );
        assert_relative_eq!(catenary.swing_angle(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coordinate_endpoints() {
        let spacing = Vector3d::new(500.0, 0.0, 80.0);
        let catenary = Catenary3d::new(1500.0, Vector3d::new(0.0, 0.0, 1.5), spacing);

        let start = catenary.coordinate(0.0);
        assert_relative_eq!(start.coords.magnitude(), 0.0, epsilon = 1e-9);

        let end = catenary.coordinate(1.0);
        assert_relative_eq!(end.x, spacing.x, epsilon = 1e-6);
        assert_relative_eq!(end.y, spacing.y, epsilon = 1e-6);
        assert_relative_eq!(end.z, spacing.z, epsilon = 1e-6);
    }

    #[test]
    fn test_coordinate_midpoint_droops_by_sag() {
        let catenary = level_span();
        let mid = catenary.coordinate(0.5);
        assert_relative_eq!(mid.x, 250.0, epsilon = 1e-6);
        assert_relative_eq!(mid.z, -catenary.sag(), epsilon = 1e-6);
    }

    #[test]
    fn test_inclined_length_identity() {
        // length^2 = (2c sinh(a/2c))^2 + b^2 for any rise
        let spacing = Vector3d::new(500.0, 0.0, 100.0);
        let catenary = Catenary3d::new(2000.0, Vector3d::new(0.0, 0.0, 1.5), spacing);
        let c: f64 = 2000.0 / 1.5;
        let a = 500.0;
        let b = 100.0;
        let expected = ((2.0 * c * (a / (2.0 * c)).sinh()).powi(2) + b * b).sqrt();
        assert_relative_eq!(catenary.length(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_tangent_angle() {
        let catenary = level_span();
        // Level span, ahead end, pointing ahead: tangent rises at
        // atan(sinh(a/2c)) from horizontal
        let angle = catenary.tangent_angle_vertical(SpanEnd::Ahead, AxisDirection::Positive);
        let slope = (250.0f64 / 666.666667).sinh();
        assert_relative_eq!(angle, (1.0f64).atan2(slope).to_degrees(), epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_inputs_are_nan_not_panic() {
        let zero_weight = Catenary3d::new(
            1000.0,
            Vector3d::new(0.0, 0.0, 0.0),
            Vector3d::new(500.0, 0.0, 0.0),
        );
        assert!(zero_weight.constant().is_infinite() || zero_weight.constant().is_nan());
        assert!(zero_weight.validate().is_err());

        let slack = Catenary3d::new(
            0.0,
            Vector3d::new(0.0, 0.0, 1.5),
            Vector3d::new(500.0, 0.0, 0.0),
        );
        assert!(slack.validate().is_err());
    }
}
