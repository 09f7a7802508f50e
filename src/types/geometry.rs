use nalgebra as na;

/// 2D point, internal coordinates (feet)
pub type Point2d = na::Point2<f64>;

/// 3D point, internal coordinates (feet)
pub type Point3d = na::Point3<f64>;

/// 3D vector with magnitude/arithmetic from nalgebra
pub type Vector3d = na::Vector3<f64>;

/// Create a Vector3d from components
#[inline]
pub fn vector_3d(x: f64, y: f64, z: f64) -> Vector3d {
    na::Vector3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude() {
        let v = vector_3d(3.0, 4.0, 0.0);
        assert_relative_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_per_axis_set() {
        let mut v = vector_3d(1.0, -2.0, 3.0);
        v.y = 5.0;
        assert_relative_eq!((v + vector_3d(1.0, 0.0, 0.0)).x, 2.0);
        assert_relative_eq!(v.y, 5.0);
    }
}
