/// Vector aliases and 3x3 rotation matrices with Euler angle conversions
use nalgebra::{Matrix3, Vector2, Vector3};
use std::ops::Mul;

/// Real-valued 3D vector (positions, offsets, angles)
pub type Vec3 = Vector3<f64>;

/// Integer 3D vector (box extents in voxel units)
pub type Vec3i = Vector3<i32>;

/// Integer 2D vector (texture offsets and sizes)
pub type Vec2i = Vector2<i32>;

/// Component-wise helpers nalgebra does not provide for `Vec3`
pub trait VecExt {
    /// Component-wise remainder, with the sign of the dividend (like `%`)
    fn modulo(&self, divisor: &Self) -> Self;

    /// True if every component differs by strictly less than `epsilon`
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

impl VecExt for Vec3 {
    fn modulo(&self, divisor: &Self) -> Self {
        self.zip_map(divisor, |a, b| a % b)
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

/// A 3x3 rotation matrix.
///
/// Single-axis rotations are counter-clockwise following the right-hand rule.
/// Composite constructors multiply the single-axis matrices left to right in
/// the order named, so `from_euler_yxz` is `RotY * RotX * RotZ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(Matrix3<f64>);

impl RotationMatrix {
    /// Build a matrix from its nine components in row-major order
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        m00: f64, m01: f64, m02: f64,
        m10: f64, m11: f64, m12: f64,
        m20: f64, m21: f64, m22: f64,
    ) -> Self {
        Self(Matrix3::new(m00, m01, m02, m10, m11, m12, m20, m21, m22))
    }

    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Reflection that negates the Z axis, `diag(1, 1, -1)`
    pub fn flip_z() -> Self {
        Self(Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0)))
    }

    /// Rotation of `angle` radians around the X axis
    pub fn from_rot_x(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            1.0, 0.0, 0.0,
            0.0, cos, -sin,
            0.0, sin, cos,
        )
    }

    /// Rotation of `angle` radians around the Y axis
    pub fn from_rot_y(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            cos, 0.0, sin,
            0.0, 1.0, 0.0,
            -sin, 0.0, cos,
        )
    }

    /// Rotation of `angle` radians around the Z axis
    pub fn from_rot_z(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            cos, -sin, 0.0,
            sin, cos, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// `RotX * RotY * RotZ` from angles (radians) stored as `(x, y, z)`
    pub fn from_euler_xyz(angles: &Vec3) -> Self {
        Self::from_rot_x(angles.x) * Self::from_rot_y(angles.y) * Self::from_rot_z(angles.z)
    }

    /// `RotZ * RotX * RotY`
    pub fn from_euler_zxy(angles: &Vec3) -> Self {
        Self::from_rot_z(angles.z) * Self::from_rot_x(angles.x) * Self::from_rot_y(angles.y)
    }

    /// `RotY * RotX * RotZ`
    pub fn from_euler_yxz(angles: &Vec3) -> Self {
        Self::from_rot_y(angles.y) * Self::from_rot_x(angles.x) * Self::from_rot_z(angles.z)
    }

    /// `RotZ * RotY * RotX`
    pub fn from_euler_zyx(angles: &Vec3) -> Self {
        Self::from_rot_z(angles.z) * Self::from_rot_y(angles.y) * Self::from_rot_x(angles.x)
    }

    /// Component at row `i`, column `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.0[(i, j)]
    }

    /// Extract `(x, y, z)` such that `from_euler_xyz` rebuilds this matrix
    pub fn euler_xyz(&self) -> Vec3 {
        let x = self.get(1, 2).atan2(self.get(2, 2));
        let cos_y = self.get(0, 0).hypot(self.get(0, 1));
        let y = (-self.get(0, 2)).atan2(cos_y);
        let (sin_x, cos_x) = x.sin_cos();
        let z = (sin_x * self.get(2, 0) - cos_x * self.get(1, 0))
            .atan2(cos_x * self.get(1, 1) - sin_x * self.get(2, 1));
        Vec3::new(-x, -y, -z)
    }

    /// Extract XYZ angles with Z negated: `from_euler_xyz(x, y, -z)` rebuilds
    /// this matrix.
    pub fn euler_xy_neg_z(&self) -> Vec3 {
        let x = (-self.get(1, 2)).atan2(self.get(2, 2));
        let cos_y = self.get(0, 0).hypot(self.get(0, 1));
        let y = self.get(0, 2).atan2(cos_y);
        let (sin_x, cos_x) = x.sin_cos();
        let z = (-cos_x * self.get(1, 0) - sin_x * self.get(2, 0))
            .atan2(cos_x * self.get(1, 1) + sin_x * self.get(2, 1));
        Vec3::new(x, y, z)
    }

    /// Extract ZYX angles with Z negated: `from_euler_zyx(x, y, -z)` rebuilds
    /// this matrix.
    pub fn euler_neg_z_y_x(&self) -> Vec3 {
        let z = (-self.get(1, 0)).atan2(self.get(0, 0));
        let cos_y = self.get(2, 1).hypot(self.get(2, 2));
        let y = (-self.get(2, 0)).atan2(cos_y);
        let (sin_z, cos_z) = z.sin_cos();
        let x = (-sin_z * self.get(0, 2) - cos_z * self.get(1, 2))
            .atan2(sin_z * self.get(0, 1) + cos_z * self.get(1, 1));
        Vec3::new(x, y, z)
    }

    /// True if no component differs by more than `epsilon`
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for RotationMatrix {
    type Output = RotationMatrix;

    fn mul(self, rhs: RotationMatrix) -> RotationMatrix {
        RotationMatrix(self.0 * rhs.0)
    }
}

impl Mul<Vec3> for RotationMatrix {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.0 * rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, TAU};

    const EPSILON: f64 = 1e-10;

    fn random_angles(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.gen::<f64>() * TAU,
            rng.gen::<f64>() * TAU,
            rng.gen::<f64>() * TAU,
        )
    }

    #[test]
    fn test_vec_modulo_keeps_dividend_sign() {
        let v = Vec3::new(725.0, -370.0, 360.0).modulo(&Vec3::repeat(360.0));
        assert!(v.approx_eq(&Vec3::new(5.0, -10.0, 0.0), EPSILON));
    }

    #[test]
    fn test_vec_approx_eq_is_strict() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert!(a.approx_eq(&Vec3::new(1.0, 2.0, 3.05), 0.1));
        assert!(!a.approx_eq(&Vec3::new(1.0, 2.0, 3.5), 0.5));
    }

    #[test]
    fn test_single_axis_rotations() {
        let p = Vec3::new(1.0, 0.0, 0.0);
        let rotated = RotationMatrix::from_rot_z(FRAC_PI_2) * p;
        assert!(rotated.approx_eq(&Vec3::new(0.0, 1.0, 0.0), EPSILON));

        let p = Vec3::new(0.0, 1.0, 0.0);
        let rotated = RotationMatrix::from_rot_x(FRAC_PI_2) * p;
        assert!(rotated.approx_eq(&Vec3::new(0.0, 0.0, 1.0), EPSILON));

        let p = Vec3::new(0.0, 0.0, 1.0);
        let rotated = RotationMatrix::from_rot_y(FRAC_PI_2) * p;
        assert!(rotated.approx_eq(&Vec3::new(1.0, 0.0, 0.0), EPSILON));
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = RotationMatrix::from_euler_yxz(&Vec3::zeros());
        assert!(matrix.approx_eq(&RotationMatrix::identity(), EPSILON));
    }

    #[test]
    fn test_composite_order() {
        let angles = Vec3::new(0.3, 0.5, 0.7);
        let expected = RotationMatrix::from_rot_y(0.5)
            * RotationMatrix::from_rot_x(0.3)
            * RotationMatrix::from_rot_z(0.7);
        assert_eq!(RotationMatrix::from_euler_yxz(&angles), expected);
        // Rotations do not commute
        assert!(!RotationMatrix::from_euler_xyz(&angles).approx_eq(&expected, 1e-3));
    }

    #[test]
    fn test_product_is_associative() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let a = RotationMatrix::from_euler_xyz(&random_angles(&mut rng));
            let b = RotationMatrix::from_euler_zxy(&random_angles(&mut rng));
            let c = RotationMatrix::from_euler_zyx(&random_angles(&mut rng));
            assert!(((a * b) * c).approx_eq(&(a * (b * c)), EPSILON));
        }
    }

    #[test]
    fn test_yxz_to_xyz_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let transform_yxz = RotationMatrix::from_euler_yxz(&random_angles(&mut rng));
            let angles_xyz = transform_yxz.euler_xyz();
            let transform_xyz = RotationMatrix::from_euler_xyz(&angles_xyz);
            assert!(transform_yxz.approx_eq(&transform_xyz, EPSILON));
        }
    }

    #[test]
    fn test_zxy_to_xy_neg_z_round_trip() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let v = Vec3::new(rng.gen(), rng.gen(), rng.gen());
            let transform_zxy = RotationMatrix::from_euler_zxy(&random_angles(&mut rng));
            let angles = transform_zxy.euler_xy_neg_z();
            let transform_xyz = RotationMatrix::from_euler_xyz(&Vec3::new(angles.x, angles.y, -angles.z));

            assert!(transform_zxy.approx_eq(&transform_xyz, EPSILON));
            assert!((transform_zxy * v).approx_eq(&(transform_xyz * v), EPSILON));
        }
    }

    #[test]
    fn test_yxz_to_neg_z_y_x_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let transform_yxz = RotationMatrix::from_euler_yxz(&random_angles(&mut rng));
            let angles = transform_yxz.euler_neg_z_y_x();
            let transform_zyx = RotationMatrix::from_euler_zyx(&Vec3::new(angles.x, angles.y, -angles.z));
            assert!(transform_yxz.approx_eq(&transform_zyx, EPSILON));
        }
    }

    #[test]
    fn test_yxz_to_neg_z_y_x_fixed_angles() {
        let angles_yxz = Vec3::new(35.0, 15.0, 75.0).map(f64::to_radians);
        let transform_yxz = RotationMatrix::from_euler_yxz(&angles_yxz);
        let angles = transform_yxz.euler_neg_z_y_x();
        let transform_zyx = RotationMatrix::from_euler_zyx(&Vec3::new(angles.x, angles.y, -angles.z));
        assert!(transform_yxz.approx_eq(&transform_zyx, EPSILON));
    }

    #[test]
    fn test_flip_z() {
        let p = RotationMatrix::flip_z() * Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(p, Vec3::new(1.0, 2.0, -3.0));
        assert_eq!(RotationMatrix::flip_z().get(2, 2), -1.0);
    }
}
