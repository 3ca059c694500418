/// Rotation conversion between CraftStudio and Bedrock entity conventions
use crate::math::{RotationMatrix, Vec3, VecExt};

const EPSILON: f64 = 1e-10;

/// Convert a CraftStudio rotation (degrees, YXZ order) into the equivalent
/// Bedrock bone rotation (degrees).
///
/// CraftStudio's Z axis points the other way, so the YXZ matrix is reflected
/// through `diag(1, 1, -1)` before the angles are read back out in ZYX order.
pub fn craftstudio_to_entity_rotation(xyz_degrees: &Vec3) -> Vec3 {
    let radians = xyz_degrees.map(f64::to_radians);
    let transform = RotationMatrix::flip_z() * RotationMatrix::from_euler_yxz(&radians);
    transform.euler_neg_z_y_x().map(f64::to_degrees)
}

/// True if every angle is a whole number of turns.
///
/// Angles are normalised into `[0, 360)` and compared against a small
/// tolerance above zero only; values just below a full turn are not zero.
pub fn is_zero_rotation(angles_deg: &Vec3) -> bool {
    let full_turn = Vec3::repeat(360.0);
    let normalized = (angles_deg.modulo(&full_turn) + full_turn).modulo(&full_turn);
    normalized.x < EPSILON && normalized.y < EPSILON && normalized.z < EPSILON
}
