use crate::viewer::ROTATION_LIMIT_DEG;
use bevy::math::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// Three rotation angles in degrees, one per axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationVector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, degrees: f32) {
        match axis {
            Axis::X => self.x = degrees,
            Axis::Y => self.y = degrees,
            Axis::Z => self.z = degrees,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn to_radians(self) -> Vec3 {
        Vec3::new(self.x.to_radians(), self.y.to_radians(), self.z.to_radians())
    }

    pub fn from_radians(radians: Vec3) -> Self {
        Self::new(
            radians.x.to_degrees(),
            radians.y.to_degrees(),
            radians.z.to_degrees(),
        )
    }
}

pub fn clamp_degrees(degrees: f32) -> f32 {
    if degrees.is_nan() {
        return 0.0;
    }
    degrees.clamp(-ROTATION_LIMIT_DEG, ROTATION_LIMIT_DEG)
}

/// Orientation of the whole model: an absolute XYZ Euler rotation.
pub fn model_rotation(request: RotationVector) -> Quat {
    let radians = request.to_radians();
    Quat::from_euler(EulerRot::XYZ, radians.x, radians.y, radians.z)
}

/// Panel orientation as `original + request`, per axis. Repeating a request
/// yields the same orientation; a new request replaces the previous one.
pub fn compose_panel_rotation(original: Vec3, request: RotationVector) -> Quat {
    let angles = original + request.to_radians();
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

/// Reads an orientation back as XYZ Euler angles in radians.
pub fn euler_angles(rotation: Quat) -> Vec3 {
    let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(45.0, 45.0)]
    #[case(-180.0, -180.0)]
    #[case(181.0, 180.0)]
    #[case(-720.0, -180.0)]
    #[case(f32::NAN, 0.0)]
    fn clamp_degrees_keeps_slider_range(#[case] input: f32, #[case] expected: f32) {
        assert_eq!(clamp_degrees(input), expected);
    }

    #[test]
    fn axis_accessors_touch_only_their_component() {
        let mut vector = RotationVector::ZERO;
        vector.set(Axis::Y, 12.0);
        assert_eq!(vector, RotationVector::new(0.0, 12.0, 0.0));
        assert_eq!(vector.get(Axis::Y), 12.0);
        assert_eq!(vector.get(Axis::X), 0.0);
        assert!(!vector.is_identity());
        assert!(RotationVector::ZERO.is_identity());
    }

    #[test]
    fn composed_panel_rotation_adds_to_original_x() {
        let original = Vec3::new(0.3, -0.2, 0.1);
        let rotation = compose_panel_rotation(original, RotationVector::new(45.0, 0.0, 0.0));
        let angles = euler_angles(rotation);

        assert_relative_eq!(angles.x, 0.3 + 45f32.to_radians(), epsilon = 1e-4);
        assert_relative_eq!(angles.y, -0.2, epsilon = 1e-4);
        assert_relative_eq!(angles.z, 0.1, epsilon = 1e-4);
    }

    #[test]
    fn composing_twice_does_not_accumulate() {
        let original = Vec3::new(0.1, 0.2, 0.3);
        let request = RotationVector::new(10.0, 20.0, 30.0);
        let first = compose_panel_rotation(original, request);
        let second = compose_panel_rotation(original, request);
        assert!(first.abs_diff_eq(second, 1e-6));
    }

    #[test]
    fn identity_request_leaves_original_orientation() {
        let original = Vec3::new(0.4, 0.0, -0.6);
        let rotation = compose_panel_rotation(original, RotationVector::ZERO);
        let expected = Quat::from_euler(EulerRot::XYZ, 0.4, 0.0, -0.6);
        assert!(rotation.abs_diff_eq(expected, 1e-6));
    }

    proptest! {
        #[test]
        fn degrees_survive_radian_round_trip(
            x in -180.0f32..=180.0,
            y in -180.0f32..=180.0,
            z in -180.0f32..=180.0,
        ) {
            let vector = RotationVector::new(x, y, z);
            let back = RotationVector::from_radians(vector.to_radians());
            prop_assert!((back.x - x).abs() < 1e-3);
            prop_assert!((back.y - y).abs() < 1e-3);
            prop_assert!((back.z - z).abs() < 1e-3);
        }
    }
}
