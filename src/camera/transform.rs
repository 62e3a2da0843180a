//! Camera pose with blend and exponential settle.
//!
//! Conventions: Z is up, yaw rotates around Z starting from +X, positive pitch
//! looks up. Angles on the public surface are degrees.

use glam::{EulerRot, Quat, Vec3};

/// Remaining distance under which a settling position snaps onto its target
const POSITION_SNAP_EPSILON: f32 = 1.0e-4;

/// Remaining angle (radians) under which a settling rotation snaps
const ROTATION_SNAP_EPSILON: f32 = 1.0e-5;

/// Position + orientation of the summary camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CameraTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Build a transform from yaw and pitch in degrees.
    pub fn from_yaw_pitch(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        Self {
            position,
            rotation: rotation_from_yaw_pitch(yaw_degrees, pitch_degrees),
        }
    }

    /// Build a transform at `position` facing along `direction`.
    ///
    /// A zero direction keeps the identity orientation.
    pub fn looking_along(position: Vec3, direction: Vec3) -> Self {
        let Some(dir) = direction.try_normalize() else {
            return Self::new(position, Quat::IDENTITY);
        };
        let yaw = dir.y.atan2(dir.x).to_degrees();
        let pitch = dir.z.atan2(dir.truncate().length()).to_degrees();
        Self::from_yaw_pitch(position, yaw, pitch)
    }

    /// Unit vector the camera looks along
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Unit vector to the camera's left (the rotated +Y axis)
    pub fn lateral(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Heading of the forward vector in degrees, in (-180, 180]
    pub fn yaw_degrees(&self) -> f32 {
        let f = self.forward();
        f.y.atan2(f.x).to_degrees()
    }

    /// Elevation of the forward vector in degrees
    pub fn pitch_degrees(&self) -> f32 {
        let f = self.forward();
        f.z.atan2(f.truncate().length()).to_degrees()
    }

    /// Linear blend: position lerp, rotation slerp. `alpha` is clamped to [0, 1].
    pub fn blend(a: &Self, b: &Self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self {
            position: a.position.lerp(b.position, alpha),
            rotation: a.rotation.slerp(b.rotation, alpha).normalize(),
        }
    }

    /// Ease toward `target` by one frame of exponential settle.
    ///
    /// Position and orientation are settled independently with their own
    /// rates. The step is frame-rate independent and never overshoots.
    pub fn settle_toward(
        &self,
        target: &Self,
        position_rate: f32,
        orientation_rate: f32,
        delta_seconds: f32,
    ) -> Self {
        let remaining = self.position.distance(target.position);
        let position = if remaining <= POSITION_SNAP_EPSILON {
            target.position
        } else {
            let next = self
                .position
                .lerp(target.position, exp_factor(position_rate, delta_seconds));
            // Far from the origin a small step can round away to nothing
            if next.distance(target.position) >= remaining {
                target.position
            } else {
                next
            }
        };

        let remaining = self.rotation.angle_between(target.rotation);
        let rotation = if remaining <= ROTATION_SNAP_EPSILON {
            target.rotation
        } else {
            let next = self
                .rotation
                .slerp(target.rotation, exp_factor(orientation_rate, delta_seconds))
                .normalize();
            if next == self.rotation || next.angle_between(target.rotation) > remaining {
                target.rotation
            } else {
                next
            }
        };

        Self { position, rotation }
    }

    /// Euclidean distance between the two positions
    pub fn distance_to(&self, other: &Self) -> f32 {
        self.position.distance(other.position)
    }

    /// Angle in radians between the two orientations
    pub fn angle_to(&self, other: &Self) -> f32 {
        self.rotation.angle_between(other.rotation)
    }
}

/// Orientation for a yaw/pitch pair given in degrees.
pub fn rotation_from_yaw_pitch(yaw_degrees: f32, pitch_degrees: f32) -> Quat {
    Quat::from_euler(
        EulerRot::ZYX,
        yaw_degrees.to_radians(),
        -pitch_degrees.to_radians(),
        0.0,
    )
}

/// Fraction of the remaining distance covered in one frame.
///
/// `1 - e^(-rate * dt)`, in `[0, 1)` for finite input. A non-positive rate
/// means "snap".
#[inline]
pub fn exp_factor(rate: f32, delta_seconds: f32) -> f32 {
    if rate <= 0.0 {
        return 1.0;
    }
    1.0 - (-rate * delta_seconds.max(0.0)).exp()
}
