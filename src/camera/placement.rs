//! Placement geometry for the summary scene
//!
//! Pure functions: team anchors, lineup slots and the camera framing for
//! each shot variant. Nothing here holds state.

use glam::{Quat, Vec3};

use crate::camera::transform::{rotation_from_yaw_pitch, CameraTransform};
use crate::core::config::CameraConfig;
use crate::core::types::ParticipantTransform;

/// Origin and facing a team's lineup is arranged around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamAnchor {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

impl TeamAnchor {
    pub fn rotation(&self) -> Quat {
        rotation_from_yaw_pitch(self.yaw_degrees, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Convert a lineup offset in anchor space into world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation() * local
    }
}

/// Start/end pair for team shots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamFraming {
    pub start: CameraTransform,
    pub end: CameraTransform,
}

/// Anchor for `team` out of `team_count`, pushed back by the team's width.
///
/// A single team stands at the origin facing +X (toward the composite
/// camera). Multiple teams fan out symmetrically between `+team_angle` and
/// `-team_angle`, each turned to face the centre line.
pub fn team_anchor(
    config: &CameraConfig,
    team: usize,
    team_count: usize,
    team_size: usize,
) -> TeamAnchor {
    if team_count <= 1 {
        return TeamAnchor {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
        };
    }

    let t = team.min(team_count - 1) as f32 / (team_count - 1) as f32;
    let angle = config.team_angle * (1.0 - 2.0 * t);
    let half_width = team_size.saturating_sub(1) as f32 * config.player_spacing * 0.5;
    let distance = half_width + config.team_anchor_distance;

    let (sin, cos) = angle.to_radians().sin_cos();
    let position = Vec3::new(cos, sin, 0.0) * distance;

    let yaw_degrees = if angle > 0.0 {
        angle - 90.0
    } else if angle < 0.0 {
        angle + 90.0
    } else {
        0.0
    };

    TeamAnchor {
        position,
        yaw_degrees,
    }
}

/// Lineup offset (anchor space) for the `index`-th member of a team.
///
/// Rows of `row_size` fill centre-out, alternating sides; later rows step
/// back, spread wider and stand slightly higher so they stay visible.
pub fn formation_slot(config: &CameraConfig, index: usize) -> Vec3 {
    let row_size = config.row_size.max(1);
    let row_index = index % row_size;
    let row = (index / row_size) as f32;

    let (slot, side) = if row_index % 2 == 0 {
        ((row_index / 2) as f32, 1.0)
    } else {
        (-(((row_index + 1) / 2) as f32), -1.0)
    };

    let x = 0.25 * (row_size - row_index) as f32 * config.player_alt_offset
        - 1.6 * config.player_alt_offset * row;
    let y = (slot + 0.8 * row * side) * config.player_spacing;
    let z = 10.0 * row;

    Vec3::new(x, y, z)
}

/// Width of a lineup: first-to-last member distance, or the nominal width
/// when fewer than two positions are known.
pub fn cluster_width(config: &CameraConfig, positions: &[Vec3], team_size: usize) -> f32 {
    match (positions.first(), positions.last()) {
        (Some(first), Some(last)) if positions.len() > 1 => first.distance(*last),
        _ => team_size.saturating_sub(1) as f32 * config.player_spacing,
    }
}

/// Scripted dolly for a team: `start` sits behind `end` along the look
/// direction so blending start → end pushes in on the lineup.
pub fn team_dolly(config: &CameraConfig, anchor: &TeamAnchor, team_size: usize) -> TeamFraming {
    let height = if team_size > config.large_team_threshold {
        config.large_team_camera_height
    } else {
        0.0
    };

    let location =
        anchor.position + anchor.forward() * config.team_camera_offset + Vec3::Z * height;
    let look = anchor.position + Vec3::Z * config.team_look_height - location;
    let end = CameraTransform::looking_along(location, look);
    let start = CameraTransform::new(
        location - look.normalize_or_zero() * config.team_dolly_back,
        end.rotation,
    );

    TeamFraming { start, end }
}

/// Lateral pan across a team: both endpoints share the dolly's final
/// orientation and sit half the cluster width either side of it.
pub fn team_pan(
    config: &CameraConfig,
    anchor: &TeamAnchor,
    team_size: usize,
    width: f32,
) -> TeamFraming {
    let centre = team_dolly(config, anchor, team_size).end;
    let lateral = Vec3::new(centre.lateral().x, centre.lateral().y, 0.0).normalize_or_zero();
    let half = width.max(0.0) * 0.5;

    TeamFraming {
        start: CameraTransform::new(centre.position + lateral * half, centre.rotation),
        end: CameraTransform::new(centre.position - lateral * half, centre.rotation),
    }
}

/// Close-up of one participant: in front of them, slightly off to their
/// right, looking back at them.
///
/// Returns `(target, start)`; the camera starts `character_pull_in` closer
/// and settles back out to `target`.
pub fn character_framing(
    config: &CameraConfig,
    subject: &ParticipantTransform,
) -> (CameraTransform, CameraTransform) {
    let facing = CameraTransform::from_yaw_pitch(subject.position, subject.yaw_degrees, 0.0);
    let location = subject.position
        + facing.forward() * config.character_distance
        - facing.lateral() * config.character_lateral
        + Vec3::Z * config.character_height;

    let target = CameraTransform::from_yaw_pitch(location, subject.yaw_degrees + 180.0, 0.0);
    let start = CameraTransform::new(
        location + target.forward() * config.character_pull_in,
        target.rotation,
    );
    (target, start)
}

/// Standoff distance for the composite shot.
///
/// Grows with the largest team so the whole formation fits the field of
/// view. Non-decreasing in `largest_team_size`.
pub fn composite_distance(
    config: &CameraConfig,
    largest_team_size: usize,
    team_count: usize,
) -> f32 {
    let count = largest_team_size.max(1) as f32 + 1.0;
    let spacing = config.player_spacing;
    let tan_half_fov = config.half_fov_radians().tan();

    if team_count < 2 {
        // Single lineup stands across the view instead of angled
        return config.composite_base_offset + count * spacing / tan_half_fov;
    }

    let (sin, cos) = config.team_angle.to_radians().sin_cos();
    let base = config.composite_base_offset + 0.5 * count * spacing * sin;
    let width = 2.0 * config.min_team_spacing + 0.5 * count * spacing * cos;
    base + width / tan_half_fov
}

/// Composite camera: on +X looking back at the origin with a small downward pitch.
pub fn composite_framing(
    config: &CameraConfig,
    largest_team_size: usize,
    team_count: usize,
) -> CameraTransform {
    let distance = composite_distance(config, largest_team_size, team_count);
    let pitch = config.composite_pitch;
    let height = -distance * pitch.to_radians().sin();
    CameraTransform::from_yaw_pitch(Vec3::new(distance, 0.0, height), 180.0, pitch)
}
