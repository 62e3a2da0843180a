//! Camera choreography - shots, shot lists and the geometry behind them
//!
//! A shot list plays one shot at a time. Each shot either follows a scripted
//! blend or settles the camera toward its target, and carries the capability
//! flags the overlay reads.

pub mod context;
pub mod flags;
pub mod placement;
pub mod shot;
pub mod shot_list;
pub mod transform;

pub use context::{ShotContext, ShownSubject, ViewState};
pub use flags::CapabilityFlags;
pub use placement::{
    character_framing, cluster_width, composite_distance, composite_framing, formation_slot,
    team_anchor, team_dolly, team_pan, TeamAnchor, TeamFraming,
};
pub use shot::{Interpolation, Shot, ShotKind};
pub use shot_list::ShotList;
pub use transform::{exp_factor, rotation_from_yaw_pitch, CameraTransform};
