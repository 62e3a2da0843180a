pub mod config;
pub mod error;
pub mod types;

pub use config::{load_camera_config, parse_camera_config, CameraConfig};
pub use error::{Result, SummaryError};
pub use types::{FrameContext, MatchState, ParticipantId, ParticipantTransform, TeamIndex};
