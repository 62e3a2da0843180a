//! Camera choreography configuration with documented constants
//!
//! All distances are world units (the same units the roster reports
//! participant positions in), angles are degrees and times are seconds.

use crate::core::error::{Result, SummaryError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning values for the summary camera
///
/// The defaults frame a five-a-side lineup at roughly human scale. Changing
/// the spacing values without the offsets will push teams out of frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    // === SMOOTHING ===
    /// Exponential settle rate for camera position (per second)
    ///
    /// At 5.0 the camera covers ~92% of the remaining distance in half a
    /// second, independent of frame rate.
    pub position_rate: f32,

    /// Exponential settle rate for camera orientation (per second)
    pub orientation_rate: f32,

    // === FORMATION ===
    /// Lateral distance between neighbouring participants in a lineup
    pub player_spacing: f32,

    /// Depth stagger between alternating participants in a lineup row
    pub player_alt_offset: f32,

    /// Participants per formation row
    pub row_size: usize,

    /// Distance of a team anchor from the world origin before accounting for
    /// team width
    pub team_anchor_distance: f32,

    /// Angle of the outermost team anchors away from the centre line
    pub team_angle: f32,

    /// Minimum gap kept between neighbouring team clusters
    pub min_team_spacing: f32,

    // === TEAM SHOTS ===
    /// Standoff from the team anchor along the anchor's forward axis
    pub team_camera_offset: f32,

    /// Height the team camera looks at above the anchor
    pub team_look_height: f32,

    /// Extra camera height for large teams
    pub large_team_camera_height: f32,

    /// Teams with more members than this get the raised camera
    pub large_team_threshold: usize,

    /// Dolly distance the scripted team shot travels
    pub team_dolly_back: f32,

    // === CHARACTER SHOTS ===
    /// Distance in front of the subject
    pub character_distance: f32,

    /// Sideways offset so the framing is not head-on
    pub character_lateral: f32,

    /// Camera height above the subject's origin
    pub character_height: f32,

    /// How much closer the camera starts before settling back out
    pub character_pull_in: f32,

    // === COMPOSITE SHOT ===
    /// Base standoff of the composite camera
    pub composite_base_offset: f32,

    /// Camera pitch for the composite shot (negative looks down)
    pub composite_pitch: f32,

    /// Horizontal field of view used to fit the formation in frame
    pub field_of_view: f32,

    // === SEQUENCING ===
    /// Total length of the intro, split evenly across teams
    pub total_intro_duration: f32,

    /// How many winners get a close-up after the match
    pub winners_to_show: usize,

    /// Length of each winner close-up
    pub winner_display_time: f32,

    /// Length of the local participant's progress close-up
    pub own_progress_display_time: f32,

    // === OVERLAY / INPUT ===
    /// Highlight rows revealed per second while the progress overlay plays
    pub highlight_reveal_rate: f32,

    /// Blend factor travel per second while the team pan auto-scrolls
    pub auto_scroll_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position_rate: 5.0,
            orientation_rate: 5.0,

            player_spacing: 75.0,
            player_alt_offset: 80.0,
            row_size: 5,
            team_anchor_distance: 400.0,
            team_angle: 45.0,
            min_team_spacing: 120.0,

            team_camera_offset: 500.0,
            team_look_height: 45.0,
            large_team_camera_height: 100.0,
            large_team_threshold: 5,
            team_dolly_back: 100.0,

            character_distance: 300.0,
            character_lateral: 60.0,
            character_height: 75.0,
            character_pull_in: 100.0,

            composite_base_offset: 400.0,
            composite_pitch: -5.0,
            field_of_view: 90.0,

            // Matches the length of the intro music cue
            total_intro_duration: 6.8,
            winners_to_show: 3,
            winner_display_time: 5.0,
            own_progress_display_time: 8.0,

            highlight_reveal_rate: 1.5,
            auto_scroll_rate: 0.05,
        }
    }
}

impl CameraConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Half of the horizontal field of view, in radians
    pub fn half_fov_radians(&self) -> f32 {
        (self.field_of_view * 0.5).to_radians()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.position_rate <= 0.0 || self.orientation_rate <= 0.0 {
            return Err(SummaryError::InvalidConfig(
                "interpolation rates must be positive".into(),
            ));
        }

        if !(1.0..180.0).contains(&self.field_of_view) {
            return Err(SummaryError::InvalidConfig(format!(
                "field_of_view ({}) must be within [1, 180)",
                self.field_of_view
            )));
        }

        if self.row_size == 0 {
            return Err(SummaryError::InvalidConfig("row_size must be at least 1".into()));
        }

        if self.player_spacing <= 0.0 {
            return Err(SummaryError::InvalidConfig(format!(
                "player_spacing ({}) must be positive",
                self.player_spacing
            )));
        }

        if self.total_intro_duration < 0.0
            || self.winner_display_time < 0.0
            || self.own_progress_display_time < 0.0
        {
            return Err(SummaryError::InvalidConfig("durations cannot be negative".into()));
        }

        Ok(())
    }
}

/// Load and validate a camera config from a TOML file
///
/// Missing keys fall back to their defaults.
pub fn load_camera_config(path: &Path) -> Result<CameraConfig> {
    let contents = fs::read_to_string(path)?;
    parse_camera_config(&contents)
}

/// Parse and validate a camera config from TOML text
pub fn parse_camera_config(contents: &str) -> Result<CameraConfig> {
    let config: CameraConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}
