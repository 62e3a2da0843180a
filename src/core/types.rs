//! Core type definitions used throughout the codebase

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle for a match participant
///
/// Handles are resolved through the roster every time they are used; a
/// participant that left the match simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

/// Index of a team in the roster
pub type TeamIndex = usize;

/// Coarse match phase, read once when a controller is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchState {
    #[default]
    WaitingToStart,
    Active,
    PostMatch,
}

/// World placement of a participant as reported by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticipantTransform {
    pub position: Vec3,
    /// Facing around the vertical axis, in degrees
    pub yaw_degrees: f32,
}

impl ParticipantTransform {
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees,
        }
    }
}

/// Per-frame inputs threaded explicitly into `tick`
///
/// Built through [`FrameContext::new`], which guarantees a finite,
/// non-negative delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    delta_seconds: f32,
    frame: u64,
}

impl FrameContext {
    /// Negative or non-finite deltas become 0
    pub fn new(delta_seconds: f32, frame: u64) -> Self {
        let delta_seconds = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        Self {
            delta_seconds,
            frame,
        }
    }

    /// Seconds since the previous frame
    pub fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    /// Monotonic frame counter, used for log correlation only
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
