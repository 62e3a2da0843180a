//! Match summary: controller, overlay visibility and the renderer seam

pub mod controller;
pub mod overlay;

pub use controller::SummaryController;
pub use overlay::{revealed_rows, OverlayVisibility};

use crate::camera::transform::CameraTransform;

/// Receives the camera pose once per frame
pub trait CameraSink {
    fn push_transform(&mut self, transform: &CameraTransform);
}

/// Sink that keeps the last pose and a push count
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub pushes: usize,
    pub last: Option<CameraTransform>,
}

impl CameraSink for RecordingSink {
    fn push_transform(&mut self, transform: &CameraTransform) {
        self.pushes += 1;
        self.last = Some(*transform);
    }
}

/// What the close button asks of the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Summary stays up on a team view
    Stayed,
    /// Caller should dismiss the summary
    CloseRequested,
}
