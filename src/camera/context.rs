//! State shared between the controller and the active shot

use crate::camera::transform::CameraTransform;
use crate::core::config::CameraConfig;
use crate::core::types::{ParticipantId, TeamIndex};
use crate::roster::MatchRoster;

/// What the scene collaborator should be displaying around the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShownSubject {
    #[default]
    Nothing,
    /// One team's lineup
    Team(TeamIndex),
    /// A single participant with everyone else hidden
    Participant(ParticipantId),
    /// Every team, with one featured (the winners after a match)
    All { featured_team: TeamIndex },
}

/// Long-lived view state owned by the controller
///
/// Shots are disposable; anything that must survive a shot list rebuild
/// lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub viewed_team: TeamIndex,
    pub viewed_participant: Option<ParticipantId>,
    pub shown: ShownSubject,
    /// Blend factor for the team pan, in [0, 1]
    pub team_pan_alpha: f32,
    pub auto_scroll: bool,
    /// +1.0 or -1.0
    pub auto_scroll_direction: f32,
    /// Armed until the viewer first moves away from their own highlights.
    /// Disarmed by showing a whole team or by viewing another participant;
    /// never re-armed.
    first_own_highlights: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            viewed_team: 0,
            viewed_participant: None,
            shown: ShownSubject::Nothing,
            team_pan_alpha: 0.5,
            auto_scroll: true,
            auto_scroll_direction: 1.0,
            first_own_highlights: true,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display a whole team. Consumes the own-highlights latch.
    pub fn show_team(&mut self, team: TeamIndex) {
        self.shown = ShownSubject::Team(team);
        self.disarm_highlights_latch();
    }

    /// Display every team with `featured_team` in front. Consumes the latch.
    pub fn show_all(&mut self, featured_team: TeamIndex) {
        self.shown = ShownSubject::All { featured_team };
        self.disarm_highlights_latch();
    }

    /// Display a single participant, hiding the rest
    pub fn show_participant(&mut self, participant: ParticipantId) {
        self.shown = ShownSubject::Participant(participant);
    }

    pub fn highlights_latch_armed(&self) -> bool {
        self.first_own_highlights
    }

    pub fn disarm_highlights_latch(&mut self) {
        if self.first_own_highlights {
            tracing::debug!("Own-highlights latch disarmed");
        }
        self.first_own_highlights = false;
    }

    /// Nudge the team pan blend factor, clamped to [0, 1]
    pub fn nudge_team_pan(&mut self, delta: f32) {
        self.team_pan_alpha = (self.team_pan_alpha + delta).clamp(0.0, 1.0);
    }
}

/// Everything a shot may read or mutate while initializing or ticking
pub struct ShotContext<'a> {
    pub roster: &'a dyn MatchRoster,
    pub config: &'a CameraConfig,
    pub view: &'a mut ViewState,
    /// The live camera pose pushed to the renderer
    pub camera: &'a mut CameraTransform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_starts_armed() {
        assert!(ViewState::new().highlights_latch_armed());
    }

    #[test]
    fn test_showing_team_disarms_latch_for_good() {
        let mut view = ViewState::new();
        view.show_team(1);
        assert_eq!(view.shown, ShownSubject::Team(1));
        assert!(!view.highlights_latch_armed());

        view.show_participant(ParticipantId(3));
        assert!(!view.highlights_latch_armed());
    }

    #[test]
    fn test_showing_participant_keeps_latch() {
        let mut view = ViewState::new();
        view.show_participant(ParticipantId(7));
        assert!(view.highlights_latch_armed());
    }

    #[test]
    fn test_nudge_clamps() {
        let mut view = ViewState::new();
        view.nudge_team_pan(2.0);
        assert_eq!(view.team_pan_alpha, 1.0);
        view.nudge_team_pan(-5.0);
        assert_eq!(view.team_pan_alpha, 0.0);
    }
}
