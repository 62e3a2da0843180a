//! Match roster collaborator
//!
//! The camera never owns match state; it queries it through [`MatchRoster`]
//! each time it needs a team, a participant or their placement.

pub mod lineup;

pub use lineup::{LineupRoster, ParticipantRecord};

use crate::core::types::{MatchState, ParticipantId, ParticipantTransform, TeamIndex};

/// Read-only view of the match the summary is presenting
pub trait MatchRoster {
    /// Number of teams in the match (may be 0 for free-for-all setups)
    fn team_count(&self) -> usize;

    /// Members of `team` in lineup order; empty for an unknown team
    fn team_members(&self, team: TeamIndex) -> Vec<ParticipantId>;

    /// Current world placement, or `None` once the participant is gone
    fn participant_transform(&self, participant: ParticipantId) -> Option<ParticipantTransform>;

    fn participant_team(&self, participant: ParticipantId) -> Option<TeamIndex>;

    fn winning_team(&self) -> Option<TeamIndex>;

    fn match_state(&self) -> MatchState;

    /// The viewer's own participant, if they played
    fn local_participant(&self) -> Option<ParticipantId>;

    /// Ranking score used to pick winner close-ups
    fn highlight_score(&self, _participant: ParticipantId) -> f32 {
        0.0
    }

    /// Number of highlight rows the participant earned
    fn highlight_count(&self, _participant: ParticipantId) -> usize {
        0
    }

    /// Team count as the camera sees it: there is always at least one lineup
    fn view_team_count(&self) -> usize {
        self.team_count().max(1)
    }

    fn largest_team_size(&self) -> usize {
        (0..self.team_count())
            .map(|team| self.team_members(team).len())
            .max()
            .unwrap_or(0)
    }

    /// Order used by the next/previous participant switcher
    fn participant_order(&self) -> Vec<ParticipantId> {
        (0..self.team_count())
            .flat_map(|team| self.team_members(team))
            .collect()
    }

    fn contains(&self, participant: ParticipantId) -> bool {
        self.participant_transform(participant).is_some()
    }
}
