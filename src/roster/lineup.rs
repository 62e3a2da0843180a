//! In-memory roster with teams arranged in their summary lineups
//!
//! Used by the headless driver and tests; a game integration would implement
//! [`MatchRoster`] over its own match state instead.

use ahash::AHashMap;

use crate::camera::placement::{formation_slot, team_anchor};
use crate::core::config::CameraConfig;
use crate::core::error::{Result, SummaryError};
use crate::core::types::{MatchState, ParticipantId, ParticipantTransform, TeamIndex};
use crate::roster::MatchRoster;

/// Everything the roster knows about one participant
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord {
    pub name: String,
    pub team: TeamIndex,
    pub transform: ParticipantTransform,
    pub highlight_score: f32,
    pub highlight_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LineupRoster {
    teams: Vec<Vec<ParticipantId>>,
    participants: AHashMap<ParticipantId, ParticipantRecord>,
    next_id: u32,
    winning_team: Option<TeamIndex>,
    match_state: MatchState,
    local: Option<ParticipantId>,
}

impl LineupRoster {
    pub fn new(match_state: MatchState) -> Self {
        Self {
            match_state,
            ..Self::default()
        }
    }

    /// Build a roster with `team_sizes[i]` members on team `i`, already
    /// standing in their lineups.
    pub fn with_teams(
        config: &CameraConfig,
        team_sizes: &[usize],
        match_state: MatchState,
    ) -> Self {
        let mut roster = Self::new(match_state);
        for (team, &size) in team_sizes.iter().enumerate() {
            let team = roster.add_team_at(team);
            for i in 0..size {
                // Team was just added, so this cannot fail
                let _ = roster.add_participant(team, format!("Player {}-{}", team + 1, i + 1));
            }
        }
        roster.arrange(config);
        roster
    }

    fn add_team_at(&mut self, team: TeamIndex) -> TeamIndex {
        while self.teams.len() <= team {
            self.teams.push(Vec::new());
        }
        team
    }

    /// Add an empty team and return its index
    pub fn add_team(&mut self) -> TeamIndex {
        self.teams.push(Vec::new());
        self.teams.len() - 1
    }

    /// Add a participant at the origin; call [`arrange`](Self::arrange) to
    /// move everyone into their lineup.
    pub fn add_participant(
        &mut self,
        team: TeamIndex,
        name: impl Into<String>,
    ) -> Result<ParticipantId> {
        let count = self.teams.len();
        let members = self
            .teams
            .get_mut(team)
            .ok_or(SummaryError::TeamOutOfRange { index: team, count })?;

        let id = ParticipantId(self.next_id);
        self.next_id += 1;
        members.push(id);

        self.participants.insert(
            id,
            ParticipantRecord {
                name: name.into(),
                team,
                transform: ParticipantTransform::new(glam::Vec3::ZERO, 0.0),
                highlight_score: 0.0,
                highlight_count: 0,
            },
        );
        Ok(id)
    }

    /// Remove a participant (they left the match). Returns the old record.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Option<ParticipantRecord> {
        let record = self.participants.remove(&id)?;
        if let Some(members) = self.teams.get_mut(record.team) {
            members.retain(|&member| member != id);
        }
        if self.local == Some(id) {
            self.local = None;
        }
        Some(record)
    }

    /// Place every participant at its team anchor + lineup slot, facing the
    /// anchor's direction.
    pub fn arrange(&mut self, config: &CameraConfig) {
        let team_count = self.teams.len().max(1);
        for (team, members) in self.teams.iter().enumerate() {
            let anchor = team_anchor(config, team, team_count, members.len());
            for (index, id) in members.iter().enumerate() {
                if let Some(record) = self.participants.get_mut(id) {
                    record.transform = ParticipantTransform::new(
                        anchor.to_world(formation_slot(config, index)),
                        anchor.yaw_degrees,
                    );
                }
            }
        }
    }

    pub fn set_transform(
        &mut self,
        id: ParticipantId,
        transform: ParticipantTransform,
    ) -> Result<()> {
        let record = self
            .participants
            .get_mut(&id)
            .ok_or(SummaryError::ParticipantNotFound(id))?;
        record.transform = transform;
        Ok(())
    }

    pub fn set_highlights(&mut self, id: ParticipantId, score: f32, count: usize) -> Result<()> {
        let record = self
            .participants
            .get_mut(&id)
            .ok_or(SummaryError::ParticipantNotFound(id))?;
        record.highlight_score = score;
        record.highlight_count = count;
        Ok(())
    }

    pub fn set_winning_team(&mut self, team: Option<TeamIndex>) {
        self.winning_team = team;
    }

    pub fn set_match_state(&mut self, state: MatchState) {
        self.match_state = state;
    }

    pub fn set_local_participant(&mut self, id: Option<ParticipantId>) -> Result<()> {
        if let Some(id) = id {
            if !self.participants.contains_key(&id) {
                return Err(SummaryError::ParticipantNotFound(id));
            }
        }
        self.local = id;
        Ok(())
    }

    pub fn record(&self, id: ParticipantId) -> Option<&ParticipantRecord> {
        self.participants.get(&id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

impl MatchRoster for LineupRoster {
    fn team_count(&self) -> usize {
        self.teams.len()
    }

    fn team_members(&self, team: TeamIndex) -> Vec<ParticipantId> {
        self.teams.get(team).cloned().unwrap_or_default()
    }

    fn participant_transform(&self, participant: ParticipantId) -> Option<ParticipantTransform> {
        self.participants.get(&participant).map(|r| r.transform)
    }

    fn participant_team(&self, participant: ParticipantId) -> Option<TeamIndex> {
        self.participants.get(&participant).map(|r| r.team)
    }

    fn winning_team(&self) -> Option<TeamIndex> {
        self.winning_team
    }

    fn match_state(&self) -> MatchState {
        self.match_state
    }

    fn local_participant(&self) -> Option<ParticipantId> {
        self.local
    }

    fn highlight_score(&self, participant: ParticipantId) -> f32 {
        self.participants
            .get(&participant)
            .map_or(0.0, |r| r.highlight_score)
    }

    fn highlight_count(&self, participant: ParticipantId) -> usize {
        self.participants
            .get(&participant)
            .map_or(0, |r| r.highlight_count)
    }
}
