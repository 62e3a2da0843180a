//! Ordered shot sequence with a single active cursor
//!
//! Lists are built wholesale for a viewing context and never edited in
//! place; switching context means building a new list.

use ordered_float::OrderedFloat;

use crate::camera::context::ShotContext;
use crate::camera::flags::CapabilityFlags;
use crate::camera::shot::Shot;
use crate::core::config::CameraConfig;
use crate::core::types::{ParticipantId, TeamIndex};
use crate::roster::MatchRoster;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotList {
    shots: Vec<Shot>,
    active: usize,
    /// Seconds since the active shot became active
    elapsed: f32,
}

impl ShotList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_shots(shots: Vec<Shot>) -> Self {
        Self {
            shots,
            active: 0,
            elapsed: 0.0,
        }
    }

    /// Append a shot. Lists only ever grow.
    pub fn push(&mut self, shot: Shot) {
        self.shots.push(shot);
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// Cursor of the active shot, `None` for an empty list
    pub fn active_index(&self) -> Option<usize> {
        (!self.shots.is_empty()).then_some(self.active)
    }

    pub fn active(&self) -> Option<&Shot> {
        self.shots.get(self.active)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Make `index` the active shot and initialize it.
    ///
    /// Out-of-range indices fall back to the first shot. No-op on an empty list.
    pub fn jump_to(&mut self, ctx: &mut ShotContext<'_>, index: usize) {
        if self.shots.is_empty() {
            return;
        }
        let index = if index < self.shots.len() {
            index
        } else {
            tracing::warn!(
                "Shot index {} out of range ({} shots), using 0",
                index,
                self.shots.len()
            );
            0
        };

        self.active = index;
        self.elapsed = 0.0;
        self.shots[index].initialize(ctx);
    }

    /// Tick the active shot and move to the next one when it completes.
    ///
    /// The last shot never hands off: it stays active and keeps ticking.
    /// Returns `true` if the cursor moved.
    pub fn advance_if_complete(&mut self, ctx: &mut ShotContext<'_>, delta_seconds: f32) -> bool {
        let Some(shot) = self.shots.get_mut(self.active) else {
            return false;
        };

        self.elapsed += delta_seconds;
        let complete = shot.tick(ctx, self.elapsed, delta_seconds);

        if complete && self.active + 1 < self.shots.len() {
            self.active += 1;
            self.elapsed = 0.0;
            tracing::debug!(
                index = self.active,
                shot = self.shots[self.active].name(),
                "Advancing to next shot"
            );
            self.shots[self.active].initialize(ctx);
            return true;
        }
        false
    }

    // === CANONICAL LISTS ===

    /// One scripted team dolly per team, splitting `total_intro_duration`
    /// evenly between them.
    pub fn intro(team_count: usize, total_intro_duration: f32) -> Self {
        let team_count = team_count.max(1);
        let per_team = total_intro_duration / team_count as f32;

        Self::from_shots(
            (0..team_count)
                .map(|team| {
                    Shot::team(team)
                        .with_duration(per_team)
                        .with_flags(
                            CapabilityFlags::SHOW_PARTICIPANT_NAMES
                                | CapabilityFlags::IS_INTRO_SEQUENCE,
                        )
                })
                .collect(),
        )
    }

    /// A single open-ended pan across `team`
    pub fn team_view(team: TeamIndex, flags: CapabilityFlags) -> Self {
        Self::from_shots(vec![Shot::team_pan(team).with_flags(flags)])
    }

    /// A single open-ended close-up of `participant`
    pub fn character_view(participant: ParticipantId, flags: CapabilityFlags) -> Self {
        Self::from_shots(vec![Shot::character(participant).with_flags(flags)])
    }

    /// A single open-ended shot of everyone, with the scoreboard up
    pub fn composite_view() -> Self {
        Self::from_shots(vec![Shot::composite()
            .with_flags(CapabilityFlags::CAN_INTERACT | CapabilityFlags::SHOW_SCOREBOARD)])
    }

    /// Post-match sequence: winner close-ups, the viewer's own progress,
    /// then an interactive pan across `team`.
    pub fn post_match(roster: &dyn MatchRoster, config: &CameraConfig, team: TeamIndex) -> Self {
        let mut list = Self::new();

        let mut winners = roster.team_members(team);
        winners.sort_by_key(|&id| std::cmp::Reverse(OrderedFloat(roster.highlight_score(id))));
        for &winner in winners.iter().take(config.winners_to_show) {
            list.push(Shot::character(winner).with_duration(config.winner_display_time));
        }

        if let Some(local) = roster.local_participant().filter(|&id| roster.contains(id)) {
            list.push(
                Shot::character(local)
                    .with_duration(config.own_progress_display_time)
                    .with_flags(CapabilityFlags::SHOW_XP_PROGRESS),
            );
        }

        list.push(Shot::team_pan(team).with_flags(
            CapabilityFlags::CAN_INTERACT
                | CapabilityFlags::SHOW_PARTICIPANT_NAMES
                | CapabilityFlags::SHOW_HIGHLIGHTS,
        ));
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::context::ViewState;
    use crate::camera::shot::ShotKind;
    use crate::camera::transform::CameraTransform;
    use crate::core::types::MatchState;
    use crate::roster::LineupRoster;

    fn run(
        list: &mut ShotList,
        roster: &LineupRoster,
        config: &CameraConfig,
        view: &mut ViewState,
        camera: &mut CameraTransform,
        delta: f32,
    ) -> bool {
        let mut ctx = ShotContext {
            roster,
            config,
            view,
            camera,
        };
        list.advance_if_complete(&mut ctx, delta)
    }

    #[test]
    fn test_intro_splits_duration_evenly() {
        let list = ShotList::intro(3, 9.0);
        assert_eq!(list.len(), 3);
        for (i, shot) in list.shots().iter().enumerate() {
            assert_eq!(shot.duration(), 3.0);
            assert!(matches!(shot.kind(), ShotKind::Team { team, .. } if *team == i));
            assert!(shot.flags().contains(CapabilityFlags::IS_INTRO_SEQUENCE));
        }
    }

    #[test]
    fn test_intro_with_no_teams_has_one_shot() {
        let list = ShotList::intro(0, 6.8);
        assert_eq!(list.len(), 1);
        assert_eq!(list.shots()[0].duration(), 6.8);
    }

    #[test]
    fn test_empty_list_is_noop() {
        let config = CameraConfig::default();
        let roster = LineupRoster::new(MatchState::Active);
        let mut view = ViewState::new();
        let mut camera = CameraTransform::IDENTITY;
        let mut list = ShotList::new();

        assert_eq!(list.active_index(), None);
        assert!(!run(&mut list, &roster, &config, &mut view, &mut camera, 0.1));
        assert_eq!(camera, CameraTransform::IDENTITY);
        assert_eq!(list.elapsed(), 0.0);
    }

    #[test]
    fn test_advances_and_stops_at_last_shot() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::WaitingToStart);
        let mut view = ViewState::new();
        let mut camera = CameraTransform::IDENTITY;
        let mut list = ShotList::intro(2, 2.0);

        {
            let mut ctx = ShotContext {
                roster: &roster,
                config: &config,
                view: &mut view,
                camera: &mut camera,
            };
            list.jump_to(&mut ctx, 0);
        }
        assert_eq!(list.active_index(), Some(0));

        // 1.0s per team: reaching 1.0 is not enough, passing it is
        for _ in 0..4 {
            assert!(!run(&mut list, &roster, &config, &mut view, &mut camera, 0.25));
        }
        assert!(run(&mut list, &roster, &config, &mut view, &mut camera, 0.25));
        assert_eq!(list.active_index(), Some(1));
        assert_eq!(list.elapsed(), 0.0);
        assert_eq!(view.viewed_team, 1);

        for _ in 0..50 {
            run(&mut list, &roster, &config, &mut view, &mut camera, 0.1);
        }
        assert_eq!(list.active_index(), Some(1));
        assert!(list.elapsed() > 4.0);
    }

    #[test]
    fn test_jump_to_out_of_range_uses_first() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[2, 2, 2], MatchState::WaitingToStart);
        let mut view = ViewState::new();
        let mut camera = CameraTransform::IDENTITY;
        let mut list = ShotList::intro(3, 3.0);
        let mut ctx = ShotContext {
            roster: &roster,
            config: &config,
            view: &mut view,
            camera: &mut camera,
        };

        list.jump_to(&mut ctx, 2);
        assert_eq!(list.active_index(), Some(2));
        list.jump_to(&mut ctx, 9);
        assert_eq!(list.active_index(), Some(0));
    }

    #[test]
    fn test_post_match_orders_winners_by_score() {
        let config = CameraConfig::default();
        let mut roster = LineupRoster::with_teams(&config, &[4, 4], MatchState::PostMatch);
        let team = roster.team_members(1);
        roster.set_highlights(team[0], 1.0, 1).unwrap();
        roster.set_highlights(team[1], 9.0, 3).unwrap();
        roster.set_highlights(team[2], 5.0, 2).unwrap();
        roster.set_highlights(team[3], 7.0, 2).unwrap();
        let local = roster.team_members(0)[2];
        roster.set_local_participant(Some(local)).unwrap();

        let list = ShotList::post_match(&roster, &config, 1);
        let kinds: Vec<_> = list.shots().iter().map(|s| s.kind().clone()).collect();

        assert_eq!(list.len(), 5);
        assert_eq!(kinds[0], ShotKind::Character { subject: team[1], lost: false });
        assert_eq!(kinds[1], ShotKind::Character { subject: team[3], lost: false });
        assert_eq!(kinds[2], ShotKind::Character { subject: team[2], lost: false });
        assert_eq!(kinds[3], ShotKind::Character { subject: local, lost: false });
        assert!(list.shots()[3].flags().contains(CapabilityFlags::SHOW_XP_PROGRESS));
        assert_eq!(list.shots()[3].duration(), config.own_progress_display_time);

        let last = &list.shots()[4];
        assert!(matches!(last.kind(), ShotKind::TeamPan { team: 1, .. }));
        assert_eq!(last.duration(), 0.0);
        assert!(last.flags().contains(CapabilityFlags::CAN_INTERACT));
    }
}
