//! Summary controller - the per-frame driver of the match summary camera
//!
//! Owns the camera pose, the view state and the active shot list. Commands
//! from the UI rebuild the shot list; `tick` advances it, pushes the camera to
//! the renderer and reports which overlay elements are visible.

use glam::Vec3;

use crate::camera::context::{ShotContext, ViewState};
use crate::camera::flags::CapabilityFlags;
use crate::camera::shot::{Shot, ShotKind};
use crate::camera::shot_list::ShotList;
use crate::camera::transform::CameraTransform;
use crate::core::config::CameraConfig;
use crate::core::types::{FrameContext, MatchState, ParticipantId, TeamIndex};
use crate::roster::MatchRoster;
use crate::summary::overlay::{revealed_rows, OverlayVisibility};
use crate::summary::{CameraSink, CloseOutcome};

/// Where the camera waits before the first shot takes over
const PARKED_CAMERA_DISTANCE: f32 = 5000.0;

#[derive(Debug, Clone)]
pub struct SummaryController {
    config: CameraConfig,
    /// Read once at construction
    match_state: MatchState,
    shots: ShotList,
    view: ViewState,
    camera: CameraTransform,
}

impl SummaryController {
    /// Build a controller and its opening shot list from the match state.
    ///
    /// Before the match: the team intro. After the match: winners, own
    /// progress, then the winning team. During the match: the viewer's team.
    pub fn new(config: CameraConfig, roster: &dyn MatchRoster) -> Self {
        let match_state = roster.match_state();
        let mut controller = Self {
            config,
            match_state,
            shots: ShotList::new(),
            view: ViewState::new(),
            camera: CameraTransform::from_yaw_pitch(
                Vec3::new(PARKED_CAMERA_DISTANCE, 0.0, 0.0),
                180.0,
                0.0,
            ),
        };

        match match_state {
            MatchState::WaitingToStart => {
                let list = ShotList::intro(
                    roster.view_team_count(),
                    controller.config.total_intro_duration,
                );
                controller.install(roster, list);
            }
            MatchState::PostMatch => {
                let team = controller.clamp_team(roster, post_match_team(roster));
                let list = ShotList::post_match(roster, &controller.config, team);
                controller.install(roster, list);
            }
            MatchState::Active => {
                let team = local_team(roster).unwrap_or(0);
                controller.view_team(roster, team);
            }
        }

        tracing::info!(
            ?match_state,
            shots = controller.shots.len(),
            "Summary camera ready"
        );
        controller
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn match_state(&self) -> MatchState {
        self.match_state
    }

    pub fn shots(&self) -> &ShotList {
        &self.shots
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The live camera pose (what the renderer last received)
    pub fn camera(&self) -> &CameraTransform {
        &self.camera
    }

    pub fn active_shot(&self) -> Option<&Shot> {
        self.shots.active()
    }

    /// Flags of the active shot; empty when nothing is playing
    pub fn active_flags(&self) -> CapabilityFlags {
        self.shots
            .active()
            .map_or(CapabilityFlags::empty(), Shot::flags)
    }

    pub fn highlights_latch_armed(&self) -> bool {
        self.view.highlights_latch_armed()
    }

    // === COMMANDS ===

    /// Interactive pan across `team`. Out-of-range teams fall back to team 0.
    pub fn view_team(&mut self, roster: &dyn MatchRoster, team: TeamIndex) {
        let team = self.clamp_team(roster, team);

        let mut flags = CapabilityFlags::CAN_INTERACT;
        if self.match_state == MatchState::PostMatch {
            flags |= CapabilityFlags::SHOW_HIGHLIGHTS;
        }

        self.view.viewed_participant = None;
        self.view.auto_scroll = true;
        self.install(roster, ShotList::team_view(team, flags));
    }

    /// Close-up of `participant`. Returns `false` (and does nothing) if they
    /// are no longer in the roster.
    pub fn view_participant(
        &mut self,
        roster: &dyn MatchRoster,
        participant: ParticipantId,
    ) -> bool {
        if !roster.contains(participant) {
            tracing::debug!("Ignoring view of stale participant {:?}", participant);
            return false;
        }

        let mut flags = CapabilityFlags::CAN_INTERACT;
        if roster.local_participant() == Some(participant) {
            flags |= CapabilityFlags::SHOW_XP_PROGRESS;
        } else {
            self.view.disarm_highlights_latch();
        }

        self.install(roster, ShotList::character_view(participant, flags));
        true
    }

    /// Everyone in frame with the scoreboard up
    pub fn view_all(&mut self, roster: &dyn MatchRoster) {
        self.view.viewed_participant = None;
        self.install(roster, ShotList::composite_view());
    }

    /// Step the switcher: next/previous team in team view, next/previous
    /// participant in participant view. Does nothing in the composite view.
    pub fn advance_switcher(&mut self, roster: &dyn MatchRoster, direction: i32) {
        let step = direction.signum() as i64;
        if step == 0 {
            return;
        }

        let flags = self.active_flags();
        if flags.contains(CapabilityFlags::IS_TEAM_VIEW) {
            let count = roster.view_team_count() as i64;
            let next = (self.view.viewed_team as i64 + step).rem_euclid(count);
            self.view_team(roster, next as TeamIndex);
        } else if flags.contains(CapabilityFlags::IS_PARTICIPANT_VIEW) {
            let Some(current) = self.view.viewed_participant else {
                return;
            };
            let order = roster.participant_order();
            if order.is_empty() {
                return;
            }
            let index = order.iter().position(|&p| p == current).unwrap_or(0) as i64;
            let next = (index + step).rem_euclid(order.len() as i64) as usize;
            self.view_participant(roster, order[next]);
        }
    }

    /// Pointer drag across an interactive team pan. `delta_x` is in the same
    /// units as the team's width. Returns `true` if the pan moved.
    pub fn drag_team_pan(&mut self, delta_x: f32) -> bool {
        if !self.active_flags().contains(CapabilityFlags::CAN_INTERACT) {
            return false;
        }
        let Some(width) = self.active_pan_width() else {
            return false;
        };

        self.view.auto_scroll = false;
        if width > 0.0 {
            self.view.nudge_team_pan(-delta_x / width);
        }
        true
    }

    /// Scroll-out gesture: participant → their team → everyone.
    pub fn zoom_out(&mut self, roster: &dyn MatchRoster) {
        let flags = self.active_flags();
        if !flags.contains(CapabilityFlags::CAN_INTERACT) {
            return;
        }

        if flags.contains(CapabilityFlags::IS_PARTICIPANT_VIEW) {
            self.view_team(roster, self.view.viewed_team);
        } else if flags.contains(CapabilityFlags::IS_TEAM_VIEW) {
            self.view_all(roster);
        }
    }

    /// Close button. Before or after a match the summary stays up and returns
    /// to a team view; mid-match the caller should dismiss it.
    pub fn close(&mut self, roster: &dyn MatchRoster) -> CloseOutcome {
        let several_teams = roster.team_count() > 1;
        match self.match_state {
            MatchState::WaitingToStart => {
                let team = if several_teams {
                    local_team(roster).unwrap_or(0)
                } else {
                    0
                };
                self.view_team(roster, team);
                CloseOutcome::Stayed
            }
            MatchState::PostMatch => {
                let team = if several_teams {
                    roster.winning_team().unwrap_or(0)
                } else {
                    0
                };
                self.view_team(roster, team);
                CloseOutcome::Stayed
            }
            MatchState::Active => CloseOutcome::CloseRequested,
        }
    }

    // === FRAME ===

    /// Advance one frame: auto-scroll, tick the shot list, push the camera.
    ///
    /// Returns the overlay visibility for this frame.
    pub fn tick(
        &mut self,
        roster: &dyn MatchRoster,
        frame: &FrameContext,
        sink: &mut dyn CameraSink,
    ) -> OverlayVisibility {
        let delta = frame.delta_seconds();
        self.auto_scroll(delta);

        let mut ctx = ShotContext {
            roster,
            config: &self.config,
            view: &mut self.view,
            camera: &mut self.camera,
        };
        if self.shots.advance_if_complete(&mut ctx, delta) {
            tracing::debug!(
                frame = frame.frame(),
                index = ?self.shots.active_index(),
                "Shot transition"
            );
        }

        sink.push_transform(&self.camera);
        self.overlay(roster)
    }

    /// Overlay visibility for the current state. Recomputed on every call.
    pub fn overlay(&self, roster: &dyn MatchRoster) -> OverlayVisibility {
        let Some(shot) = self.shots.active() else {
            return OverlayVisibility::default();
        };

        let latch = self.view.highlights_latch_armed();
        let mut overlay = OverlayVisibility::from_flags(shot.flags(), latch);
        // Nothing to name once the subject is gone
        overlay.switcher_label &= shot.subject_resolves(roster);
        let total = self
            .view
            .viewed_participant
            .map_or(0, |p| roster.highlight_count(p));
        overlay.highlight_rows = if overlay.xp_progress {
            revealed_rows(total, self.shots.elapsed(), self.config.highlight_reveal_rate)
        } else {
            total
        };
        overlay
    }

    // === INTERNALS ===

    /// Swap in a freshly built list and activate its first shot immediately,
    /// so the very next tick already uses the new framing.
    fn install(&mut self, roster: &dyn MatchRoster, list: ShotList) {
        self.shots = list;
        let mut ctx = ShotContext {
            roster,
            config: &self.config,
            view: &mut self.view,
            camera: &mut self.camera,
        };
        self.shots.jump_to(&mut ctx, 0);
    }

    fn clamp_team(&self, roster: &dyn MatchRoster, team: TeamIndex) -> TeamIndex {
        let count = roster.view_team_count();
        if team < count {
            team
        } else {
            tracing::warn!("Team {} out of range ({} teams), viewing team 0", team, count);
            0
        }
    }

    /// Width of the active team pan, if the active shot is one
    fn active_pan_width(&self) -> Option<f32> {
        match self.shots.active()?.kind() {
            ShotKind::TeamPan {
                framing: Some(f), ..
            } => Some(f.start.distance_to(&f.end)),
            _ => None,
        }
    }

    /// Ping-pong the team pan while nobody is dragging it
    fn auto_scroll(&mut self, delta_seconds: f32) {
        if !self.view.auto_scroll
            || !self.active_flags().contains(CapabilityFlags::CAN_INTERACT)
            || self.active_pan_width().is_none()
        {
            return;
        }

        let step = self.config.auto_scroll_rate * delta_seconds * self.view.auto_scroll_direction;
        self.view.nudge_team_pan(step);
        if self.view.team_pan_alpha >= 1.0 {
            self.view.auto_scroll_direction = -1.0;
        } else if self.view.team_pan_alpha <= 0.0 {
            self.view.auto_scroll_direction = 1.0;
        }
    }
}

/// Team the post-match sequence features: winners, else the viewer's team
fn post_match_team(roster: &dyn MatchRoster) -> TeamIndex {
    roster
        .winning_team()
        .or_else(|| local_team(roster))
        .unwrap_or(0)
}

fn local_team(roster: &dyn MatchRoster) -> Option<TeamIndex> {
    roster
        .local_participant()
        .and_then(|p| roster.participant_team(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::LineupRoster;
    use crate::summary::RecordingSink;

    fn frame(delta: f32) -> FrameContext {
        FrameContext::new(delta, 0)
    }

    #[test]
    fn test_waiting_to_start_plays_intro() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::WaitingToStart);
        let controller = SummaryController::new(config, &roster);

        assert_eq!(controller.shots().len(), 2);
        assert!(controller
            .active_flags()
            .contains(CapabilityFlags::IS_INTRO_SEQUENCE));
    }

    #[test]
    fn test_active_match_views_local_team() {
        let config = CameraConfig::default();
        let mut roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::Active);
        let local = roster.team_members(1)[0];
        roster.set_local_participant(Some(local)).unwrap();

        let controller = SummaryController::new(config, &roster);
        assert_eq!(controller.view().viewed_team, 1);
        assert!(matches!(
            controller.active_shot().map(Shot::kind),
            Some(ShotKind::TeamPan { team: 1, .. })
        ));
    }

    #[test]
    fn test_view_team_clamps_and_clears_participant() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[2, 2], MatchState::Active);
        let mut controller = SummaryController::new(config, &roster);

        let p = roster.team_members(1)[1];
        assert!(controller.view_participant(&roster, p));
        assert_eq!(controller.view().viewed_participant, Some(p));

        controller.view_team(&roster, 42);
        assert_eq!(controller.view().viewed_team, 0);
        assert_eq!(controller.view().viewed_participant, None);
    }

    #[test]
    fn test_drag_clamps_blend_and_stops_auto_scroll() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[5], MatchState::Active);
        let mut controller = SummaryController::new(config, &roster);

        assert!(controller.view().auto_scroll);
        assert!(controller.drag_team_pan(-10_000.0));
        assert_eq!(controller.view().team_pan_alpha, 1.0);
        assert!(!controller.view().auto_scroll);

        assert!(controller.drag_team_pan(10_000.0));
        assert_eq!(controller.view().team_pan_alpha, 0.0);
    }

    #[test]
    fn test_drag_ignored_outside_team_pan() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::Active);
        let mut controller = SummaryController::new(config, &roster);
        controller.view_all(&roster);
        assert!(!controller.drag_team_pan(5.0));
    }

    #[test]
    fn test_auto_scroll_moves_blend() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[5], MatchState::Active);
        let mut controller = SummaryController::new(config, &roster);
        let mut sink = RecordingSink::default();

        controller.tick(&roster, &frame(1.0), &mut sink);
        assert!(controller.view().team_pan_alpha > 0.5);
    }

    #[test]
    fn test_zoom_out_walks_back() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::Active);
        let mut controller = SummaryController::new(config, &roster);
        let p = roster.team_members(1)[0];

        controller.view_participant(&roster, p);
        controller.zoom_out(&roster);
        assert!(controller.active_flags().contains(CapabilityFlags::IS_TEAM_VIEW));
        assert_eq!(controller.view().viewed_team, 1);

        controller.zoom_out(&roster);
        assert!(controller
            .active_flags()
            .contains(CapabilityFlags::IS_COMPOSITE_VIEW));

        // Nothing further out than everyone
        controller.zoom_out(&roster);
        assert!(controller
            .active_flags()
            .contains(CapabilityFlags::IS_COMPOSITE_VIEW));
    }

    #[test]
    fn test_close_by_match_state() {
        let config = CameraConfig::default();

        let mut roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::PostMatch);
        roster.set_winning_team(Some(1));
        let mut controller = SummaryController::new(config.clone(), &roster);
        assert_eq!(controller.close(&roster), CloseOutcome::Stayed);
        assert_eq!(controller.view().viewed_team, 1);

        let roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::Active);
        let mut controller = SummaryController::new(config, &roster);
        assert_eq!(controller.close(&roster), CloseOutcome::CloseRequested);
    }

    #[test]
    fn test_viewing_other_participant_disarms_latch() {
        let config = CameraConfig::default();
        let mut roster = LineupRoster::with_teams(&config, &[3], MatchState::Active);
        let local = roster.team_members(0)[0];
        let other = roster.team_members(0)[1];
        roster.set_local_participant(Some(local)).unwrap();

        // Active match opens on a team view, which consumes the latch
        let mut controller = SummaryController::new(config.clone(), &roster);
        assert!(!controller.highlights_latch_armed());

        // A fresh post-match controller opens on close-ups, latch still armed
        roster.set_match_state(MatchState::PostMatch);
        let mut controller_post = SummaryController::new(config, &roster);
        assert!(controller_post.highlights_latch_armed());
        controller_post.view_participant(&roster, other);
        assert!(!controller_post.highlights_latch_armed());

        controller.view_participant(&roster, local);
        assert!(controller.active_flags().contains(CapabilityFlags::SHOW_XP_PROGRESS));
        assert!(!controller.overlay(&roster).xp_progress);
    }

    #[test]
    fn test_switcher_label_hidden_when_subject_leaves() {
        let config = CameraConfig::default();
        let mut roster = LineupRoster::with_teams(&config, &[3, 3], MatchState::Active);
        let mut controller = SummaryController::new(config, &roster);
        assert!(controller.overlay(&roster).switcher_label);

        let subject = roster.team_members(0)[2];
        controller.view_participant(&roster, subject);
        assert!(controller.overlay(&roster).switcher_label);

        roster.remove_participant(subject);
        let mut sink = RecordingSink::default();
        let overlay = controller.tick(&roster, &frame(0.1), &mut sink);
        assert!(!overlay.switcher_label);
    }

    #[test]
    fn test_switcher_label_hidden_for_winner_gone_before_shot() {
        let mut config = CameraConfig::default();
        config.winners_to_show = 1;
        let mut roster = LineupRoster::with_teams(&config, &[2, 2], MatchState::PostMatch);
        roster.set_winning_team(Some(1));
        let winner = roster.team_members(1)[0];
        roster.set_highlights(winner, 50.0, 2).unwrap();

        let list = ShotList::post_match(&roster, &config, 1);
        roster.remove_participant(winner);

        let mut controller = SummaryController::new(config, &roster);
        controller.install(&roster, list);
        assert!(controller
            .active_flags()
            .contains(CapabilityFlags::SHOW_OVERLAY_SWITCHER));
        assert!(!controller.overlay(&roster).switcher_label);
    }

    #[test]
    fn test_nan_frame_does_not_stall_intro() {
        let config = CameraConfig::default();
        let roster = LineupRoster::with_teams(&config, &[2, 2], MatchState::WaitingToStart);
        let mut controller = SummaryController::new(config, &roster);
        let mut sink = RecordingSink::default();

        controller.tick(&roster, &FrameContext::new(f32::NAN, 0), &mut sink);
        assert_eq!(controller.shots().elapsed(), 0.0);

        for i in 1..40 {
            controller.tick(&roster, &FrameContext::new(0.1, i), &mut sink);
        }
        assert_eq!(controller.shots().active_index(), Some(1));
    }

    #[test]
    fn test_own_progress_reveals_rows_over_time() {
        let mut config = CameraConfig::default();
        config.winners_to_show = 0;
        let mut roster = LineupRoster::with_teams(&config, &[3], MatchState::PostMatch);
        let local = roster.team_members(0)[0];
        roster.set_local_participant(Some(local)).unwrap();
        roster.set_highlights(local, 3.0, 4).unwrap();

        let mut controller = SummaryController::new(config, &roster);
        let mut sink = RecordingSink::default();

        let overlay = controller.overlay(&roster);
        assert!(overlay.xp_progress);
        assert_eq!(overlay.highlight_rows, 0);

        let overlay = controller.tick(&roster, &frame(1.0), &mut sink);
        assert_eq!(overlay.highlight_rows, 1);

        let overlay = controller.tick(&roster, &frame(1.0), &mut sink);
        assert_eq!(overlay.highlight_rows, 3);
        assert_eq!(sink.pushes, 2);
    }
}
