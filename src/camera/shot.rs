//! Camera shots
//!
//! A shot is one unit of camera behaviour: where the camera goes, how it gets
//! there, for how long, and which overlay elements may show meanwhile. The
//! variant set is closed, so behaviour is a `match` over [`ShotKind`].

use crate::camera::context::ShotContext;
use crate::camera::flags::CapabilityFlags;
use crate::camera::placement::{
    character_framing, cluster_width, composite_framing, team_anchor, team_dolly, team_pan,
    TeamFraming,
};
use crate::camera::transform::CameraTransform;
use crate::core::types::{MatchState, ParticipantId, TeamIndex};
use crate::roster::MatchRoster;

/// How a shot moves the camera toward its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Camera is placed on a start → end blend driven by elapsed/duration
    ScriptedBlend,
    /// Camera eases toward the target with exponential decay
    Settle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShotKind {
    /// Scripted dolly onto a team lineup
    Team {
        team: TeamIndex,
        framing: Option<TeamFraming>,
    },
    /// Interactive lateral pan across a team, blend owned by the controller
    TeamPan {
        team: TeamIndex,
        framing: Option<TeamFraming>,
    },
    /// Close-up of a single participant
    Character {
        subject: ParticipantId,
        /// Set once the subject stops resolving, so the loss is logged once
        lost: bool,
    },
    /// Every participant in frame
    Composite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    kind: ShotKind,
    /// Seconds before auto-advance; 0 plays until replaced
    duration: f32,
    flags: CapabilityFlags,
    target: CameraTransform,
}

impl Shot {
    fn new(kind: ShotKind) -> Self {
        Self {
            kind,
            duration: 0.0,
            flags: CapabilityFlags::empty(),
            target: CameraTransform::IDENTITY,
        }
    }

    pub fn team(team: TeamIndex) -> Self {
        Self::new(ShotKind::Team {
            team,
            framing: None,
        })
    }

    pub fn team_pan(team: TeamIndex) -> Self {
        Self::new(ShotKind::TeamPan {
            team,
            framing: None,
        })
    }

    pub fn character(subject: ParticipantId) -> Self {
        Self::new(ShotKind::Character {
            subject,
            lost: false,
        })
    }

    pub fn composite() -> Self {
        Self::new(ShotKind::Composite)
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn with_flags(mut self, flags: CapabilityFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn kind(&self) -> &ShotKind {
        &self.kind
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    pub fn target(&self) -> &CameraTransform {
        &self.target
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            ShotKind::Team { .. } => "team",
            ShotKind::TeamPan { .. } => "team_pan",
            ShotKind::Character { .. } => "character",
            ShotKind::Composite => "composite",
        }
    }

    /// The team dolly is scripted; every other shot settles
    pub fn interpolation(&self) -> Interpolation {
        match self.kind {
            ShotKind::Team { .. } => Interpolation::ScriptedBlend,
            _ => Interpolation::Settle,
        }
    }

    /// Whether the team or participant this shot frames can still be named.
    ///
    /// False for a team that did not resolve at initialize and for a
    /// participant who is gone.
    pub fn subject_resolves(&self, roster: &dyn MatchRoster) -> bool {
        match &self.kind {
            ShotKind::Team { framing, .. } | ShotKind::TeamPan { framing, .. } => framing.is_some(),
            ShotKind::Character { subject, lost } => !*lost && roster.contains(*subject),
            ShotKind::Composite => true,
        }
    }

    /// Whether the shot finishes on its own once `elapsed` passes `duration`
    pub fn is_complete(&self, elapsed: f32) -> bool {
        self.duration != 0.0 && elapsed > self.duration
    }

    /// Called once when the shot becomes active.
    ///
    /// Adds the variant's flags, computes the target and updates the shared
    /// view state. A team or participant that no longer resolves keeps the
    /// current camera pose as the target.
    pub fn initialize(&mut self, ctx: &mut ShotContext<'_>) {
        match &mut self.kind {
            ShotKind::Team { team, framing } => {
                self.flags |= CapabilityFlags::TEAM_VIEW;
                match team_framing(ctx, *team, false) {
                    Some(f) => {
                        *ctx.camera = f.start;
                        self.target = f.end;
                        *framing = Some(f);
                    }
                    None => self.target = *ctx.camera,
                }
            }
            ShotKind::TeamPan { team, framing } => {
                self.flags |= CapabilityFlags::TEAM_VIEW;
                ctx.view.team_pan_alpha = 0.5;
                match team_framing(ctx, *team, true) {
                    Some(f) => {
                        self.target =
                            CameraTransform::blend(&f.start, &f.end, ctx.view.team_pan_alpha);
                        *framing = Some(f);
                    }
                    None => self.target = *ctx.camera,
                }
            }
            ShotKind::Character { subject, lost } => {
                self.flags |= CapabilityFlags::PARTICIPANT_VIEW;
                match ctx.roster.participant_transform(*subject) {
                    Some(transform) => {
                        let (target, start) = character_framing(ctx.config, &transform);
                        *ctx.camera = start;
                        self.target = target;
                        ctx.view.viewed_participant = Some(*subject);
                        ctx.view.viewed_team = ctx.roster.participant_team(*subject).unwrap_or(0);
                        ctx.view.show_participant(*subject);
                    }
                    None => {
                        tracing::warn!(
                            "Character shot subject {:?} is gone, holding camera",
                            subject
                        );
                        *lost = true;
                        self.target = *ctx.camera;
                    }
                }
            }
            ShotKind::Composite => {
                self.flags |= CapabilityFlags::IS_COMPOSITE_VIEW;
                let team_count = ctx.roster.team_count();
                self.target =
                    composite_framing(ctx.config, ctx.roster.largest_team_size(), team_count);

                let post_match = ctx.roster.match_state() == MatchState::PostMatch;
                let featured = if team_count > 1 && post_match {
                    ctx.roster
                        .winning_team()
                        .filter(|&t| t < team_count)
                        .unwrap_or(0)
                } else {
                    0
                };
                ctx.view.show_all(featured);
            }
        }

        tracing::debug!(
            shot = self.name(),
            duration = self.duration,
            flags = ?self.flags,
            "Shot initialized"
        );
    }

    /// Advance the camera one frame. Returns `true` once the shot is complete.
    pub fn tick(&mut self, ctx: &mut ShotContext<'_>, elapsed: f32, delta_seconds: f32) -> bool {
        let config = ctx.config;
        match &mut self.kind {
            ShotKind::Team { framing, .. } => {
                if let Some(f) = framing {
                    let alpha = if self.duration > 0.0 {
                        elapsed / self.duration
                    } else {
                        1.0
                    };
                    *ctx.camera = CameraTransform::blend(&f.start, &f.end, alpha);
                }
            }
            ShotKind::TeamPan { framing, .. } => {
                if let Some(f) = framing {
                    self.target = CameraTransform::blend(&f.start, &f.end, ctx.view.team_pan_alpha);
                }
                *ctx.camera = ctx.camera.settle_toward(
                    &self.target,
                    config.position_rate,
                    config.orientation_rate,
                    delta_seconds,
                );
            }
            ShotKind::Character { subject, lost } => {
                if ctx.roster.contains(*subject) {
                    *ctx.camera = ctx.camera.settle_toward(
                        &self.target,
                        config.position_rate,
                        config.orientation_rate,
                        delta_seconds,
                    );
                } else if !*lost {
                    tracing::warn!("Character shot subject {:?} left, holding camera", subject);
                    *lost = true;
                }
            }
            ShotKind::Composite => {
                *ctx.camera = ctx.camera.settle_toward(
                    &self.target,
                    config.position_rate,
                    config.orientation_rate,
                    delta_seconds,
                );
            }
        }

        self.is_complete(elapsed)
    }
}

/// Resolve the framing for `team`, updating the view to show it.
///
/// Both team variants snap the camera to the dolly start; the pan variant
/// returns lateral endpoints instead of the dolly pair.
fn team_framing(ctx: &mut ShotContext<'_>, team: TeamIndex, pan: bool) -> Option<TeamFraming> {
    let team_count = ctx.roster.view_team_count();
    if team >= team_count {
        tracing::warn!("Team shot for team {} but only {} teams, holding camera", team, team_count);
        return None;
    }

    let members = ctx.roster.team_members(team);
    let anchor = team_anchor(ctx.config, team, team_count, members.len());
    let dolly = team_dolly(ctx.config, &anchor, members.len());

    ctx.view.viewed_team = team;
    ctx.view.viewed_participant = None;
    ctx.view.show_team(team);
    *ctx.camera = dolly.start;

    if !pan {
        return Some(dolly);
    }

    let positions: Vec<_> = members
        .iter()
        .filter_map(|&id| ctx.roster.participant_transform(id))
        .map(|t| t.position)
        .collect();
    let width = cluster_width(ctx.config, &positions, members.len());
    Some(team_pan(ctx.config, &anchor, members.len(), width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::context::{ShownSubject, ViewState};
    use crate::core::config::CameraConfig;
    use crate::core::types::MatchState;
    use crate::roster::{LineupRoster, MatchRoster};

    struct Fixture {
        roster: LineupRoster,
        config: CameraConfig,
        view: ViewState,
        camera: CameraTransform,
    }

    impl Fixture {
        fn new(team_sizes: &[usize]) -> Self {
            let config = CameraConfig::default();
            let roster = LineupRoster::with_teams(&config, team_sizes, MatchState::PostMatch);
            Self {
                roster,
                config,
                view: ViewState::new(),
                camera: CameraTransform::IDENTITY,
            }
        }

        fn ctx(&mut self) -> ShotContext<'_> {
            ShotContext {
                roster: &self.roster,
                config: &self.config,
                view: &mut self.view,
                camera: &mut self.camera,
            }
        }
    }

    #[test]
    fn test_completion_requires_nonzero_duration() {
        let shot = Shot::composite().with_duration(2.0);
        assert!(!shot.is_complete(1.9));
        assert!(!shot.is_complete(2.0));
        assert!(shot.is_complete(2.01));

        let endless = Shot::composite();
        assert!(!endless.is_complete(1_000.0));
    }

    #[test]
    fn test_team_shot_blends_linearly() {
        let mut fx = Fixture::new(&[4, 4]);
        let mut shot = Shot::team(1).with_duration(2.0);
        shot.initialize(&mut fx.ctx());

        let ShotKind::Team { framing: Some(f), .. } = shot.kind().clone() else {
            panic!("team shot should resolve its framing");
        };
        assert_eq!(fx.camera, f.start);

        shot.tick(&mut fx.ctx(), 1.0, 1.0);
        let halfway = CameraTransform::blend(&f.start, &f.end, 0.5);
        assert!(fx.camera.distance_to(&halfway) < 1e-3);

        shot.tick(&mut fx.ctx(), 5.0, 4.0);
        assert!(fx.camera.distance_to(&f.end) < 1e-3);
    }

    #[test]
    fn test_team_shot_shows_team_and_disarms_latch() {
        let mut fx = Fixture::new(&[4, 4]);
        let mut shot = Shot::team(1);
        shot.initialize(&mut fx.ctx());

        assert!(shot.flags().contains(CapabilityFlags::IS_TEAM_VIEW));
        assert_eq!(fx.view.viewed_team, 1);
        assert_eq!(fx.view.shown, ShownSubject::Team(1));
        assert!(!fx.view.highlights_latch_armed());
        assert_eq!(shot.interpolation(), Interpolation::ScriptedBlend);
    }

    #[test]
    fn test_stale_team_holds_camera() {
        let mut fx = Fixture::new(&[4, 4]);
        let before = CameraTransform::from_yaw_pitch(glam::Vec3::new(1.0, 2.0, 3.0), 30.0, 0.0);
        fx.camera = before;

        let mut shot = Shot::team(7).with_duration(1.0);
        shot.initialize(&mut fx.ctx());
        assert_eq!(*shot.target(), before);

        shot.tick(&mut fx.ctx(), 0.5, 0.5);
        assert_eq!(fx.camera, before);
    }

    #[test]
    fn test_team_pan_follows_blend_factor() {
        let mut fx = Fixture::new(&[5]);
        let mut shot = Shot::team_pan(0);
        shot.initialize(&mut fx.ctx());
        assert_eq!(fx.view.team_pan_alpha, 0.5);

        let ShotKind::TeamPan { framing: Some(f), .. } = shot.kind().clone() else {
            panic!("pan shot should resolve its framing");
        };

        fx.view.team_pan_alpha = 1.0;
        shot.tick(&mut fx.ctx(), 0.1, 0.1);
        assert!(shot.target().distance_to(&f.end) < 1e-3);

        fx.view.team_pan_alpha = 0.0;
        for _ in 0..300 {
            shot.tick(&mut fx.ctx(), 0.1, 0.1);
        }
        assert!(fx.camera.distance_to(&f.start) < 0.01);
    }

    #[test]
    fn test_character_shot_targets_subject() {
        let mut fx = Fixture::new(&[3, 3]);
        let subject = fx.roster.team_members(1)[2];
        let mut shot = Shot::character(subject);
        shot.initialize(&mut fx.ctx());

        assert!(shot.flags().contains(CapabilityFlags::IS_PARTICIPANT_VIEW));
        assert_eq!(fx.view.viewed_participant, Some(subject));
        assert_eq!(fx.view.viewed_team, 1);
        assert_eq!(fx.view.shown, ShownSubject::Participant(subject));
        assert!(fx.view.highlights_latch_armed());

        let distance = fx.camera.distance_to(shot.target());
        shot.tick(&mut fx.ctx(), 0.1, 0.1);
        assert!(fx.camera.distance_to(shot.target()) < distance);
    }

    #[test]
    fn test_character_subject_leaving_holds_camera() {
        let mut fx = Fixture::new(&[3]);
        let subject = fx.roster.team_members(0)[0];
        let mut shot = Shot::character(subject);
        shot.initialize(&mut fx.ctx());
        shot.tick(&mut fx.ctx(), 0.1, 0.1);

        fx.roster.remove_participant(subject);
        let held = fx.camera;
        assert!(!shot.tick(&mut fx.ctx(), 0.2, 0.1));
        assert_eq!(fx.camera, held);
    }

    #[test]
    fn test_subject_resolves_tracks_roster() {
        let mut fx = Fixture::new(&[3]);
        let gone = ParticipantId(999);
        let mut shot = Shot::character(gone);
        shot.initialize(&mut fx.ctx());
        assert!(!shot.subject_resolves(&fx.roster));

        let subject = fx.roster.team_members(0)[0];
        let mut shot = Shot::character(subject);
        shot.initialize(&mut fx.ctx());
        assert!(shot.subject_resolves(&fx.roster));
        fx.roster.remove_participant(subject);
        assert!(!shot.subject_resolves(&fx.roster));

        let mut stale_team = Shot::team(5);
        stale_team.initialize(&mut fx.ctx());
        assert!(!stale_team.subject_resolves(&fx.roster));
    }

    #[test]
    fn test_composite_features_winning_team_after_match() {
        let mut fx = Fixture::new(&[4, 4]);
        fx.roster.set_winning_team(Some(1));
        let mut shot = Shot::composite();
        shot.initialize(&mut fx.ctx());

        assert!(shot.flags().contains(CapabilityFlags::IS_COMPOSITE_VIEW));
        assert_eq!(fx.view.shown, ShownSubject::All { featured_team: 1 });
        assert_eq!(*shot.target(), composite_framing(&fx.config, 4, 2));
    }
}
