//! Headless Summary Runner
//!
//! Plays the summary camera over a synthetic roster and reports the shot
//! transitions and the final camera pose.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use match_summary::camera::CameraTransform;
use match_summary::core::{load_camera_config, CameraConfig, FrameContext, MatchState, Result};
use match_summary::roster::{LineupRoster, MatchRoster};
use match_summary::summary::{CloseOutcome, OverlayVisibility, RecordingSink, SummaryController};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StateArg {
    Waiting,
    Active,
    Post,
}

impl From<StateArg> for MatchState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Waiting => MatchState::WaitingToStart,
            StateArg::Active => MatchState::Active,
            StateArg::Post => MatchState::PostMatch,
        }
    }
}

/// A UI command issued at a point in time, written `SECONDS:COMMAND`
///
/// Commands: `all`, `team=N`, `player=N` (index into participant order),
/// `next`, `prev`, `zoom`, `drag=DX`, `close`.
#[derive(Debug, Clone)]
struct ScriptedCommand {
    at: f32,
    command: Command,
}

#[derive(Debug, Clone)]
enum Command {
    ViewAll,
    ViewTeam(usize),
    ViewPlayer(usize),
    Next,
    Previous,
    ZoomOut,
    Drag(f32),
    Close,
}

impl FromStr for ScriptedCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (at, command) = s
            .split_once(':')
            .ok_or_else(|| format!("expected SECONDS:COMMAND, got '{}'", s))?;
        let at: f32 = at.parse().map_err(|e| format!("bad time '{}': {}", at, e))?;

        let (name, value) = match command.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (command, None),
        };
        let arg = |what: &str| value.ok_or_else(|| format!("'{}' needs ={}", name, what));

        let command = match name {
            "all" => Command::ViewAll,
            "team" => Command::ViewTeam(arg("N")?.parse().map_err(|e| format!("{}", e))?),
            "player" => Command::ViewPlayer(arg("N")?.parse().map_err(|e| format!("{}", e))?),
            "next" => Command::Next,
            "prev" => Command::Previous,
            "zoom" => Command::ZoomOut,
            "drag" => Command::Drag(arg("DX")?.parse().map_err(|e| format!("{}", e))?),
            "close" => Command::Close,
            other => return Err(format!("unknown command '{}'", other)),
        };
        Ok(Self { at, command })
    }
}

/// Headless Summary Runner - play the match summary camera without a renderer
#[derive(Parser, Debug)]
#[command(name = "summary_sim")]
#[command(about = "Run the match summary camera over a synthetic roster")]
struct Args {
    /// Number of teams
    #[arg(long, default_value_t = 2)]
    teams: usize,

    /// Participants per team
    #[arg(long, default_value_t = 5)]
    team_size: usize,

    /// Match state the summary opens in
    #[arg(long, value_enum, default_value_t = StateArg::Post)]
    state: StateArg,

    /// Seconds to simulate
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Camera config TOML (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for highlight scores and the winning team
    #[arg(long)]
    seed: Option<u64>,

    /// UI command at a time, e.g. `4.5:all` or `10:drag=120` (repeatable)
    #[arg(long = "at")]
    script: Vec<ScriptedCommand>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct Transition {
    time: f32,
    frame: u64,
    index: usize,
    shot: &'static str,
    flags: String,
}

#[derive(Serialize)]
struct Pose {
    position: [f32; 3],
    yaw_degrees: f32,
    pitch_degrees: f32,
}

impl From<&CameraTransform> for Pose {
    fn from(t: &CameraTransform) -> Self {
        Self {
            position: t.position.to_array(),
            yaw_degrees: t.yaw_degrees(),
            pitch_degrees: t.pitch_degrees(),
        }
    }
}

#[derive(Serialize)]
struct SummaryReport {
    match_state: String,
    teams: usize,
    team_size: usize,
    winning_team: Option<usize>,
    seed: u64,
    frames: u64,
    transitions: Vec<Transition>,
    final_camera: Pose,
    final_overlay: OverlayVisibility,
    close_requested: bool,
}

fn build_roster(args: &Args, config: &CameraConfig, rng: &mut ChaCha8Rng) -> Result<LineupRoster> {
    let sizes = vec![args.team_size; args.teams];
    let mut roster = LineupRoster::with_teams(config, &sizes, args.state.into());

    for id in roster.participant_order() {
        let score = rng.gen_range(0.0..100.0);
        let count = rng.gen_range(0..=5);
        roster.set_highlights(id, score, count)?;
    }

    if args.teams > 1 {
        roster.set_winning_team(Some(rng.gen_range(0..args.teams)));
    }

    let order = roster.participant_order();
    if !order.is_empty() {
        roster.set_local_participant(Some(order[rng.gen_range(0..order.len())]))?;
    }
    Ok(roster)
}

fn apply(
    controller: &mut SummaryController,
    roster: &LineupRoster,
    command: &Command,
) -> Option<CloseOutcome> {
    match command {
        Command::ViewAll => controller.view_all(roster),
        Command::ViewTeam(team) => controller.view_team(roster, *team),
        Command::ViewPlayer(index) => {
            if let Some(&id) = roster.participant_order().get(*index) {
                controller.view_participant(roster, id);
            } else {
                tracing::warn!("No participant at order index {}", index);
            }
        }
        Command::Next => controller.advance_switcher(roster, 1),
        Command::Previous => controller.advance_switcher(roster, -1),
        Command::ZoomOut => controller.zoom_out(roster),
        Command::Drag(dx) => {
            controller.drag_team_pan(*dx);
        }
        Command::Close => return Some(controller.close(roster)),
    }
    None
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("match_summary=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_camera_config(path)?,
        None => CameraConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let roster = build_roster(&args, &config, &mut rng)?;

    let mut script = args.script.clone();
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut script = script.into_iter().peekable();

    let mut controller = SummaryController::new(config, &roster);
    let mut sink = RecordingSink::default();
    let mut transitions = Vec::new();
    let mut last_index = None;
    let mut rebuilt = true;
    let mut close_requested = false;

    let dt = args.dt.max(1e-4);
    let frames = (args.seconds.max(0.0) / dt).ceil() as u64;
    let mut overlay = controller.overlay(&roster);

    for frame in 0..frames {
        let time = frame as f32 * dt;

        while let Some(next) = script.next_if(|c| c.at <= time) {
            tracing::info!(time, command = ?next.command, "Scripted command");
            let outcome = apply(&mut controller, &roster, &next.command);
            if outcome == Some(CloseOutcome::CloseRequested) {
                close_requested = true;
            }
            // Commands install a fresh list, which restarts at index 0
            rebuilt = true;
        }
        if close_requested {
            break;
        }

        overlay = controller.tick(&roster, &FrameContext::new(dt, frame), &mut sink);

        let index = controller.shots().active_index();
        if rebuilt || index != last_index {
            if let (Some(index), Some(shot)) = (index, controller.active_shot()) {
                transitions.push(Transition {
                    time,
                    frame,
                    index,
                    shot: shot.name(),
                    flags: format!("{:?}", shot.flags()),
                });
            }
            last_index = index;
            rebuilt = false;
        }
    }

    let report = SummaryReport {
        match_state: format!("{:?}", controller.match_state()),
        teams: args.teams,
        team_size: args.team_size,
        winning_team: roster.winning_team(),
        seed,
        frames: sink.pushes as u64,
        transitions,
        final_camera: Pose::from(controller.camera()),
        final_overlay: overlay,
        close_requested,
    };

    match args.format.as_str() {
        "text" => {
            println!("Match Summary");
            println!("=============");
            println!("State: {}", report.match_state);
            println!("Teams: {} x {}", report.teams, report.team_size);
            println!("Seed: {}", report.seed);
            println!("Frames: {}", report.frames);
            println!();
            println!("Shots:");
            for t in &report.transitions {
                println!("  {:>7.2}s  #{} {:<10} {}", t.time, t.index, t.shot, t.flags);
            }
            println!();
            let p = &report.final_camera;
            println!(
                "Camera: ({:.1}, {:.1}, {:.1}) yaw {:.1} pitch {:.1}",
                p.position[0], p.position[1], p.position[2], p.yaw_degrees, p.pitch_degrees
            );
            if report.close_requested {
                println!("Summary closed by request");
            }
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
