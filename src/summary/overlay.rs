//! Overlay visibility derived from the active shot

use serde::Serialize;

use crate::camera::flags::CapabilityFlags;

/// Which overlay elements the UI should show this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OverlayVisibility {
    /// Next/previous buttons
    pub switcher_buttons: bool,
    /// Name of the viewed team or participant above the switcher
    pub switcher_label: bool,
    pub scoreboard: bool,
    pub xp_progress: bool,
    pub participant_names: bool,
    pub info_panel: bool,
    pub highlights: bool,
    /// Highlight rows of the viewed participant currently revealed
    pub highlight_rows: usize,
}

impl OverlayVisibility {
    /// Pure function of the active shot's flags and the own-highlights latch.
    pub fn from_flags(flags: CapabilityFlags, highlights_latch_armed: bool) -> Self {
        Self {
            switcher_buttons: flags.contains(CapabilityFlags::CAN_INTERACT)
                && !flags.contains(CapabilityFlags::IS_COMPOSITE_VIEW),
            switcher_label: flags.contains(CapabilityFlags::SHOW_OVERLAY_SWITCHER),
            scoreboard: flags.contains(CapabilityFlags::SHOW_SCOREBOARD),
            xp_progress: flags.contains(CapabilityFlags::SHOW_XP_PROGRESS)
                && highlights_latch_armed,
            participant_names: flags.contains(CapabilityFlags::SHOW_PARTICIPANT_NAMES),
            info_panel: flags.contains(CapabilityFlags::SHOW_INFO_PANEL),
            highlights: flags.contains(CapabilityFlags::SHOW_HIGHLIGHTS),
            highlight_rows: 0,
        }
    }
}

/// Rows revealed after `elapsed` seconds at `rate` rows per second, capped at `total`
pub fn revealed_rows(total: usize, elapsed: f32, rate: f32) -> usize {
    let revealed = (rate.max(0.0) * elapsed.max(0.0)).floor() as usize;
    revealed.min(total)
}
