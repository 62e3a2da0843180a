//! Capability flags attached to a shot

use bitflags::bitflags;

bitflags! {
    /// Which overlay elements the active shot permits, and what kind of view it is
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CapabilityFlags: u32 {
        const CAN_INTERACT = 1 << 0;
        const SHOW_OVERLAY_SWITCHER = 1 << 1;
        const SHOW_PARTICIPANT_NAMES = 1 << 2;
        const SHOW_INFO_PANEL = 1 << 3;
        const SHOW_SCOREBOARD = 1 << 4;
        const SHOW_XP_PROGRESS = 1 << 5;
        const IS_TEAM_VIEW = 1 << 6;
        const IS_PARTICIPANT_VIEW = 1 << 7;
        const IS_COMPOSITE_VIEW = 1 << 8;
        const IS_INTRO_SEQUENCE = 1 << 9;
        const SHOW_HIGHLIGHTS = 1 << 10;

        // Flags each variant adds when it activates
        const TEAM_VIEW = Self::SHOW_OVERLAY_SWITCHER.bits()
            | Self::SHOW_PARTICIPANT_NAMES.bits()
            | Self::IS_TEAM_VIEW.bits();

        const PARTICIPANT_VIEW = Self::SHOW_OVERLAY_SWITCHER.bits()
            | Self::SHOW_INFO_PANEL.bits()
            | Self::IS_PARTICIPANT_VIEW.bits();
    }
}
