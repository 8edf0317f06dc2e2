//! Transient overlay panels.
//!
//! The start menu, quick settings, widgets board, notification center,
//! assistant and calendar flyout are mutually exclusive: opening any one
//! closes the others, and launching an app closes whichever is open.

use serde::{Deserialize, Serialize};

/// The overlay panels the taskbar can summon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPanel {
    StartMenu,
    QuickSettings,
    Widgets,
    NotificationCenter,
    Assistant,
    Calendar,
    TaskView,
}

/// At most one overlay panel is open at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayState {
    open: Option<OverlayPanel>,
}

impl OverlayState {
    /// Toggle a panel: opening it closes any other panel; toggling the
    /// open panel closes it.
    pub fn toggle(&mut self, panel: OverlayPanel) {
        self.open = if self.open == Some(panel) {
            None
        } else {
            Some(panel)
        };
    }

    /// Close whatever is open.
    pub fn close_all(&mut self) {
        self.open = None;
    }

    pub fn open_panel(&self) -> Option<OverlayPanel> {
        self.open
    }

    pub fn is_open(&self, panel: OverlayPanel) -> bool {
        self.open == Some(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_and_closes() {
        let mut o = OverlayState::default();
        assert!(o.open_panel().is_none());
        o.toggle(OverlayPanel::StartMenu);
        assert!(o.is_open(OverlayPanel::StartMenu));
        o.toggle(OverlayPanel::StartMenu);
        assert!(o.open_panel().is_none());
    }

    #[test]
    fn opening_one_panel_closes_the_other() {
        let mut o = OverlayState::default();
        o.toggle(OverlayPanel::StartMenu);
        o.toggle(OverlayPanel::Calendar);
        assert!(!o.is_open(OverlayPanel::StartMenu));
        assert!(o.is_open(OverlayPanel::Calendar));
    }

    #[test]
    fn close_all() {
        let mut o = OverlayState::default();
        o.toggle(OverlayPanel::Widgets);
        o.close_all();
        assert!(o.open_panel().is_none());
        // Closing an already-closed state is harmless.
        o.close_all();
        assert!(o.open_panel().is_none());
    }
}
