//! Desktop configuration (`desk.toml`).
//!
//! Every geometric constant the window manager consults lives here so that
//! a host can reconfigure the simulated screen without touching code. All
//! fields have defaults; an empty TOML document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable parameters of the simulated desktop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Simulated screen width in pixels.
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    /// Simulated screen height in pixels.
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
    /// Height reserved for the taskbar at the bottom of the screen.
    #[serde(default = "default_taskbar_height")]
    pub taskbar_height: u32,
    /// Offset applied per already-open window when cascading new windows.
    #[serde(default = "default_cascade_step")]
    pub cascade_step: i32,
    /// Minimum window width during interactive resize.
    #[serde(default = "default_min_window_width")]
    pub min_window_width: u32,
    /// Minimum window height during interactive resize.
    #[serde(default = "default_min_window_height")]
    pub min_window_height: u32,
    /// Width of a picture-in-picture window.
    #[serde(default = "default_pip_width")]
    pub pip_width: u32,
    /// Height of a picture-in-picture window.
    #[serde(default = "default_pip_height")]
    pub pip_height: u32,
    /// Margin between a PiP window and the screen corner.
    #[serde(default = "default_pip_margin")]
    pub pip_margin: u32,
    /// Reduced minimum width while in PiP mode.
    #[serde(default = "default_pip_min_width")]
    pub pip_min_width: u32,
    /// Reduced minimum height while in PiP mode.
    #[serde(default = "default_pip_min_height")]
    pub pip_min_height: u32,
}

fn default_screen_width() -> u32 {
    1920
}
fn default_screen_height() -> u32 {
    1080
}
fn default_taskbar_height() -> u32 {
    48
}
fn default_cascade_step() -> i32 {
    20
}
fn default_min_window_width() -> u32 {
    300
}
fn default_min_window_height() -> u32 {
    200
}
fn default_pip_width() -> u32 {
    320
}
fn default_pip_height() -> u32 {
    180
}
fn default_pip_margin() -> u32 {
    16
}
fn default_pip_min_width() -> u32 {
    160
}
fn default_pip_min_height() -> u32 {
    90
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            taskbar_height: default_taskbar_height(),
            cascade_step: default_cascade_step(),
            min_window_width: default_min_window_width(),
            min_window_height: default_min_window_height(),
            pip_width: default_pip_width(),
            pip_height: default_pip_height(),
            pip_margin: default_pip_margin(),
            pip_min_width: default_pip_min_width(),
            pip_min_height: default_pip_min_height(),
        }
    }
}

impl DeskConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The desktop area available to windows (screen minus taskbar).
    pub fn work_area_height(&self) -> u32 {
        self.screen_height.saturating_sub(self.taskbar_height)
    }
}
