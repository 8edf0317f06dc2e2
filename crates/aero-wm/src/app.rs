//! The closed application registry.
//!
//! Every launchable application is a variant of [`AppKind`]; dispatch is
//! an exhaustive match, and each kind carries its own default geometry.

use aero_types::geometry::Size;
use serde::{Deserialize, Serialize};

/// The applications the desktop can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    Explorer,
    Browser,
    Notepad,
    Terminal,
    Editor,
    Settings,
    Calculator,
}

/// Static launch parameters declared by an application kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSpec {
    /// Title shown in the window chrome and taskbar.
    pub title: &'static str,
    /// Window size at launch.
    pub default_size: Size,
    /// Whether the app is allowed to enter picture-in-picture.
    pub pip_capable: bool,
}

impl AppKind {
    /// Every kind, in menu order.
    pub const ALL: [AppKind; 7] = [
        AppKind::Explorer,
        AppKind::Browser,
        AppKind::Notepad,
        AppKind::Terminal,
        AppKind::Editor,
        AppKind::Settings,
        AppKind::Calculator,
    ];

    /// The kind's static launch spec.
    pub fn spec(self) -> AppSpec {
        match self {
            AppKind::Explorer => AppSpec {
                title: "File Explorer",
                default_size: Size::new(800, 500),
                pip_capable: false,
            },
            AppKind::Browser => AppSpec {
                title: "Browser",
                default_size: Size::new(900, 600),
                pip_capable: true,
            },
            AppKind::Notepad => AppSpec {
                title: "Notepad",
                default_size: Size::new(600, 400),
                pip_capable: false,
            },
            AppKind::Terminal => AppSpec {
                title: "Terminal",
                default_size: Size::new(700, 450),
                pip_capable: false,
            },
            AppKind::Editor => AppSpec {
                title: "Code Editor",
                default_size: Size::new(900, 600),
                pip_capable: false,
            },
            AppKind::Settings => AppSpec {
                title: "Settings",
                default_size: Size::new(700, 500),
                pip_capable: false,
            },
            AppKind::Calculator => AppSpec {
                title: "Calculator",
                default_size: Size::new(300, 400),
                pip_capable: false,
            },
        }
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spec().title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_spec() {
        for kind in AppKind::ALL {
            let spec = kind.spec();
            assert!(!spec.title.is_empty());
            assert!(spec.default_size.w > 0);
            assert!(spec.default_size.h > 0);
        }
    }

    #[test]
    fn explorer_defaults() {
        let spec = AppKind::Explorer.spec();
        assert_eq!(spec.title, "File Explorer");
        assert_eq!(spec.default_size, Size::new(800, 500));
    }

    #[test]
    fn browser_is_pip_capable() {
        assert!(AppKind::Browser.spec().pip_capable);
        assert!(!AppKind::Calculator.spec().pip_capable);
    }

    #[test]
    fn display_is_the_title() {
        assert_eq!(format!("{}", AppKind::Notepad), "Notepad");
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        assert_eq!(serde_json::to_string(&AppKind::Explorer).unwrap(), "\"explorer\"");
        let back: AppKind = serde_json::from_str("\"terminal\"").unwrap();
        assert_eq!(back, AppKind::Terminal);
    }
}
