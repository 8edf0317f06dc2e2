//! The shell: composition root for the desktop core.
//!
//! Owns the window manager and the file store as explicit stores and
//! wires the session, overlay and policy rules around their operations.

use aero_types::config::DeskConfig;
use aero_types::error::Result;
use aero_types::id::WindowId;
use aero_vfs::FileStore;
use aero_wm::{AppKind, LaunchParams, WindowManager};
use log::warn;

use crate::overlay::{OverlayPanel, OverlayState};
use crate::policy::FirewallPolicy;
use crate::session::{SessionState, UserProfile};

/// What came of a launch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A window was created and focused.
    Launched(WindowId),
    /// The firewall refused the app; no window record was created. The
    /// payload feeds the user-visible notice.
    Blocked(AppKind),
}

/// The composed desktop shell.
pub struct Shell {
    pub wm: WindowManager,
    pub fs: FileStore,
    pub session: SessionState,
    pub overlays: OverlayState,
    pub firewall: FirewallPolicy,
    users: Vec<UserProfile>,
}

impl Shell {
    pub fn new(config: DeskConfig) -> Self {
        Self {
            wm: WindowManager::new(config),
            fs: FileStore::default(),
            session: SessionState::default(),
            overlays: OverlayState::default(),
            firewall: FirewallPolicy::default(),
            users: UserProfile::default_users(),
        }
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&UserProfile> {
        self.users.iter().find(|u| u.id == id)
    }

    /// The profile of the logged-in user, if any.
    pub fn current_user(&self) -> Option<&UserProfile> {
        let id = self.session.current_user.as_deref()?;
        self.user(id)
    }

    /// Launch an app through the policy layer. A successful launch closes
    /// any open overlay panel (focus moved to the new window).
    pub fn launch_app(&mut self, app: AppKind, params: LaunchParams) -> LaunchOutcome {
        if self.firewall.is_blocked(app) {
            warn!("launch of {app} blocked by firewall policy");
            return LaunchOutcome::Blocked(app);
        }
        self.overlays.close_all();
        LaunchOutcome::Launched(self.wm.launch(app, params))
    }

    /// Toggle an overlay panel (the panels are mutually exclusive).
    pub fn toggle_panel(&mut self, panel: OverlayPanel) {
        self.overlays.toggle(panel);
    }

    /// Log a user in and dismiss any overlay left from the lock screen.
    pub fn login(&mut self, user_id: &str, password: Option<&str>) -> Result<()> {
        self.session.login(&self.users, user_id, password)?;
        self.overlays.close_all();
        Ok(())
    }

    pub fn lock(&mut self) {
        self.session.lock();
        self.overlays.close_all();
    }

    pub fn unlock(&mut self, password: Option<&str>) -> Result<()> {
        self.session.unlock(&self.users, password)
    }

    /// End the session: windows are torn down, files stay.
    pub fn logout(&mut self) {
        self.session.logout();
        self.wm.clear();
        self.overlays.close_all();
    }

    pub fn shutdown(&mut self) {
        self.session.shutdown();
        self.wm.clear();
        self.overlays.close_all();
    }

    pub fn restart(&mut self, safe_mode: bool) {
        self.session.restart(safe_mode);
        self.wm.clear();
        self.overlays.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthStatus;

    fn logged_in_shell() -> Shell {
        let mut shell = Shell::new(DeskConfig::default());
        shell.session.finish_boot();
        shell.login("guest_01", None).unwrap();
        shell
    }

    #[test]
    fn launch_creates_window_and_closes_overlays() {
        let mut shell = logged_in_shell();
        shell.toggle_panel(OverlayPanel::StartMenu);

        let outcome = shell.launch_app(AppKind::Explorer, LaunchParams::default());
        let LaunchOutcome::Launched(id) = outcome else {
            panic!("expected a launch");
        };
        assert!(shell.wm.get(id).is_some());
        assert!(shell.overlays.open_panel().is_none());
        assert_eq!(shell.wm.focused_id(), Some(id));
    }

    #[test]
    fn blocked_launch_creates_no_window() {
        let mut shell = logged_in_shell();
        shell.firewall.block(AppKind::Browser);

        let before = shell.wm.windows().len();
        let outcome = shell.launch_app(AppKind::Browser, LaunchParams::default());
        assert_eq!(outcome, LaunchOutcome::Blocked(AppKind::Browser));
        assert_eq!(shell.wm.windows().len(), before);
    }

    #[test]
    fn blocked_launch_leaves_overlays_alone() {
        let mut shell = logged_in_shell();
        shell.firewall.block(AppKind::Browser);
        shell.toggle_panel(OverlayPanel::Widgets);
        shell.launch_app(AppKind::Browser, LaunchParams::default());
        // Nothing was focused, so the panel stays.
        assert!(shell.overlays.is_open(OverlayPanel::Widgets));
    }

    #[test]
    fn unblocking_allows_launch_again() {
        let mut shell = logged_in_shell();
        shell.firewall.block(AppKind::Terminal);
        assert!(matches!(
            shell.launch_app(AppKind::Terminal, LaunchParams::default()),
            LaunchOutcome::Blocked(_)
        ));
        shell.firewall.unblock(AppKind::Terminal);
        assert!(matches!(
            shell.launch_app(AppKind::Terminal, LaunchParams::default()),
            LaunchOutcome::Launched(_)
        ));
    }

    #[test]
    fn logout_clears_windows_but_keeps_files() {
        let mut shell = logged_in_shell();
        shell.launch_app(AppKind::Notepad, LaunchParams::default());
        let docs = shell.fs.create_folder(shell.fs.root(), "docs").unwrap();

        shell.logout();
        assert!(shell.wm.windows().is_empty());
        assert_eq!(shell.session.auth, AuthStatus::LoggedOut);
        assert!(shell.fs.get(docs).is_some());
    }

    #[test]
    fn shutdown_clears_windows_and_reboots() {
        let mut shell = logged_in_shell();
        shell.launch_app(AppKind::Notepad, LaunchParams::default());
        shell.shutdown();
        assert!(shell.wm.windows().is_empty());
        assert!(shell.session.booting);
    }

    #[test]
    fn restart_safe_mode() {
        let mut shell = logged_in_shell();
        shell.restart(true);
        assert!(shell.wm.windows().is_empty());
        assert_eq!(shell.session.boot_mode, crate::session::BootMode::SafeMode);
    }

    #[test]
    fn lock_keeps_windows() {
        let mut shell = logged_in_shell();
        shell.launch_app(AppKind::Notepad, LaunchParams::default());
        shell.lock();
        assert_eq!(shell.session.auth, AuthStatus::Locked);
        assert_eq!(shell.wm.windows().len(), 1);
        shell.unlock(None).unwrap();
        assert_eq!(shell.session.auth, AuthStatus::LoggedIn);
        assert_eq!(shell.wm.windows().len(), 1);
    }

    #[test]
    fn current_user_profile() {
        let shell = logged_in_shell();
        let user = shell.current_user().unwrap();
        assert_eq!(user.id, "guest_01");
    }
}
