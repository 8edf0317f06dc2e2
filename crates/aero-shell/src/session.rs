//! Boot, login and lock state.
//!
//! The authentication flow is cosmetic by design: passwords are compared
//! in memory and nothing is hashed. What matters is the state machine --
//! boot leads to the login screen, a session can be locked and resumed,
//! and logout/shutdown tear windows down (the shell drives that part).

use aero_types::error::{AeroError, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// How the system was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootMode {
    #[default]
    Normal,
    SafeMode,
}

/// Where the session is in the auth flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    #[default]
    LoggedOut,
    LoggedIn,
    Locked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

/// A local account on the simulated machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    /// Plain text, simulation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallpaper: Option<String>,
}

impl UserProfile {
    /// The two accounts every fresh install ships with.
    pub fn default_users() -> Vec<UserProfile> {
        vec![
            UserProfile {
                id: "admin_01".to_string(),
                name: "Admin".to_string(),
                role: UserRole::Admin,
                password: None,
                theme: Theme::Dark,
                wallpaper: None,
            },
            UserProfile {
                id: "guest_01".to_string(),
                name: "Guest User".to_string(),
                role: UserRole::Guest,
                password: None,
                theme: Theme::Light,
                wallpaper: None,
            },
        ]
    }
}

/// The session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub booting: bool,
    pub boot_mode: BootMode,
    pub auth: AuthStatus,
    /// Id of the logged-in (or locked) user.
    pub current_user: Option<String>,
    /// Seconds since boot finished.
    pub uptime_secs: u64,
    /// Output volume, 0-100.
    pub volume: u8,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            booting: true,
            boot_mode: BootMode::Normal,
            auth: AuthStatus::LoggedOut,
            current_user: None,
            uptime_secs: 0,
            volume: 50,
        }
    }
}

impl SessionState {
    /// The boot sequence completed; the login screen is up.
    pub fn finish_boot(&mut self) {
        self.booting = false;
    }

    /// Log a user in. The password check is cosmetic: it only compares
    /// against the profile's stored plain text, if any.
    pub fn login(&mut self, users: &[UserProfile], user_id: &str, password: Option<&str>) -> Result<()> {
        if self.booting {
            return Err(AeroError::Session("still booting".into()));
        }
        let user = users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AeroError::Session(format!("unknown user: {user_id}")))?;
        if let Some(expected) = &user.password
            && password != Some(expected.as_str())
        {
            return Err(AeroError::Session("wrong password".into()));
        }
        info!("login: {}", user.name);
        self.current_user = Some(user.id.clone());
        self.auth = AuthStatus::LoggedIn;
        Ok(())
    }

    /// Lock the session, keeping the current user.
    pub fn lock(&mut self) {
        if self.auth == AuthStatus::LoggedIn {
            self.auth = AuthStatus::Locked;
        }
    }

    /// Unlock a locked session (same cosmetic password rule as login).
    pub fn unlock(&mut self, users: &[UserProfile], password: Option<&str>) -> Result<()> {
        if self.auth != AuthStatus::Locked {
            return Err(AeroError::Session("not locked".into()));
        }
        let id = self
            .current_user
            .clone()
            .ok_or_else(|| AeroError::Session("no user to unlock".into()))?;
        // One credential path: login only mutates state on success, so a
        // failed unlock leaves the session locked.
        self.login(users, &id, password)
    }

    /// End the session entirely.
    pub fn logout(&mut self) {
        info!("logout");
        self.auth = AuthStatus::LoggedOut;
        self.current_user = None;
    }

    /// Power off: back to the boot screen, session gone.
    pub fn shutdown(&mut self) {
        info!("shutdown");
        self.booting = true;
        self.auth = AuthStatus::LoggedOut;
        self.current_user = None;
        self.uptime_secs = 0;
    }

    /// Reboot, optionally into safe mode.
    pub fn restart(&mut self, safe_mode: bool) {
        info!("restart (safe_mode: {safe_mode})");
        self.shutdown();
        self.boot_mode = if safe_mode { BootMode::SafeMode } else { BootMode::Normal };
    }

    /// Advance the uptime clock (driven by the host's timer tick).
    pub fn tick(&mut self, secs: u64) {
        if !self.booting {
            self.uptime_secs += secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> (SessionState, Vec<UserProfile>) {
        let mut s = SessionState::default();
        s.finish_boot();
        (s, UserProfile::default_users())
    }

    #[test]
    fn fresh_session_is_booting() {
        let s = SessionState::default();
        assert!(s.booting);
        assert_eq!(s.auth, AuthStatus::LoggedOut);
        assert_eq!(s.volume, 50);
    }

    #[test]
    fn login_while_booting_fails() {
        let mut s = SessionState::default();
        let users = UserProfile::default_users();
        assert!(s.login(&users, "guest_01", None).is_err());
    }

    #[test]
    fn login_unknown_user_fails() {
        let (mut s, users) = ready_session();
        assert!(s.login(&users, "nobody", None).is_err());
        assert_eq!(s.auth, AuthStatus::LoggedOut);
    }

    #[test]
    fn login_succeeds_without_password() {
        let (mut s, users) = ready_session();
        s.login(&users, "guest_01", None).unwrap();
        assert_eq!(s.auth, AuthStatus::LoggedIn);
        assert_eq!(s.current_user.as_deref(), Some("guest_01"));
    }

    #[test]
    fn login_checks_stored_password() {
        let (mut s, mut users) = ready_session();
        users[0].password = Some("hunter2".to_string());
        assert!(s.login(&users, "admin_01", None).is_err());
        assert!(s.login(&users, "admin_01", Some("wrong")).is_err());
        s.login(&users, "admin_01", Some("hunter2")).unwrap();
        assert_eq!(s.auth, AuthStatus::LoggedIn);
    }

    #[test]
    fn lock_and_unlock_keep_user() {
        let (mut s, users) = ready_session();
        s.login(&users, "guest_01", None).unwrap();
        s.lock();
        assert_eq!(s.auth, AuthStatus::Locked);
        assert_eq!(s.current_user.as_deref(), Some("guest_01"));
        s.unlock(&users, None).unwrap();
        assert_eq!(s.auth, AuthStatus::LoggedIn);
    }

    #[test]
    fn unlock_with_wrong_password_stays_locked() {
        let (mut s, mut users) = ready_session();
        users[1].password = Some("secret".to_string());
        s.login(&users, "guest_01", Some("secret")).unwrap();
        s.lock();
        assert!(s.unlock(&users, Some("nope")).is_err());
        assert_eq!(s.auth, AuthStatus::Locked);
    }

    #[test]
    fn lock_when_logged_out_is_noop() {
        let (mut s, _) = ready_session();
        s.lock();
        assert_eq!(s.auth, AuthStatus::LoggedOut);
    }

    #[test]
    fn logout_clears_user() {
        let (mut s, users) = ready_session();
        s.login(&users, "guest_01", None).unwrap();
        s.logout();
        assert_eq!(s.auth, AuthStatus::LoggedOut);
        assert!(s.current_user.is_none());
    }

    #[test]
    fn shutdown_resets_to_boot() {
        let (mut s, users) = ready_session();
        s.login(&users, "guest_01", None).unwrap();
        s.tick(30);
        s.shutdown();
        assert!(s.booting);
        assert_eq!(s.uptime_secs, 0);
        assert!(s.current_user.is_none());
    }

    #[test]
    fn restart_safe_mode_sets_boot_mode() {
        let (mut s, _) = ready_session();
        s.restart(true);
        assert!(s.booting);
        assert_eq!(s.boot_mode, BootMode::SafeMode);
        s.restart(false);
        assert_eq!(s.boot_mode, BootMode::Normal);
    }

    #[test]
    fn uptime_ticks_only_after_boot() {
        let mut s = SessionState::default();
        s.tick(5);
        assert_eq!(s.uptime_secs, 0);
        s.finish_boot();
        s.tick(5);
        s.tick(2);
        assert_eq!(s.uptime_secs, 7);
    }

    #[test]
    fn default_users_cover_admin_and_guest() {
        let users = UserProfile::default_users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role, UserRole::Admin);
        assert_eq!(users[0].theme, Theme::Dark);
        assert_eq!(users[1].role, UserRole::Guest);
        assert_eq!(users[1].theme, Theme::Light);
    }
}
