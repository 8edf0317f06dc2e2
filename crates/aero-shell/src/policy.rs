//! Firewall-style launch policy.
//!
//! A blocked app never gets a window record; the launch is reported as a
//! typed no-op outcome with a user-visible explanation, never an error.

use std::collections::BTreeSet;

use aero_wm::AppKind;
use serde::{Deserialize, Serialize};

/// The set of applications an administrator has blocked from launching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallPolicy {
    blocked: BTreeSet<AppKind>,
}

impl FirewallPolicy {
    pub fn block(&mut self, app: AppKind) {
        self.blocked.insert(app);
    }

    pub fn unblock(&mut self, app: AppKind) {
        self.blocked.remove(&app);
    }

    pub fn is_blocked(&self, app: AppKind) -> bool {
        self.blocked.contains(&app)
    }

    /// Blocked kinds, for the admin-center listing.
    pub fn blocked(&self) -> impl Iterator<Item = AppKind> + '_ {
        self.blocked.iter().copied()
    }
}
