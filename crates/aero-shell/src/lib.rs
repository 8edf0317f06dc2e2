//! Session shell for aero.
//!
//! The shell is the consumer of the two core components: it owns the
//! window manager and the file store as explicit stores (never globals),
//! layers the login/lock state machine, the mutually exclusive overlay
//! panels, and the firewall launch policy on top, and persists both
//! collections as best-effort JSON snapshots.

mod overlay;
mod policy;
mod session;
mod shell;
mod snapshot;

pub use overlay::{OverlayPanel, OverlayState};
pub use policy::FirewallPolicy;
pub use session::{AuthStatus, BootMode, SessionState, Theme, UserProfile, UserRole};
pub use shell::{LaunchOutcome, Shell};
pub use snapshot::{FILES_KEY, MemoryStateStore, StateStore, WINDOWS_KEY, load_state, save_state};
