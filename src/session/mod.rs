//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! Application root
//!     → SessionStore::init(user, token)      (seeded from a verified token)
//!     → SessionStore::login / logout         (UI actions, pipeline on 401)
//!     → state.rs snapshot replaced atomically
//!     → observers (navigation.rs) run inline
//!     → broadcast subscribers notified
//!
//! Request pipeline
//!     → SessionStore::token() per dispatch
//! ```
//!
//! # Design Decisions
//! - One store per application, passed explicitly to the pipeline
//! - Only init/login/logout/set_loading mutate the session
//! - Navigation is an observer, not part of the pipeline

pub mod navigation;
pub mod state;
pub mod store;

pub use navigation::{Navigator, RecordingNavigator, SignInRedirect};
pub use state::{Identity, Session};
pub use store::{SessionEvent, SessionObserver, SessionStore};
