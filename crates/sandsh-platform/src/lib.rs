//! Host service abstractions.
//!
//! The shell asks the host two questions: who is running it (`whoami`) and
//! who is logged in (`who`). Both go through traits so tests and embedders
//! can supply fixed answers.

mod desktop;

pub use desktop::{DesktopPlatform, IDENTITY_VARS};

use sandsh_types::error::Result;

/// Identity of the invoking user.
pub trait IdentityService {
    /// The user name, as the host reports it.
    fn user_name(&self) -> Result<String>;
}

/// Logged-in session listing.
pub trait SessionService {
    /// A description of current login sessions. Content is host-specific.
    fn sessions(&self) -> Result<String>;
}

/// Fixed answers for both services.
#[derive(Debug, Clone, Default)]
pub struct StaticPlatform {
    pub user: String,
    pub sessions: String,
}

impl StaticPlatform {
    pub fn new(user: impl Into<String>, sessions: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            sessions: sessions.into(),
        }
    }
}

impl IdentityService for StaticPlatform {
    fn user_name(&self) -> Result<String> {
        Ok(self.user.clone())
    }
}

impl SessionService for StaticPlatform {
    fn sessions(&self) -> Result<String> {
        Ok(self.sessions.clone())
    }
}
