//! Desktop implementation backed by the process environment and `who`.

use std::collections::HashMap;
use std::process::Command;

use sandsh_types::error::{Result, ShellError};

use crate::{IdentityService, SessionService};

/// Environment variables consulted for the user name, in order.
pub const IDENTITY_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Host services for desktop systems.
#[derive(Debug, Clone)]
pub struct DesktopPlatform {
    /// Snapshot of the identity variables.
    vars: HashMap<String, String>,
    /// Program that prints login sessions.
    who_program: String,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        let vars = IDENTITY_VARS
            .iter()
            .filter_map(|&name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
            .collect();
        Self {
            vars,
            who_program: "who".to_string(),
        }
    }

    /// Build from explicit variables instead of the process environment.
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            who_program: "who".to_string(),
        }
    }

    /// Use a different program for the session listing.
    pub fn with_who_program(mut self, program: impl Into<String>) -> Self {
        self.who_program = program.into();
        self
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityService for DesktopPlatform {
    /// The first non-empty identity variable, else the password database
    /// entry for the effective uid.
    fn user_name(&self) -> Result<String> {
        if let Some(name) = IDENTITY_VARS
            .iter()
            .filter_map(|name| self.vars.get(*name))
            .find(|value| !value.is_empty())
        {
            return Ok(name.clone());
        }
        account_name()
            .ok_or_else(|| ShellError::Platform("cannot determine user name".to_string()))
    }
}

/// Name of the effective user from the password database. A uid without an
/// entry is reported as its number.
#[cfg(unix)]
fn account_name() -> Option<String> {
    use nix::unistd::{User, geteuid};

    let uid = geteuid();
    match User::from_uid(uid) {
        Ok(Some(user)) if !user.name.is_empty() => Some(user.name),
        Ok(_) => {
            log::debug!("No password entry for uid {uid}");
            Some(uid.to_string())
        },
        Err(e) => {
            log::warn!("Password database lookup for uid {uid} failed: {e}");
            Some(uid.to_string())
        },
    }
}

#[cfg(not(unix))]
fn account_name() -> Option<String> {
    None
}

impl SessionService for DesktopPlatform {
    /// Run the session program and return its stdout.
    ///
    /// A host without the program yields an empty listing.
    fn sessions(&self) -> Result<String> {
        match Command::new(&self.who_program).output() {
            Ok(output) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            Err(e) => {
                log::warn!("{} unavailable: {e}", self.who_program);
                Ok(String::new())
            },
        }
    }
}
