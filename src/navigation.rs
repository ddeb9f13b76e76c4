//! Navigation effects.
//!
//! Page changes are returned as [`Redirect`] values instead of being performed
//! here. The caller (a page shell, the CLI) decides how to apply them.

use std::fmt;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::store::SessionStore;

/// Request to move the user to `location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    #[must_use]
    pub fn to(location: impl Into<String>) -> Self {
        Self { location: location.into() }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redirect to {}", self.location)
    }
}

/// Drop the stored token and send the user to the login page.
///
/// # Errors
///
/// Returns an error if the token could not be removed from storage.
pub fn logout<S: SessionStore + ?Sized>(store: &S, config: &ClientConfig) -> Result<Redirect, ClientError> {
    store.clear()?;
    tracing::debug!(location = %config.login_page, "session cleared");
    Ok(Redirect::to(config.login_page.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn logout_clears_token_and_targets_login_page() {
        let store = MemoryStore::with_token("tok");
        let redirect = logout(&store, &ClientConfig::default()).unwrap();
        assert_eq!(redirect, Redirect::to("/login.html"));
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn logout_when_already_logged_out_still_redirects() {
        let store = MemoryStore::new();
        let redirect = logout(&store, &ClientConfig::default()).unwrap();
        assert_eq!(redirect.location, "/login.html");
    }

    #[test]
    fn redirect_display() {
        assert_eq!(Redirect::to("/x").to_string(), "redirect to /x");
    }
}
