//! Header navigation links for the current login state.

use serde::Serialize;

use crate::error::ClientError;
use crate::store::{SessionStore, is_logged_in};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKind {
    /// Plain navigation link.
    Link,
    /// Call-to-action link styled as a primary button.
    PrimaryButton,
    /// Button that runs the logout flow instead of navigating.
    LogoutButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    /// Target page; `None` for action buttons.
    pub href: Option<&'static str>,
    pub kind: NavKind,
}

impl NavLink {
    const fn link(label: &'static str, href: &'static str) -> Self {
        Self { label, href: Some(href), kind: NavKind::Link }
    }
}

const LOGGED_IN: [NavLink; 3] = [
    NavLink::link("Dashboard", "/dashboard.html"),
    NavLink::link("History", "/history.html"),
    NavLink { label: "Logout", href: None, kind: NavKind::LogoutButton },
];

const LOGGED_OUT: [NavLink; 2] = [
    NavLink::link("Login", "/login.html"),
    NavLink { label: "Get Started", href: Some("/register.html"), kind: NavKind::PrimaryButton },
];

#[must_use]
pub fn links_for(logged_in: bool) -> &'static [NavLink] {
    if logged_in { &LOGGED_IN } else { &LOGGED_OUT }
}

/// Links to show given whatever token `store` currently holds.
///
/// # Errors
///
/// Propagates storage read failures.
pub fn nav_links<S: SessionStore + ?Sized>(store: &S) -> Result<&'static [NavLink], ClientError> {
    Ok(links_for(is_logged_in(store)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn logged_out_shows_login_and_register() {
        let links = nav_links(&MemoryStore::new()).unwrap();
        let hrefs: Vec<_> = links.iter().filter_map(|l| l.href).collect();
        assert_eq!(hrefs, ["/login.html", "/register.html"]);
        assert_eq!(links[1].kind, NavKind::PrimaryButton);
    }

    #[test]
    fn logged_in_shows_dashboard_history_and_logout() {
        let links = nav_links(&MemoryStore::with_token("tok")).unwrap();
        let labels: Vec<_> = links.iter().map(|l| l.label).collect();
        assert_eq!(labels, ["Dashboard", "History", "Logout"]);
        assert_eq!(links[2].kind, NavKind::LogoutButton);
        assert_eq!(links[2].href, None);
    }

    #[test]
    fn nav_link_serializes_kind_snake_case() {
        let json = serde_json::to_value(&links_for(false)[1]).unwrap();
        assert_eq!(json["kind"], "primary_button");
        assert_eq!(json["href"], "/register.html");
    }
}
