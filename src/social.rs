//! Social login providers and their redirect targets.

use std::fmt;
use std::str::FromStr;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::navigation::Redirect;

/// Class every social login button carries.
pub const SOCIAL_BUTTON_CLASS: &str = "btn-social";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialProvider {
    Google,
    Facebook,
    Apple,
}

impl SocialProvider {
    /// Providers in the order a button's classes are checked.
    pub const ALL: [Self; 3] = [Self::Google, Self::Facebook, Self::Apple];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Apple => "apple",
        }
    }

    /// Class marking a button as belonging to this provider.
    #[must_use]
    pub fn button_class(self) -> &'static str {
        match self {
            Self::Google => "btn-google",
            Self::Facebook => "btn-facebook",
            Self::Apple => "btn-apple",
        }
    }

    /// Resolve the provider of a clicked element from its class list.
    ///
    /// Returns `None` unless the element is a social button with a known
    /// provider class. When several provider classes are present the first in
    /// [`Self::ALL`] wins.
    #[must_use]
    pub fn from_classes<'a, I>(classes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<&str> = classes.into_iter().collect();
        if !classes.contains(&SOCIAL_BUTTON_CLASS) {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|provider| classes.contains(&provider.button_class()))
    }

    /// Where the browser goes to start this provider's OAuth flow.
    #[must_use]
    pub fn login_redirect(self, config: &ClientConfig) -> Redirect {
        Redirect::to(format!("{}/{}", config.social_login_base, self.as_str()))
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialProvider {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            "apple" => Ok(Self::Apple),
            _ => Err(ClientError::UnknownProvider(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "social_test.rs"]
mod social_test;
