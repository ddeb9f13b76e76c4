//! Authenticated API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page that talks to the backend goes through [`ApiClient::call`]. It
//! attaches the stored bearer token, encodes the body, sends exactly once and
//! turns a `401` into a forced logout. Everything else about the response is
//! the caller's business.
//!
//! ERROR HANDLING
//! ==============
//! A `401` is an expected outcome, not an error: the caller gets
//! [`ApiOutcome::LoggedOut`] with the redirect to apply. Transport failures
//! surface as [`ClientError::Http`]. There is no retry and no timeout.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::nav::{NavLink, nav_links};
use crate::navigation::{self, Redirect};
use crate::request::ApiRequest;
use crate::store::{SessionStore, is_logged_in};

/// Result of a completed call.
#[derive(Debug)]
pub enum ApiOutcome {
    /// Any non-401 response, untouched.
    Response(reqwest::Response),
    /// The server rejected the session. The token has been cleared and the
    /// response must not be processed.
    LoggedOut(Redirect),
}

impl ApiOutcome {
    /// The response, or `None` after a forced logout.
    #[must_use]
    pub fn into_response(self) -> Option<reqwest::Response> {
        match self {
            Self::Response(response) => Some(response),
            Self::LoggedOut(_) => None,
        }
    }

    #[must_use]
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Response(_) => None,
            Self::LoggedOut(redirect) => Some(redirect),
        }
    }
}

pub struct ApiClient<S> {
    http: reqwest::Client,
    config: ClientConfig,
    store: S,
}

impl<S: SessionStore> ApiClient<S> {
    /// Build a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig, store: S) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(config, store, http))
    }

    #[must_use]
    pub fn with_http(config: ClientConfig, store: S, http: reqwest::Client) -> Self {
        Self { http, config, store }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a token obtained from a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the token could not be stored.
    pub fn login(&self, token: &str) -> Result<(), ClientError> {
        self.store.set(token)?;
        tracing::debug!("session token stored");
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates storage read failures.
    pub fn is_logged_in(&self) -> Result<bool, ClientError> {
        is_logged_in(&self.store)
    }

    /// Clear the session and return the redirect to the login page.
    ///
    /// # Errors
    ///
    /// Returns an error if the token could not be removed.
    pub fn logout(&self) -> Result<Redirect, ClientError> {
        navigation::logout(&self.store, &self.config)
    }

    /// # Errors
    ///
    /// Propagates storage read failures.
    pub fn nav_links(&self) -> Result<&'static [NavLink], ClientError> {
        nav_links(&self.store)
    }

    /// Send one authenticated request.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be read or cleared, the body
    /// cannot be encoded, or the transport fails.
    pub async fn call(&self, request: ApiRequest) -> Result<ApiOutcome, ClientError> {
        let url = self.config.endpoint_url(&request.endpoint);
        let method = request.method.clone();
        let file_mode = request.is_file_mode();

        let mut builder = self.http.request(method.clone(), &url);
        let token = self.store.get()?.filter(|t| !t.is_empty());
        if let Some(token) = &token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }
        let builder = request.encode(builder)?;

        tracing::debug!(%method, %url, authenticated = token.is_some(), file_mode, "api call");
        let response = builder.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, %url, "session rejected by server, logging out");
            let redirect = self.logout()?;
            return Ok(ApiOutcome::LoggedOut(redirect));
        }

        Ok(ApiOutcome::Response(response))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
