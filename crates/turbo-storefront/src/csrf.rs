//! CSRF token lookup.

use std::sync::{Arc, PoisonError, RwLock};

/// A cookie source, in `document.cookie` form (`a=1; b=2`).
pub trait CookieStore: Send + Sync {
    /// The raw cookie string.
    fn cookie_string(&self) -> String;
}

/// A mutable in-memory cookie string.
///
/// The session may rotate the CSRF cookie (e.g. after login), so the jar can
/// be replaced while widgets hold a reference to it.
#[derive(Debug, Default)]
pub struct CookieJar {
    raw: RwLock<String>,
}

impl CookieJar {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: RwLock::new(raw.into()),
        }
    }

    /// Replace the whole cookie string.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.raw.write().unwrap_or_else(PoisonError::into_inner) = raw.into();
    }
}

impl CookieStore for CookieJar {
    fn cookie_string(&self) -> String {
        self.raw
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Find a cookie's value in a `name=value; ...` string.
///
/// The value runs from the first `=` up to the next one, if any.
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .and_then(|value| value.split('=').next())
    })
}

/// Reads the CSRF token for state-changing requests.
#[derive(Clone)]
pub struct CsrfProvider {
    store: Arc<dyn CookieStore>,
    cookie_name: String,
    header_name: String,
}

impl CsrfProvider {
    pub fn new(
        store: Arc<dyn CookieStore>,
        cookie_name: impl Into<String>,
        header_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cookie_name: cookie_name.into(),
            header_name: header_name.into(),
        }
    }

    /// Current token, or an empty string when the cookie is absent.
    ///
    /// An empty token is still sent; the server decides what to do with it.
    pub fn token(&self) -> String {
        let cookies = self.store.cookie_string();
        cookie_value(&cookies, &self.cookie_name)
            .unwrap_or_default()
            .to_string()
    }

    /// Header the token travels in.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }
}

impl std::fmt::Debug for CsrfProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfProvider")
            .field("cookie_name", &self.cookie_name)
            .field("header_name", &self.header_name)
            .finish_non_exhaustive()
    }
}
