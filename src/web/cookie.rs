//! Session cookie construction.
//!
//! The cookie only carries the opaque session id. Attributes follow the
//! deployment environment: production cookies are `Secure` and
//! `SameSite=None` so the browser client can call the API cross-origin.

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::auth::SessionId;
use crate::config::{Environment, SessionConfig};

/// Settings for issuing and clearing the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    domain: Option<String>,
    max_age: Duration,
    secure: bool,
}

impl SessionCookie {
    /// Build cookie settings from the session configuration.
    pub fn new(config: &SessionConfig, environment: Environment) -> Self {
        Self {
            name: config.cookie_name.clone(),
            domain: config.domain.clone(),
            max_age: config.ttl(),
            secure: environment.is_production(),
        }
    }

    /// Cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn base(&self, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.name.clone(), value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(if self.secure {
            SameSite::None
        } else {
            SameSite::Lax
        });
        if let Some(domain) = &self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    /// Cookie carrying a freshly issued session id.
    pub fn issue(&self, id: &SessionId) -> Cookie<'static> {
        let mut cookie = self.base(id.as_str().to_string());
        let max_age = i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX);
        cookie.set_max_age(time::Duration::seconds(max_age));
        cookie
    }

    /// Add the session cookie to the jar.
    pub fn set(&self, jar: CookieJar, id: &SessionId) -> CookieJar {
        jar.add(self.issue(id))
    }

    /// Instruct the client to drop the session cookie.
    ///
    /// The removal is sent even when the request carried no cookie.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        jar.add(cookie)
    }

    /// The raw session cookie value, if present.
    pub fn read<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.name).map(|c| c.value())
    }
}
