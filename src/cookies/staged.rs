//! In-process response environment.
//!
//! Stages headers in a [`ResponseHeaders`] list and serializes cookies with
//! the `cookie` crate. Servers embed the emitter by implementing
//! [`CookieEnvironment`] over their own response type; this one backs tests,
//! benches and simple embedders.

use crate::base::cookieerror::CookieError;
use crate::cookies::attributes::{CookieAttributes, LegacyCookie};
use crate::cookies::environment::CookieEnvironment;
use crate::http::responseheaders::{HeaderRecord, ResponseHeaders};
use cookie::Cookie;
use std::ops::{Deref, DerefMut};

/// Response whose cookie primitive supports SameSite natively.
#[derive(Debug, Clone, Default)]
pub struct StagedResponse {
    user_agent: Option<String>,
    headers: ResponseHeaders,
    sent: bool,
}

impl StagedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
            ..Self::default()
        }
    }

    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut ResponseHeaders {
        &mut self.headers
    }

    /// Flush the headers to the client. No header can be staged afterwards.
    pub fn mark_sent(&mut self) {
        self.sent = true;
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Values of every staged `Set-Cookie` header, in emission order.
    pub fn set_cookie_values(&self) -> Vec<String> {
        self.headers
            .get_all("set-cookie")
            .into_iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect()
    }

    fn ensure_writable(&self) -> Result<(), CookieError> {
        if self.sent {
            return Err(CookieError::HeadersAlreadySent);
        }
        Ok(())
    }

    fn write_native(
        &mut self,
        name: &str,
        value: &str,
        attrs: &CookieAttributes,
    ) -> Result<(), CookieError> {
        self.ensure_writable()?;
        validate_cookie_name(name)?;

        let mut builder = Cookie::build((name.to_string(), value.to_string()))
            .secure(attrs.secure)
            .http_only(attrs.http_only);
        if let Some(same_site) = attrs.same_site.to_cookie_same_site() {
            builder = builder.same_site(same_site);
        }
        if let Some(path) = &attrs.path {
            builder = builder.path(path.clone());
        }
        if let Some(domain) = &attrs.domain {
            builder = builder.domain(domain.clone());
        }
        if let Some(expires) = attrs.expires {
            builder = builder.expires(expires);
        }

        let cookie = builder.build();
        self.stage_cookie(&cookie)
    }

    fn write_legacy(&mut self, legacy: &LegacyCookie<'_>) -> Result<(), CookieError> {
        self.ensure_writable()?;
        validate_cookie_name(legacy.name)?;

        let mut builder = Cookie::build((legacy.name.to_string(), legacy.value.to_string()));
        if let Some(path) = legacy.path {
            builder = builder.path(path.to_string());
        }
        if let Some(domain) = legacy.domain {
            builder = builder.domain(domain.to_string());
        }
        if let Some(expires) = legacy.expires {
            builder = builder.expires(expires);
        }

        let cookie = builder.build();
        self.stage_cookie(&cookie)
    }

    fn stage_cookie(&mut self, cookie: &Cookie<'_>) -> Result<(), CookieError> {
        let serialized = cookie.encoded().to_string();
        let record = HeaderRecord::set_cookie(&serialized)?;
        self.headers.append(record);
        Ok(())
    }

    fn stage_header(&mut self, record: HeaderRecord) -> Result<(), CookieError> {
        self.ensure_writable()?;
        self.headers.append(record);
        Ok(())
    }
}

impl CookieEnvironment for StagedResponse {
    const SUPPORTS_NATIVE_SAME_SITE: bool = true;

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    fn set_cookie_native(
        &mut self,
        name: &str,
        value: &str,
        attrs: &CookieAttributes,
    ) -> Result<(), CookieError> {
        self.write_native(name, value, attrs)
    }

    fn set_cookie_legacy(&mut self, cookie: &LegacyCookie<'_>) -> Result<(), CookieError> {
        self.write_legacy(cookie)
    }

    fn staged_headers(&self) -> Vec<HeaderRecord> {
        self.headers.records()
    }

    fn append_header(&mut self, record: HeaderRecord) -> Result<(), CookieError> {
        self.stage_header(record)
    }

    fn clear_headers(&mut self) {
        self.headers.clear();
    }
}

/// Response whose cookie primitive predates SameSite support.
#[derive(Debug, Clone, Default)]
pub struct LegacyStagedResponse {
    inner: StagedResponse,
}

impl LegacyStagedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            inner: StagedResponse::with_user_agent(user_agent),
        }
    }
}

impl Deref for LegacyStagedResponse {
    type Target = StagedResponse;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for LegacyStagedResponse {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl CookieEnvironment for LegacyStagedResponse {
    const SUPPORTS_NATIVE_SAME_SITE: bool = false;

    fn user_agent(&self) -> Option<&str> {
        self.inner.user_agent.as_deref()
    }

    fn set_cookie_legacy(&mut self, cookie: &LegacyCookie<'_>) -> Result<(), CookieError> {
        self.inner.write_legacy(cookie)
    }

    fn staged_headers(&self) -> Vec<HeaderRecord> {
        self.inner.headers.records()
    }

    fn append_header(&mut self, record: HeaderRecord) -> Result<(), CookieError> {
        self.inner.stage_header(record)
    }

    fn clear_headers(&mut self) {
        self.inner.headers.clear();
    }
}

/// Cookie names must be RFC 7230 tokens.
fn validate_cookie_name(name: &str) -> Result<(), CookieError> {
    let is_tchar = |b: u8| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b);
    if name.is_empty() || !name.bytes().all(is_tchar) {
        return Err(CookieError::invalid_cookie_name(name));
    }
    Ok(())
}
