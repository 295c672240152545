//! The hosting server environment, as seen by the cookie emitter.
//!
//! The emitter never serializes cookies itself. It hands them to one of two
//! primitives the environment provides and, in legacy mode, edits the staged
//! response headers afterwards through an append/clear-only API.

use crate::base::cookieerror::CookieError;
use crate::cookies::attributes::{CookieAttributes, LegacyCookie};
use crate::http::responseheaders::HeaderRecord;

pub trait CookieEnvironment {
    /// Whether the native primitive understands a `samesite` attribute.
    /// Consulted once when the emission mode is resolved.
    const SUPPORTS_NATIVE_SAME_SITE: bool;

    /// `User-Agent` of the request being answered, if it sent one.
    fn user_agent(&self) -> Option<&str>;

    /// Set a cookie with the full attribute set, including `secure`,
    /// `http_only` and `same_site`.
    fn set_cookie_native(
        &mut self,
        _name: &str,
        _value: &str,
        _attrs: &CookieAttributes,
    ) -> Result<(), CookieError> {
        Err(CookieError::NativeSameSiteUnsupported)
    }

    /// Set a cookie with name, value, expiry, path and domain only.
    fn set_cookie_legacy(&mut self, cookie: &LegacyCookie<'_>) -> Result<(), CookieError>;

    /// Headers staged for the response so far, in emission order.
    fn staged_headers(&self) -> Vec<HeaderRecord>;

    /// Append one header to the staged list.
    fn append_header(&mut self, record: HeaderRecord) -> Result<(), CookieError>;

    /// Drop every staged header.
    fn clear_headers(&mut self);
}
