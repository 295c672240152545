//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): error codes for cookie emission

pub mod cookieerror;
