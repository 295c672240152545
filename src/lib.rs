//! # samesite-cookie
//!
//! SameSite-aware `Set-Cookie` emission for server environments.
//!
//! Cookies get `SameSite`, `Secure` and `HttpOnly` consistently, while user
//! agents known to mishandle `SameSite` are left without the attribute. Hosting
//! environments whose cookie primitive predates `SameSite` are supported by
//! rewriting the staged `Set-Cookie` header after the fact.
//!
//! ## Quick Start
//!
//! ```rust
//! use samesite_cookie::config::SameSiteConfig;
//! use samesite_cookie::cookies::attributes::{CookieAttributes, SameSite};
//! use samesite_cookie::cookies::staged::StagedResponse;
//! use samesite_cookie::SameSiteCookieSetter;
//!
//! let setter = SameSiteCookieSetter::from_config::<StagedResponse>(&SameSiteConfig::default());
//! let mut response = StagedResponse::with_user_agent("Mozilla/5.0 Chrome/80.0.3987.132");
//!
//! let attrs = CookieAttributes::builder()
//!     .same_site(SameSite::Lax)
//!     .http_only(true)
//!     .build();
//! setter.set_cookie(&mut response, "sid", "abc123", &attrs).unwrap();
//!
//! assert!(setter.is_browser_compatible("Mozilla/5.0 Chrome/80.0.3987.132"));
//! assert!(!setter.is_browser_compatible("Mozilla/5.0 Chrome/66.0.3359.181"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`config`] - Emission mode and cache settings
//! - [`cookies`] - Attributes, environment seam, emitter
//! - [`http`] - Ordered response header records
//! - [`useragent`] - Compatibility classifier and verdict cache

pub mod base;
pub mod config;
pub mod cookies;
pub mod http;
mod setter;
pub mod useragent;

pub use base::cookieerror::CookieError;
pub use setter::SameSiteCookieSetter;
