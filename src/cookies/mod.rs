//! SameSite-aware cookie emission.
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CookieAttributes`](attributes::CookieAttributes) | Requested attributes for one cookie |
//! | [`CookieEnvironment`](environment::CookieEnvironment) | Hosting server's cookie primitives and staged headers |
//! | [`CookieEmitter`](emitter::CookieEmitter) | Native or legacy emission with header rewriting |
//! | [`StagedResponse`](staged::StagedResponse) | In-process environment |
//!
//! # Legacy rewrite
//!
//! ```rust
//! use samesite_cookie::config::EmissionMode;
//! use samesite_cookie::cookies::attributes::{CookieAttributes, SameSite};
//! use samesite_cookie::cookies::emitter::CookieEmitter;
//! use samesite_cookie::cookies::staged::LegacyStagedResponse;
//! use samesite_cookie::useragent::CompatibilityClassifier;
//! use std::sync::Arc;
//!
//! let emitter = CookieEmitter::new(Arc::new(CompatibilityClassifier::new()), EmissionMode::Legacy);
//! let mut response = LegacyStagedResponse::with_user_agent("Mozilla/5.0 Chrome/80.0");
//! let attrs = CookieAttributes::builder().same_site(SameSite::None).build();
//!
//! emitter.set_cookie(&mut response, "sid", "abc", &attrs).unwrap();
//! assert_eq!(response.set_cookie_values(), vec!["sid=abc; Secure; SameSite=None"]);
//! ```

pub mod attributes;
pub mod emitter;
pub mod environment;
pub mod staged;
