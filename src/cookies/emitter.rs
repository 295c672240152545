//! SameSite-aware cookie emission.
//!
//! Both modes first derive the effective attributes:
//!
//! - `SameSite=None` forces `Secure`, since browsers drop `None` cookies
//!   that are not secure.
//! - Native mode clears `SameSite` for incompatible browsers.
//!
//! Native mode then hands everything to the environment primitive. Legacy
//! mode sets the cookie with the legacy primitive and, for compatible
//! browsers, rewrites the `Set-Cookie` header that primitive just staged,
//! appending `; HttpOnly`, `; Secure` and `; SameSite=<value>` in that order
//! when missing. Because staged headers can only be appended or reset, the
//! rewrite clears the list and replays it with the one record substituted.

use crate::base::cookieerror::CookieError;
use crate::config::{EmissionMode, ModeSetting};
use crate::cookies::attributes::{CookieAttributes, LegacyCookie, SameSite};
use crate::cookies::environment::CookieEnvironment;
use crate::http::responseheaders::HeaderRecord;
use crate::useragent::classifier::CompatibilityClassifier;
use http::HeaderValue;
use std::sync::Arc;
use tracing::{debug, warn};

const HTTP_ONLY_LABEL: &str = "; HttpOnly";
const SECURE_LABEL: &str = "; Secure";
const SAME_SITE_LABEL: &str = "; SameSite=";

pub struct CookieEmitter {
    classifier: Arc<CompatibilityClassifier>,
    mode: EmissionMode,
}

impl CookieEmitter {
    pub fn new(classifier: Arc<CompatibilityClassifier>, mode: EmissionMode) -> Self {
        Self { classifier, mode }
    }

    /// Resolve `setting` against `E`'s capability once, here.
    pub fn for_environment<E: CookieEnvironment>(
        classifier: Arc<CompatibilityClassifier>,
        setting: ModeSetting,
    ) -> Self {
        let mode = setting.resolve(E::SUPPORTS_NATIVE_SAME_SITE);
        debug!(
            ?setting,
            ?mode,
            native_same_site = E::SUPPORTS_NATIVE_SAME_SITE,
            "resolved cookie emission mode"
        );
        Self::new(classifier, mode)
    }

    pub fn mode(&self) -> EmissionMode {
        self.mode
    }

    pub fn classifier(&self) -> &Arc<CompatibilityClassifier> {
        &self.classifier
    }

    /// Set `name=value` on the response staged in `env`.
    ///
    /// Errors are the environment primitive's own, unchanged. A legacy
    /// rewrite that finds no staged header to augment is not an error.
    pub fn set_cookie<E: CookieEnvironment>(
        &self,
        env: &mut E,
        name: &str,
        value: &str,
        attrs: &CookieAttributes,
    ) -> Result<(), CookieError> {
        let compatible = self
            .classifier
            .is_compatible(env.user_agent().unwrap_or(""));
        let effective = effective_attributes(attrs, compatible, self.mode);

        let result = match self.mode {
            EmissionMode::Native => env.set_cookie_native(name, value, &effective),
            EmissionMode::Legacy => emit_legacy(env, name, value, &effective, compatible),
        };
        if let Err(err) = &result {
            warn!(cookie = name, code = err.as_i32(), error = %err, "environment rejected cookie");
        }
        result
    }
}

/// Attributes actually emitted for a request from a browser whose
/// compatibility verdict is `compatible`.
///
/// `Secure` is forced before SameSite is cleared, so an incompatible client
/// asked for `SameSite=None` still receives `Secure`.
pub fn effective_attributes(
    attrs: &CookieAttributes,
    compatible: bool,
    mode: EmissionMode,
) -> CookieAttributes {
    let mut effective = attrs.clone();
    if effective.same_site == SameSite::None {
        effective.secure = true;
    }
    if mode == EmissionMode::Native && !compatible {
        effective.same_site = SameSite::Unset;
    }
    effective
}

fn emit_legacy<E: CookieEnvironment>(
    env: &mut E,
    name: &str,
    value: &str,
    effective: &CookieAttributes,
    compatible: bool,
) -> Result<(), CookieError> {
    env.set_cookie_legacy(&LegacyCookie::from_attributes(name, value, effective))?;

    if !compatible {
        debug!(cookie = name, "incompatible user agent, leaving legacy cookie as-is");
        return Ok(());
    }
    rewrite_staged_cookie(env, name, effective)
}

/// Append the missing labels to the most recent staged `Set-Cookie` for
/// `name`, preserving every other header and the overall order.
fn rewrite_staged_cookie<E: CookieEnvironment>(
    env: &mut E,
    name: &str,
    effective: &CookieAttributes,
) -> Result<(), CookieError> {
    let staged = env.staged_headers();
    let Some(target) = staged.iter().rposition(|r| r.is_set_cookie_for(name)) else {
        debug!(cookie = name, "no staged Set-Cookie header to augment");
        return Ok(());
    };

    let current = staged[target].value.as_bytes();
    let suffix = missing_labels(current, effective);
    if suffix.is_empty() {
        return Ok(());
    }

    let mut rewritten = Vec::with_capacity(current.len() + suffix.len());
    rewritten.extend_from_slice(current);
    rewritten.extend_from_slice(suffix.as_bytes());
    let rewritten = HeaderValue::from_bytes(&rewritten)?;

    env.clear_headers();
    for (index, record) in staged.into_iter().enumerate() {
        if index == target {
            env.append_header(HeaderRecord::new(record.name, rewritten.clone()))?;
        } else {
            env.append_header(record)?;
        }
    }
    Ok(())
}

/// Labels to append to `header`, in the fixed HttpOnly, Secure, SameSite order.
pub fn missing_labels(header: &[u8], effective: &CookieAttributes) -> String {
    let mut suffix = String::new();
    if effective.http_only && !contains(header, HTTP_ONLY_LABEL) {
        suffix.push_str(HTTP_ONLY_LABEL);
    }
    if effective.secure && !contains(header, SECURE_LABEL) {
        suffix.push_str(SECURE_LABEL);
    }
    if !contains(header, SAME_SITE_LABEL) {
        suffix.push_str(SAME_SITE_LABEL);
        suffix.push_str(effective.same_site.as_str());
    }
    suffix
}

fn contains(haystack: &[u8], label: &str) -> bool {
    haystack
        .windows(label.len())
        .any(|window| window == label.as_bytes())
}
