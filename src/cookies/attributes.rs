use crate::base::cookieerror::CookieError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Requested `SameSite` attribute.
///
/// `Unset` is an explicit "no value": in legacy emission it still produces a
/// bare `; SameSite=` label for compatible browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SameSite {
    #[default]
    Unset,
    None,
    Lax,
    Strict,
}

impl SameSite {
    /// Value as written after `SameSite=`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Unset => "",
            SameSite::None => "None",
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, SameSite::Unset)
    }

    /// Equivalent `cookie` crate value; `Unset` has none.
    pub fn to_cookie_same_site(self) -> Option<cookie::SameSite> {
        match self {
            SameSite::Unset => None,
            SameSite::None => Some(cookie::SameSite::None),
            SameSite::Lax => Some(cookie::SameSite::Lax),
            SameSite::Strict => Some(cookie::SameSite::Strict),
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(SameSite::Unset);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "none" => Ok(SameSite::None),
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            _ => Err(CookieError::invalid_same_site(s)),
        }
    }
}

impl TryFrom<String> for SameSite {
    type Error = CookieError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SameSite> for String {
    fn from(value: SameSite) -> Self {
        value.as_str().to_string()
    }
}

/// Attributes requested for one cookie write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieAttributes {
    pub expires: Option<OffsetDateTime>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl CookieAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new builder.
    pub fn builder() -> CookieAttributesBuilder {
        CookieAttributesBuilder::default()
    }
}

/// Builder for CookieAttributes.
#[derive(Debug, Clone, Default)]
pub struct CookieAttributesBuilder {
    attributes: CookieAttributes,
}

impl CookieAttributesBuilder {
    pub fn expires(mut self, expires: OffsetDateTime) -> Self {
        self.attributes.expires = Some(expires);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.attributes.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.attributes.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.attributes.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.attributes.http_only = http_only;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.attributes.same_site = same_site;
        self
    }

    pub fn build(self) -> CookieAttributes {
        self.attributes
    }
}

/// The subset of attributes a legacy cookie primitive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyCookie<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub expires: Option<OffsetDateTime>,
    pub path: Option<&'a str>,
    pub domain: Option<&'a str>,
}

impl<'a> LegacyCookie<'a> {
    pub fn from_attributes(name: &'a str, value: &'a str, attrs: &'a CookieAttributes) -> Self {
        Self {
            name,
            value,
            expires: attrs.expires,
            path: attrs.path.as_deref(),
            domain: attrs.domain.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_same_site_case_insensitive() {
        assert_eq!("lax".parse::<SameSite>().unwrap(), SameSite::Lax);
        assert_eq!("STRICT".parse::<SameSite>().unwrap(), SameSite::Strict);
        assert_eq!("None".parse::<SameSite>().unwrap(), SameSite::None);
        assert_eq!("".parse::<SameSite>().unwrap(), SameSite::Unset);
    }

    #[test]
    fn test_parse_same_site_rejects_unknown() {
        let err = "Loose".parse::<SameSite>().unwrap_err();
        assert!(matches!(err, CookieError::InvalidSameSite { .. }));
    }

    #[test]
    fn test_same_site_serde_uses_wire_strings() {
        let json = serde_json::to_string(&SameSite::Lax).unwrap();
        assert_eq!(json, "\"Lax\"");
        let parsed: SameSite = serde_json::from_str("\"\"").unwrap();
        assert_eq!(parsed, SameSite::Unset);
        assert!(serde_json::from_str::<SameSite>("\"bogus\"").is_err());
    }

    #[test]
    fn test_to_cookie_same_site() {
        assert_eq!(SameSite::Unset.to_cookie_same_site(), None);
        assert_eq!(
            SameSite::None.to_cookie_same_site(),
            Some(cookie::SameSite::None)
        );
    }

    #[test]
    fn test_builder() {
        let attrs = CookieAttributes::builder()
            .path("/")
            .domain("example.com")
            .secure(true)
            .http_only(true)
            .same_site(SameSite::Strict)
            .build();

        assert_eq!(attrs.path.as_deref(), Some("/"));
        assert_eq!(attrs.domain.as_deref(), Some("example.com"));
        assert!(attrs.secure && attrs.http_only);
        assert_eq!(attrs.same_site, SameSite::Strict);
        assert!(attrs.expires.is_none());
    }

    #[test]
    fn test_legacy_cookie_drops_flags() {
        let attrs = CookieAttributes::builder()
            .path("/app")
            .secure(true)
            .same_site(SameSite::Lax)
            .build();
        let legacy = LegacyCookie::from_attributes("sid", "abc", &attrs);
        assert_eq!(legacy.path, Some("/app"));
        assert_eq!(legacy.domain, None);
    }
}
