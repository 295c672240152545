use crate::base::cookieerror::CookieError;
use cookie::Cookie;
use http::header::{HeaderName, HeaderValue, SET_COOKIE};
use http::HeaderMap;
use std::str::FromStr;

/// One staged response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl HeaderRecord {
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    /// Parse a record from raw name/value strings.
    pub fn parse(name: &str, value: &str) -> Result<Self, CookieError> {
        let name = HeaderName::from_str(name).map_err(|_| CookieError::InvalidHeader)?;
        let value = HeaderValue::from_str(value)?;
        Ok(Self { name, value })
    }

    /// A `Set-Cookie` record carrying an already serialized cookie.
    pub fn set_cookie(serialized: &str) -> Result<Self, CookieError> {
        Ok(Self {
            name: SET_COOKIE,
            value: HeaderValue::from_str(serialized)?,
        })
    }

    /// Whether this is a `Set-Cookie` record for the cookie called `cookie_name`.
    ///
    /// The value must start with `cookie_name=`, so `sid` never matches `sid2=...`.
    /// A percent-encoded name (`a%23b=...` for `a#b`) matches too.
    pub fn is_set_cookie_for(&self, cookie_name: &str) -> bool {
        if self.name != SET_COOKIE {
            return false;
        }
        let value = self.value.as_bytes();
        if value.len() > cookie_name.len()
            && value.starts_with(cookie_name.as_bytes())
            && value[cookie_name.len()] == b'='
        {
            return true;
        }
        if !value.contains(&b'%') {
            return false;
        }
        self.value
            .to_str()
            .ok()
            .and_then(|v| Cookie::parse_encoded(v).ok())
            .is_some_and(|cookie| cookie.name() == cookie_name)
    }

    /// Header line as it goes on the wire, e.g. `Set-Cookie: sid=abc`.
    pub fn to_line(&self) -> String {
        format!(
            "{}: {}",
            title_case(self.name.as_str()),
            String::from_utf8_lossy(self.value.as_bytes())
        )
    }
}

/// The ordered list of headers staged for an outgoing response.
///
/// Mirrors the API a server environment usually exposes: headers can be
/// appended or the whole list reset, but a single prior entry can never be
/// edited in place or removed.
#[derive(Debug, Clone, Default)]
pub struct ResponseHeaders {
    headers: Vec<HeaderRecord>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Append a header. Duplicates are kept (many `Set-Cookie` lines are normal).
    pub fn append(&mut self, record: HeaderRecord) {
        self.headers.push(record);
    }

    /// Parse and append a header.
    pub fn append_raw(&mut self, name: &str, value: &str) -> Result<(), CookieError> {
        self.append(HeaderRecord::parse(name, value)?);
        Ok(())
    }

    /// Drop every staged header.
    pub fn clear(&mut self) {
        self.headers.clear();
    }

    /// Snapshot of the staged headers in emission order.
    pub fn records(&self) -> Vec<HeaderRecord> {
        self.headers.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderRecord> {
        self.headers.iter()
    }

    /// All values for `name`, in emission order.
    pub fn get_all(&self, name: &str) -> Vec<&HeaderValue> {
        match HeaderName::from_str(name) {
            Ok(target) => self
                .headers
                .iter()
                .filter(|r| r.name == target)
                .map(|r| &r.value)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Header lines as they would be written to the client.
    pub fn lines(&self) -> Vec<String> {
        self.headers.iter().map(HeaderRecord::to_line).collect()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Consumes the list and returns a standard http::HeaderMap.
    pub fn to_header_map(self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for record in self.headers {
            map.append(record.name, record.value);
        }
        map
    }
}

/// Convert to title case (e.g., "set-cookie" -> "Set-Cookie").
fn title_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars: Vec<char> = word.chars().collect();
            if let Some(first) = chars.first_mut() {
                *first = first.to_ascii_uppercase();
            }
            chars.into_iter().collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order_and_duplicates() {
        let mut headers = ResponseHeaders::new();
        headers.append_raw("Content-Type", "text/html").unwrap();
        headers.append_raw("Set-Cookie", "a=1").unwrap();
        headers.append_raw("Set-Cookie", "b=2").unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(
            headers.lines(),
            vec![
                "Content-Type: text/html",
                "Set-Cookie: a=1",
                "Set-Cookie: b=2"
            ]
        );
    }

    #[test]
    fn test_clear() {
        let mut headers = ResponseHeaders::new();
        headers.append_raw("X-Custom", "value").unwrap();
        headers.clear();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_get_all_is_case_insensitive() {
        let mut headers = ResponseHeaders::new();
        headers.append_raw("set-cookie", "a=1").unwrap();
        headers.append_raw("X-Other", "x").unwrap();
        headers.append_raw("Set-Cookie", "b=2").unwrap();

        let values = headers.get_all("SET-COOKIE");
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], "b=2");
    }

    #[test]
    fn test_is_set_cookie_for_requires_exact_name() {
        let record = HeaderRecord::set_cookie("sid2=abc").unwrap();
        assert!(!record.is_set_cookie_for("sid"));
        assert!(record.is_set_cookie_for("sid2"));

        let other = HeaderRecord::parse("X-Sid", "sid=abc").unwrap();
        assert!(!other.is_set_cookie_for("sid"));
    }

    #[test]
    fn test_is_set_cookie_for_encoded_name() {
        let record = HeaderRecord::set_cookie("a%23b=v; Path=/").unwrap();
        assert!(record.is_set_cookie_for("a#b"));
        assert!(!record.is_set_cookie_for("a"));

        let longer = HeaderRecord::set_cookie("a%23bc=v").unwrap();
        assert!(!longer.is_set_cookie_for("a#b"));
    }

    #[test]
    fn test_invalid_header_name() {
        let mut headers = ResponseHeaders::new();
        assert!(headers.append_raw("Invalid Header", "value").is_err());
    }

    #[test]
    fn test_invalid_header_value() {
        let mut headers = ResponseHeaders::new();
        assert!(headers.append_raw("Valid", "invalid\nvalue").is_err());
    }

    #[test]
    fn test_to_header_map_keeps_all_values() {
        let mut headers = ResponseHeaders::new();
        headers.append_raw("Set-Cookie", "a=1").unwrap();
        headers.append_raw("Set-Cookie", "b=2").unwrap();
        let map = headers.to_header_map();
        assert_eq!(map.get_all("set-cookie").iter().count(), 2);
    }
}
