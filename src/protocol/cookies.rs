//! Cookie transcoding between the native representation and the wire shape
//! used by the FlareSolverr API.
//!
//! On the wire a cookie list is a JSON array of sparse objects, except when
//! the list is empty: the service expects the JSON empty string `""` instead
//! of `[]`. Expiries travel as whole seconds since the Unix epoch.

use chrono::{DateTime, TimeZone, Utc};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Deserializer, Serialize};

/// Same-site policy attached to a cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SameSite {
    /// No policy; the attribute is omitted on the wire.
    #[default]
    Unspecified,
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_wire(self) -> Option<&'static str> {
        match self {
            SameSite::Strict => Some("Strict"),
            SameSite::Lax => Some("Lax"),
            SameSite::None => Some("None"),
            SameSite::Unspecified => Option::None,
        }
    }

    fn from_wire(value: &str) -> Self {
        match value {
            "Strict" => SameSite::Strict,
            "Lax" => SameSite::Lax,
            "None" => SameSite::None,
            _ => SameSite::Unspecified,
        }
    }
}

/// A single browser cookie as held by the remote solver session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub domain: String,
    /// Absolute expiry; sent as epoch seconds.
    pub expires: DateTime<Utc>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

/// Cookie list carrying the FlareSolverr encoding rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cookies(pub Vec<Cookie>);

impl Cookies {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<Cookie>> for Cookies {
    fn from(cookies: Vec<Cookie>) -> Self {
        Self(cookies)
    }
}

/// Sparse cookie object as it appears in request and response JSON.
#[derive(Debug, Serialize, Deserialize)]
struct WireCookie {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    domain: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    expiry: i64,
    #[serde(default, rename = "httpOnly", skip_serializing_if = "is_false")]
    http_only: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    secure: bool,
    #[serde(default, rename = "sameSite", skip_serializing_if = "Option::is_none")]
    same_site: Option<String>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<&Cookie> for WireCookie {
    fn from(cookie: &Cookie) -> Self {
        Self {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            path: cookie.path.clone(),
            domain: cookie.domain.clone(),
            expiry: cookie.expires.timestamp(),
            http_only: cookie.http_only,
            secure: cookie.secure,
            same_site: cookie.same_site.as_wire().map(str::to_owned),
        }
    }
}

impl From<WireCookie> for Cookie {
    fn from(wire: WireCookie) -> Self {
        // Out-of-range expiries fall back to the epoch instead of erroring.
        let expires = Utc
            .timestamp_opt(wire.expiry, 0)
            .single()
            .unwrap_or_default();
        Self {
            name: wire.name,
            value: wire.value,
            path: wire.path,
            domain: wire.domain,
            expires,
            http_only: wire.http_only,
            secure: wire.secure,
            same_site: wire
                .same_site
                .as_deref()
                .map(SameSite::from_wire)
                .unwrap_or_default(),
        }
    }
}

impl Serialize for Cookies {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The service expects the literal empty string when no cookies are
        // supplied, not an empty array.
        if self.0.is_empty() {
            return serializer.serialize_str("");
        }

        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for cookie in &self.0 {
            seq.serialize_element(&WireCookie::from(cookie))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Cookies {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = Vec::<WireCookie>::deserialize(deserializer)?;
        Ok(Cookies(wire.into_iter().map(Cookie::from).collect()))
    }
}
