//! Options accepted by the operations of a [`CookieJar`](crate::CookieJar).
//!
//! Options carry raw inputs: they are normalized and validated when a directive
//! is built, never when the options are assembled.
use jiff::{Timestamp, Zoned};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The raw input for the `SameSite` attribute.
///
/// Names are matched case-insensitively against `strict`, `lax` and `none`.
/// `true` is an alias for `Strict`, while `false` leaves the attribute unset.
pub enum SameSiteInput {
    Enabled(bool),
    Named(String),
}

impl From<bool> for SameSiteInput {
    fn from(value: bool) -> Self {
        Self::Enabled(value)
    }
}

impl From<&str> for SameSiteInput {
    fn from(value: &str) -> Self {
        Self::Named(value.to_owned())
    }
}

impl From<String> for SameSiteInput {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The raw input for the `Max-Age` attribute.
pub enum MaxAge {
    /// A number of seconds.
    Seconds(u64),
    /// A human-readable duration, e.g. `"2h"` or `"30min"`.
    Human(String),
}

impl From<u64> for MaxAge {
    fn from(value: u64) -> Self {
        Self::Seconds(value)
    }
}

impl From<&str> for MaxAge {
    fn from(value: &str) -> Self {
        Self::Human(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The raw input for the `Expires` attribute.
pub enum Expires {
    /// An absolute point in time.
    At(Timestamp),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// A human-readable duration, resolved relative to the current time.
    Human(String),
}

impl From<Timestamp> for Expires {
    fn from(value: Timestamp) -> Self {
        Self::At(value)
    }
}

impl From<&Zoned> for Expires {
    fn from(value: &Zoned) -> Self {
        Self::At(value.timestamp())
    }
}

impl From<&str> for Expires {
    fn from(value: &str) -> Self {
        Self::Human(value.to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
/// Options for [`CookieJar::get_with`](crate::CookieJar::get_with).
pub struct GetOptions {
    /// Whether the cookie must carry a valid signature.
    ///
    /// Defaults to `true` if the jar has a keyring, `false` otherwise.
    pub signed: Option<bool>,
}

impl GetOptions {
    /// Start from the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require (or skip) signature verification.
    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
/// Options for [`CookieJar::set`](crate::CookieJar::set).
pub struct SetOptions {
    /// The `Max-Age` attribute. Unset by default.
    pub max_age: Option<MaxAge>,
    /// The `Expires` attribute. Unset by default.
    pub expires: Option<Expires>,
    /// The `Path` attribute. Defaults to `/`.
    pub path: Option<String>,
    /// The `Domain` attribute. Unset by default.
    pub domain: Option<String>,
    /// The `Secure` attribute. Defaults to `false`.
    ///
    /// It can only be set if the jar was built for a secure connection.
    pub secure: bool,
    /// The `HttpOnly` attribute. Defaults to `true`.
    pub http_only: bool,
    /// Whether a `<name>.sig` signature cookie should be sent alongside.
    ///
    /// Defaults to `true` if the jar has a keyring, `false` otherwise.
    pub signed: Option<bool>,
    /// Replace the current value if the cookie is already known to the jar.
    ///
    /// Defaults to `false`: the first value set for a name wins.
    pub overwrite: bool,
    /// The `SameSite` attribute. Unset by default.
    pub same_site: Option<SameSiteInput>,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            max_age: None,
            expires: None,
            path: None,
            domain: None,
            secure: false,
            http_only: true,
            signed: None,
            overwrite: false,
            same_site: None,
        }
    }
}

impl SetOptions {
    /// Start from the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `Max-Age` attribute, either in seconds or as a human-readable duration.
    ///
    /// Sub-second durations are rounded up to the next whole second.
    pub fn max_age(mut self, max_age: impl Into<MaxAge>) -> Self {
        self.max_age = Some(max_age.into());
        self
    }

    /// Set the `Expires` attribute.
    pub fn expires(mut self, expires: impl Into<Expires>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    /// Set the `Path` attribute.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the `Domain` attribute.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set (or unset) the `Secure` attribute.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set (or unset) the `HttpOnly` attribute.
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Send (or skip) a `<name>.sig` signature cookie alongside the value.
    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    /// Replace the current value if the cookie is already known to the jar.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the `SameSite` attribute.
    ///
    /// See [`SameSiteInput`] for the accepted values.
    pub fn same_site(mut self, same_site: impl Into<SameSiteInput>) -> Self {
        self.same_site = Some(same_site.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
/// Options for [`CookieJar::delete_with`](crate::CookieJar::delete_with).
///
/// The attributes must match the ones used when the cookie was set, otherwise the
/// client won't remove it ([RFC 6265 §5.3](https://datatracker.ietf.org/doc/html/rfc6265#section-5.3)).
pub struct DeleteOptions {
    /// The `Path` attribute. Defaults to `/`.
    pub path: Option<String>,
    /// The `Domain` attribute. Unset by default.
    pub domain: Option<String>,
    /// The `Secure` attribute. Defaults to `false`.
    ///
    /// It can only be set if the jar was built for a secure connection.
    pub secure: bool,
    /// The `HttpOnly` attribute. Defaults to `true`.
    pub http_only: bool,
    /// The `SameSite` attribute. Unset by default.
    pub same_site: Option<SameSiteInput>,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self {
            path: None,
            domain: None,
            secure: false,
            http_only: true,
            same_site: None,
        }
    }
}

impl DeleteOptions {
    /// Start from the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `Path` attribute.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the `Domain` attribute.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set (or unset) the `Secure` attribute.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set (or unset) the `HttpOnly` attribute.
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set the `SameSite` attribute.
    ///
    /// See [`SameSiteInput`] for the accepted values.
    pub fn same_site(mut self, same_site: impl Into<SameSiteInput>) -> Self {
        self.same_site = Some(same_site.into());
        self
    }
}

impl From<SetOptions> for DeleteOptions {
    fn from(options: SetOptions) -> Self {
        Self {
            path: options.path,
            domain: options.domain,
            secure: options.secure,
            http_only: options.http_only,
            same_site: options.same_site,
        }
    }
}
