use biscotti::{ResponseCookie, SameSite};
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};

use crate::errors::ValidationError;
use crate::options::{DeleteOptions, Expires, MaxAge, SameSiteInput, SetOptions};
use crate::validate::is_field_content;

/// A fully validated cookie, ready to be turned into a `Set-Cookie` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CookieRecord {
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) path: String,
    pub(crate) domain: Option<String>,
    pub(crate) secure: bool,
    pub(crate) http_only: bool,
    pub(crate) same_site: Option<SameSite>,
    pub(crate) max_age: Option<SignedDuration>,
    pub(crate) expires: Option<Timestamp>,
}

impl CookieRecord {
    /// Validate and normalize the inputs of a `set` call.
    pub(crate) fn new(
        name: &str,
        value: &str,
        options: &SetOptions,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        if !is_field_content(value) {
            return Err(ValidationError::InvalidValue { name });
        }
        Ok(Self {
            name,
            value: value.to_owned(),
            path: validate_path(options.path.as_deref())?,
            domain: validate_domain(options.domain.as_deref())?,
            secure: options.secure,
            http_only: options.http_only,
            same_site: parse_same_site(options.same_site.as_ref())?,
            max_age: options.max_age.as_ref().map(parse_max_age).transpose()?,
            expires: options.expires.as_ref().map(parse_expires).transpose()?,
        })
    }

    /// A record instructing the client to drop the cookie right away.
    ///
    /// Attributes must match the ones used to set the cookie for the removal to
    /// take effect on the client.
    pub(crate) fn removal(name: &str, options: &DeleteOptions) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            value: String::new(),
            path: validate_path(options.path.as_deref())?,
            domain: validate_domain(options.domain.as_deref())?,
            secure: options.secure,
            http_only: options.http_only,
            same_site: parse_same_site(options.same_site.as_ref())?,
            max_age: Some(SignedDuration::ZERO),
            expires: Some(Timestamp::UNIX_EPOCH),
        })
    }

    /// The bare minimum removal directive: no attributes beyond the default `Path`.
    pub(crate) fn minimal_removal(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: String::new(),
            path: DEFAULT_PATH.to_owned(),
            domain: None,
            secure: false,
            http_only: false,
            same_site: None,
            max_age: Some(SignedDuration::ZERO),
            expires: Some(Timestamp::UNIX_EPOCH),
        }
    }

    /// A record with the same attributes, but a different name and value.
    ///
    /// Used for `<name>.sig` entries, which must share the scope of their base cookie.
    pub(crate) fn sibling(&self, name: String, value: String) -> Self {
        Self {
            name,
            value,
            ..self.clone()
        }
    }

    /// A removal record for a sibling cookie, sharing the scope of `self`.
    pub(crate) fn sibling_removal(&self, name: String) -> Self {
        Self {
            max_age: Some(SignedDuration::ZERO),
            expires: Some(Timestamp::UNIX_EPOCH),
            ..self.sibling(name, String::new())
        }
    }

    pub(crate) fn into_response_cookie(self) -> ResponseCookie<'static> {
        let mut cookie = ResponseCookie::new(self.name, self.value).set_path(self.path);
        if let Some(domain) = self.domain {
            cookie = cookie.set_domain(domain);
        }
        if self.secure {
            cookie = cookie.set_secure(true);
        }
        if self.http_only {
            cookie = cookie.set_http_only(true);
        }
        if let Some(same_site) = self.same_site {
            cookie = cookie.set_same_site(same_site);
        }
        if let Some(max_age) = self.max_age {
            cookie = cookie.set_max_age(max_age);
        }
        if let Some(expires) = self.expires {
            cookie = cookie.set_expires(expires.to_zoned(TimeZone::UTC));
        }
        cookie
    }
}

const DEFAULT_PATH: &str = "/";

fn validate_name(name: &str) -> Result<String, ValidationError> {
    if is_field_content(name) {
        Ok(name.to_owned())
    } else {
        Err(ValidationError::InvalidName {
            name: name.to_owned(),
        })
    }
}

// `;` would terminate the attribute and let the caller smuggle in new ones.
fn is_attribute_value(s: &str) -> bool {
    is_field_content(s) && !s.contains(';')
}

fn validate_path(path: Option<&str>) -> Result<String, ValidationError> {
    match path {
        None => Ok(DEFAULT_PATH.to_owned()),
        Some(path) if is_attribute_value(path) => Ok(path.to_owned()),
        Some(path) => Err(ValidationError::InvalidPath {
            path: path.to_owned(),
        }),
    }
}

fn validate_domain(domain: Option<&str>) -> Result<Option<String>, ValidationError> {
    match domain {
        None => Ok(None),
        Some(domain) if is_attribute_value(domain) => Ok(Some(domain.to_owned())),
        Some(domain) => Err(ValidationError::InvalidDomain {
            domain: domain.to_owned(),
        }),
    }
}

fn parse_same_site(input: Option<&SameSiteInput>) -> Result<Option<SameSite>, ValidationError> {
    match input {
        None | Some(SameSiteInput::Enabled(false)) => Ok(None),
        Some(SameSiteInput::Enabled(true)) => Ok(Some(SameSite::Strict)),
        Some(SameSiteInput::Named(name)) => match name.to_ascii_lowercase().as_str() {
            "strict" => Ok(Some(SameSite::Strict)),
            "lax" => Ok(Some(SameSite::Lax)),
            "none" => Ok(Some(SameSite::None)),
            _ => Err(ValidationError::InvalidSameSite {
                same_site: name.to_owned(),
            }),
        },
    }
}

fn parse_human_duration(input: &str) -> Result<std::time::Duration, ValidationError> {
    humantime::parse_duration(input).map_err(|e| ValidationError::InvalidDuration {
        input: input.to_owned(),
        reason: e.to_string(),
    })
}

fn parse_max_age(max_age: &MaxAge) -> Result<SignedDuration, ValidationError> {
    let seconds = match max_age {
        MaxAge::Seconds(seconds) => *seconds,
        MaxAge::Human(input) => {
            let duration = parse_human_duration(input)?;
            // Round up: a truncated "500ms" would be an immediate removal.
            duration
                .as_secs()
                .saturating_add(u64::from(duration.subsec_nanos() > 0))
        }
    };
    Ok(SignedDuration::from_secs(
        i64::try_from(seconds).unwrap_or(i64::MAX),
    ))
}

fn parse_expires(expires: &Expires) -> Result<Timestamp, ValidationError> {
    match expires {
        Expires::At(at) => Ok(*at),
        Expires::EpochMillis(epoch_millis) => Timestamp::from_millisecond(*epoch_millis)
            .map_err(|_| ValidationError::InvalidExpires {
                epoch_millis: *epoch_millis,
            }),
        Expires::Human(input) => {
            let offset =
                SignedDuration::try_from(parse_human_duration(input)?).unwrap_or(SignedDuration::MAX);
            Timestamp::now()
                .checked_add(offset)
                .map_err(|_| ValidationError::InvalidDuration {
                    input: input.to_owned(),
                    reason: "the resulting date is out of range".into(),
                })
        }
    }
}
