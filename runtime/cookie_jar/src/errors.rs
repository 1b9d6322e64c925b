//! Errors that can occur when working with a [`CookieJar`](crate::CookieJar).
pub use biscotti::errors::ParseError;
use http::StatusCode;
use http::header::ToStrError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error type returned by the mutating and reading operations of a
/// [`CookieJar`](crate::CookieJar).
///
/// The jar never swallows these errors: it's up to the request handler to decide
/// how they should be surfaced to the caller.
/// [`CookieJarError::status_code`] provides a sensible default.
pub enum CookieJarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl CookieJarError {
    /// The HTTP status code that best describes this error.
    ///
    /// Validation errors are caused by the inputs the handler received, so they map to
    /// `400 Bad Request`.
    /// Policy errors are caused by the server configuration (or by the handler itself),
    /// so they map to `500 Internal Server Error`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CookieJarError::Validation(_) => StatusCode::BAD_REQUEST,
            CookieJarError::Policy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
/// A cookie name, value or attribute is not acceptable.
///
/// It is raised before any change is applied to the jar: the failed call has no
/// observable effect.
pub enum ValidationError {
    #[error("`{name:?}` is not a valid cookie name")]
    InvalidName { name: String },
    #[error("The value for the `{name}` cookie contains forbidden characters")]
    InvalidValue { name: String },
    #[error("`{path:?}` is not a valid value for the `Path` attribute")]
    InvalidPath { path: String },
    #[error("`{domain:?}` is not a valid value for the `Domain` attribute")]
    InvalidDomain { domain: String },
    #[error(
        "`{same_site:?}` is not a valid value for the `SameSite` attribute. Expected one of `strict`, `lax` or `none`"
    )]
    InvalidSameSite { same_site: String },
    #[error("`{input}` is not a valid duration: {reason}")]
    InvalidDuration { input: String, reason: String },
    #[error("{epoch_millis} milliseconds since the Unix epoch is not a valid expiration date")]
    InvalidExpires { epoch_millis: i64 },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
/// The requested operation is forbidden by the jar configuration.
pub enum PolicyError {
    #[error("Cannot send the `{name}` cookie with the `Secure` attribute over an insecure connection")]
    InsecureConnection { name: String },
    #[error("Cookie signing was requested, but no signing keys have been configured")]
    MissingKeys,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error type returned by [`CookieJar::extract`](crate::CookieJar::extract).
pub enum ExtractRequestCookiesError {
    #[error("Some characters in the `Cookie` header aren't printable ASCII characters.")]
    InvalidHeaderValue(#[from] ToStrError),
    #[error("Failed to parse request cookies out of the `Cookie` header.")]
    ParseError(#[from] ParseError),
}

impl ExtractRequestCookiesError {
    /// A malformed `Cookie` header is a client error: `400 Bad Request`.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[error("Some characters in the `Set-Cookie` header value are not printable ASCII characters.")]
/// The error type returned by [`inject_response_cookies`](crate::inject_response_cookies).
pub struct InjectResponseCookiesError {
    /// The invalid header value.
    pub invalid_header_value: String,
}

impl InjectResponseCookiesError {
    /// Failure is likely due to misconfiguration on the server side:
    /// `500 Internal Server Error`.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
