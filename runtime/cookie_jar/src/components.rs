use biscotti::{Processor, ResponseCookies};
use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue};

use crate::errors::InjectResponseCookiesError;

/// Attach cookies to the outgoing response, one `Set-Cookie` header per directive.
///
/// It consumes [`ResponseCookies`] by value since no response cookies should be
/// added after the response headers have been assembled.
pub fn inject_response_cookies(
    headers: &mut HeaderMap,
    response_cookies: ResponseCookies<'static>,
    processor: &Processor,
) -> Result<(), InjectResponseCookiesError> {
    for value in response_cookies.header_values(processor) {
        let value = HeaderValue::from_str(&value).map_err(|_| InjectResponseCookiesError {
            invalid_header_value: value,
        })?;
        headers.append(SET_COOKIE, value);
    }
    Ok(())
}
