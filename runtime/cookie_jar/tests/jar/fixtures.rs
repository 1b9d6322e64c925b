use cookie_jar::time::Zoned;
use cookie_jar::{CookieJar, Keyring, ResponseCookie};

/// A keyring with the given secrets, most recent first.
pub fn keyring(keys: &[&str]) -> Keyring {
    Keyring::new(keys.iter().copied()).unwrap()
}

/// A jar for a secure connection, seeded with `pairs`.
pub fn jar<'k>(pairs: &[(&str, &str)], keyring: Option<&'k Keyring>) -> CookieJar<'k> {
    let pairs = pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()));
    CookieJar::new(pairs, keyring, true)
}

/// The directive emitted for the cookie named `name`, if any.
pub fn directive<'j>(jar: &'j CookieJar<'_>, name: &str) -> Option<&'j ResponseCookie<'static>> {
    jar.response_cookies().iter().find(|c| c.name() == name)
}

/// The number of directives emitted so far.
pub fn n_directives(jar: &CookieJar<'_>) -> usize {
    jar.response_cookies().iter().count()
}

/// The cookies the client will send back on the next request, according to the
/// directives emitted by `jar`.
pub fn next_request(jar: &CookieJar<'_>) -> Vec<(String, String)> {
    jar.response_cookies()
        .iter()
        .filter(|c| !c.value().is_empty())
        .map(|c| (c.name().to_owned(), c.value().to_owned()))
        .collect()
}

/// The `Expires` attribute of `cookie`, if it's set to a date.
pub fn expiration(cookie: &ResponseCookie<'static>) -> Option<Zoned> {
    let expires = cookie.expires()?;
    expires.datetime().cloned()
}
