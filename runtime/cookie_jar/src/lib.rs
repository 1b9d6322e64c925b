/*!
A request-scoped cookie jar, with tamper-proof signed cookies.

# Overview

A [`CookieJar`] lives for the duration of a single request/response exchange.
It's seeded with the cookies sent by the client (via the `Cookie` header) and records
every change requested by the handler as a `Set-Cookie` directive for the response.

Its surface is intentionally small:

- [`CookieJar::get`] reads the current value of a cookie;
- [`CookieJar::set`] sets (or, with a `None` value, deletes) a cookie;
- [`CookieJar::has`] checks if the jar knows about a cookie;
- [`CookieJar::delete`] instructs the client to remove a cookie;
- [`CookieJar::clear`] removes every known cookie.

# Signed cookies

Cookies live on the client: they can be modified at will before being sent back.
If a [`Keyring`] is configured, the jar signs every cookie it sets by default.
The signature is an HMAC over `<name>=<value>`, sent to the client in a
companion `<name>.sig` cookie.
When a signed cookie is read, the jar verifies its signature and refuses to return
values that were tampered with.

Signing is about integrity, not confidentiality: the value is still visible to the client.

## Key rotation

A [`Keyring`] holds an ordered list of secrets, most recent first.
New signatures always use the first key, while verification accepts any key in the list.
When a cookie signed by an older key is read, the jar re-signs it with the current key,
so that the client will send back an up-to-date signature on the next request.

# Example

```rust
use cookie_jar::{CookieJar, Keyring, SetOptions};

let keyring = Keyring::new(["k1"]).unwrap();
let mut jar = CookieJar::new(Vec::new(), Some(&keyring), true);

jar.set("LastVisit", Some("100"), SetOptions::default()).unwrap();
assert_eq!(jar.get("LastVisit").unwrap().as_deref(), Some("100"));
// The value and its signature.
assert_eq!(jar.response_cookies().iter().count(), 2);
```

## References

- [RFC 6265](https://datatracker.ietf.org/doc/html/rfc6265);
- [RFC 7230 §3.2](https://datatracker.ietf.org/doc/html/rfc7230#section-3.2), for the
  character set accepted in cookie names and values.
*/
mod components;
mod config;
pub mod errors;
mod jar;
mod keyring;
pub mod options;
mod record;
mod store;
pub mod validate;

pub use components::inject_response_cookies;
pub use config::CookieJarConfig;
pub use jar::{CookieJar, SIGNATURE_SUFFIX};
pub use keyring::Keyring;
pub use options::{DeleteOptions, Expires, GetOptions, MaxAge, SameSiteInput, SetOptions};

// The transport types used at the edges of the jar.
pub use biscotti::{Processor, ProcessorConfig, ResponseCookie, ResponseCookies, SameSite};
/// Date and duration types, as used by [`ResponseCookie`] and [`Expires`].
///
/// A re-export of [`jiff`](https://docs.rs/jiff).
pub use jiff as time;
