use biscotti::{Processor, RequestCookies, ResponseCookies};
use http::HeaderMap;
use http::header::COOKIE;
use percent_encoding::percent_decode_str;

use crate::Keyring;
use crate::errors::{CookieJarError, ExtractRequestCookiesError, PolicyError, ValidationError};
use crate::options::{DeleteOptions, GetOptions, SetOptions};
use crate::record::CookieRecord;
use crate::store::CookieStore;
use crate::validate::is_field_content;

/// The suffix appended to a cookie name to get the name of its signature cookie.
pub const SIGNATURE_SUFFIX: &str = ".sig";

#[derive(Debug)]
/// The cookies of a single request/response exchange.
///
/// The jar is seeded with the cookies sent by the client and keeps track of every
/// change requested by the handler, in the form of `Set-Cookie` directives.
///
/// # Signed cookies
///
/// If a [`Keyring`] is available, cookies are signed by default: every cookie `<name>`
/// gets a sibling `<name>.sig` cookie carrying an HMAC over `<name>=<value>`.
/// Reading a signed cookie verifies the signature first:
///
/// - a signature produced by the current key is accepted as is;
/// - a signature produced by an older key is accepted, and the cookie is re-signed
///   with the current key on the spot;
/// - a signature that doesn't match any key is discarded, together with the value.
///
/// # Overwrite policy
///
/// The first value set for a name wins: setting a cookie the jar already knows about
/// is a no-op, unless [`SetOptions::overwrite`] is set.
pub struct CookieJar<'keys> {
    store: CookieStore,
    outgoing: ResponseCookies<'static>,
    keyring: Option<&'keys Keyring>,
    secure: bool,
}

impl<'keys> CookieJar<'keys> {
    /// Create a new jar from the `name=value` pairs sent by the client.
    ///
    /// `secure` must be `true` if and only if the connection is secure (e.g. HTTPS):
    /// it's not possible to set a cookie with the `Secure` attribute otherwise.
    pub fn new<I>(request_cookies: I, keyring: Option<&'keys Keyring>, secure: bool) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut store = CookieStore::default();
        store.load(request_cookies);
        Self {
            store,
            outgoing: ResponseCookies::new(),
            keyring,
            secure,
        }
    }

    /// Parse the `Cookie` headers of the incoming request and create a new jar.
    ///
    /// Values are decoded according to `processor`.
    /// If the client sent multiple cookies with the same name, the first one wins.
    pub fn extract(
        headers: &HeaderMap,
        processor: &Processor,
        keyring: Option<&'keys Keyring>,
        secure: bool,
    ) -> Result<Self, ExtractRequestCookiesError> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for header in headers.get_all(COOKIE) {
            let header = header.to_str()?;
            let cookies = RequestCookies::parse_header(header, processor)?;
            for raw_name in raw_cookie_names(header) {
                let decoded_name = percent_decode_str(raw_name).decode_utf8_lossy();
                for name in [decoded_name.as_ref(), raw_name] {
                    if let Some(cookie) = cookies.get(name) {
                        if !pairs.iter().any(|(n, _)| n == name) {
                            pairs.push((name.to_owned(), cookie.value().to_owned()));
                        }
                        break;
                    }
                }
            }
        }
        Ok(Self::new(pairs, keyring, secure))
    }

    /// Retrieve the value of the cookie named `name`, using the default [`GetOptions`].
    pub fn get(&mut self, name: &str) -> Result<Option<String>, CookieJarError> {
        self.get_with(name, GetOptions::default())
    }

    /// Retrieve the value of the cookie named `name`.
    ///
    /// If the cookie must be signed, `None` is returned when the signature is missing
    /// or invalid. An invalid signature cookie is removed from the client.
    ///
    /// It fails with [`PolicyError::MissingKeys`] if a signed read is requested but
    /// the jar has no keyring.
    pub fn get_with(
        &mut self,
        name: &str,
        options: GetOptions,
    ) -> Result<Option<String>, CookieJarError> {
        let keyring = self.signing_keyring(options.signed)?;
        let Some(value) = self.store.read(name).map(ToOwned::to_owned) else {
            return Ok(None);
        };
        let Some(keyring) = keyring else {
            return Ok(Some(value));
        };

        let signature_name = signature_name(name);
        let Some(signature) = self.store.read(&signature_name).map(ToOwned::to_owned) else {
            return Ok(None);
        };
        let data = signed_data(name, &value);
        match keyring.verify(&data, &signature) {
            Some(0) => Ok(Some(value)),
            Some(position) => {
                tracing::debug!(
                    cookie.name = name,
                    key.position = position,
                    "Cookie signature was produced by a stale key, re-signing it"
                );
                let record =
                    CookieRecord::new(&signature_name, &keyring.sign(&data), &SetOptions::default())?;
                self.emit(record);
                Ok(Some(value))
            }
            None => {
                tracing::warn!(
                    cookie.name = name,
                    "Cookie signature doesn't match any key, discarding it"
                );
                self.emit_removal(CookieRecord::minimal_removal(&signature_name));
                Ok(None)
            }
        }
    }

    /// Set the cookie named `name` to `value`.
    ///
    /// A `None` value deletes the cookie, forwarding the attributes in `options` to
    /// [`CookieJar::delete_with`].
    ///
    /// All inputs are validated before any change is applied: on error, the jar is
    /// left untouched and no directive is emitted.
    pub fn set(
        &mut self,
        name: &str,
        value: Option<&str>,
        options: SetOptions,
    ) -> Result<(), CookieJarError> {
        let Some(value) = value else {
            return if options == SetOptions::default() {
                self.delete(name)
            } else {
                self.delete_with(name, options.into())
            };
        };

        let record = CookieRecord::new(name, value, &options)?;
        if self.store.contains(name) && !options.overwrite {
            tracing::debug!(
                cookie.name = name,
                "The cookie has already been set, skipping since `overwrite` is disabled"
            );
            return Ok(());
        }
        self.check_secure(&record.name, record.secure)?;
        let keyring = self.signing_keyring(options.signed)?;

        let signature_name = signature_name(name);
        let signature = keyring.map(|keyring| {
            let signature = keyring.sign(&signed_data(name, value));
            record.sibling(signature_name.clone(), signature)
        });

        match signature {
            Some(signature) => {
                self.emit(record);
                self.emit(signature);
            }
            None => {
                // A stale signature would shadow the new, unsigned value.
                // It must be expired in the same scope it was set in.
                let stale = self
                    .store
                    .contains(&signature_name)
                    .then(|| record.sibling_removal(signature_name));
                self.emit(record);
                if let Some(stale) = stale {
                    self.emit_removal(stale);
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if the jar knows about a cookie named `name`.
    ///
    /// Signatures are not checked.
    pub fn has(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Instruct the client to remove the cookie named `name`, as well as its
    /// signature cookie if there is one.
    ///
    /// It emits a minimal removal directive (`Path=/`).
    /// Use [`CookieJar::delete_with`] if the cookie was set with different attributes.
    pub fn delete(&mut self, name: &str) -> Result<(), CookieJarError> {
        if !is_field_content(name) {
            return Err(ValidationError::InvalidName {
                name: name.to_owned(),
            }
            .into());
        }
        self.expire_pair(CookieRecord::minimal_removal(name));
        Ok(())
    }

    /// Instruct the client to remove the cookie named `name`, as well as its
    /// signature cookie if there is one.
    ///
    /// `options` must match the attributes used when the cookie was set.
    pub fn delete_with(&mut self, name: &str, options: DeleteOptions) -> Result<(), CookieJarError> {
        let record = CookieRecord::removal(name, &options)?;
        self.check_secure(&record.name, record.secure)?;
        self.expire_pair(record);
        Ok(())
    }

    /// Remove every cookie known to the jar, signature cookies included.
    ///
    /// Each cookie gets exactly one removal directive.
    pub fn clear(&mut self) {
        for name in self.store.names() {
            // Already removed together with its base cookie.
            if !self.store.contains(&name) {
                continue;
            }
            self.expire_pair(CookieRecord::minimal_removal(&name));
        }
    }

    /// The `Set-Cookie` directives accumulated so far.
    pub fn response_cookies(&self) -> &ResponseCookies<'static> {
        &self.outgoing
    }

    /// Consume the jar and return the `Set-Cookie` directives to attach to the response.
    pub fn into_response_cookies(self) -> ResponseCookies<'static> {
        self.outgoing
    }

    fn signing_keyring(&self, signed: Option<bool>) -> Result<Option<&'keys Keyring>, PolicyError> {
        match signed {
            None => Ok(self.keyring),
            Some(false) => Ok(None),
            Some(true) => self.keyring.map(Some).ok_or(PolicyError::MissingKeys),
        }
    }

    fn check_secure(&self, name: &str, secure: bool) -> Result<(), PolicyError> {
        if secure && !self.secure {
            return Err(PolicyError::InsecureConnection {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    fn emit(&mut self, record: CookieRecord) {
        self.store.write(record.name.clone(), record.value.clone());
        self.outgoing.insert(record.into_response_cookie());
    }

    fn emit_removal(&mut self, record: CookieRecord) {
        self.store.remove(&record.name);
        self.outgoing.insert(record.into_response_cookie());
    }

    fn expire_pair(&mut self, removal: CookieRecord) {
        let signature_name = signature_name(&removal.name);
        let signature = self
            .store
            .contains(&signature_name)
            .then(|| removal.sibling_removal(signature_name));
        self.emit_removal(removal);
        if let Some(signature) = signature {
            self.emit_removal(signature);
        }
    }
}

fn signature_name(name: &str) -> String {
    format!("{name}{SIGNATURE_SUFFIX}")
}

fn signed_data(name: &str, value: &str) -> String {
    format!("{name}={value}")
}

/// The names in a `Cookie` header, as they appear on the wire.
fn raw_cookie_names(header: &str) -> impl Iterator<Item = &str> {
    header.split(';').filter_map(|pair| {
        let (name, _) = pair.split_once('=')?;
        let name = name.trim();
        (!name.is_empty()).then_some(name)
    })
}
