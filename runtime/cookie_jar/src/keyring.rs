use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::errors::PolicyError;

type HmacSha256 = Hmac<Sha256>;

/// An ordered list of signing secrets, most recent first.
///
/// New signatures are always computed with the current key (the first one).
/// Verification tolerates older keys, so that secrets can be rotated without
/// invalidating every cookie that's still out there: prepend the new secret,
/// keep the previous ones around for a while, then drop them.
///
/// Signatures are HMAC-SHA256 tags, encoded as unpadded URL-safe base64.
///
/// # Example
///
/// ```rust
/// use cookie_jar::Keyring;
///
/// let old = Keyring::new(["k1"]).unwrap();
/// let signature = old.sign("LastVisit=100");
///
/// let rotated = Keyring::new(["k2", "k1"]).unwrap();
/// // Still valid, but it was produced by a stale key.
/// assert_eq!(rotated.verify("LastVisit=100", &signature), Some(1));
/// // Forged (or corrupted) signatures don't match any key.
/// assert_eq!(rotated.verify("LastVisit=101", &signature), None);
/// ```
pub struct Keyring {
    keys: Vec<SecretString>,
}

impl Keyring {
    /// Build a keyring from a list of secrets, most recent first.
    ///
    /// It fails with [`PolicyError::MissingKeys`] if the list is empty.
    pub fn new<I, K>(keys: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::from_secrets(keys.into_iter().map(|k| SecretString::from(k.into())))
    }

    /// Build a keyring from a list of secrets that are already wrapped in a [`SecretString`].
    pub fn from_secrets<I>(keys: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = SecretString>,
    {
        let keys: Vec<_> = keys.into_iter().collect();
        if keys.is_empty() {
            return Err(PolicyError::MissingKeys);
        }
        Ok(Self { keys })
    }

    /// Sign `data` using the current key.
    pub fn sign(&self, data: &str) -> String {
        let tag = mac(&self.keys[0], data).finalize().into_bytes();
        URL_SAFE_NO_PAD.encode(tag)
    }

    /// Check `signature` against each key, in order.
    ///
    /// It returns the position of the first key that produced `signature`:
    /// `Some(0)` for the current key, `Some(n)` with `n > 0` for a stale key (the
    /// data should be re-signed), `None` if no key matches.
    pub fn verify(&self, data: &str, signature: &str) -> Option<usize> {
        let tag = URL_SAFE_NO_PAD.decode(signature).ok()?;
        self.keys
            .iter()
            .position(|key| mac(key, data).verify_slice(&tag).is_ok())
    }
}

fn mac(key: &SecretString, data: &str) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key.expose_secret().as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(data.as_bytes());
    mac
}

impl std::fmt::Debug for Keyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyring")
            .field("n_keys", &self.keys.len())
            .finish()
    }
}
