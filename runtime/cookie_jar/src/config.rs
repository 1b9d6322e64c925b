use biscotti::{Processor, ProcessorConfig};
use secrecy::SecretString;

use crate::Keyring;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// Configure how cookies are signed and encoded.
pub struct CookieJarConfig {
    /// The secrets used to sign cookies, most recent first.
    ///
    /// To rotate keys, prepend the new secret and keep the previous ones around
    /// until the cookies they signed have expired.
    ///
    /// By default, no keys are configured and cookies are not signed.
    #[serde(default)]
    pub keys: Vec<SecretString>,
    /// Configure how cookies are encoded on the wire.
    ///
    /// By default, names and values are percent-encoded.
    #[serde(default)]
    pub processor: ProcessorConfig,
}

impl CookieJarConfig {
    /// Split the configuration into the components required to build a
    /// [`CookieJar`](crate::CookieJar).
    ///
    /// The keyring is `None` if no keys have been configured.
    pub fn into_parts(self) -> (Option<Keyring>, Processor) {
        let keyring = Keyring::from_secrets(self.keys).ok();
        (keyring, self.processor.into())
    }
}
