use cookie_jar::{CookieJar, CookieJarConfig, Keyring, SetOptions};
use googletest::{assert_that, prelude::eq};

use crate::fixtures::n_directives;

static_assertions::assert_impl_all!(Keyring: Send, Sync);
static_assertions::assert_impl_all!(CookieJarConfig: Send, Sync);

#[test]
fn cookies_are_not_signed_by_default() {
    let config: CookieJarConfig = serde_json::from_str("{}").unwrap();
    assert!(config.keys.is_empty());

    let (keyring, _processor) = config.into_parts();
    assert!(keyring.is_none());
}

#[test]
fn keys_are_loaded_in_order() {
    let config: CookieJarConfig = serde_json::from_value(serde_json::json!({
        "keys": ["k2", "k1"]
    }))
    .unwrap();
    let (keyring, _processor) = config.into_parts();
    let keyring = keyring.unwrap();
    assert_that!(format!("{keyring:?}"), eq("Keyring { n_keys: 2 }"));

    let stale = Keyring::new(["k1"]).unwrap().sign("n=v");
    assert_eq!(keyring.verify("n=v", &stale), Some(1));
    assert_eq!(keyring.verify("n=v", &keyring.sign("n=v")), Some(0));
}

#[test]
fn the_configured_keyring_signs_cookies() {
    let config: CookieJarConfig = serde_json::from_value(serde_json::json!({
        "keys": ["k1"],
        "processor": {}
    }))
    .unwrap();
    let (keyring, _processor) = config.into_parts();

    let mut jar = CookieJar::new(Vec::new(), keyring.as_ref(), true);
    jar.set("n", Some("v"), SetOptions::default()).unwrap();
    assert!(jar.has("n.sig"));
    assert_eq!(n_directives(&jar), 2);
}

#[test]
fn secrets_are_not_leaked_by_debug() {
    let config: CookieJarConfig = serde_json::from_value(serde_json::json!({
        "keys": ["super-secret"]
    }))
    .unwrap();
    assert!(!format!("{config:?}").contains("super-secret"));
}
