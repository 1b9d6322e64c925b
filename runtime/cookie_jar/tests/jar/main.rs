use cookie_jar::{CookieJar, Keyring, Processor, ProcessorConfig, SetOptions, inject_response_cookies};
use fixtures::{directive, keyring, n_directives, next_request};
use http::HeaderMap;
use http::header::SET_COOKIE;
use itertools::Itertools;

mod config;
mod fixtures;

#[test]
fn signed_cookies_survive_a_key_rotation() {
    // First exchange: no inbound cookies, signed with `k1`.
    let k1 = keyring(&["k1"]);
    let mut jar = CookieJar::new(Vec::new(), Some(&k1), true);
    jar.set("LastVisit", Some("100"), SetOptions::default().signed(true))
        .unwrap();

    assert!(jar.has("LastVisit"));
    assert!(jar.has("LastVisit.sig"));
    assert_eq!(n_directives(&jar), 2);
    assert_eq!(jar.get("LastVisit").unwrap().as_deref(), Some("100"));
    let first_signature = directive(&jar, "LastVisit.sig").unwrap().value().to_owned();
    assert_eq!(k1.verify("LastVisit=100", &first_signature), Some(0));

    // Second exchange: the keyring has been rotated.
    let rotated = keyring(&["k2", "k1"]);
    let mut jar = CookieJar::new(next_request(&jar), Some(&rotated), true);
    assert_eq!(
        rotated.verify("LastVisit=100", &first_signature),
        Some(1),
        "The old signature should match the stale key"
    );
    assert_eq!(jar.get("LastVisit").unwrap().as_deref(), Some("100"));

    // A fresh signature, produced by `k2`, is sent to the client.
    assert_eq!(n_directives(&jar), 1);
    let refreshed = directive(&jar, "LastVisit.sig").unwrap().value().to_owned();
    assert_ne!(refreshed, first_signature);
    let k2 = keyring(&["k2"]);
    assert_eq!(k2.verify("LastVisit=100", &refreshed), Some(0));

    // Later reads in the same exchange verify against the current key.
    assert_eq!(jar.get("LastVisit").unwrap().as_deref(), Some("100"));
    assert_eq!(n_directives(&jar), 1);

    // Third exchange: `k1` is gone for good, but the cookie is still valid.
    let mut jar = fixtures::jar(&[("LastVisit", "100"), ("LastVisit.sig", refreshed.as_str())], Some(&k2));
    assert_eq!(jar.get("LastVisit").unwrap().as_deref(), Some("100"));
    assert_eq!(n_directives(&jar), 0);
}

#[test]
fn directives_end_up_in_set_cookie_headers() {
    let keyring = Keyring::new(["k1"]).unwrap();
    let mut jar = CookieJar::new(Vec::new(), Some(&keyring), true);
    jar.set("LastVisit", Some("100"), SetOptions::default())
        .unwrap();
    jar.set("theme", Some("dark"), SetOptions::default().signed(false))
        .unwrap();

    let processor: Processor = ProcessorConfig::default().into();
    let mut headers = HeaderMap::new();
    inject_response_cookies(&mut headers, jar.into_response_cookies(), &processor).unwrap();

    let values = headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .sorted()
        .collect_vec();
    assert_eq!(values.len(), 3);
    assert!(values[0].starts_with("LastVisit.sig="));
    assert!(values[1].starts_with("LastVisit=100"));
    assert!(values[2].starts_with("theme=dark"));
    for value in values {
        assert!(value.contains("Path=/"));
        assert!(value.contains("HttpOnly"));
    }
}

#[test]
fn a_jar_without_cookies_emits_nothing() {
    let mut jar = CookieJar::new(Vec::new(), None, false);
    assert_eq!(jar.get("missing").unwrap(), None);
    assert!(!jar.has("missing"));
    jar.clear();
    assert_eq!(n_directives(&jar), 0);
}
