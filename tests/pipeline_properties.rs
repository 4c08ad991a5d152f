//! Property tests for the normalize and sign stages over arbitrary requests.

use hmac::{Hmac, Mac};
use proptest::prelude::*;
use sha2::Sha512;

use coinpayments::auth::{apply_default_options, sign_request};
use coinpayments::prelude::*;

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        // reserved form characters, non-ASCII and emoji
        "[a-zA-Z0-9 &=+%#?/@!'()*~.:;,äöüß€日本語\u{1F600}-]{0,24}".prop_map(FieldValue::from),
        any::<String>().prop_map(FieldValue::from),
        any::<i64>().prop_map(FieldValue::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(FieldValue::from),
    ]
}

fn request() -> impl Strategy<Value = CoinpaymentsRequest> {
    (
        "[a-z0-9_]{1,20}",
        prop::collection::vec(("[a-z_][a-z0-9_]{0,15}", field_value()), 0..8),
    )
        .prop_map(|(cmd, fields)| {
            fields
                .into_iter()
                .fold(CoinpaymentsRequest::new(cmd), |request, (k, v)| {
                    request.with(k, v)
                })
        })
}

fn credentials() -> impl Strategy<Value = Credentials> {
    ("\\PC{1,40}", "\\PC{0,64}").prop_map(|(key, secret)| Credentials::new(key, secret))
}

fn independent_hmac(secret: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_hmac_matches_signed_body(
        request in request(),
        (key, secret) in ("\\PC{1,40}", "\\PC{0,64}"),
    ) {
        let credentials = Credentials::new(key.clone(), secret.clone());
        let normalized = apply_default_options(&credentials, &request, &ApiConfig::default());
        let signed = sign_request(&credentials, &normalized).unwrap();

        prop_assert_eq!(&signed.body, &normalized.to_form().unwrap());
        prop_assert_eq!(signed.headers.hmac, independent_hmac(&secret, &signed.body));
        prop_assert_eq!(
            signed.headers.content_type.as_str(),
            "application/x-www-form-urlencoded"
        );

        let sent = CoinpaymentsRequest::from_form(&signed.body).unwrap();
        prop_assert_eq!(sent.get("key"), Some(&FieldValue::from(key)));
    }

    #[test]
    fn test_normalizer_is_idempotent(
        request in request(),
        credentials in credentials(),
    ) {
        let config = ApiConfig::default();
        let once = apply_default_options(&credentials, &request, &config);
        let twice = apply_default_options(&credentials, &once, &config);

        prop_assert_eq!(once.to_pairs(), twice.to_pairs());
        prop_assert_eq!(once.get("version"), Some(&FieldValue::from("1")));
        prop_assert_eq!(once.get("format"), Some(&FieldValue::from("json")));
    }

    #[test]
    fn test_form_round_trip(request in request()) {
        let body = request.to_form().unwrap();
        let parsed = CoinpaymentsRequest::from_form(&body).unwrap();

        prop_assert_eq!(parsed.to_pairs(), request.to_pairs());
        prop_assert_eq!(parsed.to_form().unwrap(), body);
    }
}
