use time::Duration;

use super::*;

fn signer() -> TokenSigner {
    TokenSigner::new("test-secret", 3600).unwrap()
}

#[test]
fn issued_token_verifies() {
    let now = OffsetDateTime::now_utc();
    let token = signer().issue("u1", "a@b.c", "sid", now);
    let claims = signer().verify(&token, now).unwrap();
    assert_eq!(claims.sub, "u1");
    assert_eq!(claims.email, "a@b.c");
    assert_eq!(claims.sid, "sid");
    assert_eq!(claims.exp, now.unix_timestamp() + 3600);
}

#[test]
fn expired_token_is_rejected() {
    let now = OffsetDateTime::now_utc();
    let token = signer().issue("u1", "a@b.c", "sid", now);
    assert!(signer().verify(&token, now + Duration::minutes(59)).is_ok());
    assert_eq!(signer().verify(&token, now + Duration::hours(1)), Err(TokenError::Expired));
}

#[test]
fn tampered_payload_is_rejected() {
    let now = OffsetDateTime::now_utc();
    let token = signer().issue("u1", "a@b.c", "sid", now);
    let (_, sig) = token.split_once('.').unwrap();
    let forged = Claims { sub: "admin".into(), email: "a@b.c".into(), sid: "sid".into(), exp: i64::MAX };
    let forged_payload = bytes_to_hex(&serde_json::to_vec(&forged).unwrap());
    let forged_token = format!("{forged_payload}.{sig}");
    assert_eq!(signer().verify(&forged_token, now), Err(TokenError::BadSignature));
}

#[test]
fn other_key_is_rejected() {
    let now = OffsetDateTime::now_utc();
    let token = TokenSigner::new("other-secret", 3600).unwrap().issue("u1", "a@b.c", "sid", now);
    assert_eq!(signer().verify(&token, now), Err(TokenError::BadSignature));
}

#[test]
fn garbage_is_malformed() {
    let now = OffsetDateTime::now_utc();
    assert_eq!(signer().verify("", now), Err(TokenError::Malformed));
    assert_eq!(signer().verify("nodot", now), Err(TokenError::Malformed));
    assert_eq!(signer().verify("zz.zz", now), Err(TokenError::Malformed));
}

#[test]
fn debug_hides_key() {
    let rendered = format!("{:?}", signer());
    assert!(!rendered.contains("test-secret"));
    assert!(rendered.contains("ttl_secs"));
}
