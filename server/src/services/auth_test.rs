use pillarx::activity::{Origin, Page};

use super::*;

fn caller(ua: &str) -> Caller {
    Caller::anonymous(Origin::new("127.0.0.1", ua))
}

fn signer() -> TokenSigner {
    TokenSigner::new("test-secret", 3600).unwrap()
}

// =============================================================================
// Password hashing
// =============================================================================

#[test]
fn hash_then_verify() {
    let hash = hash_password("hunter2").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("hunter2", &hash));
    assert!(!verify_password("hunter3", &hash));
}

#[test]
fn same_password_hashes_differently() {
    assert_ne!(hash_password("pw").unwrap(), hash_password("pw").unwrap());
}

#[test]
fn unparsable_hash_never_verifies() {
    assert!(!verify_password("pw", "not-a-phc-string"));
}

// =============================================================================
// register
// =============================================================================

#[test]
fn register_requires_email_and_password() {
    let mut ws = Workspace::seeded();
    let err = register(&mut ws, "", "pw", None, &caller("Mozilla/5.0")).unwrap_err();
    assert!(matches!(err, AuthError::MissingCredentials));
    assert_eq!(err.to_string(), "Email and password are required.");
    assert!(register(&mut ws, "a@b.c", "", None, &caller("Mozilla/5.0")).is_err());
}

#[test]
fn register_rejects_duplicate_email() {
    let mut ws = Workspace::seeded();
    register(&mut ws, "a@b.c", "pw", Some("Ada".into()), &caller("Mozilla/5.0")).unwrap();
    let err = register(&mut ws, "a@b.c", "other", None, &caller("Mozilla/5.0")).unwrap_err();
    assert_eq!(err.to_string(), "Email already registered.");
}

#[test]
fn register_returns_profile_and_records_activity() {
    let mut ws = Workspace::seeded();
    let user = register(&mut ws, "a@b.c", "pw", Some("Ada".into()), &caller("Mozilla/5.0")).unwrap();
    assert_eq!(user.full_name.as_deref(), Some("Ada"));
    assert_eq!(user.role, Role::User);
    let page = ws.my_activities(&user.id, Page::default());
    assert_eq!(page.data[0].action_type, action::REGISTER);
}

// =============================================================================
// login
// =============================================================================

#[test]
fn login_issues_token_session_and_activity() {
    let mut ws = Workspace::seeded();
    let mut sessions = SessionStore::new(signer().ttl());
    let user = register(&mut ws, "a@b.c", "pw", None, &caller("Mozilla/5.0")).unwrap();

    let outcome = login(&mut ws, &mut sessions, &signer(), "a@b.c", "pw", &caller("Mozilla/5.0")).unwrap();
    assert!(!outcome.is_bot);
    assert_eq!(outcome.user.id, user.id);
    assert_eq!(sessions.len(), 1);

    let claims = signer().verify(&outcome.token, OffsetDateTime::now_utc()).unwrap();
    assert_eq!(claims.sub, user.id);
    assert!(sessions.get(&claims.sid).is_some());

    let page = ws.my_activities(&user.id, Page::default());
    let latest = &page.data[0];
    assert_eq!(latest.action_type, action::LOGIN);
    assert_eq!(latest.action_detail, Some(json!({"client": "HUMAN", "platform": "Web"})));
    assert_eq!(ws.current_user().map(|u| u.id.as_str()), Some(user.id.as_str()));
}

#[test]
fn login_from_curl_is_flagged_bot() {
    let mut ws = Workspace::seeded();
    let mut sessions = SessionStore::new(signer().ttl());
    register(&mut ws, "a@b.c", "pw", None, &caller("Mozilla/5.0")).unwrap();
    let outcome = login(&mut ws, &mut sessions, &signer(), "a@b.c", "pw", &caller("curl/8.0")).unwrap();
    assert!(outcome.is_bot);
}

#[test]
fn login_rejects_bad_credentials_alike() {
    let mut ws = Workspace::seeded();
    let mut sessions = SessionStore::new(signer().ttl());
    register(&mut ws, "a@b.c", "pw", None, &caller("Mozilla/5.0")).unwrap();

    let wrong_pw = login(&mut ws, &mut sessions, &signer(), "a@b.c", "nope", &caller("x")).unwrap_err();
    let wrong_email = login(&mut ws, &mut sessions, &signer(), "z@b.c", "pw", &caller("x")).unwrap_err();
    assert_eq!(wrong_pw.to_string(), wrong_email.to_string());
    assert_eq!(wrong_pw.to_string(), "Invalid email or password.");
    assert_eq!(sessions.len(), 0);
}
