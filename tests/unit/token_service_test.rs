/// Tests for JWT issuing and verification

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use finconsole::core::AppError;
use finconsole::modules::auth::{Claims, TokenService, TokenType};
use finconsole::modules::users::{Role, User};

const NOW: i64 = 1_740_000_000;

fn service() -> TokenService {
    TokenService::new("unit-test-secret", 300, 2_592_000)
}

fn admin() -> User {
    User::new(42, "cfo@example.com", Role::Admin)
}

#[test]
fn test_claims_round_trip() {
    let tokens = service();
    let token = tokens.issue_at(&admin(), TokenType::Access, NOW).unwrap();
    let claims = tokens.verify_at(&token, TokenType::Access, NOW + 10).unwrap();

    assert_eq!(claims.user_id, 42);
    assert_eq!(claims.email, "cfo@example.com");
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.exp, NOW + 300);
    assert!(!claims.jti.is_empty());
}

#[test]
fn test_each_token_gets_its_own_jti() {
    let tokens = service();
    let a = tokens.issue_at(&admin(), TokenType::Access, NOW).unwrap();
    let b = tokens.issue_at(&admin(), TokenType::Access, NOW).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_refresh_lifetime() {
    let tokens = service();
    let token = tokens.issue_at(&admin(), TokenType::Refresh, NOW).unwrap();
    let claims = tokens.verify_at(&token, TokenType::Refresh, NOW + 86_400).unwrap();
    assert_eq!(claims.exp, NOW + 2_592_000);
}

#[test]
fn test_expired_token_rejected() {
    let tokens = service();
    let token = tokens.issue_at(&admin(), TokenType::Access, NOW).unwrap();

    let err = tokens.verify_at(&token, TokenType::Access, NOW + 300).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(ref msg) if msg.contains("expired")));
}

#[test]
fn test_token_type_confusion_rejected() {
    let tokens = service();
    let refresh = tokens.issue_at(&admin(), TokenType::Refresh, NOW).unwrap();
    let access = tokens.issue_at(&admin(), TokenType::Access, NOW).unwrap();

    assert!(tokens.verify_at(&refresh, TokenType::Access, NOW).is_err());
    assert!(tokens.verify_at(&access, TokenType::Refresh, NOW).is_err());
}

#[test]
fn test_tampered_payload_rejected() {
    let tokens = service();
    let token = tokens.issue_at(&User::new(7, "clerk@example.com", Role::User), TokenType::Access, NOW).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let mut claims: Claims =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
    claims.role = Role::Admin;
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

    assert!(tokens.verify_at(&forged, TokenType::Access, NOW).is_err());
}

#[test]
fn test_alg_none_rejected() {
    let tokens = service();
    let token = tokens.issue_at(&admin(), TokenType::Access, NOW).unwrap();
    let parts: Vec<&str> = token.split('.').collect();

    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let unsigned = format!("{}.{}.", header, parts[1]);

    assert!(tokens.verify_at(&unsigned, TokenType::Access, NOW).is_err());
}

#[test]
fn test_garbage_rejected() {
    let tokens = service();
    for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.##"] {
        assert!(tokens.verify_at(token, TokenType::Access, NOW).is_err(), "{token}");
    }
}

#[test]
fn test_encode_verifies_with_same_secret_only() {
    let claims = Claims {
        user_id: 1,
        email: "a@b.io".to_string(),
        role: Role::User,
        token_type: TokenType::Access,
        iat: NOW,
        exp: NOW + 60,
        jti: "fixed".to_string(),
    };

    let token = service().encode(&claims).unwrap();
    assert_eq!(service().verify_at(&token, TokenType::Access, NOW).unwrap(), claims);

    let other = TokenService::new("another-secret", 300, 600);
    assert!(other.verify_at(&token, TokenType::Access, NOW).is_err());
}

#[test]
fn test_payload_uses_registered_claim_names() {
    let token = service().issue_at(&admin(), TokenType::Refresh, NOW).unwrap();
    let payload = token.split('.').nth(1).unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();

    assert_eq!(json["sub"], 42);
    assert_eq!(json["token_type"], "refresh");
    assert_eq!(json["role"], "admin");
    assert!(json.get("user_id").is_none());
}
