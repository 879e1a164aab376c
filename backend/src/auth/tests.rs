use super::*;
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretjwtsecretforunittesting123";

fn token_for(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims(exp: usize) -> Claims {
    Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: Some("guide@example.com".to_string()),
        exp,
    }
}

#[test]
fn test_validate_jwt_success() {
    let my_claims = claims(9999999999);
    let token = token_for(&my_claims, SECRET);

    let decoded = validate_jwt(&token, SECRET).expect("Valid token should pass");
    assert_eq!(decoded.sub, my_claims.sub);
    assert_eq!(decoded.email, my_claims.email);
}

#[test]
fn test_validate_jwt_expired() {
    let token = token_for(&claims(1), SECRET);

    assert!(validate_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_jwt_invalid_signature() {
    let token = token_for(&claims(9999999999), "wrongsecret");

    assert!(validate_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_jwt_garbage() {
    assert!(validate_jwt("not-a-token", SECRET).is_err());
}

#[test]
fn test_bearer_token_extraction() {
    assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
    assert_eq!(bearer_token("Bearer   "), None);
    assert_eq!(bearer_token("Basic abc"), None);
}

fn request_parts(authorization: Option<&str>, secret: Option<&str>) -> Parts {
    let mut builder = axum::http::Request::builder().uri("/api/v1/tourish-plans");
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    if let Some(secret) = secret {
        builder = builder.extension(JwtSecret::new(secret));
    }
    builder.body(()).unwrap().into_parts().0
}

#[tokio::test]
async fn test_extractor_reads_secret_from_request_extension() {
    let token = token_for(&claims(9999999999), SECRET);
    let mut parts = request_parts(Some(&format!("Bearer {token}")), Some(SECRET));

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(
        user.user_id,
        Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap()
    );
    assert_eq!(user.email.as_deref(), Some("guide@example.com"));
}

#[tokio::test]
async fn test_extractor_rejections() {
    let token = token_for(&claims(9999999999), SECRET);

    let mut missing = request_parts(None, Some(SECRET));
    let err = AuthUser::from_request_parts(&mut missing, &()).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingHeader));
    assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

    let mut wrong_secret = request_parts(Some(&format!("Bearer {token}")), Some("wrongsecret"));
    let err = AuthUser::from_request_parts(&mut wrong_secret, &()).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(_)));

    let mut unconfigured = request_parts(Some(&format!("Bearer {token}")), None);
    let err = AuthUser::from_request_parts(&mut unconfigured, &()).await.unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}
