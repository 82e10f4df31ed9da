use axum::Json;

use crate::features::auth::dto::ProtectedResponseDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ErrorResponse;

/// Echo the caller's identity; only reachable with a valid bearer token
#[utoipa::path(
    get,
    path = "/api/protected",
    responses(
        (status = 200, description = "Caller is authenticated", body = ProtectedResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn protected(user: AuthenticatedUser) -> Json<ProtectedResponseDto> {
    Json(user.into())
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderValue, StatusCode};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    use crate::shared::test_helpers::{test_server, TEST_JWT_SECRET};

    fn token(claims: Value, secret: &str) -> HeaderValue {
        let jwt = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        HeaderValue::from_str(&format!("Bearer {}", jwt)).unwrap()
    }

    fn expires_in(secs: i64) -> i64 {
        chrono::Utc::now().timestamp() + secs
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let (server, _) = test_server();
        let response = server.get("/api/protected").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_valid_token_returns_user_id() {
        let (server, _) = test_server();
        let response = server
            .get("/api/protected")
            .add_header(
                header::AUTHORIZATION,
                token(json!({ "sub": "user_123", "exp": expires_in(600) }), TEST_JWT_SECRET),
            )
            .await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["userId"], "user_123");
        assert_eq!(body["message"], "Protected API route");
        assert_eq!(body["roles"], json!([]));
    }

    #[tokio::test]
    async fn test_roles_are_echoed() {
        let (server, _) = test_server();
        let claims = json!({
            "sub": "user_123",
            "exp": expires_in(600),
            "role": "admin",
            "roles": ["editor"],
        });
        let body = server
            .get("/api/protected")
            .add_header(header::AUTHORIZATION, token(claims, TEST_JWT_SECRET))
            .await
            .json::<Value>();
        assert_eq!(body["roles"], json!(["editor", "admin"]));
    }

    #[tokio::test]
    async fn test_bad_tokens_are_unauthorized() {
        let (server, _) = test_server();
        let cases = vec![
            token(json!({ "sub": "u", "exp": expires_in(600) }), "wrong-secret"),
            token(json!({ "sub": "u", "exp": expires_in(-3600) }), TEST_JWT_SECRET),
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
            HeaderValue::from_static("Bearer not.a.jwt"),
        ];

        for value in cases {
            server
                .get("/api/protected")
                .add_header(header::AUTHORIZATION, value)
                .await
                .assert_status(StatusCode::UNAUTHORIZED);
        }
    }
}
