use super::model::AuthenticatedUser;
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Verifies HS256 bearer tokens signed with the shared secret
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    // exp/iss/aud/nbf are checked by jsonwebtoken itself
    sub: String,

    // Identity providers disagree on single vs. multiple role claims
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = config.jwt_leeway.as_secs();
        validation.validate_nbf = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(AppError::Unauthorized(
                "Token has an empty subject".to_string(),
            ));
        }

        let mut roles = claims.roles;
        if let Some(role) = claims.role {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use std::time::Duration;

    const SECRET: &str = "unit-test-secret";

    fn config(issuer: Option<&str>, audience: Option<&str>) -> AuthConfig {
        AuthConfig {
            jwt_secret: SECRET.to_string(),
            issuer: issuer.map(str::to_string),
            audience: audience.map(str::to_string),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    fn sign(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn exp() -> i64 {
        chrono::Utc::now().timestamp() + 600
    }

    #[test]
    fn test_roles_are_merged() {
        let validator = JwtValidator::new(&config(None, None));
        let token = sign(json!({
            "sub": "u1",
            "exp": exp(),
            "role": "admin",
            "roles": ["editor"],
            "aud": "ignored-when-not-configured"
        }));

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.user_id, "u1");
        assert_eq!(user.roles, vec!["editor".to_string(), "admin".to_string()]);
    }

    #[test]
    fn test_issuer_and_audience_enforced_when_configured() {
        let validator = JwtValidator::new(&config(Some("https://issuer"), Some("prompt-library")));

        let good = sign(json!({
            "sub": "u1", "exp": exp(), "iss": "https://issuer", "aud": "prompt-library"
        }));
        assert!(validator.validate_token(&good).is_ok());

        let wrong_issuer = sign(json!({
            "sub": "u1", "exp": exp(), "iss": "https://other", "aud": "prompt-library"
        }));
        assert!(matches!(
            validator.validate_token(&wrong_issuer),
            Err(AppError::Unauthorized(_))
        ));

        let wrong_audience = sign(json!({
            "sub": "u1", "exp": exp(), "iss": "https://issuer", "aud": "someone-else"
        }));
        assert!(validator.validate_token(&wrong_audience).is_err());
    }

    #[test]
    fn test_exp_and_sub_are_required() {
        let validator = JwtValidator::new(&config(None, None));
        assert!(validator.validate_token(&sign(json!({ "sub": "u1" }))).is_err());
        assert!(validator.validate_token(&sign(json!({ "exp": exp() }))).is_err());
        assert!(validator
            .validate_token(&sign(json!({ "sub": "", "exp": exp() })))
            .is_err());
    }
}
