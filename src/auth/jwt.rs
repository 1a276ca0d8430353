use axum::extract::FromRef;
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::debug;

use super::claims::{Claims, TokenKind};
use crate::{config::JwtConfig, state::AppState};

/// Verification half of the JWT setup: tokens are issued elsewhere with the
/// shared secret, this service only checks them.
#[derive(Clone)]
pub struct JwtKeys {
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
        } = state.config.jwt.clone();
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
        }
    }
}

impl JwtKeys {
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    pub fn verify_access(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Access {
            anyhow::bail!("not an access token");
        }
        Ok(claims)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::sign;
    use super::*;
    use crate::auth::access::Role;
    use uuid::Uuid;

    fn keys() -> (JwtKeys, JwtConfig) {
        let state = AppState::fake();
        (JwtKeys::from_ref(&state), state.config.jwt.clone())
    }

    #[tokio::test]
    async fn verifies_access_token_with_role() {
        let (keys, cfg) = keys();
        let user_id = Uuid::new_v4();
        let token = sign(&cfg, user_id, Role::Nutritionist, TokenKind::Access);
        let claims = keys.verify_access(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.role, Role::Nutritionist);
    }

    #[tokio::test]
    async fn verify_access_rejects_refresh_token() {
        let (keys, cfg) = keys();
        let token = sign(&cfg, Uuid::new_v4(), Role::User, TokenKind::Refresh);
        let err = keys.verify_access(&token).unwrap_err();
        assert!(err.to_string().contains("not an access token"));
    }

    #[tokio::test]
    async fn verify_rejects_wrong_audience() {
        let (keys, mut cfg) = keys();
        cfg.audience = "someone-else".into();
        let token = sign(&cfg, Uuid::new_v4(), Role::User, TokenKind::Access);
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_wrong_secret() {
        let (keys, mut cfg) = keys();
        cfg.secret = "other-secret".into();
        let token = sign(&cfg, Uuid::new_v4(), Role::User, TokenKind::Access);
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn missing_role_claim_defaults_to_user() {
        let json = serde_json::json!({
            "sub": Uuid::nil(),
            "iat": 0,
            "exp": 0,
            "iss": "i",
            "aud": "a",
            "kind": "access",
        });
        let claims: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(claims.role, Role::User);
    }
}
