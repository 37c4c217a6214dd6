//! Authentication service: login and token management

use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::models::{Role, User};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Store,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Login credentials
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Response after a successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub name: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(store: Store, config: &Config) -> Self {
        Self {
            store,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Authenticate by email and password, returning a bearer token
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let account = {
            let inner = self.store.read().await;
            inner
                .users
                .get(&input.email)
                .cloned()
                .ok_or(AppError::InvalidCredentials)?
        };

        let valid = verify(&input.password, &account.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.generate_token(&account.user)?;
        tracing::info!(email = %account.user.email, role = %account.user.role, "user logged in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            user: account.user,
        })
    }

    /// Current user for a validated user id
    pub async fn me(&self, user_id: Uuid) -> AppResult<User> {
        let inner = self.store.read().await;
        inner
            .users
            .values()
            .find(|account| account.user.id == user_id)
            .map(|account| account.user.clone())
            .ok_or(AppError::InvalidToken)
    }

    fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Validate a bearer token and return its claims
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token(token, &self.jwt_secret)
    }
}

/// Verify a token against a secret without an AuthService instance
/// (used by the request middleware).
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    fn test_config() -> Config {
        Config {
            environment: "test".into(),
            server: crate::config::ServerConfig {
                port: 0,
                host: "127.0.0.1".into(),
            },
            jwt: crate::config::JwtConfig {
                secret: "test-secret".into(),
                access_token_expiry: 3600,
            },
            seed: crate::config::SeedConfig {
                demo_password: "password123".into(),
            },
        }
    }

    fn service() -> AuthService {
        let config = test_config();
        AuthService::new(Store::new(seed::demo(&config.seed.demo_password)), &config)
    }

    #[tokio::test]
    async fn login_issues_a_verifiable_token() {
        let service = service();

        let response = service
            .login(LoginInput {
                email: "sales@venus.com".into(),
                password: "password123".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.user.role, Role::Sales);

        let claims = service.verify_token(&response.token).unwrap();
        assert_eq!(claims.email, "sales@venus.com");
        assert_eq!(claims.role, Role::Sales);
        assert_eq!(claims.sub, response.user.id.to_string());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let service = service();

        let err = service
            .login(LoginInput {
                email: "sales@venus.com".into(),
                password: "not-the-password".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let service = service();

        let err = service
            .login(LoginInput {
                email: "nobody@venus.com".into(),
                password: "password123".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn me_returns_the_token_owner() {
        let service = service();

        let response = service
            .login(LoginInput {
                email: "customer@venus.com".into(),
                password: "password123".into(),
            })
            .await
            .unwrap();

        let user = service.me(response.user.id).await.unwrap();
        assert_eq!(user.email, "customer@venus.com");
        assert_eq!(user.customer_id.as_deref(), Some("CUST-001"));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let err = verify_token("not.a.jwt", "development-secret-key").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
