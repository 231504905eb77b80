//! JWT token service
//!
//! Issues and verifies the access/refresh token pair.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret for access tokens (should be at least 32 bytes)
    pub access_secret: String,
    /// Secret for refresh tokens, distinct from the access secret
    pub refresh_secret: String,
    /// Access token lifetime (minutes)
    pub access_expiration_minutes: i64,
    /// Refresh token lifetime (minutes)
    pub refresh_expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: generate_printable_secret(),
            refresh_secret: generate_printable_secret(),
            access_expiration_minutes: 24 * 60,
            refresh_expiration_minutes: 30 * 24 * 60,
            issuer: "reservation-server".to_string(),
            audience: "reservation-clients".to_string(),
        }
    }
}

/// Which half of the pair a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username (Subject)
    pub sub: String,
    /// `access` or `refresh`
    pub token_type: String,
    /// Expiry timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Freshly issued access/refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Generate a printable random secret (development fallback)
pub fn generate_printable_secret() -> String {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        return "ReservationServerDevelopmentSecureKey2024!".to_string();
    }

    bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect()
}

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    access: SigningKeys,
    refresh: SigningKeys,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let access = SigningKeys::from_secret(&config.access_secret);
        let refresh = SigningKeys::from_secret(&config.refresh_secret);

        Self {
            config,
            access,
            refresh,
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn lifetime_minutes(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.config.access_expiration_minutes,
            TokenKind::Refresh => self.config.refresh_expiration_minutes,
        }
    }

    /// Issue a token of the given kind for `subject`
    pub fn generate_token(&self, subject: &str, kind: TokenKind) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.lifetime_minutes(kind));

        let claims = Claims {
            sub: subject.to_string(),
            token_type: kind.as_str().to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.keys(kind).encoding)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Issue a new access + refresh pair
    pub fn generate_pair(&self, subject: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_token(subject, TokenKind::Access)?,
            refresh_token: self.generate_token(subject, TokenKind::Refresh)?,
            token_type: "bearer".to_string(),
        })
    }

    /// Verify and decode a token of the given kind.
    ///
    /// A token is expired from its `exp` second onwards.
    pub fn validate_token(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data =
            decode::<Claims>(token, &self.keys(kind).decoding, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                    _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
                }
            })?;

        let claims = token_data.claims;
        if claims.exp <= Utc::now().timestamp() {
            return Err(JwtError::ExpiredToken);
        }
        if claims.token_type != kind.as_str() {
            return Err(JwtError::InvalidToken(format!(
                "expected {} token, got {}",
                kind.as_str(),
                claims.token_type
            )));
        }

        Ok(claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::with_config(JwtConfig::default())
    }
}

/// Authenticated caller (parsed from JWT claims)
///
/// Inserted into request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_lifetime(minutes: i64) -> JwtService {
        JwtService::with_config(JwtConfig {
            access_expiration_minutes: minutes,
            refresh_expiration_minutes: minutes,
            ..JwtConfig::default()
        })
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = JwtService::default();

        let token = service
            .generate_token("admin", TokenKind::Access)
            .expect("Failed to generate test token");
        let claims = service
            .validate_token(&token, TokenKind::Access)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.iss, "reservation-server");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_refresh_token_lifetime() {
        let service = JwtService::default();
        let pair = service.generate_pair("admin").unwrap();
        assert_eq!(pair.token_type, "bearer");

        let claims = service
            .validate_token(&pair.refresh_token, TokenKind::Refresh)
            .unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let service = JwtService::default();
        let pair = service.generate_pair("admin").unwrap();

        assert!(
            service
                .validate_token(&pair.refresh_token, TokenKind::Access)
                .is_err()
        );
        assert!(
            service
                .validate_token(&pair.access_token, TokenKind::Refresh)
                .is_err()
        );
    }

    #[test]
    fn test_token_expired_at_expiry_instant() {
        let service = service_with_lifetime(0);
        let token = service.generate_token("admin", TokenKind::Access).unwrap();
        assert!(matches!(
            service.validate_token(&token, TokenKind::Access),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = JwtService::default()
            .generate_token("admin", TokenKind::Access)
            .unwrap();
        let other = JwtService::default();
        assert!(matches!(
            other.validate_token(&token, TokenKind::Access),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = JwtService::default();
        assert!(matches!(
            service.validate_token("not-a-jwt", TokenKind::Access),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
    }

    #[test]
    fn test_printable_secret() {
        let a = generate_printable_secret();
        let b = generate_printable_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
