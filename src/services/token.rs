use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    error::AppError,
    models::auth::{Claims, TokenPair},
};

/// Signs and verifies HS256 tokens with one shared secret.
///
/// Access and refresh tokens carry the same claims and differ only in lifetime,
/// so either one verifies here.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
}

impl TokenService {
    pub fn new(
        secret: &str,
        access_ttl_seconds: u64,
        refresh_ttl_seconds: u64,
    ) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::Signing("signing secret is empty".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl_seconds,
            refresh_ttl_seconds,
        })
    }

    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl_seconds
    }

    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_ttl_seconds
    }

    /// The caller has already authenticated `username`.
    pub fn issue_token_pair(&self, username: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(username)?,
            refresh_token: self.sign(username, self.refresh_ttl_seconds)?,
        })
    }

    pub fn issue_access_token(&self, username: &str) -> Result<String, AppError> {
        self.sign(username, self.access_ttl_seconds)
    }

    /// Checks signature and expiry. Every failure collapses to `Forbidden`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token rejected: {e}");
                AppError::Forbidden
            })
    }

    fn sign(&self, username: &str, ttl_seconds: u64) -> Result<String, AppError> {
        let now = Utc::now().timestamp() as usize;
        let exp = usize::try_from(ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| AppError::Signing(format!("token lifetime {ttl_seconds}s overflows")))?;
        let claims = Claims {
            username: username.to_string(),
            iat: now,
            exp,
        };
        self.encode_claims(&claims)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, AppError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }
}
