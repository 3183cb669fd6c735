use crate::{
    db::CredentialStore,
    error::AppError,
    models::{
        auth::{AccessTokenResponse, TokenPair},
        user::User,
    },
    services::token::TokenService,
};

pub struct AuthService;

impl AuthService {
    /// Stores the credentials verbatim unless the username is already taken.
    pub fn register(
        store: &dyn CredentialStore,
        username: &str,
        password: &str,
    ) -> Result<(), AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Username and password are required".into(),
            ));
        }

        let inserted = store.insert_if_absent(User {
            username: username.to_string(),
            password: password.to_string(),
        });
        if !inserted {
            return Err(AppError::Validation("Username already exists".into()));
        }

        tracing::info!("registered user '{username}'");
        Ok(())
    }

    /// Compares credentials against the store before handing off to the issuer.
    pub fn login(
        store: &dyn CredentialStore,
        tokens: &TokenService,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, AppError> {
        let user = store
            .find_by_username(username)
            .filter(|u| u.password == password)
            .ok_or_else(|| {
                tracing::info!("login failed for '{username}'");
                AppError::Authentication("Invalid username or password".into())
            })?;

        let pair = tokens.issue_token_pair(&user.username)?;
        tracing::info!("login succeeded for '{}'", user.username);
        Ok(pair)
    }

    /// Mints a fresh access token from a refresh token. The refresh token itself is
    /// never rotated, and the credential store is not consulted.
    pub fn refresh(
        tokens: &TokenService,
        refresh_token: Option<&str>,
    ) -> Result<AccessTokenResponse, AppError> {
        let refresh_token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingRefreshToken)?;

        let claims = tokens.verify(refresh_token).map_err(|_| {
            tracing::warn!("rejected invalid refresh token");
            AppError::InvalidRefreshToken
        })?;

        Ok(AccessTokenResponse {
            access_token: tokens.issue_access_token(&claims.username)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{db::InMemoryCredentialStore, models::auth::Claims};

    fn setup() -> (InMemoryCredentialStore, TokenService) {
        (
            InMemoryCredentialStore::new(),
            TokenService::new("unit-secret", 60, 3_600).unwrap(),
        )
    }

    #[test]
    fn register_then_login() {
        let (store, tokens) = setup();
        AuthService::register(&store, "alice", "pw1").unwrap();

        let pair = AuthService::login(&store, &tokens, "alice", "pw1").unwrap();
        assert_eq!(tokens.verify(&pair.access_token).unwrap().username, "alice");
        assert_eq!(tokens.verify(&pair.refresh_token).unwrap().username, "alice");
    }

    #[test]
    fn register_rejects_duplicates_and_blank_fields() {
        let (store, _) = setup();
        AuthService::register(&store, "alice", "pw1").unwrap();

        let dup = AuthService::register(&store, "alice", "pw2").unwrap_err();
        assert_eq!(dup.to_string(), "Username already exists");
        assert_eq!(store.find_by_username("alice").unwrap().password, "pw1");

        assert!(matches!(
            AuthService::register(&store, "", "pw"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            AuthService::register(&store, "bob", ""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let (store, tokens) = setup();
        AuthService::register(&store, "alice", "pw1").unwrap();

        let wrong_pw = AuthService::login(&store, &tokens, "alice", "nope").unwrap_err();
        let unknown = AuthService::login(&store, &tokens, "mallory", "pw1").unwrap_err();

        assert_eq!(wrong_pw.to_string(), unknown.to_string());
        assert!(matches!(wrong_pw, AppError::Authentication(_)));
    }

    #[test]
    fn refresh_can_be_repeated() {
        let (store, tokens) = setup();
        AuthService::register(&store, "alice", "pw1").unwrap();
        let pair = AuthService::login(&store, &tokens, "alice", "pw1").unwrap();

        for _ in 0..3 {
            let fresh = AuthService::refresh(&tokens, Some(&pair.refresh_token)).unwrap();
            let claims = tokens.verify(&fresh.access_token).unwrap();
            assert_eq!(claims.username, "alice");
            assert_eq!(claims.exp - claims.iat, 60);
        }
    }

    #[test]
    fn refresh_distinguishes_missing_from_invalid() {
        let (_, tokens) = setup();

        assert!(matches!(
            AuthService::refresh(&tokens, None),
            Err(AppError::MissingRefreshToken)
        ));
        assert!(matches!(
            AuthService::refresh(&tokens, Some("")),
            Err(AppError::MissingRefreshToken)
        ));
        assert!(matches!(
            AuthService::refresh(&tokens, Some("garbage")),
            Err(AppError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn expired_refresh_token_is_invalid() {
        let (_, tokens) = setup();
        let now = Utc::now().timestamp() as usize;
        let stale = tokens
            .encode_claims(&Claims {
                username: "alice".into(),
                iat: now - 7_200,
                exp: now - 3_600,
            })
            .unwrap();

        assert!(matches!(
            AuthService::refresh(&tokens, Some(&stale)),
            Err(AppError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn refresh_trusts_claims_without_a_store_lookup() {
        let (_, tokens) = setup();
        // Never registered anywhere.
        let refresh = tokens.issue_token_pair("ghost").unwrap().refresh_token;

        let fresh = AuthService::refresh(&tokens, Some(&refresh)).unwrap();
        assert_eq!(tokens.verify(&fresh.access_token).unwrap().username, "ghost");
    }
}
