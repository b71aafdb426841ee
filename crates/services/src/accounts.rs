//! # Account Service
//!
//! Email/password accounts with bearer tokens. Password hashing and
//! verification run on the blocking pool.

use std::sync::Arc;

use domains::{DomainError, NewUser, PasswordHasher, Result, TokenIssuer, User, UserRepository};
use tracing::{info, warn};

use crate::validation;

/// A user plus the bearer token that authenticates them.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self { users, hasher, tokens }
    }

    #[tracing::instrument(skip(self, email, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = validation::email(email)?;
        validation::password(password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".into()));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal(format!("hashing task failed: {e}")))??;

        let user = self.users.create(NewUser { email, password_hash }).await?;
        info!(user_id = %user.id, "account registered");
        self.session_for(user)
    }

    #[tracing::instrument(skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let rejected = || DomainError::Unauthorized("Incorrect email or password".into());
        let email = validation::email(email).map_err(|_| rejected())?;

        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!("login for unknown email");
            return Err(rejected());
        };

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| DomainError::Internal(format!("verify task failed: {e}")))?;

        if !valid {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(rejected());
        }
        info!(user_id = %user.id, "logged in");
        self.session_for(user)
    }

    /// Resolves a bearer token to its account.
    pub async fn current_user(&self, token: &str) -> Result<User> {
        let id = self.tokens.verify(token)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("account no longer exists".into()))
    }

    fn session_for(&self, user: User) -> Result<AuthSession> {
        let token = self.tokens.issue(user.id)?;
        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{MockPasswordHasher, MockTokenIssuer, MockUserRepository, UserId};

    fn user(id: i32, email: &str) -> User {
        User {
            id: UserId(id),
            email: email.into(),
            password_hash: "hashed:secret1".into(),
            created_at: Utc::now(),
        }
    }

    fn fake_hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|p| Ok(format!("hashed:{p}")));
        hasher
            .expect_verify()
            .returning(|p, h| h == format!("hashed:{p}"));
        hasher
    }

    fn fake_tokens() -> MockTokenIssuer {
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue().returning(|id| Ok(format!("token-{id}")));
        tokens
    }

    #[tokio::test]
    async fn register_hashes_and_issues_token() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| u.email == "ana@example.com" && u.password_hash == "hashed:secret1")
            .returning(|u| Ok(user(1, &u.email)));

        let service =
            AccountService::new(Arc::new(users), Arc::new(fake_hasher()), Arc::new(fake_tokens()));
        let session = service.register("Ana@Example.com", "secret1").await.unwrap();
        assert_eq!(session.user.id, UserId(1));
        assert_eq!(session.token, "token-1");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn account_spans_do_not_carry_the_email() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|u| Ok(user(1, &u.email)));
        let service =
            AccountService::new(Arc::new(users), Arc::new(fake_hasher()), Arc::new(fake_tokens()));
        service.register("Ana@Example.com", "secret1").await.unwrap();
        let _ = service.login("Ana@Example.com", "wrong!!").await;

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("account registered"), "{output}");
        assert!(!output.to_lowercase().contains("ana@example.com"), "{output}");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|e| Ok(Some(user(1, e))));

        let service =
            AccountService::new(Arc::new(users), Arc::new(fake_hasher()), Arc::new(fake_tokens()));
        let err = service.register("ana@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|e| Ok(Some(user(4, e))));

        let service =
            AccountService::new(Arc::new(users), Arc::new(fake_hasher()), Arc::new(fake_tokens()));
        assert!(service.login("ana@example.com", "secret1").await.is_ok());
        let err = service.login("ana@example.com", "wrong!!").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let service =
            AccountService::new(Arc::new(users), Arc::new(fake_hasher()), Arc::new(fake_tokens()));
        let err = service.login("ghost@example.com", "secret1").await.unwrap_err();
        assert_eq!(
            err,
            DomainError::Unauthorized("Incorrect email or password".into())
        );
    }

    #[tokio::test]
    async fn current_user_rejects_bad_token() {
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_verify()
            .returning(|_| Err(DomainError::Unauthorized("invalid token".into())));

        let service = AccountService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(fake_hasher()),
            Arc::new(tokens),
        );
        assert!(service.current_user("garbage").await.is_err());
    }
}
