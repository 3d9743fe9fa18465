use std::sync::Arc;

use crate::auth::models::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenIssuer;
use crate::db::models::{Session, User};
use crate::db::operations::DbOperations;
use crate::error::{AppError, AuthError, DatabaseError};

/// Signup and login workflows: credential checks, token issuance, and
/// session persistence over the store primitives.
pub struct AuthService {
    db: DbOperations,
    hasher: Arc<PasswordHasher>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(db: DbOperations, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            db,
            hasher: Arc::new(hasher),
            tokens,
        }
    }

    pub async fn signup(&self, req: SignupRequest) -> Result<AuthResponse, AppError> {
        if self.db.find_user_by_email(&req.email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = self.hash_password(req.password).await?;
        let user = User::new(req.email, password_hash, req.first_name, req.last_name);

        // User and session rows commit together. Any failure before the
        // commit, including losing a concurrent-signup race on the email
        // unique constraint, leaves zero rows behind (the transaction rolls
        // back on drop).
        let mut transaction = self.db.begin_transaction().await?;

        let user = self
            .db
            .create_user_with_transaction(&user, &mut transaction)
            .await
            .map_err(|e| match e {
                DatabaseError::Duplicate => AppError::from(AuthError::EmailTaken),
                other => other.into(),
            })?;

        let access_token = self.tokens.issue_access_token(user.id, &user.email)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        let session = Session::new(user.id, refresh_token.clone(), self.tokens.refresh_ttl());
        self.db
            .create_session_with_transaction(&session, &mut transaction)
            .await?;

        transaction.commit().await?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
        })
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let (user, stored_hash) = match self.db.find_user_by_email(&req.email).await? {
            Some(user) => match user.password_hash.clone() {
                Some(hash) => (user, hash),
                None => return self.reject_with_dummy_verify().await,
            },
            None => return self.reject_with_dummy_verify().await,
        };

        let password = req.password;
        let hasher = self.hasher.clone();
        let matched = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        if !matched {
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.tokens.issue_access_token(user.id, &user.email)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        // Each login records a fresh session; earlier ones stay untouched.
        let session = Session::new(user.id, refresh_token.clone(), self.tokens.refresh_ttl());
        self.db.create_session(&session).await?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
        })
    }

    async fn hash_password(&self, plaintext: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // A lookup miss pays the same hashing bill as a password mismatch, and
    // both produce the same rejection.
    async fn reject_with_dummy_verify(&self) -> Result<AuthResponse, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify_dummy())
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Err(AuthError::InvalidCredentials.into())
    }
}
