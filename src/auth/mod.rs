use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::{
    domain::{User, UserRole},
    error::{AppError, Result},
    repository::{SqliteUserRepository, UserRepository},
};

pub mod session;

use session::{Session, SessionStore};

pub const SESSION_COOKIE: &str = "session";

pub struct AuthService {
    users: SqliteUserRepository,
    session_store: SessionStore,
    session_duration_hours: i64,
}

impl AuthService {
    pub fn new(pool: SqlitePool, session_duration_hours: i64) -> Self {
        Self {
            users: SqliteUserRepository::new(pool.clone()),
            session_store: SessionStore::new(pool),
            session_duration_hours,
        }
    }

    /// Creates a staff sign-in. Duplicate emails are a conflict, not an
    /// upsert.
    pub async fn register(&self, email: &str, password: &str, role: UserRole) -> Result<User> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(password)?;
        self.users.create(email, &password_hash, role).await
    }

    /// Verifies credentials and opens a session. Returns the signed-in user
    /// together with the raw session token; only the token's hash is stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.session_duration_hours);
        self.session_store
            .create(user.id, &token, expires_at)
            .await?;

        Ok((user, token))
    }

    pub async fn validate_session(&self, token: &str) -> Result<Option<User>> {
        let session: Option<Session> = self.session_store.find_by_token(token).await?;

        match session {
            Some(session) => self.users.find_by_id(session.user_id).await,
            None => Ok(None),
        }
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.session_store.delete_by_token(token).await
    }

    pub fn session_cookie(token: &str) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    pub fn logout_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(password_hash.to_string())
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        let argon2 = Argon2::default();

        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
