use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

use crate::error::AppError;

/// Argon2id PHC string for the default admin password, `admin`.
pub const DEFAULT_ADMIN_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$swlkx4wMb7GssUmpuAwqug$yu+WFl9YkhafGmglqk0t2EPj9bXodWLoE9DBsnqckWM";

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt = [0u8; 16];
    rand::rng().fill(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| AppError::Internal(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Check that `phc` parses as a password hash string.
pub fn check_phc_string(phc: &str) -> Result<(), AppError> {
    PasswordHash::new(phc)
        .map(|_| ())
        .map_err(|e| AppError::Config(format!("admin.password_hash is not a PHC string: {}", e)))
}

/// The configured admin account.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Argon2 parameters and salt come from the stored PHC string.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let hash = match PasswordHash::new(&self.password_hash) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!(error = %e, "Stored admin password hash is unreadable");
                return false;
            }
        };
        let password_ok = Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok();
        password_ok && username == self.username
    }
}
