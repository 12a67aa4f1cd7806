use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Operator account configuration read from environment variables.
///
/// The password itself is never held in memory; only its SHA-256 digest is
/// configured and compared.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Email address of the single operator account.
    pub email: String,
    /// Lowercase hex SHA-256 digest of the operator password.
    pub password_sha256: String,
}

impl AdminConfig {
    /// Build the admin config from environment variables.
    ///
    /// Required env vars:
    /// - `VETRINA_ADMIN_EMAIL`
    /// - `VETRINA_ADMIN_PASSWORD_SHA256`
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            email: std::env::var("VETRINA_ADMIN_EMAIL")
                .map_err(|_| AppError::Auth("VETRINA_ADMIN_EMAIL not set".into()))?,
            password_sha256: std::env::var("VETRINA_ADMIN_PASSWORD_SHA256")
                .map_err(|_| AppError::Auth("VETRINA_ADMIN_PASSWORD_SHA256 not set".into()))?
                .to_lowercase(),
        })
    }

    /// Build with explicit values (useful for testing).
    pub fn new(email: String, password_sha256: String) -> Self {
        Self {
            email,
            password_sha256: password_sha256.to_lowercase(),
        }
    }

    /// Check a submitted email/password pair against this account.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.email == email && sha256_hex(password) == self.password_sha256
    }
}

/// Lowercase hex SHA-256 digest of a string.
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        // SHA-256("abc")
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_accepts_matching_credentials() {
        let config = AdminConfig::new("admin@vetrina.test".to_string(), sha256_hex("hunter2"));
        assert!(config.verify("admin@vetrina.test", "hunter2"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let config = AdminConfig::new("admin@vetrina.test".to_string(), sha256_hex("hunter2"));
        assert!(!config.verify("admin@vetrina.test", "hunter3"));
    }

    #[test]
    fn test_verify_rejects_wrong_email() {
        let config = AdminConfig::new("admin@vetrina.test".to_string(), sha256_hex("hunter2"));
        assert!(!config.verify("other@vetrina.test", "hunter2"));
    }

    #[test]
    fn test_digest_comparison_is_case_insensitive_on_config() {
        let upper = sha256_hex("hunter2").to_uppercase();
        let config = AdminConfig::new("admin@vetrina.test".to_string(), upper);
        assert!(config.verify("admin@vetrina.test", "hunter2"));
    }
}
