//! API key lookup from the environment.
//!
//! The key is only ever held as a [`SecretString`]; it is never written to
//! config files or logs.

use secrecy::SecretString;
use threadcite_types::error::AssistantError;

/// Environment variable holding the assistant service API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Read a secret from the named environment variable.
///
/// Missing, empty and non-Unicode values are all treated as absent.
pub fn secret_from_env(var: &str) -> Option<SecretString> {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => None,
        // Secrets must be valid strings
        Err(std::env::VarError::NotPresent) | Err(std::env::VarError::NotUnicode(_)) => None,
    }
}

/// The API key, or a `MissingConfig` error naming the variable to set.
pub fn require_api_key() -> Result<SecretString, AssistantError> {
    secret_from_env(API_KEY_ENV).ok_or_else(|| {
        AssistantError::MissingConfig(format!("set {API_KEY_ENV} to your API key"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_from_env_present() {
        // SAFETY: unique variable name, removed immediately after the read.
        unsafe {
            std::env::set_var("THREADCITE_TEST_SECRET_PRESENT", "sk-abc");
        }
        let secret = secret_from_env("THREADCITE_TEST_SECRET_PRESENT").unwrap();
        assert_eq!(secret.expose_secret(), "sk-abc");
        unsafe {
            std::env::remove_var("THREADCITE_TEST_SECRET_PRESENT");
        }
    }

    #[test]
    fn test_secret_from_env_missing_or_blank() {
        assert!(secret_from_env("THREADCITE_TEST_SECRET_NEVER_SET").is_none());

        // SAFETY: unique variable name, removed immediately after the read.
        unsafe {
            std::env::set_var("THREADCITE_TEST_SECRET_BLANK", "   ");
        }
        assert!(secret_from_env("THREADCITE_TEST_SECRET_BLANK").is_none());
        unsafe {
            std::env::remove_var("THREADCITE_TEST_SECRET_BLANK");
        }
    }
}
