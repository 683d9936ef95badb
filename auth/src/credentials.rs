use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single rule a submitted credential broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialViolation {
    #[error("Password length must be at least {min}")]
    TooShort { min: usize, actual: usize },
}

impl CredentialViolation {
    /// Name of the submitted field the rule applies to.
    pub fn field(&self) -> &'static str {
        match self {
            CredentialViolation::TooShort { .. } => "password",
        }
    }
}

/// Every rule a registration request broke, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid credentials: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<CredentialViolation>,
}

fn summarize(violations: &[CredentialViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

type PasswordRule = fn(&str) -> Option<CredentialViolation>;

const REGISTRATION_PASSWORD_RULES: &[PasswordRule] = &[min_length];

fn min_length(password: &str) -> Option<CredentialViolation> {
    let actual = password.chars().count();
    (actual < MIN_PASSWORD_LENGTH).then_some(CredentialViolation::TooShort {
        min: MIN_PASSWORD_LENGTH,
        actual,
    })
}

/// Structural checks on credentials, run before anything is hashed or stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check a registration password against every rule.
    ///
    /// # Errors
    /// * `ValidationError` - Lists all violated rules, not just the first
    pub fn validate_registration(&self, password: &str) -> Result<(), ValidationError> {
        let violations: Vec<_> = REGISTRATION_PASSWORD_RULES
            .iter()
            .filter_map(|rule| rule(password))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let validator = CredentialValidator::new();

        let err = validator.validate_registration("short").unwrap_err();
        assert_eq!(
            err.violations,
            vec![CredentialViolation::TooShort { min: 8, actual: 5 }]
        );
        assert_eq!(err.violations[0].field(), "password");
    }

    #[test]
    fn test_long_enough_password_accepted() {
        let validator = CredentialValidator::new();
        assert!(validator.validate_registration("longenough1").is_ok());
    }

    #[test]
    fn test_boundary() {
        let validator = CredentialValidator::new();

        assert!(validator.validate_registration("1234567").is_err());
        assert!(validator.validate_registration("12345678").is_ok());
        assert!(validator.validate_registration("").is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let validator = CredentialValidator::new();

        // Seven characters, fourteen bytes.
        assert!(validator.validate_registration("ééééééé").is_err());
        assert!(validator.validate_registration("éééééééé").is_ok());
    }

    #[test]
    fn test_error_message_names_the_rule() {
        let err = CredentialValidator::new()
            .validate_registration("abc")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid credentials: Password length must be at least 8"
        );
    }
}
