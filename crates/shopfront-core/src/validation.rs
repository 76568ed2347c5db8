//! # Validation Module
//!
//! Credential rules for registration and login.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Registration Form Checks                           │
//! │                                                                         │
//! │  Each keystroke                                                        │
//! │  └── RegistrationForm::field_errors() → inline messages per field      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Submit                                                                │
//! │  ├── validate_email()        local-part@gmail.com                      │
//! │  ├── validate_password()     digits only, 8+ long                      │
//! │  ├── password == confirm                                               │
//! │  └── !is_email_registered()  unique email                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  auth::evaluate_registration() → Accepted(User) | Rejected{..}         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_email, validate_password};
//!
//! assert!(validate_email("a@gmail.com"));
//! assert!(!validate_email("a@example.com"));
//! assert!(validate_password("12345678"));
//! assert!(!validate_password("password123"));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::User;
use crate::{MIN_PASSWORD_LENGTH, REQUIRED_EMAIL_DOMAIN};

// =============================================================================
// Field Messages
// =============================================================================

pub const EMAIL_FORMAT_MESSAGE: &str = "Email must end with @gmail.com";
pub const EMAIL_TAKEN_MESSAGE: &str = "This email is already registered.";
pub const PASSWORD_FORMAT_MESSAGE: &str = "Password must be at least 8 numeric characters.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

// =============================================================================
// Credential Rules
// =============================================================================

/// Validates an email address against the accepted pattern.
///
/// ## Rules
/// - Exactly `<local>@gmail.com` (domain is case-sensitive)
/// - Local part is non-empty
/// - Local part uses only ASCII letters, digits and `. _ % + -`
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_email;
///
/// assert!(validate_email("first.last+tag@gmail.com"));
/// assert!(!validate_email("@gmail.com"));
/// assert!(!validate_email("a@GMAIL.com"));
/// assert!(!validate_email("a b@gmail.com"));
/// ```
pub fn validate_email(email: &str) -> bool {
    let Some(local) = email
        .strip_suffix(REQUIRED_EMAIL_DOMAIN)
        .and_then(|rest| rest.strip_suffix('@'))
    else {
        return false;
    };

    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
}

/// Validates a password.
///
/// ## Rules
/// - ASCII digits only
/// - At least [`MIN_PASSWORD_LENGTH`] characters
pub fn validate_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH && password.chars().all(|c| c.is_ascii_digit())
}

/// Returns true iff a stored user has exactly this email.
pub fn is_email_registered(users: &[User], email: &str) -> bool {
    users.iter().any(|user| user.email == email)
}

// =============================================================================
// Password Strength
// =============================================================================

/// Strength meter shown under the password field.
///
/// Purely length based: 8-10 weak, 11-15 medium, 16+ strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PasswordStrength {
    None,
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Meter label; empty when there is nothing to rate.
    pub const fn label(&self) -> &'static str {
        match self {
            PasswordStrength::None => "",
            PasswordStrength::Weak => "Weak Password",
            PasswordStrength::Medium => "Medium Password",
            PasswordStrength::Strong => "Strong Password",
        }
    }

    /// Meter fill, 0-100.
    pub const fn percent(&self) -> u8 {
        match self {
            PasswordStrength::None => 0,
            PasswordStrength::Weak => 33,
            PasswordStrength::Medium => 66,
            PasswordStrength::Strong => 100,
        }
    }

    pub const fn color(&self) -> &'static str {
        match self {
            PasswordStrength::None => "gray",
            PasswordStrength::Weak => "red",
            PasswordStrength::Medium => "orange",
            PasswordStrength::Strong => "green",
        }
    }
}

/// Rates a password by length.
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::{password_strength, PasswordStrength};
///
/// assert_eq!(password_strength("1234567"), PasswordStrength::None);
/// assert_eq!(password_strength("12345678"), PasswordStrength::Weak);
/// assert_eq!(password_strength("12345678901"), PasswordStrength::Medium);
/// assert_eq!(password_strength("1234567890123456"), PasswordStrength::Strong);
/// ```
pub fn password_strength(password: &str) -> PasswordStrength {
    match password.chars().count() {
        8..=10 => PasswordStrength::Weak,
        11..=15 => PasswordStrength::Medium,
        n if n > 15 => PasswordStrength::Strong,
        _ => PasswordStrength::None,
    }
}

// =============================================================================
// Registration Form
// =============================================================================

/// The three registration inputs as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Inline messages per field; `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegistrationErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl RegistrationErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.confirm_password.is_none()
    }

    /// Non-empty messages in field order.
    pub fn messages(&self) -> Vec<&str> {
        [&self.email, &self.password, &self.confirm_password]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .collect()
    }
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        RegistrationForm {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Computes the inline error for every field.
    ///
    /// Fields left empty carry no message yet; the submit button stays
    /// disabled through [`RegistrationForm::can_submit`] instead.
    pub fn field_errors(&self, users: &[User]) -> RegistrationErrors {
        let mut errors = RegistrationErrors::default();

        if !self.email.is_empty() {
            if !validate_email(&self.email) {
                errors.email = Some(EMAIL_FORMAT_MESSAGE.to_string());
            } else if is_email_registered(users, &self.email) {
                errors.email = Some(EMAIL_TAKEN_MESSAGE.to_string());
            }
        }

        if !self.password.is_empty() && !validate_password(&self.password) {
            errors.password = Some(PASSWORD_FORMAT_MESSAGE.to_string());
        }

        if !self.confirm_password.is_empty() && self.confirm_password != self.password {
            errors.confirm_password = Some(PASSWORD_MISMATCH_MESSAGE.to_string());
        }

        errors
    }

    /// Errors as reported on submit: empty fields are rejected too.
    pub fn submit_errors(&self, users: &[User]) -> RegistrationErrors {
        let mut errors = self.field_errors(users);

        if self.email.is_empty() {
            errors.email = Some(EMAIL_FORMAT_MESSAGE.to_string());
        }
        if self.password.is_empty() {
            errors.password = Some(PASSWORD_FORMAT_MESSAGE.to_string());
        }
        if self.confirm_password != self.password {
            errors.confirm_password = Some(PASSWORD_MISMATCH_MESSAGE.to_string());
        }

        errors
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self, users: &[User]) -> bool {
        !self.email.is_empty()
            && !self.password.is_empty()
            && !self.confirm_password.is_empty()
            && self.field_errors(users).is_empty()
    }

    pub fn password_strength(&self) -> PasswordStrength {
        password_strength(&self.password)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@gmail.com"));
        assert!(validate_email("john.doe_99%x+y-z@gmail.com"));

        assert!(!validate_email(""));
        assert!(!validate_email("@gmail.com"));
        assert!(!validate_email("a@gmail.co"));
        assert!(!validate_email("a@example.com"));
        assert!(!validate_email("a@@gmail.com"));
        assert!(!validate_email("a@gmail.com "));
        assert!(!validate_email("ä@gmail.com"));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("12345678"));
        assert!(validate_password("0000000000000000"));

        assert!(!validate_password("1234567"));
        assert!(!validate_password("1234567a"));
        assert!(!validate_password("password123"));
        assert!(!validate_password(""));
    }

    #[test]
    fn test_is_email_registered() {
        let users = vec![User::new("a@gmail.com", "12345678")];
        assert!(is_email_registered(&users, "a@gmail.com"));
        assert!(!is_email_registered(&users, "b@gmail.com"));
        assert!(!is_email_registered(&[], "a@gmail.com"));
    }

    #[test]
    fn test_password_strength_meter() {
        let strength = password_strength("123456789012");
        assert_eq!(strength, PasswordStrength::Medium);
        assert_eq!(strength.label(), "Medium Password");
        assert_eq!(strength.percent(), 66);
        assert_eq!(strength.color(), "orange");
        assert_eq!(PasswordStrength::None.label(), "");
    }

    #[test]
    fn test_field_errors_for_partial_form() {
        let form = RegistrationForm::new("a@yahoo.com", "", "");
        let errors = form.field_errors(&[]);
        assert_eq!(errors.email.as_deref(), Some(EMAIL_FORMAT_MESSAGE));
        assert!(errors.password.is_none());
        assert!(errors.confirm_password.is_none());
    }

    #[test]
    fn test_field_errors_mismatch_and_taken() {
        let users = vec![User::new("a@gmail.com", "12345678")];
        let form = RegistrationForm::new("a@gmail.com", "12345678", "12345679");
        let errors = form.field_errors(&users);
        assert_eq!(errors.email.as_deref(), Some(EMAIL_TAKEN_MESSAGE));
        assert_eq!(
            errors.confirm_password.as_deref(),
            Some(PASSWORD_MISMATCH_MESSAGE)
        );
        assert_eq!(errors.messages().len(), 2);
    }

    #[test]
    fn test_submit_errors_reject_empty_fields() {
        let errors = RegistrationForm::default().submit_errors(&[]);
        assert!(errors.email.is_some());
        assert!(errors.password.is_some());
        assert!(errors.confirm_password.is_none());
    }

    #[test]
    fn test_can_submit() {
        let users = vec![User::new("taken@gmail.com", "12345678")];

        assert!(RegistrationForm::new("a@gmail.com", "12345678", "12345678").can_submit(&users));
        assert!(!RegistrationForm::new("a@gmail.com", "12345678", "").can_submit(&users));
        assert!(
            !RegistrationForm::new("taken@gmail.com", "12345678", "12345678").can_submit(&users)
        );
    }
}
