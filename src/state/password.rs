//! Password change form: strength meter and confirmation checks.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use crate::net::types::PasswordUpdateRequest;

pub const MIN_STRONG_LENGTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Fair,
    Strong,
}

/// Meter value in steps of 25, from 0 to 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn level(self) -> StrengthLevel {
        match self.0 {
            0..50 => StrengthLevel::Weak,
            50..75 => StrengthLevel::Fair,
            _ => StrengthLevel::Strong,
        }
    }
}

/// One quarter each for: length of at least 8, an uppercase letter, a digit,
/// and a character outside `[A-Za-z0-9]`.
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    let checks = [
        password.chars().count() >= MIN_STRONG_LENGTH,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let passed = checks.into_iter().filter(|ok| *ok).count();
    PasswordStrength(u8::try_from(passed * 25).unwrap_or(100))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    #[error("Todos los campos son requeridos")]
    MissingFields,

    #[error("Las contraseñas no coinciden")]
    Mismatch,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub new_pwd: String,
    pub confirm: String,
}

impl PasswordChange {
    #[must_use]
    pub fn new(new_pwd: impl Into<String>, confirm: impl Into<String>) -> Self {
        Self { new_pwd: new_pwd.into(), confirm: confirm.into() }
    }

    /// True only when both fields are filled in and differ. A half-filled
    /// form is not flagged while the user is still typing.
    #[must_use]
    pub fn mismatch(&self) -> bool {
        !self.new_pwd.is_empty() && !self.confirm.is_empty() && self.new_pwd != self.confirm
    }

    #[must_use]
    pub fn strength(&self) -> PasswordStrength {
        password_strength(&self.new_pwd)
    }

    /// # Errors
    ///
    /// Returns an error when a field is empty or the two entries differ.
    pub fn validate(&self) -> Result<PasswordUpdateRequest, PasswordValidationError> {
        if self.new_pwd.is_empty() || self.confirm.is_empty() {
            return Err(PasswordValidationError::MissingFields);
        }
        if self.mismatch() {
            return Err(PasswordValidationError::Mismatch);
        }
        Ok(PasswordUpdateRequest { new_pwd: self.new_pwd.clone() })
    }
}
