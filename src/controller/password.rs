//! Admin password change flow.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use crate::net::api::{AdminApi, ApiError};
use crate::state::password::{PasswordChange, PasswordValidationError};

pub const PASSWORD_UPDATED_TEXT: &str = "Contraseña actualizada";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error(transparent)]
    Validation(#[from] PasswordValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validate `change` and submit it to `/upd-pwd`.
///
/// Nothing is sent when validation fails. The new password is never logged.
///
/// # Errors
///
/// Returns [`PasswordError::Validation`] for empty or mismatched entries and
/// [`PasswordError::Api`] when the server refuses the change or cannot be
/// reached. A `{success: false}` answer is reported as a rejection.
pub async fn change_password<A>(api: &A, change: &PasswordChange) -> Result<String, PasswordError>
where
    A: AdminApi + ?Sized,
{
    let request = change.validate()?;
    let response = api.update_password(&request).await?;

    if !response.success {
        let message = response
            .error
            .or(response.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "No se pudo actualizar la contraseña".to_owned());
        tracing::warn!(%message, "password change refused");
        return Err(ApiError::Rejected { status: 200, message }.into());
    }

    tracing::info!("password updated");
    Ok(response.message.filter(|m| !m.is_empty()).unwrap_or_else(|| PASSWORD_UPDATED_TEXT.to_owned()))
}
