//! NFC tag registration from the admin console.

#[cfg(test)]
#[path = "tags_test.rs"]
mod tags_test;

use crate::net::api::{AdminApi, ApiError};
use crate::net::types::AddTagRequest;
use crate::state::form::DEFAULT_TIPO_ID;

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("⚠️ El campo UID y Nombre son obligatorios.")]
    MissingFields,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Registration form for a tag just read by the reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagForm {
    pub id: String,
    pub nombre: String,
    /// User type id granted to the tag.
    pub level: String,
}

impl TagForm {
    #[must_use]
    pub fn new(id: impl Into<String>, nombre: impl Into<String>) -> Self {
        Self { id: id.into(), nombre: nombre.into(), level: DEFAULT_TIPO_ID.to_string() }
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`TagError::MissingFields`] when the uid or name is blank.
    pub fn to_request(&self) -> Result<AddTagRequest, TagError> {
        let id = self.id.trim();
        let nombre = self.nombre.trim();
        if id.is_empty() || nombre.is_empty() {
            return Err(TagError::MissingFields);
        }
        Ok(AddTagRequest { id: id.to_owned(), nombre: nombre.to_owned(), level: self.level.trim().to_owned() })
    }
}

/// Register `form` via `/admin/add` and return the server's confirmation.
///
/// # Errors
///
/// Returns [`TagError::MissingFields`] without sending anything when the form
/// is incomplete, or [`TagError::Api`] when the server refuses it.
pub async fn register_tag<A>(api: &A, form: &TagForm) -> Result<String, TagError>
where
    A: AdminApi + ?Sized,
{
    let request = form.to_request()?;
    let response = api.add_tag(&request).await?;
    Ok(response.message.filter(|m| !m.is_empty()).unwrap_or_else(|| "OK".to_owned()))
}
