#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::net::types::{SaveUserRequest, UserRecord};

/// Name the server gives an NFC read with no matching directory entry.
pub const UNKNOWN_NAME: &str = "Unknown";

/// User type assigned to new entries when none is chosen.
pub const DEFAULT_TIPO_ID: u32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Add,
    Edit,
}

impl FormMode {
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Add => "💾 Guardar Usuario",
            Self::Edit => "💾 Actualizar Usuario",
        }
    }
}

/// The add/edit user form as the user sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    pub mode: FormMode,
    pub id: String,
    pub nombre: String,
    pub ap: String,
    pub am: String,
    pub email: String,
    pub pwd: String,
    pub cell: String,
    pub tipo_id: u32,
    pub operador: bool,
    pub activo: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Add,
            id: String::new(),
            nombre: String::new(),
            ap: String::new(),
            am: String::new(),
            email: String::new(),
            pwd: String::new(),
            cell: String::new(),
            tipo_id: DEFAULT_TIPO_ID,
            operador: false,
            activo: true,
        }
    }
}

impl UserForm {
    /// A blank form in Add mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the form from a listed record.
    ///
    /// A placeholder record (name `"Unknown"`) opens in Add mode with the
    /// name cleared; its id is kept so the tag gets registered under it.
    #[must_use]
    pub fn from_record(record: &UserRecord) -> Self {
        let placeholder = record.nombre == UNKNOWN_NAME;
        Self {
            mode: if placeholder { FormMode::Add } else { FormMode::Edit },
            id: record.id.clone(),
            nombre: if placeholder { String::new() } else { record.nombre.clone() },
            ap: record.ap.clone(),
            am: record.am.clone(),
            email: record.email.clone(),
            pwd: record.pwd.clone(),
            cell: record.cell.clone().unwrap_or_default(),
            tipo_id: record.tipo_id.unwrap_or(DEFAULT_TIPO_ID),
            operador: record.operador,
            activo: record.activo,
        }
    }

    /// Serialize the form into the save request. Text fields are trimmed.
    #[must_use]
    pub fn to_request(&self) -> SaveUserRequest {
        SaveUserRequest {
            id: self.id.trim().to_owned(),
            nombre: self.nombre.trim().to_owned(),
            ap: self.ap.trim().to_owned(),
            am: self.am.trim().to_owned(),
            email: self.email.trim().to_owned(),
            pwd: self.pwd.clone(),
            cell: self.cell.trim().to_owned(),
            tipo_id: self.tipo_id,
            operador: self.operador,
            activo: self.activo,
        }
    }
}
