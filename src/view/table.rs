#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use crate::net::types::UserRecord;

pub const NO_RESULTS_TEXT: &str = "No se encontraron usuarios";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// Display-ready columns for one user. Never carries the password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub tipo: String,
    pub cell: String,
    pub status: &'static str,
    pub operador: &'static str,
}

impl UserRow {
    #[must_use]
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            full_name: record.full_name(),
            email: record.email.clone(),
            tipo: record
                .tipo
                .clone()
                .or_else(|| record.tipo_id.map(|id| id.to_string()))
                .unwrap_or_default(),
            cell: record.cell.clone().unwrap_or_default(),
            status: if record.activo { "Activo" } else { "Inactivo" },
            operador: if record.operador { "Si" } else { "No" },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRow {
    User(UserRow),
    /// Stands in for an empty result set.
    Placeholder(&'static str),
}

impl TableRow {
    #[must_use]
    pub fn actions(&self) -> &'static [RowAction] {
        match self {
            Self::User(_) => &[RowAction::Edit, RowAction::Delete],
            Self::Placeholder(_) => &[],
        }
    }
}

/// Table body for `records`: one row each, or a single placeholder.
#[must_use]
pub fn table_rows(records: &[UserRecord]) -> Vec<TableRow> {
    if records.is_empty() {
        return vec![TableRow::Placeholder(NO_RESULTS_TEXT)];
    }
    records.iter().map(|r| TableRow::User(UserRow::from_record(r))).collect()
}
