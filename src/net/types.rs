//! Wire DTOs for the access-control server's HTTP API.
//!
//! DESIGN
//! ======
//! Field names mirror the server's JSON (Spanish keys included) so the
//! structs can be (de)serialized without hand mapping. The boolean flags
//! cross the boundary through [`flag`], the only place that knows the
//! server's `"1"`/`"0"` encoding.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One directory entry as listed by `/admin/usuarios`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// NFC tag UID; doubles as the primary key.
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nombre: String,
    /// Paternal surname.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ap: String,
    /// Maternal surname.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub am: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Plaintext password as the server sends it. Never rendered or logged.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pwd: String,
    #[serde(default)]
    pub cell: Option<String>,
    /// Foreign key into the user-type table.
    #[serde(rename = "tipoId", default, deserialize_with = "deserialize_optional_u32")]
    pub tipo_id: Option<u32>,
    /// Display name of the user type, joined in by the listing query.
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(with = "flag", default)]
    pub operador: bool,
    #[serde(with = "flag", default)]
    pub activo: bool,
}

impl UserRecord {
    /// "nombre ap am" with empty parts skipped.
    #[must_use]
    pub fn full_name(&self) -> String {
        [self.nombre.as_str(), self.ap.as_str(), self.am.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Pagination block returned alongside a page of users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub pagina_actual: u32,
    pub total_paginas: u32,
    pub total_usuarios: u64,
    pub por_pagina: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

/// `GET /admin/usuarios` success body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub usuarios: Vec<UserRecord>,
    pub paginacion: Pagination,
}

/// `POST /guardar-usuario` body. An empty `id` asks the server to create.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SaveUserRequest {
    pub id: String,
    pub nombre: String,
    pub ap: String,
    pub am: String,
    pub email: String,
    pub pwd: String,
    pub cell: String,
    #[serde(rename = "tipoId")]
    pub tipo_id: u32,
    #[serde(with = "flag")]
    pub operador: bool,
    #[serde(with = "flag")]
    pub activo: bool,
}

impl SaveUserRequest {
    #[must_use]
    pub fn is_create(&self) -> bool {
        self.id.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SaveUserResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Location the server wants the client to navigate to next.
    #[serde(default)]
    pub redirect: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeleteUserRequest<'a> {
    pub id: &'a str,
}

/// Generic `{message?}` acknowledgement used by several endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordUpdateRequest {
    pub new_pwd: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordUpdateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /admin/add` body registering a freshly read NFC tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddTagRequest {
    pub id: String,
    pub nombre: String,
    pub level: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoorOpenRequest {
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DoorOpenResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Seconds the lock stays released.
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body shape shared by every endpoint that rejects a request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// PUSH EVENTS
// =============================================================================

/// Event pushed by the server over `/events`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// A tag was presented to the reader.
    #[serde(rename = "nfc_access")]
    NfcAccess(NfcAccess),

    /// The physical doorbell was pressed.
    #[serde(rename = "alert_request")]
    AlertRequest {
        #[serde(default)]
        message: Option<String>,
    },

    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NfcAccess {
    pub id: String,
    #[serde(default)]
    pub nombre: Option<String>,
    /// Whether the tag belongs to an active directory entry.
    #[serde(with = "flag", default)]
    pub activo: bool,
}

// =============================================================================
// FLAG ENCODING
// =============================================================================

/// Serialization contract for boolean flags.
///
/// Outgoing: always `"1"` or `"0"`. Incoming: `"1"`/`"0"`, `1`/`0`,
/// `true`/`false` (and their string forms).
pub mod flag {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[must_use]
    pub fn encode(value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    /// Decode a flag from its string form.
    #[must_use]
    pub fn decode(raw: &str) -> Option<bool> {
        match raw.trim() {
            "1" | "true" => Some(true),
            "0" | "false" | "" => Some(false),
            _ => None,
        }
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(encode(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Bool(b) => Ok(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(D::Error::custom(format!("flag out of range: {n}"))),
            },
            serde_json::Value::String(s) => {
                decode(s).ok_or_else(|| D::Error::custom(format!("invalid flag string: {s:?}")))
            }
            serde_json::Value::Null => Ok(false),
            _ => Err(D::Error::custom("expected flag as bool, 0/1 or \"0\"/\"1\"")),
        }
    }
}

/// Nullable text columns arrive as `null`; treat them as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("value {number} out of range for u32"))),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected numeric string, got {s:?}"))),
        _ => Err(D::Error::custom("expected number or numeric string")),
    }
}
