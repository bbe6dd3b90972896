//! Dashboard door and camera actions.
//!
//! These mirror the dashboard buttons: every call resolves to a [`Notice`]
//! for the status line. Only a missing API token escapes as an error, since
//! it is a configuration problem rather than a door problem.

#[cfg(test)]
#[path = "door_test.rs"]
mod door_test;

use crate::net::api::{ApiError, DoorApi};
use crate::net::types::DoorOpenRequest;
use crate::view::{Notice, NoticeKind};

pub const DEFAULT_OPEN_REASON: &str = "web_button";
pub const DOOR_OPENED_TEXT: &str = "✅ Puerta abierta correctamente";
pub const DOOR_FAILED_TEXT: &str = "❌ Error al abrir puerta";
pub const DOOR_UNREACHABLE_TEXT: &str = "⚠️ Error de conexión con el servidor";
pub const SNAPSHOT_MISSING_TEXT: &str =
    "Captura solicitada. Si no ves imagen, asegúrate que /api/snapshot devuelve base64 o url.";
pub const TALK_SENT_TEXT: &str = "Toggle talk enviado.";
pub const TALK_FAILED_TEXT: &str = "Error en talk.";

/// Ask the server to release the lock.
///
/// # Errors
///
/// Returns [`ApiError::MissingApiToken`] when no door token is configured.
pub async fn open_door<A>(api: &A, reason: &str) -> Result<Notice, ApiError>
where
    A: DoorApi + ?Sized,
{
    let request = DoorOpenRequest { reason: reason.to_owned() };
    match api.open_door(&request).await {
        Ok(response) => {
            tracing::info!(status = ?response.status, duration = ?response.duration, "door opened");
            Ok(Notice::success(DOOR_OPENED_TEXT))
        }
        Err(ApiError::MissingApiToken) => Err(ApiError::MissingApiToken),
        Err(err) if err.is_unreachable() => Ok(Notice::new(NoticeKind::Warning, DOOR_UNREACHABLE_TEXT)),
        Err(err) => {
            tracing::warn!(error = %err, "door open refused");
            Ok(Notice::error(DOOR_FAILED_TEXT))
        }
    }
}

/// A camera capture as returned by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Snapshot {
    /// Base64-encoded JPEG.
    Image(String),
    Url(String),
    /// The server answered without an image, or the request failed.
    Missing,
}

impl Snapshot {
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Image(data) => Notice::success(format!("📸 Captura recibida ({} bytes base64)", data.len())),
            Self::Url(url) => Notice::success(format!("📸 Captura disponible en {url}")),
            Self::Missing => Notice::info(SNAPSHOT_MISSING_TEXT),
        }
    }
}

/// Request a still from the door camera. An image takes precedence over a
/// URL; any failure collapses into [`Snapshot::Missing`].
pub async fn take_snapshot<A>(api: &A) -> Snapshot
where
    A: DoorApi + ?Sized,
{
    let response = match api.snapshot().await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "snapshot failed");
            return Snapshot::Missing;
        }
    };

    if let Some(image) = response.image_base64.filter(|s| !s.is_empty()) {
        Snapshot::Image(image)
    } else if let Some(url) = response.url.filter(|s| !s.is_empty()) {
        Snapshot::Url(url)
    } else {
        Snapshot::Missing
    }
}

/// Start or stop the intercom. The reply body is not interpreted, so a
/// success status with a non-JSON body still counts as sent.
pub async fn toggle_talk<A>(api: &A) -> Notice
where
    A: DoorApi + ?Sized,
{
    match api.toggle_talk().await {
        Ok(_) | Err(ApiError::Parse(_)) => Notice::info(TALK_SENT_TEXT),
        Err(err) => {
            tracing::warn!(error = %err, "talk toggle failed");
            Notice::error(TALK_FAILED_TEXT)
        }
    }
}
