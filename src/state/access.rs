//! Dashboard state driven by pushed server events.
//!
//! DESIGN
//! ======
//! [`AccessState::apply`] is pure: it records what happened and returns the
//! effects the front end should perform (status card, notice, sound). The
//! caller decides how to render them, which keeps this testable without
//! audio or a screen.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::net::types::{NfcAccess, ServerEvent};
use crate::view::{Notice, NoticeKind};

/// Shown when a tag has no name on file.
pub const UNKNOWN_HOLDER: &str = "Desconocido";
pub const DEFAULT_ALERT_TEXT: &str = "🚨 Alerta";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Open,
    Failed,
    Doorbell,
}

impl Sound {
    #[must_use]
    pub fn asset_path(self) -> &'static str {
        match self {
            Self::Open => "/static/sounds/open.mp3",
            Self::Failed => "/static/sounds/failed.mp3",
            Self::Doorbell => "/static/sounds/doorbell.mp3",
        }
    }
}

/// Last-read card summary shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusCard {
    pub granted: bool,
    pub id: String,
    pub nombre: String,
}

impl StatusCard {
    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.granted { "✅ Acceso permitido" } else { "🚫 Acceso denegado" }
    }
}

/// A denied read kept in the dashboard's access log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub id: String,
    pub nombre: String,
    /// `dd/mm/yyyy hh:mm`
    pub seen_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessEffect {
    /// A tag was read; admin forms can prefill its UID.
    TagRead(String),
    Status(StatusCard),
    Notify(Notice),
    Play(Sound),
    Logged(AccessLogEntry),
}

#[derive(Debug, Default)]
pub struct AccessState {
    log: Vec<AccessLogEntry>,
    log_open: bool,
    last_status: Option<StatusCard>,
}

impl AccessState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log(&self) -> &[AccessLogEntry] {
        &self.log
    }

    #[must_use]
    pub fn log_open(&self) -> bool {
        self.log_open
    }

    #[must_use]
    pub fn last_status(&self) -> Option<&StatusCard> {
        self.last_status.as_ref()
    }

    /// Record `event` and return the effects to perform, in order.
    pub fn apply(&mut self, event: &ServerEvent, now: OffsetDateTime) -> Vec<AccessEffect> {
        match event {
            ServerEvent::NfcAccess(access) => self.apply_access(access, now),
            ServerEvent::AlertRequest { message } => {
                let text = message.clone().filter(|m| !m.is_empty()).unwrap_or_else(|| DEFAULT_ALERT_TEXT.to_owned());
                vec![AccessEffect::Play(Sound::Doorbell), AccessEffect::Notify(Notice::new(NoticeKind::Warning, text))]
            }
            ServerEvent::Unknown => Vec::new(),
        }
    }

    fn apply_access(&mut self, access: &NfcAccess, now: OffsetDateTime) -> Vec<AccessEffect> {
        let nombre = access
            .nombre
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_HOLDER.to_owned());
        let card = StatusCard { granted: access.activo, id: access.id.clone(), nombre: nombre.clone() };
        self.last_status = Some(card.clone());

        let mut effects = vec![
            AccessEffect::TagRead(access.id.clone()),
            AccessEffect::Status(card),
            AccessEffect::Notify(access_notice(access)),
        ];

        if access.activo {
            effects.push(AccessEffect::Play(Sound::Open));
        } else {
            effects.push(AccessEffect::Play(Sound::Failed));
            let entry = AccessLogEntry { id: access.id.clone(), nombre, seen_at: format_timestamp(now) };
            self.log.push(entry.clone());
            self.log_open = true;
            effects.push(AccessEffect::Logged(entry));
        }

        effects
    }
}

#[must_use]
pub fn access_notice(access: &NfcAccess) -> Notice {
    if access.activo {
        Notice::success(format!("✅ Tarjeta {} autorizada, puerta abierta", access.id))
    } else {
        Notice::error(format!("🚫 Tarjeta {} no autorizada", access.id))
    }
}

#[must_use]
pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[day]/[month]/[year] [hour]:[minute]");
    at.format(&format).unwrap_or_default()
}
