//! Terminal front end for the view traits.
//!
//! DESIGN
//! ======
//! Rows, pagination and notices go to stdout; loading and progress go to
//! stderr so stdout stays pipeable. Formatting is done by the free functions
//! below so it can be tested without capturing the process streams.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::io::{self, BufRead, Write};

use crate::state::access::{AccessEffect, AccessLogEntry, Sound};
use crate::state::form::UserForm;
use crate::state::page::PageSize;
use crate::view::pagination::{PageControl, PageSummary};
use crate::view::table::TableRow;
use crate::view::{Feedback, Notice, UserListView};

#[derive(Debug, Default)]
pub struct TerminalView {
    /// Answer every confirmation with yes without reading stdin.
    assume_yes: bool,
}

impl TerminalView {
    #[must_use]
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Feedback for TerminalView {
    fn notify(&self, notice: Notice) {
        println!("{}", notice.text);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [s/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }

    fn redirect(&self, location: &str) {
        eprintln!("sesión expirada: inicia sesión en {location} y vuelve a intentarlo");
    }
}

impl UserListView for TerminalView {
    fn set_loading(&self, loading: bool) {
        if loading {
            eprintln!("Cargando...");
        }
    }

    fn render_rows(&self, rows: &[TableRow]) {
        for line in format_rows(rows) {
            println!("{line}");
        }
    }

    fn render_pagination(&self, controls: &[PageControl]) {
        println!("{}", format_controls(controls));
    }

    fn render_summary(&self, summary: &PageSummary, page_size: PageSize) {
        println!("{} | {page_size} por página", summary.text());
    }

    fn show_form(&self, form: &UserForm) {
        println!("{}", format_form(form));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        tracing::debug!(enabled, "submit control");
    }
}

/// `s`, `si`, `sí`, `y` and `yes` in any case.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
}

#[must_use]
pub fn format_rows(rows: &[TableRow]) -> Vec<String> {
    rows.iter()
        .map(|row| match row {
            TableRow::User(u) => format!(
                "{:<16} {:<28} {:<28} {:<12} {:<14} {:<8} {}",
                u.id, u.full_name, u.email, u.tipo, u.cell, u.status, u.operador
            ),
            TableRow::Placeholder(text) => (*text).to_owned(),
        })
        .collect()
}

/// Current page in brackets, navigable controls with their target.
#[must_use]
pub fn format_controls(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|c| match (c, c.target()) {
            (PageControl::Page { .. }, None) => format!("[{}]", c.label()),
            (PageControl::Page { .. }, Some(_)) | (_, None) => c.label(),
            (_, Some(page)) => format!("{} ({page})", c.label()),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[must_use]
pub fn format_form(form: &UserForm) -> String {
    format!(
        "{}: id={} nombre={} {} {} email={} tipo={} activo={} operador={}",
        form.mode.submit_label(),
        if form.id.is_empty() { "(nuevo)" } else { form.id.as_str() },
        form.nombre,
        form.ap,
        form.am,
        form.email,
        form.tipo_id,
        form.activo,
        form.operador,
    )
}

/// Ring the terminal bell in place of the dashboard's audio cue.
pub fn play(sound: Sound) {
    tracing::debug!(asset = sound.asset_path(), "sound");
    eprint!("\x07");
    let _ = io::stderr().flush();
}

/// The denied-reads panel, printed once the access log has been opened.
#[must_use]
pub fn format_access_log(entries: &[AccessLogEntry]) -> Vec<String> {
    let mut lines = vec![format!("Registro de accesos denegados ({})", entries.len())];
    lines.extend(entries.iter().map(|e| format!("  [{}] {} {}", e.seen_at, e.id, e.nombre)));
    lines
}

/// One line per dashboard effect; sounds go through [`play`] instead.
#[must_use]
pub fn format_effect(effect: &AccessEffect) -> Option<String> {
    match effect {
        AccessEffect::TagRead(_) | AccessEffect::Play(_) => None,
        AccessEffect::Status(card) => Some(format!("{} {} ({})", card.headline(), card.nombre, card.id)),
        AccessEffect::Notify(notice) => Some(notice.text.clone()),
        AccessEffect::Logged(entry) => Some(format!("[{}] {} {}", entry.seen_at, entry.id, entry.nombre)),
    }
}
