//! View abstractions the controllers render through.
//!
//! DESIGN
//! ======
//! Controllers never touch a concrete UI. They describe what to show
//! (row view models, page controls, notices) and hand it to a view trait
//! object, so the same controller drives the terminal front end in
//! `crate::terminal` and a recording view in tests.

pub mod pagination;
pub mod table;

use crate::state::form::UserForm;
use crate::state::page::PageSize;
use pagination::{PageControl, PageSummary};
use table::TableRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the user (alert, toast, inline banner).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }
}

/// User-facing feedback shared by every screen.
pub trait Feedback {
    fn notify(&self, notice: Notice);

    /// Ask a yes/no question; `true` means proceed.
    fn confirm(&self, prompt: &str) -> bool;

    /// Navigate away, e.g. to the login page after a 401.
    fn redirect(&self, location: &str);
}

/// The admin user-list screen.
pub trait UserListView: Feedback {
    fn set_loading(&self, loading: bool);

    /// Replace the table body.
    fn render_rows(&self, rows: &[TableRow]);

    /// Replace both (top and bottom) pagination bars.
    fn render_pagination(&self, controls: &[PageControl]);

    fn render_summary(&self, summary: &PageSummary, page_size: PageSize);

    fn show_form(&self, form: &UserForm);

    fn set_submit_enabled(&self, enabled: bool);
}
