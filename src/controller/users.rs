//! Admin user-list controller.
//!
//! DESIGN
//! ======
//! Owns the paging/search state, the records of the page on screen, and the
//! add/edit form. Methods take `&self` so a search fired while a load is in
//! flight can run concurrently on the same task; the state mutex is never
//! held across an `.await`.
//!
//! OVERLAPPING LOADS
//! =================
//! Every load takes a [`RequestToken`]. Only the response whose token is the
//! latest issued is applied; older ones are dropped on arrival. The loading
//! indicator is cleared by the latest load only, so it stays visible until
//! the data the user actually asked for is on screen.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::DEFAULT_LOGIN_PATH;
use crate::net::api::{AdminApi, ApiError, CONNECTION_ERROR_TEXT};
use crate::net::types::{Pagination, UserListResponse, UserRecord};
use crate::state::form::{FormMode, UserForm};
use crate::state::page::{PageSize, PageState};
use crate::state::sequence::{RequestSequence, RequestToken};
use crate::view::pagination::{PageSummary, page_controls};
use crate::view::table::table_rows;
use crate::view::{Notice, UserListView};

pub const CONFIRM_SAVE_PROMPT: &str = "¿Deseas aplicar los cambios?";
pub const SAVED_TEXT: &str = "✅ Usuario guardado exitosamente";
pub const DELETED_TEXT: &str = "✅ Usuario eliminado";

/// Result of a listing load.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The response was applied and rendered.
    Rendered,
    /// A newer load was issued before this one finished; nothing was applied.
    Stale,
    /// The session expired and the view was sent to the login page.
    Redirected,
    /// The server rejected the request or could not be reached.
    Failed(ApiError),
    /// The requested page was out of range; no request was made.
    Ignored,
}

/// Result of a save or delete.
#[derive(Debug)]
pub enum ActionOutcome {
    Done,
    /// The user declined the confirmation prompt.
    Cancelled,
    Redirected,
    Failed(ApiError),
}

#[derive(Debug, Default)]
struct Inner {
    page: PageState,
    records: Vec<UserRecord>,
    form: UserForm,
    sequence: RequestSequence,
}

pub struct UserListController<A, V> {
    api: A,
    view: V,
    login_path: String,
    inner: Mutex<Inner>,
}

impl<A, V> UserListController<A, V>
where
    A: AdminApi,
    V: UserListView,
{
    pub fn new(api: A, view: V) -> Self {
        Self { api, view, login_path: DEFAULT_LOGIN_PATH.to_owned(), inner: Mutex::new(Inner::default()) }
    }

    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn page_state(&self) -> PageState {
        self.lock().page.clone()
    }

    /// Records of the page currently on screen.
    pub fn records(&self) -> Vec<UserRecord> {
        self.lock().records.clone()
    }

    /// Current contents of the add/edit form.
    pub fn form(&self) -> UserForm {
        self.lock().form.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // LISTING
    // =========================================================================

    /// Fetch and render `page` with the current page size and search term.
    ///
    /// Once a listing has reported its page count, `page` is clamped into
    /// `[1, total_pages]` before the request is built.
    pub async fn load_page(&self, page: u32) -> LoadOutcome {
        if page == 0 {
            tracing::debug!("ignoring load of page 0");
            return LoadOutcome::Ignored;
        }

        let (token, query) = {
            let mut inner = self.lock();
            let page = inner.page.request_page(page);
            (inner.sequence.issue(), inner.page.query(page))
        };

        self.view.set_loading(true);
        let result = self.api.list_users(&query).await;

        if !self.is_current(token) {
            tracing::debug!(page, ?token, "dropping stale listing response");
            return LoadOutcome::Stale;
        }
        self.view.set_loading(false);

        match result {
            Ok(listing) => {
                self.apply_listing(listing);
                LoadOutcome::Rendered
            }
            Err(err) => self.report_load_error(err),
        }
    }

    /// Navigate to `page` if it exists; otherwise do nothing.
    pub async fn go_to_page(&self, page: u32) -> LoadOutcome {
        if !self.lock().page.contains(page) {
            tracing::debug!(page, "page out of range");
            return LoadOutcome::Ignored;
        }
        self.load_page(page).await
    }

    /// Reload the page currently on screen.
    pub async fn reload(&self) -> LoadOutcome {
        let page = self.lock().page.current_page();
        self.load_page(page).await
    }

    pub async fn search(&self, term: &str) -> LoadOutcome {
        self.lock().page.set_search(term);
        self.load_page(1).await
    }

    pub async fn clear_search(&self) -> LoadOutcome {
        self.search("").await
    }

    pub async fn change_page_size(&self, size: PageSize) -> LoadOutcome {
        self.lock().page.set_page_size(size);
        self.load_page(1).await
    }

    /// Set the page size and search term without fetching, for a first load
    /// that should already be filtered.
    pub fn set_filters(&self, size: PageSize, term: &str) {
        let mut inner = self.lock();
        inner.page.set_page_size(size);
        inner.page.set_search(term);
    }

    /// Replace the table body with `records`.
    pub fn render_rows(&self, records: &[UserRecord]) {
        self.view.render_rows(&table_rows(records));
    }

    /// Redraw both pagination bars and the summary line.
    pub fn render_pagination(&self, info: &Pagination) {
        let page_size = self.lock().page.page_size;
        self.view.render_pagination(&page_controls(info));
        self.view.render_summary(&PageSummary::from_pagination(info), page_size);
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.lock().sequence.is_current(token)
    }

    fn apply_listing(&self, listing: UserListResponse) {
        let UserListResponse { usuarios, paginacion } = listing;
        tracing::info!(
            page = paginacion.pagina_actual,
            total_pages = paginacion.total_paginas,
            rows = usuarios.len(),
            "listing loaded"
        );

        self.render_rows(&usuarios);
        {
            let mut inner = self.lock();
            inner.page.apply(&paginacion);
            inner.records = usuarios;
        }
        self.render_pagination(&paginacion);
    }

    fn report_load_error(&self, err: ApiError) -> LoadOutcome {
        if matches!(err, ApiError::Unauthorized) {
            self.view.redirect(&self.login_path);
            return LoadOutcome::Redirected;
        }
        self.report(&err, "Error");
        LoadOutcome::Failed(err)
    }

    // =========================================================================
    // FORM
    // =========================================================================

    /// Load the listed record `id` into the form.
    ///
    /// Returns the mode the form opened in, or `None` when the id is not on
    /// the current page.
    pub fn edit_user(&self, id: &str) -> Option<FormMode> {
        let form = {
            let mut inner = self.lock();
            let record = inner.records.iter().find(|r| r.id == id)?;
            let form = UserForm::from_record(record);
            inner.form = form.clone();
            form
        };
        self.view.show_form(&form);
        Some(form.mode)
    }

    /// Open a blank form in Add mode.
    pub fn begin_add(&self) {
        self.reset_form();
    }

    pub fn cancel_edit(&self) {
        self.reset_form();
    }

    fn reset_form(&self) {
        let blank = UserForm::new();
        self.lock().form = blank.clone();
        self.view.show_form(&blank);
    }

    /// Confirm, then create or update the user described by `form`.
    ///
    /// On failure the form keeps the submitted values so the user can retry.
    /// The submit control is re-enabled whatever the outcome.
    pub async fn submit_user(&self, form: UserForm) -> ActionOutcome {
        let request = form.to_request();
        self.lock().form = form;

        if !self.view.confirm(CONFIRM_SAVE_PROMPT) {
            return ActionOutcome::Cancelled;
        }

        self.view.set_submit_enabled(false);
        let result = self.api.save_user(&request).await;
        self.view.set_submit_enabled(true);

        match result {
            Ok(response) => {
                self.view.notify(Notice::success(SAVED_TEXT));
                self.reset_form();
                if let Some(location) = response.redirect.filter(|l| !l.is_empty()) {
                    self.view.redirect(&location);
                }
                self.reload().await;
                ActionOutcome::Done
            }
            Err(err) => self.report_action_error(err, "Error al guardar el usuario"),
        }
    }

    /// Confirm, then delete user `id` and reload the current page.
    pub async fn delete_user(&self, id: &str) -> ActionOutcome {
        if !self.view.confirm(&format!("¿Eliminar al usuario {id}?")) {
            return ActionOutcome::Cancelled;
        }

        match self.api.delete_user(id).await {
            Ok(response) => {
                let text = response.message.filter(|m| !m.is_empty()).unwrap_or_else(|| DELETED_TEXT.to_owned());
                self.view.notify(Notice::success(text));
                self.reload().await;
                ActionOutcome::Done
            }
            Err(err) => self.report_action_error(err, "Error al eliminar el usuario"),
        }
    }

    fn report_action_error(&self, err: ApiError, context: &str) -> ActionOutcome {
        if matches!(err, ApiError::Unauthorized) {
            self.view.redirect(&self.login_path);
            return ActionOutcome::Redirected;
        }
        self.report(&err, context);
        ActionOutcome::Failed(err)
    }

    fn report(&self, err: &ApiError, context: &str) {
        let text = if err.is_unreachable() {
            format!("❌ {CONNECTION_ERROR_TEXT}")
        } else {
            format!("❌ {context}: {}", err.user_message())
        };
        self.view.notify(Notice::error(text));
    }
}
