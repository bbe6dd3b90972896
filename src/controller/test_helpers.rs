//! Fakes shared by controller tests: an in-memory API and a view that
//! records every call.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::oneshot;

use crate::net::api::{AdminApi, ApiError, DoorApi};
use crate::net::types::{
    AddTagRequest, DoorOpenRequest, DoorOpenResponse, MessageResponse, Pagination, PasswordUpdateRequest,
    PasswordUpdateResponse, SaveUserRequest, SaveUserResponse, SnapshotResponse, UserListResponse, UserRecord,
};
use crate::state::form::UserForm;
use crate::state::page::{PageSize, UserQuery};
use crate::view::pagination::{PageControl, PageSummary};
use crate::view::table::TableRow;
use crate::view::{Feedback, Notice, UserListView};

// =========================================================================
// Builders
// =========================================================================

pub fn record(id: &str, nombre: &str) -> UserRecord {
    UserRecord {
        id: id.to_owned(),
        nombre: nombre.to_owned(),
        ap: "Pérez".to_owned(),
        am: String::new(),
        email: format!("{id}@example.com"),
        pwd: "secret".to_owned(),
        cell: None,
        tipo_id: Some(2),
        tipo: Some("Residente".to_owned()),
        operador: false,
        activo: true,
    }
}

pub fn listing(records: Vec<UserRecord>, current: u32, total: u32) -> UserListResponse {
    UserListResponse {
        paginacion: Pagination {
            pagina_actual: current,
            total_paginas: total,
            total_usuarios: u64::from(total) * 25,
            por_pagina: 25,
            has_prev: current > 1,
            has_next: current < total,
        },
        usuarios: records,
    }
}

// =========================================================================
// MockApi
// =========================================================================

pub enum Reply<T> {
    Ready(Result<T, ApiError>),
    /// Resolves when the test sends on the paired sender.
    Gated(oneshot::Receiver<Result<T, ApiError>>),
}

type Queue<T> = Mutex<VecDeque<T>>;

#[derive(Default)]
pub struct MockApi {
    list_replies: Queue<Reply<UserListResponse>>,
    save_replies: Queue<Result<SaveUserResponse, ApiError>>,
    delete_replies: Queue<Result<MessageResponse, ApiError>>,
    password_replies: Queue<Result<PasswordUpdateResponse, ApiError>>,
    tag_replies: Queue<Result<MessageResponse, ApiError>>,
    door_replies: Queue<Result<DoorOpenResponse, ApiError>>,
    snapshot_replies: Queue<Result<SnapshotResponse, ApiError>>,
    talk_replies: Queue<Result<serde_json::Value, ApiError>>,

    pub list_calls: Mutex<Vec<UserQuery>>,
    pub saved: Mutex<Vec<SaveUserRequest>>,
    pub deleted: Mutex<Vec<String>>,
    pub passwords: Mutex<Vec<PasswordUpdateRequest>>,
    pub tags: Mutex<Vec<AddTagRequest>>,
    pub door_requests: Mutex<Vec<DoorOpenRequest>>,
}

impl MockApi {
    pub fn push_list(&self, reply: Result<UserListResponse, ApiError>) {
        self.list_replies.lock().unwrap().push_back(Reply::Ready(reply));
    }

    /// Queue a listing reply the test resolves later.
    pub fn gate_list(&self) -> oneshot::Sender<Result<UserListResponse, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.list_replies.lock().unwrap().push_back(Reply::Gated(rx));
        tx
    }

    pub fn push_save(&self, reply: Result<SaveUserResponse, ApiError>) {
        self.save_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_delete(&self, reply: Result<MessageResponse, ApiError>) {
        self.delete_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_password(&self, reply: Result<PasswordUpdateResponse, ApiError>) {
        self.password_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_tag(&self, reply: Result<MessageResponse, ApiError>) {
        self.tag_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_door(&self, reply: Result<DoorOpenResponse, ApiError>) {
        self.door_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_snapshot(&self, reply: Result<SnapshotResponse, ApiError>) {
        self.snapshot_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_talk(&self, reply: Result<serde_json::Value, ApiError>) {
        self.talk_replies.lock().unwrap().push_back(reply);
    }

    pub fn list_calls(&self) -> Vec<UserQuery> {
        self.list_calls.lock().unwrap().clone()
    }
}

fn pop_or<T>(queue: &Queue<Result<T, ApiError>>, fallback: impl FnOnce() -> T) -> Result<T, ApiError> {
    queue.lock().unwrap().pop_front().unwrap_or_else(|| Ok(fallback()))
}

#[async_trait::async_trait]
impl AdminApi for MockApi {
    async fn list_users(&self, query: &UserQuery) -> Result<UserListResponse, ApiError> {
        self.list_calls.lock().unwrap().push(query.clone());
        let reply = self.list_replies.lock().unwrap().pop_front();
        match reply {
            None => Ok(listing(Vec::new(), 1, 1)),
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Unreachable("gate dropped".to_owned()))),
        }
    }

    async fn save_user(&self, request: &SaveUserRequest) -> Result<SaveUserResponse, ApiError> {
        self.saved.lock().unwrap().push(request.clone());
        pop_or(&self.save_replies, SaveUserResponse::default)
    }

    async fn delete_user(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.deleted.lock().unwrap().push(id.to_owned());
        pop_or(&self.delete_replies, MessageResponse::default)
    }

    async fn update_password(&self, request: &PasswordUpdateRequest) -> Result<PasswordUpdateResponse, ApiError> {
        self.passwords.lock().unwrap().push(request.clone());
        pop_or(&self.password_replies, || PasswordUpdateResponse {
            success: true,
            message: Some("Contraseña actualizada".to_owned()),
            error: None,
        })
    }

    async fn add_tag(&self, request: &AddTagRequest) -> Result<MessageResponse, ApiError> {
        self.tags.lock().unwrap().push(request.clone());
        pop_or(&self.tag_replies, MessageResponse::default)
    }
}

#[async_trait::async_trait]
impl DoorApi for MockApi {
    async fn open_door(&self, request: &DoorOpenRequest) -> Result<DoorOpenResponse, ApiError> {
        self.door_requests.lock().unwrap().push(request.clone());
        pop_or(&self.door_replies, DoorOpenResponse::default)
    }

    async fn snapshot(&self) -> Result<SnapshotResponse, ApiError> {
        pop_or(&self.snapshot_replies, SnapshotResponse::default)
    }

    async fn toggle_talk(&self) -> Result<serde_json::Value, ApiError> {
        pop_or(&self.talk_replies, || serde_json::json!({ "ok": true }))
    }
}

// =========================================================================
// RecordingView
// =========================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    Loading(bool),
    Rows(Vec<TableRow>),
    Pagination(Vec<PageControl>),
    Summary(PageSummary, PageSize),
    Form(UserForm),
    SubmitEnabled(bool),
    Notice(Notice),
    Confirm(String),
    Redirect(String),
}

pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    confirm_answer: AtomicBool,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self { events: Mutex::new(Vec::new()), confirm_answer: AtomicBool::new(true) }
    }
}

impl RecordingView {
    pub fn declining() -> Self {
        let view = Self::default();
        view.confirm_answer.store(false, Ordering::SeqCst);
        view
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn rows_renders(&self) -> Vec<Vec<TableRow>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Rows(rows) => Some(rows),
                _ => None,
            })
            .collect()
    }

    pub fn last_pagination(&self) -> Option<Vec<PageControl>> {
        self.events().into_iter().rev().find_map(|e| match e {
            ViewEvent::Pagination(controls) => Some(controls),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Redirect(to) => Some(to),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Feedback for RecordingView {
    fn notify(&self, notice: Notice) {
        self.record(ViewEvent::Notice(notice));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.record(ViewEvent::Confirm(prompt.to_owned()));
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn redirect(&self, location: &str) {
        self.record(ViewEvent::Redirect(location.to_owned()));
    }
}

impl UserListView for RecordingView {
    fn set_loading(&self, loading: bool) {
        self.record(ViewEvent::Loading(loading));
    }

    fn render_rows(&self, rows: &[TableRow]) {
        self.record(ViewEvent::Rows(rows.to_vec()));
    }

    fn render_pagination(&self, controls: &[PageControl]) {
        self.record(ViewEvent::Pagination(controls.to_vec()));
    }

    fn render_summary(&self, summary: &PageSummary, page_size: PageSize) {
        self.record(ViewEvent::Summary(*summary, page_size));
    }

    fn show_form(&self, form: &UserForm) {
        self.record(ViewEvent::Form(form.clone()));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.record(ViewEvent::SubmitEnabled(enabled));
    }
}
