//! Local stand-in for the Snappy API.
//!
//! Serves fixture data for the read endpoints and keeps an in-memory wall so
//! mutating calls have observable effects. Every request is recorded before
//! it is authorized, so tests can inspect exactly what a client sent,
//! including requests the server rejected.

pub mod fixtures;

pub use axum::http::StatusCode;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    body::Body,
    extract::{Form, Path, Query, Request, State},
    http::{header, HeaderMap},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

use fixtures::{ACCOUNT_ID, ATTACHMENT_ID, DOCUMENT_ID, DOWNLOAD_BODY, MAILBOX_ID};

/// Wall pages are this long.
const WALL_PAGE_SIZE: usize = 25;
const SEARCH_PAGE_SIZE: usize = 25;
/// Timestamp stamped on records created through the API.
const NOW: &str = "2014-01-01 00:00:00";
/// Name added to `likes` when the caller likes a post.
const LIKER: &str = "API User";

/// A request as it arrived, before authorization.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Username and password from a Basic `Authorization` header.
    pub fn basic_credentials(&self) -> Option<(String, String)> {
        let encoded = self.authorization.as_deref()?.strip_prefix("Basic ")?;
        let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
        let (user, pass) = decoded.split_once(':')?;
        Some((user.to_string(), pass.to_string()))
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WallComment {
    pub id: u64,
    pub post_id: u64,
    pub staff_id: u64,
    pub content: String,
    pub content_markdown: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WallPost {
    pub id: u64,
    pub account_id: u64,
    pub staff_id: u64,
    pub ticket_id: Option<u64>,
    pub note_id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub content_markdown: String,
    pub created_at: String,
    pub updated_at: String,
    pub tags: Vec<String>,
    pub likes: Vec<String>,
    pub like_count: u64,
    pub comments: Vec<WallComment>,
}

#[derive(Debug, Deserialize)]
pub struct NewWallPost {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub ticket: Option<u64>,
    pub note: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct NoteAddress {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct NewNote {
    pub subject: String,
    pub message: String,
    pub mailbox_id: Option<u64>,
    #[serde(default)]
    pub to: Vec<NoteAddress>,
    #[serde(default)]
    pub from: Vec<NoteAddress>,
    pub staff_id: Option<u64>,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WallQuery {
    after: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    query: String,
    page: usize,
}

#[derive(Debug, Deserialize)]
struct CommentForm {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TagsForm {
    tags: String,
}

struct Wall {
    posts: Vec<WallPost>,
    next_post_id: u64,
    next_comment_id: u64,
}

impl Wall {
    fn seeded() -> Self {
        let post = |id: u64, content: &str| WallPost {
            id,
            account_id: ACCOUNT_ID,
            staff_id: 1,
            ticket_id: None,
            note_id: None,
            kind: "post".to_string(),
            content: content.to_string(),
            content_markdown: "Markdown".to_string(),
            created_at: "2013-07-12 18:08:32".to_string(),
            updated_at: "2013-07-12 21:14:30".to_string(),
            tags: vec!["tag1".to_string()],
            likes: vec!["Like 1".to_string()],
            like_count: 1,
            comments: Vec::new(),
        };
        Self {
            posts: vec![post(1, "test"), post(2, "second")],
            next_post_id: 3,
            next_comment_id: 1,
        }
    }

    fn post_mut(&mut self, id: u64) -> Result<&mut WallPost, StatusCode> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StatusCode::NOT_FOUND)
    }
}

struct Inner {
    expected_authorization: String,
    requests: Mutex<Vec<RecordedRequest>>,
    forced_status: Mutex<Option<StatusCode>>,
    wall: RwLock<Wall>,
}

/// Shared server state. Clones share the same request log and wall.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// Accept Basic credentials `username:password` only.
    pub fn new(username: &str, password: &str) -> Self {
        let expected = format!("Basic {}", STANDARD.encode(format!("{username}:{password}")));
        Self {
            inner: Arc::new(Inner {
                expected_authorization: expected,
                requests: Mutex::new(Vec::new()),
                forced_status: Mutex::new(None),
                wall: RwLock::new(Wall::seeded()),
            }),
        }
    }

    /// Accept an API key with the conventional `x` password.
    pub fn with_api_key(key: &str) -> Self {
        Self::new(key, "x")
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.inner.requests).clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.inner.requests).last().cloned()
    }

    /// Answer every subsequent request with `status` and an empty body.
    pub fn respond_with(&self, status: StatusCode) {
        *lock(&self.inner.forced_status) = Some(status);
    }

    pub fn clear_override(&self) {
        *lock(&self.inner.forced_status) = None;
    }

    pub async fn wall_posts(&self) -> Vec<WallPost> {
        self.inner.wall.read().await.posts.clone()
    }

    fn record(&self, request: RecordedRequest) {
        lock(&self.inner.requests).push(request);
    }

    fn forced_status(&self) -> Option<StatusCode> {
        *lock(&self.inner.forced_status)
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == self.inner.expected_authorization)
    }
}

/// A poisoned log is still a usable log.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/", get(redirect_to_accounts))
        .route("/account/{account}/staff", get(list_staff))
        .route("/account/{account}/mailboxes", get(list_mailboxes))
        .route("/account/{account}/contacts/{contact}", get(get_contact))
        .route("/account/{account}/search", get(search))
        .route("/account/{account}/documents", get(list_documents))
        .route("/account/{account}/document/{document}/download", get(download_document))
        .route("/account/{account}/wall", get(list_wall).post(create_wall_post))
        .route("/account/{account}/wall/{post}", axum::routing::delete(delete_wall_post))
        .route("/account/{account}/wall/{post}/like", post(like).delete(unlike))
        .route("/account/{account}/wall/{post}/comment", post(comment))
        .route(
            "/account/{account}/wall/{post}/comment/{comment}",
            axum::routing::delete(delete_comment),
        )
        .route("/mailbox/{mailbox}/{queue}", get(mailbox_queue))
        .route("/ticket/{ticket}", get(get_ticket))
        .route("/ticket/{ticket}/notes", get(list_notes))
        .route("/ticket/{ticket}/attachment/{attachment}/download", get(download_attachment))
        .route("/ticket/{ticket}/tags", post(update_tags))
        .route("/note", post(create_note))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn_with_state(state.clone(), record_and_authorize))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn record_and_authorize(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Ok(bytes) = axum::body::to_bytes(body, usize::MAX).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let header_text = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.record(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: header_text(header::AUTHORIZATION),
        user_agent: header_text(header::USER_AGENT),
        content_type: header_text(header::CONTENT_TYPE),
        body: bytes.to_vec(),
    });
    tracing::debug!(method = %parts.method, uri = %parts.uri, "request");

    if let Some(status) = state.forced_status() {
        return status.into_response();
    }
    if !state.is_authorized(&parts.headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn require_account(account: u64) -> Result<(), StatusCode> {
    if account == ACCOUNT_ID {
        Ok(())
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

fn download(bytes: &'static [u8]) -> Response {
    ([(header::CONTENT_TYPE, "application/octet-stream")], bytes).into_response()
}

// --- accounts ---

async fn list_accounts() -> Json<Value> {
    Json(fixtures::accounts())
}

/// Trailing-slash form of `/accounts`, answered with a same-host redirect.
async fn redirect_to_accounts() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/accounts")]).into_response()
}

async fn list_staff(Path(account): Path<u64>) -> Result<Json<Value>, StatusCode> {
    require_account(account)?;
    Ok(Json(fixtures::staff()))
}

async fn list_mailboxes(Path(account): Path<u64>) -> Result<Json<Value>, StatusCode> {
    require_account(account)?;
    Ok(Json(fixtures::mailboxes()))
}

/// Contacts are addressed by id or by e-mail address.
async fn get_contact(Path((account, contact)): Path<(u64, String)>) -> Result<Json<Value>, StatusCode> {
    require_account(account)?;
    fixtures::contacts()
        .into_iter()
        .find(|c| c["id"].to_string() == contact || c["address"] == contact.as_str())
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn search(
    Path(account): Path<u64>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, StatusCode> {
    require_account(account)?;
    if params.page == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let offset = (params.page - 1)
        .checked_mul(SEARCH_PAGE_SIZE)
        .ok_or(StatusCode::BAD_REQUEST)?;
    let needle = params.query.to_lowercase();
    let matches: Vec<Value> = fixtures::tickets()
        .into_iter()
        .filter(|t| t.to_string().to_lowercase().contains(&needle))
        .collect();
    let total = matches.len();
    let page: Vec<Value> = matches
        .into_iter()
        .skip(offset)
        .take(SEARCH_PAGE_SIZE)
        .collect();
    Ok(Json(json!({
        "meta": {"total": total, "page": params.page.to_string()},
        "data": page,
    })))
}

async fn list_documents(Path(account): Path<u64>) -> Result<Json<Value>, StatusCode> {
    require_account(account)?;
    Ok(Json(fixtures::documents()))
}

async fn download_document(Path((account, document)): Path<(u64, u64)>) -> Result<Response, StatusCode> {
    require_account(account)?;
    if document != DOCUMENT_ID {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(download(DOWNLOAD_BODY))
}

// --- wall ---

/// Newest first. `after` continues the listing below that post id.
async fn list_wall(
    State(state): State<AppState>,
    Path(account): Path<u64>,
    Query(params): Query<WallQuery>,
) -> Result<Json<Vec<WallPost>>, StatusCode> {
    require_account(account)?;
    let wall = state.inner.wall.read().await;
    let mut posts: Vec<WallPost> = wall
        .posts
        .iter()
        .filter(|p| params.after.map_or(true, |after| p.id < after))
        .cloned()
        .collect();
    posts.sort_by(|a, b| b.id.cmp(&a.id));
    posts.truncate(WALL_PAGE_SIZE);
    Ok(Json(posts))
}

async fn create_wall_post(
    State(state): State<AppState>,
    Path(account): Path<u64>,
    Json(input): Json<NewWallPost>,
) -> Result<Json<WallPost>, StatusCode> {
    require_account(account)?;
    let mut wall = state.inner.wall.write().await;
    let post = WallPost {
        id: wall.next_post_id,
        account_id: account,
        staff_id: 1,
        ticket_id: input.ticket,
        note_id: input.note,
        kind: input.kind,
        content_markdown: input.content.clone(),
        content: input.content,
        created_at: NOW.to_string(),
        updated_at: NOW.to_string(),
        tags: input.tags,
        likes: Vec::new(),
        like_count: 0,
        comments: Vec::new(),
    };
    wall.next_post_id += 1;
    wall.posts.push(post.clone());
    Ok(Json(post))
}

async fn delete_wall_post(
    State(state): State<AppState>,
    Path((account, post)): Path<(u64, u64)>,
) -> Result<StatusCode, StatusCode> {
    require_account(account)?;
    let mut wall = state.inner.wall.write().await;
    let before = wall.posts.len();
    wall.posts.retain(|p| p.id != post);
    if wall.posts.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::OK)
}

async fn like(
    State(state): State<AppState>,
    Path((account, post)): Path<(u64, u64)>,
) -> Result<StatusCode, StatusCode> {
    require_account(account)?;
    let mut wall = state.inner.wall.write().await;
    let post = wall.post_mut(post)?;
    if !post.likes.iter().any(|l| l == LIKER) {
        post.likes.push(LIKER.to_string());
    }
    post.like_count = post.likes.len() as u64;
    Ok(StatusCode::OK)
}

async fn unlike(
    State(state): State<AppState>,
    Path((account, post)): Path<(u64, u64)>,
) -> Result<StatusCode, StatusCode> {
    require_account(account)?;
    let mut wall = state.inner.wall.write().await;
    let post = wall.post_mut(post)?;
    post.likes.retain(|l| l != LIKER);
    post.like_count = post.likes.len() as u64;
    Ok(StatusCode::OK)
}

async fn comment(
    State(state): State<AppState>,
    Path((account, post)): Path<(u64, u64)>,
    Form(input): Form<CommentForm>,
) -> Result<Json<WallComment>, StatusCode> {
    require_account(account)?;
    let mut wall = state.inner.wall.write().await;
    let id = wall.next_comment_id;
    let post = wall.post_mut(post)?;
    let comment = WallComment {
        id,
        post_id: post.id,
        staff_id: 1,
        content_markdown: input.content.clone(),
        content: input.content,
        created_at: NOW.to_string(),
        updated_at: NOW.to_string(),
    };
    post.comments.push(comment.clone());
    wall.next_comment_id += 1;
    Ok(Json(comment))
}

async fn delete_comment(
    State(state): State<AppState>,
    Path((account, post, comment)): Path<(u64, u64, u64)>,
) -> Result<StatusCode, StatusCode> {
    require_account(account)?;
    let mut wall = state.inner.wall.write().await;
    let post = wall.post_mut(post)?;
    let before = post.comments.len();
    post.comments.retain(|c| c.id != comment);
    if post.comments.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::OK)
}

// --- mailboxes, tickets, notes ---

async fn mailbox_queue(Path((mailbox, queue)): Path<(u64, String)>) -> Result<Json<Vec<Value>>, StatusCode> {
    if mailbox != MAILBOX_ID {
        return Err(StatusCode::NOT_FOUND);
    }
    let ids = fixtures::queue(&queue).ok_or(StatusCode::NOT_FOUND)?;
    let tickets = fixtures::tickets()
        .into_iter()
        .filter(|t| t["id"].as_u64().is_some_and(|id| ids.contains(&id)))
        .collect();
    Ok(Json(tickets))
}

fn find_ticket(ticket: u64) -> Result<Value, StatusCode> {
    fixtures::tickets()
        .into_iter()
        .find(|t| t["id"] == ticket)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_ticket(Path(ticket): Path<u64>) -> Result<Json<Value>, StatusCode> {
    find_ticket(ticket).map(Json)
}

async fn list_notes(Path(ticket): Path<u64>) -> Result<Json<Value>, StatusCode> {
    find_ticket(ticket)?;
    Ok(Json(fixtures::notes(ticket)))
}

async fn download_attachment(Path((ticket, attachment)): Path<(u64, u64)>) -> Result<Response, StatusCode> {
    find_ticket(ticket)?;
    if attachment != ATTACHMENT_ID {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(download(DOWNLOAD_BODY))
}

/// Tags arrive as a JSON array inside the `tags` form field.
async fn update_tags(Path(ticket): Path<u64>, Form(input): Form<TagsForm>) -> Result<StatusCode, StatusCode> {
    find_ticket(ticket)?;
    serde_json::from_str::<Vec<String>>(&input.tags).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;
    Ok(StatusCode::OK)
}

async fn create_note(Json(input): Json<NewNote>) -> Result<StatusCode, StatusCode> {
    if input.subject.is_empty() && input.message.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    if input.mailbox_id.is_some_and(|id| id != MAILBOX_ID) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::OK)
}
