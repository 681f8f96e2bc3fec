use axum::http::{self, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine};
use http_body_util::BodyExt;
use mock_server::{app, AppState, WallPost};
use serde_json::Value;
use tower::ServiceExt;

fn auth() -> String {
    format!("Basic {}", STANDARD.encode("apikey:x"))
}

fn state() -> AppState {
    AppState::with_api_key("apikey")
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth())
        .body(String::new())
        .unwrap()
}

fn authed_body(method: &str, uri: &str, content_type: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, auth())
        .header(http::header::CONTENT_TYPE, content_type)
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_credentials_return_401() {
    let state = state();
    let resp = app(state.clone())
        .oneshot(Request::builder().uri("/accounts").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let recorded = state.last_request().unwrap();
    assert_eq!(recorded.path, "/accounts");
    assert!(recorded.authorization.is_none());
}

#[tokio::test]
async fn wrong_credentials_return_401() {
    let resp = app(AppState::new("user", "right"))
        .oneshot(
            Request::builder()
                .uri("/accounts")
                .header(http::header::AUTHORIZATION, format!("Basic {}", STANDARD.encode("user:wrong")))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forced_status_short_circuits() {
    let state = state();
    state.respond_with(StatusCode::INTERNAL_SERVER_ERROR);
    let resp = app(state.clone()).oneshot(authed("GET", "/accounts")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    state.clear_override();
    let resp = app(state).oneshot(authed("GET", "/accounts")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- reads ---

#[tokio::test]
async fn list_accounts() {
    let resp = app(state()).oneshot(authed("GET", "/accounts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let accounts: Value = body_json(resp).await;
    assert_eq!(accounts.as_array().unwrap().len(), 1);
    assert_eq!(accounts[0]["id"], 3);
    assert_eq!(accounts[0]["organization"], "Snappy Help");
}

#[tokio::test]
async fn unknown_account_returns_404() {
    let resp = app(state()).oneshot(authed("GET", "/account/99/staff")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_by_escaped_email() {
    let resp = app(state())
        .oneshot(authed("GET", "/account/3/contacts/first%2Blast%40test.com"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let contact: Value = body_json(resp).await;
    assert_eq!(contact["id"], 2);
}

#[tokio::test]
async fn search_reports_meta_and_page() {
    let resp = app(state())
        .oneshot(authed("GET", "/account/3/search?page=1&query=printer"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let results: Value = body_json(resp).await;
    assert_eq!(results["meta"]["total"], 1);
    assert_eq!(results["meta"]["page"], "1");
    assert_eq!(results["data"][0]["id"], 1);
}

#[tokio::test]
async fn search_without_page_is_rejected() {
    let resp = app(state())
        .oneshot(authed("GET", "/account/3/search?query=test"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_with_out_of_range_page_is_rejected() {
    let resp = app(state())
        .oneshot(authed("GET", &format!("/account/3/search?page={}&query=test", usize::MAX)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn trailing_slash_accounts_redirects() {
    let resp = app(state()).oneshot(authed("GET", "/accounts/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(resp.headers().get(http::header::LOCATION).unwrap(), "/accounts");
}

#[tokio::test]
async fn download_returns_raw_bytes() {
    let resp = app(state())
        .oneshot(authed("GET", "/ticket/1/attachment/1/download"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/octet-stream"
    );
    assert_eq!(body_bytes(resp).await, "hey now!");
}

#[tokio::test]
async fn mailbox_queues() {
    for (queue, id) in [("tickets", 1), ("inbox", 2), ("yours", 1)] {
        let resp = app(state())
            .oneshot(authed("GET", &format!("/mailbox/1/{queue}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{queue}");
        let tickets: Value = body_json(resp).await;
        assert_eq!(tickets[0]["id"], id, "{queue}");
    }

    let resp = app(state()).oneshot(authed("GET", "/mailbox/1/bogus")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- writes ---

#[tokio::test]
async fn comment_requires_form_encoding() {
    let resp = app(state())
        .oneshot(authed_body(
            "POST",
            "/account/3/wall/1/comment",
            "application/json",
            r#"{"content":"nope"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn update_tags_rejects_non_json_tags() {
    let resp = app(state())
        .oneshot(authed_body(
            "POST",
            "/ticket/1/tags",
            "application/x-www-form-urlencoded",
            "tags=not-json",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_note_rejects_missing_message() {
    let resp = app(state())
        .oneshot(authed_body("POST", "/note", "application/json", r#"{"subject":"s"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- full wall lifecycle ---

#[tokio::test]
async fn wall_lifecycle() {
    let state = state();
    let app = app(state.clone());

    // create
    let resp = app
        .clone()
        .oneshot(authed_body(
            "POST",
            "/account/3/wall",
            "application/json",
            r#"{"content":"hello wall","type":"post","tags":["t"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: WallPost = body_json(resp).await;
    assert_eq!(created.content, "hello wall");
    let id = created.id;

    // list, newest first
    let resp = app.clone().oneshot(authed("GET", "/account/3/wall")).await.unwrap();
    let posts: Vec<WallPost> = body_json(resp).await;
    assert_eq!(posts[0].id, id);

    // after: only older posts
    let resp = app
        .clone()
        .oneshot(authed("GET", &format!("/account/3/wall?after={id}")))
        .await
        .unwrap();
    let older: Vec<WallPost> = body_json(resp).await;
    assert!(older.iter().all(|p| p.id < id));

    // like, then unlike
    let uri = format!("/account/3/wall/{id}/like");
    let resp = app.clone().oneshot(authed("POST", &uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.wall_posts().await.iter().find(|p| p.id == id).unwrap().like_count, 1);

    let resp = app.clone().oneshot(authed("DELETE", &uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.wall_posts().await.iter().find(|p| p.id == id).unwrap().like_count, 0);

    // comment, then delete it
    let resp = app
        .clone()
        .oneshot(authed_body(
            "POST",
            &format!("/account/3/wall/{id}/comment"),
            "application/x-www-form-urlencoded",
            "content=test+comment",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let comment: Value = body_json(resp).await;
    assert_eq!(comment["content"], "test comment");
    let comment_id = comment["id"].as_u64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed("DELETE", &format!("/account/3/wall/{id}/comment/{comment_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // delete the post; a second delete is a 404
    let resp = app
        .clone()
        .oneshot(authed("DELETE", &format!("/account/3/wall/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(authed("DELETE", &format!("/account/3/wall/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(state.wall_posts().await.iter().all(|p| p.id != id));
}
