use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_users, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn ana() -> User {
    User {
        id: 1,
        name: "Ana".to_string(),
        email: "a@x.com".to_string(),
    }
}

// --- list ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(empty_request("GET", "/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn list_users_seeded() {
    let resp = app_with_users(vec![ana()])
        .oneshot(empty_request("GET", "/users"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users, vec![ana()]);
}

// --- create ---

#[tokio::test]
async fn create_user_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/users", r#"{"name":"Bo","email":"b@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Bo");
    assert_eq!(user.email, "b@x.com");
}

#[tokio::test]
async fn create_user_after_seed_gets_next_id() {
    let resp = app_with_users(vec![ana()])
        .oneshot(json_request("POST", "/users", r#"{"name":"Bo","email":"b@x.com"}"#))
        .await
        .unwrap();

    let user: User = body_json(resp).await;
    assert_eq!(user.id, 2);
}

#[tokio::test]
async fn create_user_missing_email_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/users", r#"{"name":"Bo"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_user_without_content_type_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .body(r#"{"name":"Bo","email":"b@x.com"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- update ---

#[tokio::test]
async fn update_user_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/users/999", r#"{"name":"Nope","email":"n@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_bad_id_returns_400() {
    let resp = app()
        .oneshot(json_request("PUT", "/users/abc", r#"{"name":"Nope","email":"n@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/users/999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app_with_users(vec![ana()]).into_service();

    // update the seeded user
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/users/1",
            r#"{"name":"Ana B","email":"ab@x.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.id, 1);
    assert_eq!(updated.name, "Ana B");
    assert_eq!(updated.email, "ab@x.com");

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/users", r#"{"name":"Bo","email":"b@x.com"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: User = body_json(resp).await;
    assert_eq!(created.id, 2);

    // list keeps insertion order
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/users"))
        .await
        .unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users, vec![updated.clone(), created.clone()]);

    // delete answers with an empty object
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/users/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"{}");

    // delete again is a 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/users/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/users"))
        .await
        .unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users, vec![created]);
}
