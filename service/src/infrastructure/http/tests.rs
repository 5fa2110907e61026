use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use qanda_common::{QuestionId, UserId, test_utils::user_id};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::routes;
use crate::test_utils::InMemoryStore;

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";

fn alice() -> UserId {
    user_id(1)
}

fn store() -> InMemoryStore {
    let store = InMemoryStore::default();
    store.add_user(ALICE, alice(), "alice");
    store.add_user(BOB, user_id(2), "bob");
    store
}

async fn send(
    store: &InMemoryStore,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = routes(store.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn question_payload(title: &str) -> Value {
    json!({
        "title": title,
        "body": "The borrow checker rejects my code and I cannot see why.",
        "tags": ["x", "y"],
    })
}

async fn create(store: &InMemoryStore, title: &str) -> String {
    let (status, body) = send(
        store,
        Method::POST,
        "/api/questions",
        Some(ALICE),
        Some(question_payload(title)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_check_is_ok() {
    let (status, _) = send(&store(), Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn created_question_belongs_to_the_caller() {
    let store = store();
    let (status, created) = send(
        &store,
        Method::POST,
        "/api/questions",
        Some(ALICE),
        Some(question_payload("Closures and borrows")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["author"]["id"], json!(alice().to_string()));
    assert_eq!(created["author"]["username"], json!("alice"));
    assert_eq!(created["status"], json!("open"));
    assert_eq!(created["upvotes"], json!(0));

    let uri = format!("/api/questions/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&store, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["tags"], json!(["x", "y"]));
    assert_eq!(fetched["title"], json!("Closures and borrows"));
}

#[rstest]
#[case::missing_token(None)]
#[case::unknown_token(Some("nobody"))]
#[tokio::test]
async fn creating_requires_a_known_token(#[case] token: Option<&str>) {
    let store = store();
    let (status, body) = send(
        &store,
        Method::POST,
        "/api/questions",
        token,
        Some(question_payload("Closures and borrows")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], json!(401));
    assert_eq!(body["data"]["kind"], json!("unauthenticated"));
    assert_eq!(store.question_count(), 0);
}

#[rstest]
#[case::short_title(json!({"title": "Hey", "body": "A body that easily clears twenty characters.", "tags": ["x"]}), "Title should be at least 5 characters long.")]
#[case::short_body(json!({"title": "A fine title", "body": "too short", "tags": ["x"]}), "Body should be at least 20 characters long.")]
#[case::missing_tags(json!({"title": "A fine title", "body": "A body that easily clears twenty characters."}), "At least one tag is required.")]
#[case::empty_tags(json!({"title": "A fine title", "body": "A body that easily clears twenty characters.", "tags": []}), "At least one tag is required.")]
#[case::tags_not_a_list(json!({"title": "A fine title", "body": "A body that easily clears twenty characters.", "tags": "x,y"}), "Tags should be a list of labels.")]
#[tokio::test]
async fn invalid_questions_are_rejected(#[case] payload: Value, #[case] message: &str) {
    let store = store();
    let (status, body) = send(&store, Method::POST, "/api/questions", Some(ALICE), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["message"], json!(message));
    assert_eq!(store.question_count(), 0);
}

#[tokio::test]
async fn unparseable_json_is_a_bad_request() {
    let store = store();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/questions")
        .header(header::AUTHORIZATION, format!("Bearer {ALICE}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = routes(store.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.question_count(), 0);
}

#[tokio::test]
async fn empty_listing_is_ok() {
    let (status, body) = send(&store(), Method::GET, "/api/questions?status=closed", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn listing_is_newest_first_and_filter_order_does_not_matter() {
    let store = store();
    let older = create(&store, "Older question").await;
    let newer = create(&store, "Newer question").await;
    let _unpopular = create(&store, "Unpopular question").await;
    store.set_upvotes(older.parse::<QuestionId>().unwrap(), 7);
    store.set_upvotes(newer.parse::<QuestionId>().unwrap(), 5);

    let (_, forward) = send(&store, Method::GET, "/api/questions?status=open&minVotes=5", None, None).await;
    let (_, reverse) = send(&store, Method::GET, "/api/questions?minVotes=5&status=open", None, None).await;

    assert_eq!(ids(&forward), vec![newer.clone(), older.clone()]);
    assert_eq!(ids(&forward), ids(&reverse));
}

#[tokio::test]
async fn malformed_vote_bound_is_ignored() {
    let store = store();
    create(&store, "First question").await;
    create(&store, "Second question").await;

    let (status, body) = send(&store, Method::GET, "/api/questions?minVotes=lots", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), 2);
}

#[tokio::test]
async fn search_and_tags_narrow_the_listing() {
    let store = store();
    let closures = create(&store, "Closures and borrows").await;
    create(&store, "Iterators everywhere").await;

    let (_, body) = send(&store, Method::GET, "/api/questions?search=CLOSURE&tags=x,%20z", None, None).await;

    assert_eq!(ids(&body), vec![closures]);
}

#[rstest]
#[case::malformed_id("/api/questions/not-a-uuid")]
#[case::unknown_id("/api/questions/7f1c1a3e-0000-4000-8000-000000000000")]
#[tokio::test]
async fn missing_question_is_not_found(#[case] uri: &str) {
    let (status, body) = send(&store(), Method::GET, uri, None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["message"], json!("Question not found"));
}

#[tokio::test]
async fn only_the_author_may_update() {
    let store = store();
    let id = create(&store, "Closures and borrows").await;
    let uri = format!("/api/questions/{id}");

    let (status, body) = send(&store, Method::PUT, &uri, Some(BOB), Some(json!({"status": "closed"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["data"]["message"], json!("You are not authorized to update this question"));

    let (_, unchanged) = send(&store, Method::GET, &uri, None, None).await;
    assert_eq!(unchanged["status"], json!("open"));
}

#[tokio::test]
async fn status_only_update_keeps_other_fields() {
    let store = store();
    let id = create(&store, "Closures and borrows").await;
    let uri = format!("/api/questions/{id}");
    let (_, before) = send(&store, Method::GET, &uri, None, None).await;

    let (status, after) = send(&store, Method::PUT, &uri, Some(ALICE), Some(json!({"status": "closed"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["status"], json!("closed"));
    assert_eq!(after["title"], before["title"]);
    assert_eq!(after["body"], before["body"]);
    assert_eq!(after["tags"], before["tags"]);
    assert!(after["updatedAt"].is_string());
}

#[rstest]
#[case::short_title(json!({"title": "Hey"}), "Title should be at least 5 characters long.")]
#[case::unknown_status(json!({"status": "archived"}), "Status 'archived' is unknown, expected one of: open, closed.")]
#[tokio::test]
async fn invalid_update_is_rejected(#[case] payload: Value, #[case] message: &str) {
    let store = store();
    let id = create(&store, "Closures and borrows").await;

    let (status, body) = send(
        &store,
        Method::PUT,
        &format!("/api/questions/{id}"),
        Some(ALICE),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["message"], json!(message));
}

#[tokio::test]
async fn author_deletes_and_others_are_forbidden() {
    let store = store();
    let id = create(&store, "Closures and borrows").await;
    let uri = format!("/api/questions/{id}");

    let (status, _) = send(&store, Method::DELETE, &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(store.question_count(), 1);

    let (status, body) = send(&store, Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Question deleted successfully"}));

    let (status, _) = send(&store, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn answers_are_posted_and_listed_oldest_first() {
    let store = store();
    let id = create(&store, "Closures and borrows").await;

    for body in ["First answer", "Second answer"] {
        let (status, answer) = send(
            &store,
            Method::POST,
            "/api/answers",
            Some(BOB),
            Some(json!({"questionId": id, "body": body})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(answer["questionId"], json!(id));
        assert_eq!(answer["author"]["username"], json!("bob"));
    }

    let (status, answers) = send(&store, Method::GET, &format!("/api/questions/{id}/answers"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let bodies: Vec<&str> = answers
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["First answer", "Second answer"]);
}

#[rstest]
#[case::missing_question_id(json!({"body": "An answer"}), StatusCode::BAD_REQUEST)]
#[case::blank_body(json!({"questionId": "7f1c1a3e-0000-4000-8000-000000000000", "body": "  "}), StatusCode::BAD_REQUEST)]
#[case::unknown_question(json!({"questionId": "7f1c1a3e-0000-4000-8000-000000000000", "body": "An answer"}), StatusCode::NOT_FOUND)]
#[tokio::test]
async fn invalid_answers_are_rejected(#[case] payload: Value, #[case] expected: StatusCode) {
    let (status, _) = send(&store(), Method::POST, "/api/answers", Some(BOB), Some(payload)).await;
    assert_eq!(status, expected);
}

#[tokio::test]
async fn answers_to_unknown_question_are_not_found() {
    let (status, _) = send(
        &store(),
        Method::GET,
        "/api/questions/7f1c1a3e-0000-4000-8000-000000000000/answers",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
