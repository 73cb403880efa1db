//! API integration tests

use bookshelf_server::{api, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Serve a fresh router on an ephemeral port and return its base URL
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, api::create_router(AppState::new()))
            .await
            .expect("Server error");
    });

    format!("http://{}", addr)
}

async fn create_book(client: &Client, base: &str, payload: Value) -> String {
    let response = client
        .post(format!("{}/books", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["bookId"]
        .as_str()
        .expect("No bookId in response")
        .to_string()
}

async fn get_json(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client.get(url).send().await.expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_server().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/health", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_book_count() {
    let base = spawn_server().await;
    let client = Client::new();
    create_book(&client, &base, json!({ "name": "A" })).await;

    let (status, body) = get_json(&client, format!("{}/ready", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn test_create_finished_book() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&json!({ "name": "A", "pageCount": 100, "readPage": 100 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book added successfully");
    let id = body["data"]["bookId"].as_str().expect("No bookId");
    assert_eq!(id.len(), 16);

    let (status, body) = get_json(&client, format!("{}/books/{}", base, id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id);
    assert_eq!(book["name"], "A");
    assert_eq!(book["finished"], true);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_create_without_name_fails() {
    let base = spawn_server().await;
    let client = Client::new();

    for payload in [
        json!({ "pageCount": 10, "readPage": 5 }),
        json!({ "name": "", "pageCount": 10, "readPage": 5 }),
        // name is checked before the page rule
        json!({ "pageCount": 10, "readPage": 50 }),
    ] {
        let response = client
            .post(format!("{}/books", base))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "fail");
        assert_eq!(
            body["message"],
            "Failed to add book. Please provide the book name"
        );
    }
}

#[tokio::test]
async fn test_create_read_page_over_page_count_fails() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&json!({ "name": "B", "pageCount": 10, "readPage": 20 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to add book. readPage cannot be greater than pageCount"
    );

    let (_, body) = get_json(&client, format!("{}/books", base)).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_uses_fail_envelope() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_mistyped_fields_use_fail_envelope() {
    let base = spawn_server().await;
    let client = Client::new();

    for payload in [
        json!({ "name": "A", "pageCount": "ten" }),
        json!({ "name": 5 }),
        json!({ "name": "A", "reading": "yes" }),
    ] {
        let response = client
            .post(format!("{}/books", base))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "fail");
        assert!(body["message"].is_string());
    }

    let (_, body) = get_json(&client, format!("{}/books", base)).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_rejected_update_body_leaves_book_unchanged() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(
        &client,
        &base,
        json!({ "name": "A", "pageCount": 100, "readPage": 50 }),
    )
    .await;

    let (_, before) = get_json(&client, format!("{}/books/{}", base, id)).await;

    let malformed = client
        .put(format!("{}/books/{}", base, id))
        .header("content-type", "application/json")
        .body("{ \"name\": ")
        .send()
        .await
        .expect("Failed to send request");
    let mistyped = client
        .put(format!("{}/books/{}", base, id))
        .json(&json!({ "name": "B", "pageCount": "ten", "readPage": 1 }))
        .send()
        .await
        .expect("Failed to send request");

    for response in [malformed, mistyped] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "fail");
    }

    let (status, after) = get_json(&client, format!("{}/books/{}", base, id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["data"]["book"], before["data"]["book"]);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let base = spawn_server().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/api-docs/openapi.json", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Bookshelf API");
    assert!(body["paths"]["/books"]["post"].is_object());
    assert!(body["paths"]["/books/{id}"]["put"].is_object());
    assert!(body["paths"]["/health"].is_object());
}

#[tokio::test]
async fn test_list_returns_summaries_in_order() {
    let base = spawn_server().await;
    let client = Client::new();

    let first = create_book(
        &client,
        &base,
        json!({ "name": "First", "publisher": "Ace", "author": "X" }),
    )
    .await;
    let second = create_book(&client, &base, json!({ "name": "Second" })).await;

    let (status, body) = get_json(&client, format!("{}/books", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["data"]["books"],
        json!([
            { "id": first, "name": "First", "publisher": "Ace" },
            { "id": second, "name": "Second" },
        ])
    );
}

#[tokio::test]
async fn test_get_unknown_book() {
    let base = spawn_server().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{}/books/doesnotexist", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_update_book() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(
        &client,
        &base,
        json!({ "name": "A", "pageCount": 100, "readPage": 50, "publisher": "Ace" }),
    )
    .await;

    let (_, before) = get_json(&client, format!("{}/books/{}", base, id)).await;
    let before = before["data"]["book"].clone();

    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&json!({ "name": "A2", "pageCount": 100, "readPage": 10, "reading": true }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book updated successfully");

    let (_, after) = get_json(&client, format!("{}/books/{}", base, id)).await;
    let after = &after["data"]["book"];
    assert_eq!(after["id"], id);
    assert_eq!(after["name"], "A2");
    assert_eq!(after["readPage"], 10);
    assert_eq!(after["reading"], true);
    assert_eq!(after["finished"], false);
    assert!(after.get("publisher").is_none());
    assert_eq!(after["insertedAt"], before["insertedAt"]);

    let parse = |v: &Value| {
        chrono::DateTime::parse_from_rfc3339(v.as_str().expect("timestamp"))
            .expect("Invalid timestamp")
    };
    assert!(parse(&after["updatedAt"]) > parse(&before["updatedAt"]));
}

#[tokio::test]
async fn test_update_failures() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, json!({ "name": "A" })).await;

    let cases = [
        (
            format!("{}/books/{}", base, id),
            json!({ "pageCount": 1, "readPage": 1 }),
            StatusCode::BAD_REQUEST,
            "Failed to update book. Please provide the book name",
        ),
        (
            format!("{}/books/{}", base, id),
            json!({ "name": "A", "pageCount": 1, "readPage": 2 }),
            StatusCode::BAD_REQUEST,
            "Failed to update book. readPage cannot be greater than pageCount",
        ),
        (
            format!("{}/books/missing", base),
            json!({ "name": "A" }),
            StatusCode::NOT_FOUND,
            "Failed to update book. Id not found",
        ),
    ];

    for (url, payload, expected_status, expected_message) in cases {
        let response = client
            .put(url)
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), expected_status);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], expected_message);
    }

    let (_, body) = get_json(&client, format!("{}/books/{}", base, id)).await;
    assert_eq!(body["data"]["book"]["name"], "A");
}

#[tokio::test]
async fn test_delete_twice() {
    let base = spawn_server().await;
    let client = Client::new();
    let id = create_book(&client, &base, json!({ "name": "A" })).await;

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book deleted successfully");

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to delete book. Id not found");

    let (status, _) = get_json(&client, format!("{}/books/{}", base, id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
