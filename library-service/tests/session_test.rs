mod common;

use common::{TestApp, TEST_SESSION_KEY};
use library_service::dtos::SessionResponse;
use reqwest::StatusCode;

#[tokio::test]
async fn gate_admits_codes_of_four_or_more_characters() {
    let app = TestApp::spawn().await;

    for code in ["abcd", "1234", "a-much-longer-code"] {
        let response = app.open_session(code).await;
        assert_eq!(StatusCode::CREATED, response.status(), "code: {}", code);

        let body: SessionResponse = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body.session_key, code);
        assert_eq!(body.document_count, 0);
    }
}

#[tokio::test]
async fn gate_rejects_short_codes_with_validation_message() {
    let app = TestApp::spawn().await;

    let response = app.open_session("abc").await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Validation error");
}

#[tokio::test]
async fn gate_rejects_blank_codes() {
    let app = TestApp::spawn().await;

    for code in ["", "   "] {
        let response = app.open_session(code).await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status(), "code: {:?}", code);
    }
}

#[tokio::test]
async fn reopening_the_same_code_reports_existing_documents() {
    let app = TestApp::spawn_with_session().await;

    app.upload_document(
        TEST_SESSION_KEY,
        "notes.txt",
        "text/plain",
        b"hello".to_vec(),
        "Notes",
        "General",
        "",
    )
    .await;

    let response = app.open_session(TEST_SESSION_KEY).await;
    assert_eq!(StatusCode::CREATED, response.status());
    let body: SessionResponse = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.document_count, 1);
}

#[tokio::test]
async fn closing_a_session_drops_its_collection() {
    let app = TestApp::spawn_with_session().await;

    app.upload_document(
        TEST_SESSION_KEY,
        "notes.txt",
        "text/plain",
        b"hello".to_vec(),
        "Notes",
        "General",
        "",
    )
    .await;

    let response = app
        .client
        .delete(format!("{}/sessions/{}", app.address, TEST_SESSION_KEY))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NO_CONTENT, response.status());

    // The session is gone until the code is presented again
    let response = app.list_documents(TEST_SESSION_KEY, "").await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    // Reopening the same code starts from an empty library
    let response = app.open_session(TEST_SESSION_KEY).await;
    let body: SessionResponse = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.document_count, 0);
}

#[tokio::test]
async fn document_routes_require_a_session_header() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/documents", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
}

#[tokio::test]
async fn document_routes_reject_unknown_session_keys() {
    let app = TestApp::spawn().await;

    let response = app.list_documents("never-opened", "").await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
}
