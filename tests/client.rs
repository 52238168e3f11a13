//! HTTP-level client tests against a stubbed Mail.tm service.

use httpmock::prelude::*;
use mailtm_client::{Client, Error};
use serde_json::json;

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.base_url())
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn lists_only_active_domains_in_original_order() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains");
            then.status(200).json_body(json!({
                "hydra:member": [
                    {"domain": "alpha.example", "isActive": true},
                    {"domain": "beta.example", "isActive": false},
                    {"domain": "gamma.example", "isActive": true},
                ]
            }));
        })
        .await;

    let domains = client_for(&server).list_domains().await.unwrap();
    assert_eq!(domains, vec!["alpha.example", "gamma.example"]);
}

#[tokio::test]
async fn empty_domain_collection_yields_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/domains");
            then.status(200).json_body(json!({"hydra:member": []}));
        })
        .await;

    assert!(client_for(&server).list_domains().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_account_returns_the_assigned_account() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/accounts")
                .json_body(json!({"address": "alias@example.com", "password": "s3cret!Pw"}));
            then.status(201).json_body(json!({
                "id": "abc123",
                "address": "alias@example.com",
                "createdAt": "2026-08-05T10:00:00+00:00"
            }));
        })
        .await;

    let account = client_for(&server)
        .create_account("alias@example.com", "s3cret!Pw")
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(account.id, "abc123");
    assert_eq!(account.address, "alias@example.com");
}

#[tokio::test]
async fn taken_address_maps_to_address_taken() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/accounts");
            then.status(422)
                .json_body(json!({"hydra:description": "This value is already used."}));
        })
        .await;

    let err = client_for(&server)
        .create_account("alias@example.com", "s3cret!Pw")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AddressTaken));
}

#[tokio::test]
async fn unexpected_creation_status_carries_code_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/accounts");
            then.status(400).body("malformed address");
        })
        .await;

    let err = client_for(&server)
        .create_account("not-an-address", "s3cret!Pw")
        .await
        .unwrap_err();
    match err {
        Error::Status { code, body } => {
            assert_eq!(code, 400);
            assert!(body.contains("malformed address"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_token_returns_the_bearer_token() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/token")
                .json_body(json!({"address": "alias@example.com", "password": "s3cret!Pw"}));
            then.status(200).json_body(json!({"token": "tok123"}));
        })
        .await;

    let token = client_for(&server)
        .get_token("alias@example.com", "s3cret!Pw")
        .await
        .unwrap();
    assert_eq!(token, "tok123");
}

#[tokio::test]
async fn bad_credentials_fail_token_retrieval() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(401).json_body(json!({"message": "Invalid credentials."}));
        })
        .await;

    let err = client_for(&server)
        .get_token("alias@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Status { code: 401, .. }));
}

#[tokio::test]
async fn list_messages_sends_bearer_auth_and_parses_summaries() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/messages")
                .header("authorization", "Bearer tok123");
            then.status(200).json_body(json!({
                "hydra:member": [
                    {
                        "id": "m2",
                        "from": {"address": "sender@example.com", "name": "Sender"},
                        "subject": "hello",
                        "intro": "preview text",
                        "seen": false,
                        "createdAt": "2026-08-05T10:01:00+00:00"
                    },
                    {"id": "m1", "subject": "older", "seen": true},
                ]
            }));
        })
        .await;

    let messages = client_for(&server).list_messages("tok123").await.unwrap();
    mock.assert_async().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, "m2");
    assert_eq!(messages[0].subject, "hello");
    assert_eq!(messages[0].intro, "preview text");
    assert!(!messages[0].seen);
    assert_eq!(
        messages[0].from.as_ref().map(|f| f.address.as_str()),
        Some("sender@example.com")
    );
    assert_eq!(messages[1].id, "m1");
    assert!(messages[1].seen);
}

#[tokio::test]
async fn get_message_parses_the_full_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/messages/m1")
                .header("authorization", "Bearer tok123");
            then.status(200).json_body(json!({
                "id": "m1",
                "from": {"address": "sender@example.com", "name": "Sender"},
                "to": [{"address": "alias@example.com", "name": ""}],
                "subject": "hello",
                "text": "plain body",
                "html": ["<p>hello</p>"],
                "attachments": [
                    {"filename": "doc.pdf", "contentType": "application/pdf", "size": 1234}
                ]
            }));
        })
        .await;

    let detail = client_for(&server).get_message("tok123", "m1").await.unwrap();
    assert_eq!(detail.subject, "hello");
    assert_eq!(detail.text.as_deref(), Some("plain body"));
    assert_eq!(detail.html, vec!["<p>hello</p>"]);
    assert_eq!(detail.to[0].address, "alias@example.com");
    assert_eq!(detail.attachments.len(), 1);
    assert_eq!(detail.attachments[0].filename, "doc.pdf");
    assert_eq!(detail.attachments[0].content_type, "application/pdf");
    assert_eq!(detail.attachments[0].size, 1234);
}

#[tokio::test]
async fn message_deletion_succeeds_only_on_204() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/messages/kept")
                .header("authorization", "Bearer tok123");
            then.status(204);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/messages/gone");
            then.status(404);
        })
        .await;

    let client = client_for(&server);
    assert!(client.delete_message("tok123", "kept").await.unwrap());
    assert!(!client.delete_message("tok123", "gone").await.unwrap());
}

#[tokio::test]
async fn account_deletion_succeeds_only_on_204() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/accounts/abc123")
                .header("authorization", "Bearer tok123");
            then.status(204);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/accounts/locked");
            then.status(500);
        })
        .await;

    let client = client_for(&server);
    assert!(client.delete_account("tok123", "abc123").await.unwrap());
    assert!(!client.delete_account("tok123", "locked").await.unwrap());
}
