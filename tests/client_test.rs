//
//  rollbar-provider
//  tests/client_test.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

mod common;

use std::io;
use std::sync::{Arc, Mutex};

use common::{envelope, ACCOUNT_TOKEN, AUTH_HEADER, PROJECT_TOKEN};
use mockito::{Matcher, Server};
use rollbar_provider::api::access_tokens::UpdateAccessTokenRequest;
use rollbar_provider::api::{ApiError, RollbarClient};
use rollbar_provider::auth::TokenScope;
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;

#[tokio::test]
async fn account_endpoints_send_the_account_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/teams")
        .match_header(AUTH_HEADER, ACCOUNT_TOKEN)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    let client = common::client(&server);
    client.teams().list().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn notification_endpoints_send_the_project_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/notifications/pagerduty")
        .match_header(AUTH_HEADER, PROJECT_TOKEN)
        .match_body(Matcher::Json(json!({
            "enabled": true,
            "service_key": "a".repeat(32)
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = common::client(&server);
    let request = rollbar_provider::api::notifications::PagerDutyIntegrationRequest {
        enabled: Some(true),
        service_key: "a".repeat(32),
    };
    client
        .notifications()
        .configure_pagerduty_integration(&request)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn concurrent_calls_of_both_scopes_keep_their_tokens() {
    let mut server = Server::new_async().await;
    let projects = server
        .mock("GET", "/projects")
        .match_header(AUTH_HEADER, ACCOUNT_TOKEN)
        .with_status(200)
        .with_body(envelope(json!([])))
        .expect(5)
        .create_async()
        .await;
    let rules = server
        .mock("PUT", "/notifications/pagerduty/rules")
        .match_header(AUTH_HEADER, PROJECT_TOKEN)
        .with_status(200)
        .with_body("{}")
        .expect(5)
        .create_async()
        .await;

    let client = common::client(&server);
    let mut handles = Vec::new();
    for _ in 0..5 {
        let c = client.clone();
        handles.push(tokio::spawn(async move {
            c.projects().list().await.map(|_| ())
        }));
        let c = client.clone();
        handles.push(tokio::spawn(async move {
            c.notifications().delete_all_pagerduty_rules().await.map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    projects.assert_async().await;
    rules.assert_async().await;
}

#[tokio::test]
async fn missing_project_token_fails_without_a_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/notifications/pagerduty/rules")
        .expect(0)
        .create_async()
        .await;

    let client = common::account_only_client(&server);
    let err = client
        .notifications()
        .delete_all_pagerduty_rules()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::MissingToken(TokenScope::Project)));
    mock.assert_async().await;
}

#[tokio::test]
async fn default_and_custom_headers_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users")
        .match_header("x-team", "platform")
        .match_header("user-agent", "terraform-test/0.1")
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_body(envelope(json!([])))
        .create_async()
        .await;

    let client = RollbarClient::builder()
        .base_url(server.url())
        .account_token(ACCOUNT_TOKEN)
        .header("X-Team", "platform")
        .user_agent("terraform-test/0.1")
        .build()
        .unwrap();
    client.users().list().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn status_errors_keep_the_response() {
    let mut server = Server::new_async().await;
    let body = r#"{"err": 1, "message": "Project not found"}"#;
    server
        .mock("GET", "/project/404")
        .with_status(404)
        .with_body(body)
        .create_async()
        .await;

    let client = common::client(&server);
    let err = client.projects().get(404).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(err.is_not_found());
    let response = err.response().unwrap();
    assert_eq!(response.method, "GET");
    assert_eq!(response.body, body);
    assert_eq!(
        err.to_string(),
        format!("GET {}/project/404: 404 {}", server.url(), body)
    );
}

#[tokio::test]
async fn accepted_non_200_statuses_succeed() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/project/8")
        .with_status(204)
        .create_async()
        .await;

    let client = common::client(&server);
    let response = client.projects().delete(8).await.unwrap();
    assert_eq!(response.status_code, 204);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/team/3")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = common::client(&server);
    let err = client.teams().get(3).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = RollbarClient::builder()
        .base_url("http://127.0.0.1:1")
        .account_token(ACCOUNT_TOKEN)
        .build()
        .unwrap();

    let err = client.projects().list().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn error_messages_carry_the_decoded_url() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/project/1/access_token/a%20b")
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let client = common::client(&server);
    let request = rollbar_provider::api::access_tokens::UpdateAccessTokenRequest {
        rate_limit_window_size: Some(60),
        rate_limit_window_count: Some(10),
    };
    let err = client
        .access_tokens()
        .update(1, "a b", &request)
        .await
        .unwrap_err();

    assert_eq!(err.response().unwrap().url, format!("{}/project/1/access_token/a b", server.url()));
}

#[tokio::test]
async fn empty_no_content_body_decodes_as_empty_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/team/1/project/2")
        .with_status(204)
        .create_async()
        .await;

    let client = common::client(&server);
    let (assoc, response) = client.teams().assign_project(1, 2).await.unwrap();

    assert_eq!(response.status_code, 204);
    assert!(assoc.result.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn not_modified_get_decodes_as_empty_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/project/1")
        .with_status(304)
        .create_async()
        .await;

    let client = common::client(&server);
    let (project, response) = client.projects().get(1).await.unwrap();

    assert_eq!(response.status_code, 304);
    assert!(project.result.is_none());
    mock.assert_async().await;
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn debug_log_masks_access_token_in_url() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/project/5/access_token/SECRETTOKENVALUE")
        .with_status(200)
        .with_body(envelope(json!({"name": "deploy"})))
        .create_async()
        .await;

    let client = common::client(&server);
    client
        .access_tokens()
        .update(5, "SECRETTOKENVALUE", &UpdateAccessTokenRequest::invalidating())
        .await
        .unwrap();
    mock.assert_async().await;

    let output = logs.contents();
    assert!(output.contains("PATCH"), "{}", output);
    assert!(output.contains("/project/5/access_token/****"), "{}", output);
    assert!(!output.contains("SECRETTOKENVALUE"), "{}", output);
    assert!(!output.contains(ACCOUNT_TOKEN), "{}", output);
}
