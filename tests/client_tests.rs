//! GitHub gist 客户端测试 (wiremock 模拟上游)

use gistapi::domain::error::UpstreamError;
use gistapi::domain::traits::GistSource;
use gistapi::infrastructure::config::UpstreamConfig;
use gistapi::infrastructure::network::{create_client, GitHubGists};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gists_client(server: &MockServer) -> GitHubGists {
    gists_client_with(server, UpstreamConfig::default())
}

fn gists_client_with(server: &MockServer, upstream: UpstreamConfig) -> GitHubGists {
    let client = create_client(&upstream).unwrap();
    GitHubGists::new(client, &server.uri(), upstream.per_page).unwrap()
}

#[tokio::test]
async fn test_list_gists_parses_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/justdionysus/gists"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "10"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "6b2972aa971dd605f524",
                "public": true,
                "files": {
                    "challenge.txt": {
                        "filename": "challenge.txt",
                        "raw_url": "https://gist.githubusercontent.com/justdionysus/6b2972aa971dd605f524/raw/challenge.txt"
                    }
                }
            },
            {"id": "empty", "files": {}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let gists = gists_client(&server)
        .list_gists("justdionysus", 1)
        .await
        .unwrap();

    assert_eq!(gists.len(), 2);
    assert_eq!(gists[0].id, "6b2972aa971dd605f524");
    assert!(gists[0].files.contains_key("challenge.txt"));
    assert!(gists[1].files.is_empty());
}

#[tokio::test]
async fn test_list_gists_requests_given_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/gists"))
        .and(query_param("page", "3"))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let upstream = UpstreamConfig {
        per_page: 25,
        ..UpstreamConfig::default()
    };
    let gists = gists_client_with(&server, upstream)
        .list_gists("alice", 3)
        .await
        .unwrap();
    assert!(gists.is_empty());
}

#[tokio::test]
async fn test_unknown_user_reports_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/no-such-user/gists"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/gists/gists#list-gists-for-a-user"
        })))
        .mount(&server)
        .await;

    let err = gists_client(&server)
        .list_gists("no-such-user", 1)
        .await
        .unwrap_err();

    match &err {
        UpstreamError::Reported { status, message } => {
            assert_eq!(*status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Not Found");
}

#[tokio::test]
async fn test_rate_limit_message_is_verbatim() {
    let server = MockServer::start().await;
    let message = "API rate limit exceeded for 203.0.113.7. (But here's the good news: Authenticated requests get a higher rate limit.)";
    Mock::given(method("GET"))
        .and(path("/users/alice/gists"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": message })))
        .mount(&server)
        .await;

    let err = gists_client(&server)
        .list_gists("alice", 1)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), message);
}

#[tokio::test]
async fn test_error_object_with_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/gists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Bad credentials"})))
        .mount(&server)
        .await;

    let err = gists_client(&server)
        .list_gists("alice", 1)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Bad credentials");
}

#[tokio::test]
async fn test_non_json_failure_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/gists"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = gists_client(&server)
        .list_gists("alice", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status } if status == StatusCode::BAD_GATEWAY));
    assert_eq!(err.user_message(), "Bad Gateway");
}

#[tokio::test]
async fn test_garbage_listing_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/gists"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = gists_client(&server)
        .list_gists("alice", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Decode(_)));
    assert_eq!(err.user_message(), "malformed upstream response");
}

#[tokio::test]
async fn test_username_is_escaped_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/a%2Fb/gists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let gists = gists_client(&server).list_gists("a/b", 1).await.unwrap();
    assert!(gists.is_empty());
}

#[tokio::test]
async fn test_fetch_raw_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/challenge.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("TerbiumLabsChallenge_7\n"))
        .mount(&server)
        .await;

    let text = gists_client(&server)
        .fetch_raw(&format!("{}/raw/challenge.txt", server.uri()))
        .await
        .unwrap();
    assert_eq!(text, "TerbiumLabsChallenge_7\n");
}

#[tokio::test]
async fn test_fetch_raw_non_success_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/gone.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = gists_client(&server)
        .fetch_raw(&format!("{}/raw/gone.txt", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status } if status == StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/slow.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let upstream = UpstreamConfig {
        timeout_secs: 1,
        ..UpstreamConfig::default()
    };
    let err = gists_client_with(&server, upstream)
        .fetch_raw(&format!("{}/raw/slow.txt", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Timeout));
    assert_eq!(err.user_message(), "upstream request timed out");
}

#[test]
fn test_invalid_api_base_is_rejected() {
    let client = create_client(&UpstreamConfig::default()).unwrap();
    assert!(GitHubGists::new(client.clone(), "not a url", 10).is_err());
    assert!(GitHubGists::new(client, "mailto:someone@example.com", 10).is_err());
}
