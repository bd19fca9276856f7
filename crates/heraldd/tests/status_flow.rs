//! End-to-end command handling with every upstream on one mock server

use herald_common::config::StatusPageConfig;
use herald_common::host::NOT_UNDERSTOOD;
use herald_common::{HeraldConfig, HostError, Severity, Visibility};
use heraldd::app::build_host;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status_page(class: &str, summary: &str) -> String {
    format!(
        r#"<html><body><div class="page-status {}"><span class="status">{}</span></div></body></html>"#,
        class, summary
    )
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// github ok, alpha good, beta down hard, board with one resolved issue
async fn upstreams() -> (MockServer, HeraldConfig) {
    let server = MockServer::start().await;

    mount(
        &server,
        "/github.json",
        ResponseTemplate::new(200).set_body_json(json!({"status": "good", "body": "Everything operating normally."})),
    )
    .await;
    mount(
        &server,
        "/alpha",
        ResponseTemplate::new(200).set_body_string(status_page("status-none", "All Systems Operational")),
    )
    .await;
    mount(&server, "/beta", ResponseTemplate::new(502)).await;
    mount(
        &server,
        "/board",
        ResponseTemplate::new(200).set_body_string(
            r#"<div id="current_events_block"><table>
<tr><td></td><td>Amazon S3</td><td>[RESOLVED] Elevated errors</td></tr>
</table></div>"#,
        ),
    )
    .await;
    mount(
        &server,
        "/example.com.json",
        ResponseTemplate::new(200).set_body_json(json!({"status_code": 1})),
    )
    .await;

    let mut config = HeraldConfig::default();
    config.status.github_url = format!("{}/github.json", server.uri());
    config.status.board_url = format!("{}/board", server.uri());
    config.status.domain_oracle = server.uri();
    config.status.pages = vec![
        StatusPageConfig {
            name: "alpha".into(),
            title: "Alpha".into(),
            url: format!("{}/alpha", server.uri()),
        },
        StatusPageConfig {
            name: "beta".into(),
            title: "Beta".into(),
            url: format!("{}/beta", server.uri()),
        },
    ];

    (server, config)
}

#[tokio::test]
async fn test_status_all_services() {
    let (_server, config) = upstreams().await;
    let host = build_host(&config).unwrap();

    let envelope = host.dispatch("status").await.unwrap();
    assert_eq!(envelope.headline, "Status results:");
    assert_eq!(envelope.visibility, Visibility::Public);
    assert_eq!(envelope.records.len(), 3);

    let beta = envelope.records.iter().find(|r| r.title == "Beta").unwrap();
    assert_eq!(beta.severity, Severity::Unset);
    assert!(beta.body.starts_with("Status unavailable"));

    let alpha = envelope.records.iter().find(|r| r.title == "Alpha").unwrap();
    assert_eq!(alpha.severity, Severity::Good);
}

#[tokio::test]
async fn test_status_single_service() {
    let (_server, config) = upstreams().await;
    let host = build_host(&config).unwrap();

    let envelope = host.dispatch("status github").await.unwrap();
    assert_eq!(envelope.records.len(), 1);
    assert_eq!(envelope.records[0].title, "GitHub");
    assert_eq!(envelope.records[0].severity, Severity::Good);

    let err = host.dispatch("status beta").await.unwrap_err();
    match err {
        HostError::Plugin { plugin, source } => {
            assert_eq!(plugin, "status");
            assert!(source.is_upstream());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_status_board() {
    let (_server, config) = upstreams().await;
    let host = build_host(&config).unwrap();

    let envelope = host.dispatch("status aws").await.unwrap();
    assert_eq!(envelope.records.len(), 2);
    assert_eq!(envelope.records[0].severity, Severity::Warning);
    assert_eq!(envelope.records[0].body, "Nr of resolved issues: 1");
}

#[tokio::test]
async fn test_status_domain() {
    let (_server, config) = upstreams().await;
    let host = build_host(&config).unwrap();

    let envelope = host.dispatch("status example.com").await.unwrap();
    assert_eq!(envelope.headline, "The website is:");
    assert_eq!(envelope.records[0].title, "example.com");
    assert_eq!(envelope.records[0].severity, Severity::Good);
}

#[tokio::test]
async fn test_domain_with_query_string() {
    let (_server, config) = upstreams().await;
    let host = build_host(&config).unwrap();

    let envelope = host.dispatch("status example.com?ref=chat#top").await.unwrap();
    assert_eq!(envelope.records[0].title, "example.com");
    assert_eq!(envelope.records[0].severity, Severity::Good);
}

#[tokio::test]
async fn test_unknown_command() {
    let (_server, config) = upstreams().await;
    let host = build_host(&config).unwrap();

    assert!(matches!(
        host.dispatch("weather").await.unwrap_err(),
        HostError::NotUnderstood
    ));
    assert_eq!(host.respond("weather").await.headline, NOT_UNDERSTOOD);
}
