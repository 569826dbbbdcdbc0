//! Envelope unwrapping, failure notices and session expiry in the transport.

mod common;

use admin_console::api::alerts::ListAlertsParams;
use admin_console::api::hosts::{HostStatus, ListHostsParams};
use admin_console::error::{ApiError, ErrorKind};
use admin_console::services::notifier::{
    FORBIDDEN_MESSAGE, INVALID_CREDENTIALS_MESSAGE, NETWORK_ERROR_MESSAGE, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE,
    SESSION_EXPIRED_MESSAGE,
};
use admin_console::services::{DurableStorage, MemoryStorage, NoticeLevel};
use admin_console::stores::session::{TOKEN_KEY, USER_KEY};
use common::*;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn success_resolves_with_data_only() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/hosts/status-distribution")))
        .and(header("authorization", "Bearer t1"))
        .and(header_exists("x-request-id"))
        .respond_with(ok(json!({
            "running": 3,
            "abnormal": 1,
            "offline": 2,
            "not_installed": 0,
            "uninstalled": 0
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let distribution = ctx.console.hosts().status_distribution().await.unwrap();

    assert_eq!(distribution.running, 3);
    assert_eq!(distribution.offline, 2);
    assert!(ctx.notices.is_empty());
}

#[tokio::test]
async fn unauthenticated_requests_carry_no_bearer_token() {
    let ctx = spawn_console().await;
    Mock::given(method("GET"))
        .and(path(api_path("/system-config/site")))
        .respond_with(ok(json!({"site_name": "Acme", "site_logo": "", "site_domain": ""})))
        .mount(&ctx.server)
        .await;

    ctx.console.system_config().site_config().await.unwrap();

    let requests = ctx.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0]
        .headers
        .iter()
        .any(|(name, _)| name.as_str().eq_ignore_ascii_case("authorization")));
}

#[tokio::test]
async fn query_parameters_skip_unset_filters() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/hosts")))
        .and(query_param("page", "2"))
        .and(query_param("status", "online"))
        .respond_with(ok(json!({
            "total": 1,
            "items": [{"host_id": "h1", "hostname": "web-01", "status": "online"}]
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let params = ListHostsParams {
        page: Some(2),
        status: Some(HostStatus::Online),
        ..Default::default()
    };
    let page = ctx.console.hosts().list(&params).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].hostname, "web-01");

    let requests = ctx.server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("search"));
    assert!(!query.contains("business_line"));
}

#[tokio::test]
async fn unit_calls_accept_null_data() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("POST"))
        .and(path(api_path("/alerts/9/resolve")))
        .and(body_json(json!({"reason": "patched"})))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api_path("/users/4")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.console.alerts().resolve(9, Some("patched")).await.unwrap();
    ctx.console.users().delete(4).await.unwrap();
    assert!(ctx.notices.is_empty());
}

#[tokio::test]
async fn business_error_raises_exactly_one_notice() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("DELETE"))
        .and(path(api_path("/hosts/h1")))
        .respond_with(envelope(403, "no permission", json!(null)))
        .mount(&ctx.server)
        .await;

    let err = ctx.console.hosts().delete("h1").await.unwrap_err();

    match &err {
        ApiError::Business { code, message } => {
            assert_eq!(*code, 403);
            assert_eq!(message, "no permission");
        }
        other => panic!("expected business error, got {:?}", other),
    }
    let notices = ctx.notices.snapshot();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "no permission");

    // A business rejection is not an authentication failure.
    assert!(ctx.console.auth().is_authenticated());
    assert!(ctx.navigator.visits().is_empty());
}

#[tokio::test]
async fn business_error_without_message_uses_default() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/alerts")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 1001, "message": "", "data": null})),
        )
        .mount(&ctx.server)
        .await;

    let err = ctx
        .console
        .alerts()
        .list(&ListAlertsParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Business);
    assert_eq!(err.message(), "Request failed");
    assert_eq!(ctx.notices.snapshot()[0].message, "Request failed");
}

#[tokio::test]
async fn envelope_401_expires_session_without_business_notice() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/dashboard/stats")))
        .respond_with(envelope(401, "token expired", json!(null)))
        .mount(&ctx.server)
        .await;

    let err = ctx.console.dashboard().stats().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthExpired);
    assert_eq!(err.message(), "token expired");
    assert!(!ctx.console.auth().is_authenticated());
    assert!(ctx.storage.get_item(TOKEN_KEY).is_none());
    assert!(ctx.storage.get_item(USER_KEY).is_none());
    assert_eq!(ctx.navigator.visits(), vec!["/login".to_string()]);

    let notices = ctx.notices.snapshot();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(notices[0].message, SESSION_EXPIRED_MESSAGE);
}

#[tokio::test]
async fn concurrent_401s_redirect_exactly_once() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/alerts/statistics")))
        .respond_with(ResponseTemplate::new(401))
        .expect(5)
        .mount(&ctx.server)
        .await;

    let alerts = ctx.console.alerts();
    let results =
        futures::future::join_all((0..5).map(|_| {
            let alerts = alerts.clone();
            async move { alerts.statistics().await }
        }))
        .await;

    assert!(results
        .iter()
        .all(|r| matches!(r, Err(ApiError::SessionExpired { .. }))));
    assert!(ctx.storage.is_empty());
    assert_eq!(ctx.navigator.count("/login"), 1);
    assert_eq!(ctx.notices_of(NoticeLevel::Warning).len(), 1);
    assert!(ctx.notices_of(NoticeLevel::Error).is_empty());
}

#[tokio::test]
async fn tokenless_401_reports_rejected_credentials() {
    let ctx = spawn_console().await;
    Mock::given(method("GET"))
        .and(path(api_path("/auth/me")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&ctx.server)
        .await;

    let err = ctx.console.client().get::<serde_json::Value>("/auth/me").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(ctx.navigator.visits().is_empty());
    let notices = ctx.notices_of(NoticeLevel::Error);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, INVALID_CREDENTIALS_MESSAGE);
    assert!(ctx.notices_of(NoticeLevel::Warning).is_empty());
}

#[tokio::test]
async fn http_status_failures_map_to_notices() {
    let ctx = spawn_signed_in("t1").await;
    let cases: [(u16, &str, ErrorKind, String); 5] = [
        (500, "/policies/p1", ErrorKind::Server, SERVER_ERROR_MESSAGE.to_string()),
        (503, "/policies/p2", ErrorKind::Server, SERVER_ERROR_MESSAGE.to_string()),
        (404, "/policies/p3", ErrorKind::NotFound, NOT_FOUND_MESSAGE.to_string()),
        (403, "/policies/p4", ErrorKind::Forbidden, FORBIDDEN_MESSAGE.to_string()),
        (400, "/policies/p5", ErrorKind::Http, "Request failed (400)".to_string()),
    ];
    for (status, route, _, _) in &cases {
        Mock::given(method("GET"))
            .and(path(api_path(route)))
            .respond_with(ResponseTemplate::new(*status))
            .mount(&ctx.server)
            .await;
    }

    for (status, route, kind, notice) in cases {
        let policy_id = route.trim_start_matches("/policies/");
        let err = ctx.console.policies().get(policy_id).await.unwrap_err();
        assert_eq!(err.kind(), kind, "status {}", status);

        let notices = ctx.notices.drain();
        assert_eq!(notices.len(), 1, "status {}", status);
        assert_eq!(notices[0].message, notice, "status {}", status);
    }
    assert!(ctx.console.auth().is_authenticated());
}

#[tokio::test]
async fn client_error_prefers_server_message() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("POST"))
        .and(path(api_path("/tasks/t-1/run")))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"code": 422, "message": "task is already running"})),
        )
        .mount(&ctx.server)
        .await;

    let err = ctx.console.tasks().run("t-1").await.unwrap_err();

    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "task is already running");
        }
        other => panic!("expected http error, got {:?}", other),
    }
    assert_eq!(ctx.notices.snapshot()[0].message, "task is already running");
}

#[tokio::test]
async fn malformed_envelope_is_a_decode_error() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/dashboard/stats")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&ctx.server)
        .await;

    let err = ctx.console.dashboard().stats().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(ctx.notices.len(), 1);
    assert!(ctx.console.auth().is_authenticated());
}

#[tokio::test]
async fn network_failure_raises_network_notice() {
    let (console, notices) = unreachable_console(Arc::new(MemoryStorage::new()));

    let err = console.dashboard().stats().await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(err.kind(), ErrorKind::Network);
    let notices = notices.snapshot();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, NETWORK_ERROR_MESSAGE);
}
