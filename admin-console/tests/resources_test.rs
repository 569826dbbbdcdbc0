//! Inventory, component, business-line, policy-group, rule and fix APIs.

mod common;

use admin_console::api::assets::{AssetStatistics, ListAssetsParams};
use admin_console::api::business_lines::{CreateBusinessLineRequest, ListBusinessLinesParams};
use admin_console::api::components::{PushAgentUpdateRequest, ReleaseVersionRequest};
use admin_console::api::fix::{CreateFixTaskRequest, FixTaskStatus, FixableItemsParams};
use admin_console::api::policy_groups::PolicyGroupQuery;
use admin_console::api::rules::UpdateRuleRequest;
use admin_console::api::Severity;
use admin_console::services::NoticeLevel;
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn asset_listing_sends_host_and_filter() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/assets/ports")))
        .and(query_param("host_id", "h1"))
        .and(query_param("protocol", "tcp"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ok(json!({
            "total": 1,
            "items": [{
                "id": "p1",
                "host_id": "h1",
                "protocol": "tcp",
                "port": 22,
                "state": "LISTEN",
                "process_name": "sshd",
                "collected_at": "2024-01-15 10:30:00"
            }]
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let params = ListAssetsParams {
        protocol: Some("tcp".to_string()),
        ..ListAssetsParams::for_host("h1")
    };
    let ports = ctx.console.assets().ports(&params).await.unwrap();

    assert_eq!(ports.total, 1);
    assert_eq!(ports.items[0].port, 22);
    assert_eq!(ports.items[0].process_name.as_deref(), Some("sshd"));
}

#[tokio::test]
async fn asset_statistics_count_failed_listings_as_zero() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/assets/ports")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1/assets/[a-z-]+$"))
        .and(query_param("host_id", "h1"))
        .and(query_param("page_size", "1"))
        .respond_with(ok(json!({"total": 4, "items": []})))
        .mount(&ctx.server)
        .await;

    let stats = ctx.console.assets().statistics("h1").await;

    assert_eq!(
        stats,
        AssetStatistics {
            processes: 4,
            ports: 0,
            users: 4,
            containers: 4,
            packages: 4,
            services: 4,
            cron: 4,
        }
    );
    assert_eq!(ctx.notices_of(NoticeLevel::Error).len(), 1);
}

#[tokio::test]
async fn component_release_posts_version() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("POST"))
        .and(path(api_path("/components/3/versions")))
        .and(body_json(json!({"version": "1.8.5", "set_latest": true})))
        .respond_with(ok(json!({
            "id": 11,
            "component_id": 3,
            "version": "1.8.5",
            "changelog": "",
            "is_latest": true,
            "created_by": "alice",
            "created_at": "2024-01-15 10:30:00"
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path("/components/3/versions/11/set-latest")))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/components/agent/push-update")))
        .and(body_json(json!({"force": true})))
        .respond_with(ok(json!({"record_id": 5})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let components = ctx.console.components();
    let version = components
        .release_version(
            3,
            &ReleaseVersionRequest {
                version: "1.8.5".to_string(),
                set_latest: Some(true),
                ..ReleaseVersionRequest::default()
            },
        )
        .await
        .unwrap();
    components.set_latest_version(3, version.id).await.unwrap();
    let pushed = components
        .push_agent_update(&PushAgentUpdateRequest {
            force: Some(true),
            ..PushAgentUpdateRequest::default()
        })
        .await
        .unwrap();

    assert!(version.is_latest);
    assert!(version.packages.is_empty());
    assert_eq!(pushed["record_id"], 5);
}

#[tokio::test]
async fn business_lines_list_and_create() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/business-lines")))
        .and(query_param("enabled", "true"))
        .and(query_param("keyword", "pay"))
        .respond_with(ok(json!({
            "total": 1,
            "items": [{
                "id": 1,
                "name": "Payments",
                "code": "pay",
                "enabled": true,
                "host_count": 12,
                "created_at": "2024-01-01 00:00:00",
                "updated_at": "2024-01-02 00:00:00"
            }]
        })))
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/business-lines")))
        .and(body_json(json!({"name": "Search", "code": "search"})))
        .respond_with(envelope(409, "code already exists", json!(null)))
        .mount(&ctx.server)
        .await;

    let api = ctx.console.business_lines();
    let lines = api
        .list(&ListBusinessLinesParams {
            enabled: Some(true),
            keyword: Some("pay".to_string()),
            ..ListBusinessLinesParams::default()
        })
        .await
        .unwrap();
    let err = api
        .create(&CreateBusinessLineRequest {
            name: "Search".to_string(),
            code: "search".to_string(),
            ..CreateBusinessLineRequest::default()
        })
        .await
        .unwrap_err();

    assert_eq!(lines.items[0].code, "pay");
    assert_eq!(lines.items[0].host_count, Some(12));
    assert_eq!(err.message(), "code already exists");
    assert_eq!(ctx.notices.len(), 1);
}

#[tokio::test]
async fn policy_groups_list_with_policies() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/policy-groups")))
        .and(query_param("with_policies", "true"))
        .respond_with(ok(json!({
            "total": 1,
            "items": [{
                "id": "system",
                "name": "System Baseline",
                "description": "",
                "sort_order": 1,
                "enabled": true,
                "created_at": "2024-01-01 00:00:00",
                "updated_at": "2024-01-01 00:00:00",
                "policies": [{
                    "id": "ssh",
                    "name": "SSH hardening",
                    "enabled": true,
                    "created_at": "2024-01-01 00:00:00",
                    "updated_at": "2024-01-01 00:00:00"
                }]
            }]
        })))
        .mount(&ctx.server)
        .await;

    let groups = ctx
        .console
        .policy_groups()
        .list(&PolicyGroupQuery {
            with_policies: Some(true),
        })
        .await
        .unwrap();

    assert_eq!(groups.total, 1);
    assert_eq!(groups.items[0].policies[0].id, "ssh");
}

#[tokio::test]
async fn rules_list_unwraps_items_and_update_sends_changes() {
    let ctx = spawn_signed_in("t1").await;
    let rule = json!({
        "rule_id": "ssh-001",
        "policy_id": "ssh",
        "title": "Disable root login",
        "severity": "high",
        "enabled": true,
        "check_config": {"condition": "all", "rules": []}
    });
    Mock::given(method("GET"))
        .and(path(api_path("/policies/ssh/rules")))
        .respond_with(ok(json!({"total": 1, "items": [rule.clone()]})))
        .mount(&ctx.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path("/rules/ssh-001")))
        .and(body_json(json!({"severity": "critical"})))
        .respond_with(ok(rule))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let api = ctx.console.rules();
    let rules = api.list("ssh").await.unwrap();
    api.update(
        "ssh-001",
        &UpdateRuleRequest {
            severity: Some(Severity::Critical),
            ..UpdateRuleRequest::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].severity, Severity::High);
}

#[tokio::test]
async fn fix_flow_filters_and_creates_task() {
    let ctx = spawn_signed_in("t1").await;
    Mock::given(method("GET"))
        .and(path(api_path("/fix/fixable-items")))
        .and(query_param("host_ids[]", "h1"))
        .and(query_param("severities[]", "critical"))
        .respond_with(ok(json!({
            "total": 1,
            "items": [{
                "result_id": "r1",
                "host_id": "h1",
                "hostname": "web-01",
                "rule_id": "ssh-001",
                "title": "Disable root login",
                "severity": "critical",
                "fix_command": "sed -i 's/^PermitRootLogin.*/PermitRootLogin no/' /etc/ssh/sshd_config",
                "has_fix": true
            }]
        })))
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/fix-tasks")))
        .and(body_json(json!({"result_ids": ["r1"]})))
        .respond_with(ok(json!({"task_id": "fx-1"})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("/fix-tasks/fx-1")))
        .respond_with(ok(json!({
            "task_id": "fx-1",
            "host_ids": ["h1"],
            "rule_ids": ["ssh-001"],
            "status": "running",
            "total_count": 1,
            "progress": 50,
            "created_at": "2024-01-15 10:30:00"
        })))
        .mount(&ctx.server)
        .await;

    let api = ctx.console.fix();
    let items = api
        .fixable_items(&FixableItemsParams {
            host_ids: vec!["h1".to_string()],
            severities: vec![Severity::Critical],
            ..FixableItemsParams::default()
        })
        .await
        .unwrap();
    let created = api
        .create_task(&CreateFixTaskRequest {
            result_ids: Some(items.items.iter().map(|i| i.result_id.clone()).collect()),
            ..CreateFixTaskRequest::default()
        })
        .await
        .unwrap();
    let task = api.task(&created.task_id).await.unwrap();

    assert!(items.items[0].has_fix);
    assert_eq!(task.status, FixTaskStatus::Running);
    assert_eq!(task.progress, 50);
}
