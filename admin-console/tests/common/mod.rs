//! Shared fixtures for admin-console integration tests.
//!
//! Each test gets its own mock backend and an isolated console wired to it.
#![allow(dead_code)]

use admin_console::config::ApiSettings;
use admin_console::router::ViewLoader;
use admin_console::services::{DurableStorage, MemoryStorage, Navigator, Notice, NoticeLevel, NoticeQueue};
use admin_console::stores::session::{TOKEN_KEY, USER_KEY};
use admin_console::Console;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_PREFIX: &str = "/api/v1";

/// Records every navigation, without deduplication.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.visits().iter().filter(|p| p.as_str() == path).count()
    }

    pub fn current(&self) -> Option<String> {
        self.visits().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

pub struct TestConsole {
    pub server: MockServer,
    pub console: Console,
    pub notices: Arc<NoticeQueue>,
    pub navigator: Arc<RecordingNavigator>,
    pub storage: Arc<MemoryStorage>,
}

impl TestConsole {
    pub fn notices_of(&self, level: NoticeLevel) -> Vec<Notice> {
        self.notices
            .snapshot()
            .into_iter()
            .filter(|n| n.level == level)
            .collect()
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

pub fn api_path(p: &str) -> String {
    format!("{}{}", API_PREFIX, p)
}

pub async fn spawn_console() -> TestConsole {
    spawn_with(Arc::new(MemoryStorage::new()), None).await
}

/// Console whose storage already holds `token` and an `alice` admin user.
pub async fn spawn_signed_in(token: &str) -> TestConsole {
    spawn_with(signed_in_storage(token), None).await
}

pub async fn spawn_with_views(token: Option<&str>, views: Arc<dyn ViewLoader>) -> TestConsole {
    let storage = match token {
        Some(token) => signed_in_storage(token),
        None => Arc::new(MemoryStorage::new()),
    };
    spawn_with(storage, Some(views)).await
}

pub fn signed_in_storage(token: &str) -> Arc<MemoryStorage> {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(TOKEN_KEY, token).unwrap();
    storage
        .set_item(USER_KEY, &json!({"username": "alice", "role": "admin"}).to_string())
        .unwrap();
    storage
}

async fn spawn_with(storage: Arc<MemoryStorage>, views: Option<Arc<dyn ViewLoader>>) -> TestConsole {
    let server = MockServer::start().await;
    let notices = Arc::new(NoticeQueue::new());
    let navigator = Arc::new(RecordingNavigator::default());

    let mut settings = ApiSettings::new(server.uri());
    settings.timeout_secs = 5;

    let mut builder = Console::builder(settings)
        .storage(storage.clone())
        .notifier(notices.clone())
        .navigator(navigator.clone());
    if let Some(views) = views {
        builder = builder.views(views);
    }
    let console = builder.build().expect("Failed to build console");

    TestConsole {
        server,
        console,
        notices,
        navigator,
        storage,
    }
}

/// Console pointed at a port nothing listens on.
pub fn unreachable_console(storage: Arc<MemoryStorage>) -> (Console, Arc<NoticeQueue>) {
    let notices = Arc::new(NoticeQueue::new());
    let mut settings = ApiSettings::new("http://127.0.0.1:1");
    settings.timeout_secs = 2;

    let console = Console::builder(settings)
        .storage(storage)
        .notifier(notices.clone())
        .navigator(Arc::new(RecordingNavigator::default()))
        .build()
        .expect("Failed to build console");
    (console, notices)
}

pub fn envelope(code: i64, message: &str, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": code,
        "message": message,
        "data": data,
    }))
}

pub fn ok(data: Value) -> ResponseTemplate {
    envelope(0, "success", data)
}

pub async fn mount_site_config(server: &MockServer, site_name: &str) {
    Mock::given(method("GET"))
        .and(path(api_path("/system-config/site")))
        .respond_with(ok(json!({
            "site_name": site_name,
            "site_logo": "",
            "site_domain": "",
        })))
        .mount(server)
        .await;
}

pub async fn mount_current_user(server: &MockServer, role: &str) {
    Mock::given(method("GET"))
        .and(path(api_path("/auth/me")))
        .respond_with(ok(json!({"username": "alice", "role": role})))
        .mount(server)
        .await;
}

/// Poll `condition` until it holds or two seconds pass.
pub async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..40 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    condition()
}
