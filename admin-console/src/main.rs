use admin_console::config::get_configuration;
use admin_console::models::LoginRequest;
use admin_console::services::metrics::{init_metrics, render_metrics};
use admin_console::services::{DurableStorage, FileStorage, MemoryStorage, TracingNotifier};
use admin_console::Console;
use console_core::observability::init_tracing;
use dotenvy::dotenv;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "admin-console",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )?;

    init_metrics().map_err(|e| {
        tracing::error!("Failed to install metrics recorder: {}", e);
        anyhow::anyhow!("Metrics error: {}", e)
    })?;

    let storage: Arc<dyn DurableStorage> = match &configuration.storage.path {
        Some(path) => Arc::new(FileStorage::open(path).map_err(|e| {
            tracing::error!("Failed to open session storage {}: {}", path.display(), e);
            anyhow::anyhow!("Storage error: {}", e)
        })?),
        None => Arc::new(MemoryStorage::new()),
    };

    let console = Console::builder(configuration.api.clone())
        .storage(storage)
        .notifier(Arc::new(TracingNotifier))
        .build()?;

    info!(
        base_url = %console.client().base_url(),
        authenticated = console.auth().is_authenticated(),
        "Starting admin-console"
    );

    let settings = &configuration.console;
    if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
        if !console.auth().is_authenticated() {
            let credentials = LoginRequest::new(username.as_str(), password.expose_secret().as_str());
            console.auth().login(&credentials).await.map_err(|e| {
                tracing::error!("Login failed: {}", e);
                anyhow::anyhow!("Login failed: {}", e)
            })?;
        }
    }

    let view = console.router().navigate(&settings.start_path).await?;
    info!(
        view = view.name,
        path = %view.path,
        title = %console.document().title(),
        "Console ready"
    );

    if let Some(snapshot) = render_metrics() {
        tracing::debug!(metrics = %snapshot, "API metrics");
    }

    Ok(())
}
