use crate::error::CoreError;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Environment variable prefix for overrides, e.g. `APP_API__BASE_URL`.
pub const ENV_PREFIX: &str = "APP";

/// Load settings from `<dir>/base.yaml`, an optional `<dir>/local.yaml`, and
/// `APP_`-prefixed environment variables (`__` separates nested keys).
pub fn load_settings<T: DeserializeOwned>(configuration_directory: &Path) -> Result<T, CoreError> {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(File::from(configuration_directory.join("local.yaml")).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;

    #[derive(Debug, Deserialize)]
    struct Sample {
        server: SampleServer,
    }

    #[derive(Debug, Deserialize)]
    struct SampleServer {
        host: String,
        port: u16,
    }

    #[test]
    fn local_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.yaml"),
            "server:\n  host: 127.0.0.1\n  port: 8080\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.yaml"), "server:\n  port: 9090\n").unwrap();

        let sample: Sample = load_settings(dir.path()).unwrap();
        assert_eq!(sample.server.host, "127.0.0.1");
        assert_eq!(sample.server.port, 9090);
    }

    #[test]
    fn missing_base_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_settings::<Sample>(dir.path());
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
