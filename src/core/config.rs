mod parsing;

use std::time::Duration;

use thiserror::Error;

use self::parsing::{
    env_optional, env_or_default, parse_bool, parse_environment, parse_u16, parse_u64,
};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    server: ServerSettings,
    runtime: RuntimeSettings,
    api: ApiSettings,
    database: DatabaseSettings,
    submissions: SubmissionsSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ServerSettings {
    host: ServerHost,
    port: ServerPort,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) project_name: String,
    pub(crate) api_v1_str: String,
}

#[derive(Debug, Clone)]
pub(crate) struct DatabaseSettings {
    pub(crate) postgres_server: String,
    pub(crate) postgres_port: u16,
    pub(crate) postgres_user: String,
    pub(crate) postgres_password: String,
    pub(crate) postgres_db: String,
    pub(crate) database_url: Option<String>,
}

/// Outbound submission service and queue defaults.
#[derive(Debug, Clone)]
pub(crate) struct SubmissionsSettings {
    pub(crate) api_url: String,
    pub(crate) connect_timeout_seconds: u64,
    pub(crate) timeout_seconds: u64,
    pub(crate) default_queue_name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
    pub(crate) prometheus_enabled: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct RuntimeSettings {
    pub(crate) environment: Environment,
    pub(crate) strict_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Test => "test",
        }
    }

    fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ServerHost(String);

#[derive(Debug, Clone, Copy)]
pub(crate) struct ServerPort(u16);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid server host: {0}")]
    InvalidHost(String),
    #[error("invalid server port: {0}")]
    InvalidPort(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("missing required secret for {0}")]
    MissingSecret(&'static str),
}

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("XQS_HOST", "0.0.0.0");
        let port = env_or_default("XQS_PORT", "8000");

        let environment =
            parse_environment(env_optional("XQS_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("XQS_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "XQueue Submission Bridge");
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "edxapp");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "edxapp");
        let database_url = env_optional("DATABASE_URL");

        let api_url = env_or_default("SUBMISSIONS_API_URL", "http://localhost:18000/api");
        let connect_timeout_seconds = parse_u64(
            "SUBMISSIONS_CONNECT_TIMEOUT_SECONDS",
            env_or_default("SUBMISSIONS_CONNECT_TIMEOUT_SECONDS", "3"),
        )?;
        let timeout_seconds = parse_u64(
            "SUBMISSIONS_TIMEOUT_SECONDS",
            env_or_default("SUBMISSIONS_TIMEOUT_SECONDS", "10"),
        )?;
        let default_queue_name = env_or_default("DEFAULT_QUEUE_NAME", "default");

        let log_level = env_or_default("XQS_LOG_LEVEL", "info");
        let json = env_optional("XQS_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, api_v1_str },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
            },
            submissions: SubmissionsSettings {
                api_url,
                connect_timeout_seconds,
                timeout_seconds,
                default_queue_name,
            },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn submissions(&self) -> &SubmissionsSettings {
        &self.submissions
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.api_v1_str.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "API_V1_STR",
                value: self.api.api_v1_str.clone(),
            });
        }

        if !(self.submissions.api_url.starts_with("http://")
            || self.submissions.api_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "SUBMISSIONS_API_URL",
                value: self.submissions.api_url.clone(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }

        Ok(())
    }
}

impl DatabaseSettings {
    pub(crate) fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.postgres_user,
            self.postgres_password,
            self.postgres_server,
            self.postgres_port,
            self.postgres_db
        )
    }
}

impl SubmissionsSettings {
    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ServerHost {
    fn parse(value: String) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidHost(value));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl ServerPort {
    fn parse(value: String) -> Result<Self, ConfigError> {
        match value.trim().parse::<u16>() {
            Ok(0) | Err(_) => Err(ConfigError::InvalidPort(value)),
            Ok(port) => Ok(Self(port)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    const MANAGED_KEYS: &[&str] = &[
        "XQS_ENV",
        "ENVIRONMENT",
        "XQS_STRICT_CONFIG",
        "XQS_HOST",
        "XQS_PORT",
        "DATABASE_URL",
        "POSTGRES_SERVER",
        "POSTGRES_PORT",
        "POSTGRES_USER",
        "POSTGRES_DB",
        "POSTGRES_PASSWORD",
        "SUBMISSIONS_API_URL",
        "SUBMISSIONS_CONNECT_TIMEOUT_SECONDS",
        "SUBMISSIONS_TIMEOUT_SECONDS",
        "DEFAULT_QUEUE_NAME",
        "API_V1_STR",
    ];

    fn clear_env() {
        for key in MANAGED_KEYS {
            std::env::remove_var(key);
        }
    }

    #[tokio::test]
    async fn load_uses_defaults() {
        let _guard = test_support::env_lock().await;
        clear_env();

        let settings = Settings::load().expect("settings");
        assert_eq!(settings.server_port(), 8000);
        assert_eq!(settings.api().api_v1_str, "/api/v1");
        assert_eq!(settings.submissions().default_queue_name, "default");
        assert_eq!(settings.submissions().connect_timeout(), Duration::from_secs(3));
        assert_eq!(settings.submissions().timeout(), Duration::from_secs(10));
        assert_eq!(settings.runtime().environment, Environment::Development);
        assert_eq!(
            settings.database().database_url(),
            "postgresql://edxapp:@localhost:5432/edxapp"
        );
    }

    #[tokio::test]
    async fn load_rejects_invalid_timeout() {
        let _guard = test_support::env_lock().await;
        clear_env();
        std::env::set_var("SUBMISSIONS_TIMEOUT_SECONDS", "ten");

        let err = Settings::load().expect_err("invalid timeout");
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "SUBMISSIONS_TIMEOUT_SECONDS", .. }
        ));
        clear_env();
    }

    #[tokio::test]
    async fn load_rejects_zero_port() {
        let _guard = test_support::env_lock().await;
        clear_env();
        std::env::set_var("XQS_PORT", "0");

        let err = Settings::load().expect_err("zero port");
        assert!(matches!(err, ConfigError::InvalidPort(_)));
        clear_env();
    }

    #[tokio::test]
    async fn strict_config_requires_database_secret() {
        let _guard = test_support::env_lock().await;
        clear_env();
        std::env::set_var("XQS_ENV", "production");

        let err = Settings::load().expect_err("missing secret");
        assert!(matches!(err, ConfigError::MissingSecret("POSTGRES_PASSWORD")));

        std::env::set_var("DATABASE_URL", "postgresql://lms:secret@db:5432/edxapp");
        let settings = Settings::load().expect("settings with url");
        assert_eq!(settings.database().database_url(), "postgresql://lms:secret@db:5432/edxapp");
        clear_env();
    }

    #[tokio::test]
    async fn load_rejects_non_http_submissions_url() {
        let _guard = test_support::env_lock().await;
        clear_env();
        std::env::set_var("SUBMISSIONS_API_URL", "ftp://submissions");

        let err = Settings::load().expect_err("bad url");
        assert!(matches!(err, ConfigError::InvalidValue { field: "SUBMISSIONS_API_URL", .. }));
        clear_env();
    }
}
