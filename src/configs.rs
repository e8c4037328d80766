use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use tracing_appender::non_blocking::WorkerGuard;

pub mod logging;

pub use logging::LoggingError;

/// Prefix of the environment variables read by [`load_client_config`].
const ENV_PREFIX: &'static str = "YAMMER";

/// Settings an [`ApiClient`](crate::client::ApiClient) is constructed from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    access_token: Option<String>,
    base_url: Option<String>,
}

impl ClientConfig {
    pub fn new(access_token: Option<String>, base_url: Option<String>) -> Self {
        ClientConfig { access_token, base_url }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// Reads `YAMMER_ACCESS_TOKEN` and `YAMMER_BASE_URL` from the process environment.
pub fn load_client_config() -> Result<ClientConfig, config::ConfigError> {
    load_client_config_from(None)
}

/// Same as [`load_client_config`], reading from `source` instead of the process
/// environment when it is given.
pub fn load_client_config_from(source: Option<HashMap<String, String>>) -> Result<ClientConfig, config::ConfigError> {
    let config = config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX).source(source))
        .build()?;

    config.try_deserialize()
}

/// 프로그램에서 사용할 로깅 옵션을 `LOGGER_*` 환경 변수로부터 설정한다.
pub fn set_global_logging_config() -> Result<WorkerGuard, LoggingError> {
    let options = read_logging_config(|name| env::var(name).ok())?;

    logging::set_global_logging_config(&options)
}

fn read_logging_config<F>(lookup: F) -> Result<logging::Config, LoggingError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &str| lookup(name).ok_or_else(|| LoggingError::MissingVariable(name.to_owned()));

    let dir = required("LOGGER_DIR")?;
    let name = required("LOGGER_FILE_NAME")?;

    let keep = match lookup("LOGGER_KEEP") {
        Some(v) => Some(v.parse::<usize>().map_err(|_| LoggingError::InvalidKeep(v))?),
        None => None,
    };

    Ok(logging::Config {
        dir,
        name,
        keep,
        level: lookup("LOGGER_LEVEL"),
        rotation: lookup("LOGGER_ROTATION"),
    })
}
