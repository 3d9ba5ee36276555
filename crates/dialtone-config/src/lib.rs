use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dialtone_core::calllog::DEFAULT_CALL_LOG;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "dialtone";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk";
pub const DEFAULT_TOKEN_ENV: &str = "YA_DISK_TOKEN";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;
pub const DEFAULT_USER_AGENT: &str = "dialtone";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub call_log: CallLogConfig,
    pub disk: DiskConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskConfig {
    pub base_url: String,
    pub token_env: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            call_log: CallLogConfig {
                path: PathBuf::from(DEFAULT_CALL_LOG),
            },
            disk: DiskConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                token_env: DEFAULT_TOKEN_ENV.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid call_log.path value: {0}")]
    InvalidCallLogPath(PathBuf),
    #[error("invalid disk.base_url value: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid disk.token_env value: {0:?}")]
    InvalidTokenEnv(String),
    #[error("invalid disk.timeout_seconds value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid disk.user_agent value")]
    InvalidUserAgent,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    call_log: Option<CallLogFile>,
    disk: Option<DiskFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CallLogFile {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiskFile {
    base_url: Option<String>,
    token_env: Option<String>,
    timeout_seconds: Option<u64>,
    user_agent: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(call_log) = parsed.call_log {
        if let Some(path) = call_log.path {
            if path.as_os_str().is_empty() || path.file_name().is_none() {
                return Err(ConfigError::InvalidCallLogPath(path));
            }
            config.call_log.path = path;
        }
    }

    if let Some(disk) = parsed.disk {
        if let Some(base_url) = disk.base_url {
            let trimmed = base_url.trim();
            match Url::parse(trimmed) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => return Err(ConfigError::InvalidBaseUrl(base_url)),
            }
            config.disk.base_url = trimmed.trim_end_matches('/').to_string();
        }
        if let Some(token_env) = disk.token_env {
            let trimmed = token_env.trim();
            if trimmed.is_empty() || trimmed.contains('=') || trimmed.contains('\0') {
                return Err(ConfigError::InvalidTokenEnv(token_env));
            }
            config.disk.token_env = trimmed.to_string();
        }
        if let Some(timeout) = disk.timeout_seconds {
            if timeout == 0 || timeout > MAX_TIMEOUT_SECONDS {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
            config.disk.timeout_seconds = timeout;
        }
        if let Some(user_agent) = disk.user_agent {
            let trimmed = user_agent.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidUserAgent);
            }
            config.disk.user_agent = trimmed.to_string();
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
