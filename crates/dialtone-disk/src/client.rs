use crate::store::{DeleteOutcome, ResourceState, ResourceStore};
use crate::{DiskError, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use std::env::{self, VarError};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;
use url::{Host, Url};

#[derive(Clone)]
pub struct DiskSettings {
    pub base_url: String,
    pub token: String,
    pub user_agent: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl DiskSettings {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            user_agent: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl fmt::Debug for DiskSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiskSettings")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Reads the OAuth token from the environment variable `var`.
pub fn token_from_env(var: &str) -> Result<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Err(VarError::NotUnicode(_)) => Err(DiskError::InvalidToken(var.to_string())),
        Ok(_) | Err(VarError::NotPresent) => Err(DiskError::MissingToken(var.to_string())),
    }
}

/// Blocking client for the cloud-disk `resources` endpoint.
pub struct DiskClient {
    resources_url: Url,
    token: String,
    client: Client,
}

impl fmt::Debug for DiskClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiskClient")
            .field("resources_url", &self.resources_url.as_str())
            .finish_non_exhaustive()
    }
}

impl DiskClient {
    pub fn new(settings: DiskSettings) -> Result<Self> {
        let base = Url::parse(settings.base_url.trim())?;
        ensure_secure(&base)?;
        let resources_url = Url::parse(&format!(
            "{}/resources",
            base.as_str().trim_end_matches('/')
        ))?;

        let client = Client::builder()
            .user_agent(settings.user_agent.as_deref().unwrap_or("dialtone"))
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .build()?;

        Ok(Self {
            resources_url,
            token: settings.token,
            client,
        })
    }

    pub fn resources_url(&self) -> &Url {
        &self.resources_url
    }

    fn resource_url(&self, path: &str, permanently: bool) -> Url {
        let mut url = self.resources_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("path", path);
            if permanently {
                query.append_pair("permanently", "true");
            }
        }
        url
    }

    fn send(&self, method: Method, url: Url) -> Result<StatusCode> {
        debug!(method = %method, url = %url, "disk request");
        let response = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .header(ACCEPT, "application/json")
            .send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "disk response");
        Ok(status)
    }
}

impl ResourceStore for DiskClient {
    fn store_name(&self) -> &'static str {
        "cloud-disk"
    }

    fn stat(&self, path: &str) -> Result<ResourceState> {
        let status = self.send(Method::GET, self.resource_url(path, false))?;
        match status {
            StatusCode::OK => Ok(ResourceState::Found),
            StatusCode::NOT_FOUND => Ok(ResourceState::Absent),
            other => Err(unexpected("GET", path, other)),
        }
    }

    fn create_folder(&self, path: &str) -> Result<()> {
        let status = self.send(Method::PUT, self.resource_url(path, false))?;
        match status {
            StatusCode::CREATED => Ok(()),
            StatusCode::CONFLICT => Err(DiskError::AlreadyExists(path.to_string())),
            other => Err(unexpected("PUT", path, other)),
        }
    }

    fn delete(&self, path: &str, permanently: bool) -> Result<DeleteOutcome> {
        let status = self.send(Method::DELETE, self.resource_url(path, permanently))?;
        match status {
            StatusCode::NO_CONTENT => Ok(DeleteOutcome::Deleted),
            StatusCode::ACCEPTED => Ok(DeleteOutcome::Accepted),
            StatusCode::NOT_FOUND => Err(DiskError::NotFound(path.to_string())),
            other => Err(unexpected("DELETE", path, other)),
        }
    }
}

fn unexpected(method: &'static str, path: &str, status: StatusCode) -> DiskError {
    DiskError::Status {
        method,
        path: path.to_string(),
        status: status.as_u16(),
    }
}

fn ensure_secure(url: &Url) -> Result<()> {
    match url.scheme() {
        "https" => Ok(()),
        "http" if is_loopback(url) => Ok(()),
        _ => Err(DiskError::InsecureUrl(url.to_string())),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(addr)) => IpAddr::V4(addr).is_loopback(),
        Some(Host::Ipv6(addr)) => IpAddr::V6(addr).is_loopback(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{token_from_env, DiskClient, DiskSettings};
    use crate::DiskError;

    fn settings(base_url: &str) -> DiskSettings {
        DiskSettings::new(base_url, "secret")
    }

    #[test]
    fn client_builds_resources_url() {
        let client = DiskClient::new(settings("https://disk.example.com/v1/disk/")).expect("client");
        assert_eq!(
            client.resources_url().as_str(),
            "https://disk.example.com/v1/disk/resources"
        );
    }

    #[test]
    fn resource_url_encodes_path_and_flags() {
        let client = DiskClient::new(settings("https://disk.example.com/v1/disk")).expect("client");
        let url = client.resource_url("my dir/sub", true);
        assert_eq!(
            url.as_str(),
            "https://disk.example.com/v1/disk/resources?path=my+dir%2Fsub&permanently=true"
        );
    }

    #[test]
    fn client_rejects_plain_http_for_remote_hosts() {
        let err = DiskClient::new(settings("http://disk.example.com/v1/disk")).unwrap_err();
        assert!(matches!(err, DiskError::InsecureUrl(_)));
    }

    #[test]
    fn client_accepts_plain_http_on_loopback() {
        assert!(DiskClient::new(settings("http://127.0.0.1:8080/v1/disk")).is_ok());
        assert!(DiskClient::new(settings("http://localhost/v1/disk")).is_ok());
        assert!(DiskClient::new(settings("http://[::1]:9000")).is_ok());
    }

    #[test]
    fn client_rejects_unparseable_url() {
        let err = DiskClient::new(settings("not a url")).unwrap_err();
        assert!(matches!(err, DiskError::Url(_)));
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", settings("https://disk.example.com"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn token_from_env_rejects_missing_variable() {
        let err = token_from_env("DIALTONE_TEST_TOKEN_THAT_IS_NEVER_SET").unwrap_err();
        assert!(matches!(err, DiskError::MissingToken(name) if name == "DIALTONE_TEST_TOKEN_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn token_from_env_treats_blank_value_as_missing() {
        let var = "DIALTONE_TEST_TOKEN_BLANK";
        std::env::set_var(var, "   ");
        let err = token_from_env(var).unwrap_err();
        assert!(matches!(err, DiskError::MissingToken(_)));
    }

    #[cfg(unix)]
    #[test]
    fn token_from_env_reports_non_unicode_value() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let var = "DIALTONE_TEST_TOKEN_NOT_UNICODE";
        std::env::set_var(var, OsString::from_vec(vec![0x66, 0xff]));
        let err = token_from_env(var).unwrap_err();
        assert!(matches!(&err, DiskError::InvalidToken(name) if name == var));
        assert!(err.to_string().contains("not valid unicode"));
    }
}
