use crate::auth::{AuthStrategy, BasicAuth};
use crate::dump;
use crate::error::ClientError;
use derive_builder::Builder;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as ReqwestClient, Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Debug};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub type ApiResult<T> = Result<T, ClientError>;

pub const DEFAULT_BASE_URL: &str = "https://cloud.solar-manager.ch/";
pub const DEFAULT_USER_AGENT: &str = "solarmanager-rs";

const BODY_EXCERPT_LEN: usize = 512;

/// Settings used to construct a [`SolarManagerClient`].
#[derive(Clone, Builder)]
#[builder(pattern = "owned", build_fn(error = "ClientError"))]
pub struct ClientConfig {
    #[builder(setter(into), default = "DEFAULT_BASE_URL.to_string()")]
    pub base_url: String,

    /// Basic auth user name. Required unless `auth_strategy` is set.
    #[builder(setter(into, strip_option), default)]
    pub username: Option<String>,

    #[builder(setter(into, strip_option), default)]
    pub password: Option<String>,

    /// Replaces Basic auth built from `username` and `password`.
    #[builder(setter(strip_option), default)]
    pub auth_strategy: Option<Arc<dyn AuthStrategy>>,

    #[builder(setter(into), default = "DEFAULT_USER_AGENT.to_string()")]
    pub user_agent: String,

    /// Dump every raw request and response to the `solarmanager::dump` tracing target.
    #[builder(default)]
    pub verbose: bool,

    /// Transport to send requests through. A fresh `reqwest::Client` is used when absent.
    #[builder(setter(strip_option), default)]
    pub http_client: Option<ReqwestClient>,
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("auth_strategy", &self.auth_strategy)
            .field("user_agent", &self.user_agent)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ClientConfigBuilder {
    pub fn connect(self) -> ApiResult<SolarManagerClient> {
        SolarManagerClient::from_config(self.build()?)
    }
}

#[derive(Debug, Clone)]
pub struct SolarManagerClient {
    base_url: Url,
    client: ReqwestClient,
    auth_strategy: Arc<dyn AuthStrategy>, // Using Arc to allow cloning
    user_agent: HeaderValue,
    verbose: bool,
}

impl SolarManagerClient {
    /// Client for the production service with the default transport.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> ApiResult<Self> {
        Self::builder().username(username).password(password).connect()
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }
        // Relative paths must resolve below the base, not replace its last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ClientError::Config(format!("invalid user agent: {}", e)))?;

        let credentials = (config.auth_strategy, config.username, config.password);
        let auth_strategy: Arc<dyn AuthStrategy> = match credentials {
            (Some(strategy), _, _) => strategy,
            (None, Some(username), Some(password)) => {
                Arc::new(BasicAuth::new(username, password))
            }
            (None, _, _) => {
                return Err(ClientError::Config(
                    "either `username` and `password` or `auth_strategy` must be set".to_string(),
                ))
            }
        };

        Ok(SolarManagerClient {
            base_url,
            client: config.http_client.unwrap_or_default(),
            auth_strategy,
            user_agent,
            verbose: config.verbose,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Resolves a relative reference such as `v1/info/sensor/abc?x=1` against the base URL.
    pub fn resolve(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Appends `segments` to the base URL, percent-escaping each one so that
    /// identifiers can never introduce extra path components.
    ///
    /// `.` and `..` are rejected: the URL parser would silently drop them.
    pub fn endpoint_url(&self, segments: &[&str]) -> ApiResult<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ClientError::InvalidUrl(format!(
                "`{}` is not allowed as a path segment",
                segment
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::InvalidUrl(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn new_request<B>(&self, method: Method, url: Url, body: Option<&B>) -> ApiResult<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.user_agent.clone());
        request = self.auth_strategy.apply_auth(request);

        if let Some(body) = body {
            let json_body = serde_json::to_vec(body).map_err(|e| {
                error!("Failed to serialize body: {:?}", e);
                ClientError::Encoding(e)
            })?;
            request = request.header(CONTENT_TYPE, "application/json").body(json_body);
        }

        Ok(request.build()?)
    }

    #[instrument(skip(self))]
    pub async fn get<T>(&self, endpoint: &str, params: Option<&[(&str, &str)]>) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let mut url = self.resolve(endpoint)?;
        if let Some(params) = params {
            url.query_pairs_mut().extend_pairs(params);
            debug!("Added query parameters: {:?}", params);
        }

        let request = self.new_request(Method::GET, url, None::<&()>)?;
        self.execute(request).await
    }

    #[instrument(skip(self, body))]
    pub async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let url = self.resolve(endpoint)?;
        let request = self.new_request(Method::POST, url, body)?;
        self.execute(request).await
    }

    /// Sends a request built by [`Self::new_request`] and decodes the JSON answer.
    ///
    /// `204 No Content` yields `T::default()`. Any other non-success status becomes
    /// [`ClientError::Status`] without touching the decoder.
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn execute<T>(&self, request: Request) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        debug!("Sending request");
        if self.verbose {
            info!(target: dump::TARGET, "{}", dump::request(&request));
        }

        let response = self.client.execute(request).await.map_err(|e| {
            error!("Network error while sending request: {:?}", e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            error!("Network error while reading response body: {:?}", e);
            ClientError::Transport(e)
        })?;

        if self.verbose {
            info!(target: dump::TARGET, "{}", dump::response(status, &headers, &body));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(T::default());
        }
        if !status.is_success() {
            error!("Request failed with status {}", status);
            return Err(ClientError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        decode(&body)
    }
}

pub(crate) fn decode<T>(body: &[u8]) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        error!("Failed to parse JSON response: {}", err);
        ClientError::Decode {
            path: err.path().to_string(),
            source: err.into_inner(),
            body: excerpt(body),
        }
    })?;
    deserializer.end().map_err(|source| ClientError::Decode {
        path: ".".to_string(),
        source,
        body: excerpt(body),
    })?;
    Ok(value)
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(BODY_EXCERPT_LEN).collect()
}
