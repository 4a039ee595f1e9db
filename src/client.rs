//! Insightly API client.
//!
//! Low-level HTTP transport that handles URL construction, authentication
//! and status-code mapping. Entity operations are implemented via traits on
//! the model types and via the facade methods in [`crate::facade`].

use std::env;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::endpoints::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use crate::error::{InsightlyError, Result};

const USER_AGENT: &str = concat!("insightly-rs/", env!("CARGO_PKG_VERSION"));

/// Body of a successful response.
///
/// Most endpoints answer with JSON. Some (notably deletes) answer with an
/// empty or non-JSON body, which is returned untouched as raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The body parsed as JSON.
    Json(Value),
    /// The body could not be parsed as JSON.
    Raw(Vec<u8>),
}

impl ApiResponse {
    /// The JSON value, if the body was JSON.
    pub fn json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(v) => Some(v),
            ApiResponse::Raw(_) => None,
        }
    }

    /// Deserialize the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::UnexpectedResponse`] for a raw body and
    /// [`InsightlyError::ParseError`] if the JSON does not match `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            ApiResponse::Json(v) => Ok(serde_json::from_value(v)?),
            ApiResponse::Raw(bytes) => Err(InsightlyError::UnexpectedResponse(format!(
                "expected a JSON body, got {} raw bytes",
                bytes.len()
            ))),
        }
    }
}

/// A file sent as a multipart upload instead of a JSON body.
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// File name reported to the server.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
    /// MIME type, if known.
    pub mime_type: Option<String>,
}

impl FilePayload {
    /// Create a payload from a name and contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime_type: None,
        }
    }

    fn into_form(self) -> Result<Form> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(mime) = self.mime_type {
            part = part.mime_str(&mime)?;
        }
        Ok(Form::new().part("file", part))
    }
}

/// Low-level Insightly API client.
///
/// Handles authentication and HTTP requests. This struct is cheaply
/// cloneable; clones share the same connection pool.
///
/// # Example
///
/// ```no_run
/// use insightly::InsightlyClient;
///
/// # fn example() -> insightly::Result<()> {
/// // Create from environment variables
/// let client = InsightlyClient::from_env()?;
///
/// // Or configure manually
/// let client = InsightlyClient::new("your-api-key", "https://api.insight.ly/v{version}/")?
///     .with_version("2.2")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InsightlyClient {
    http: Client,
    base_url_template: String,
    base_url: String,
    version: String,
    api_key: String,
}

impl std::fmt::Debug for InsightlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightlyClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl InsightlyClient {
    /// Create a client from environment variables.
    ///
    /// Uses `INSIGHTLY_API_KEY` for authentication, and optionally
    /// `INSIGHTLY_API_URL` (base URL template) and `INSIGHTLY_API_VERSION`.
    ///
    /// # Errors
    ///
    /// Returns an error if `INSIGHTLY_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("INSIGHTLY_API_KEY").map_err(|_| {
            InsightlyError::ConfigMissing(
                "INSIGHTLY_API_KEY environment variable not set".to_string(),
            )
        })?;

        let base_url =
            env::var("INSIGHTLY_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let client = Self::new(&api_key, &base_url)?;

        match env::var("INSIGHTLY_API_VERSION") {
            Ok(version) => client.with_version(&version),
            Err(_) => Ok(client),
        }
    }

    /// Create a new client with the provided API key and base URL.
    ///
    /// The base URL may contain a `{version}` placeholder, which is filled
    /// with the API version (`2.3` unless changed with [`with_version`]).
    ///
    /// [`with_version`]: Self::with_version
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting base URL is invalid.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(InsightlyError::HttpError)?;

        let base_url_template = base_url.to_string();
        let version = DEFAULT_API_VERSION.to_string();
        let base_url = render_base_url(&base_url_template, &version)?;

        Ok(Self {
            http,
            base_url_template,
            base_url,
            version,
            api_key: api_key.to_string(),
        })
    }

    /// Use a different API version.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting base URL is invalid.
    pub fn with_version(mut self, version: &str) -> Result<Self> {
        self.base_url = render_base_url(&self.base_url_template, version)?;
        self.version = version.to_string();
        Ok(self)
    }

    /// The API version in use.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The base URL with the version filled in. Always ends with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for a path. A leading `/` is stripped.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let path = path.strip_prefix('/').unwrap_or(path);
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    /// Make a request without a body.
    #[tracing::instrument(skip(self))]
    pub async fn request(&self, method: Method, path: &str) -> Result<ApiResponse> {
        let url = self.url_for(path)?;
        let request = self.json_request(method, &url);
        Self::dispatch(request, url).await
    }

    /// Make a GET request.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::GET, path).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<ApiResponse> {
        let url = self.url_for(path)?;
        let request = self.json_request(Method::GET, &url).query(query);
        Self::dispatch(request, url).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send_json(Method::POST, path, body).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send_json(Method::PUT, path, body).await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::DELETE, path).await
    }

    /// Make a request with an arbitrary method and JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        let url = self.url_for(path)?;
        let request = self.json_request(method, &url).json(body);
        Self::dispatch(request, url).await
    }

    /// Upload a file as a multipart form. No JSON body is sent.
    ///
    /// Unlike every other request, this one does not carry
    /// `Content-Type: application/json`; reqwest sets the multipart boundary.
    #[tracing::instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload(
        &self,
        method: Method,
        path: &str,
        file: FilePayload,
    ) -> Result<ApiResponse> {
        let url = self.url_for(path)?;
        let request = self
            .http
            .request(method, url.clone())
            .basic_auth(&self.api_key, None::<&str>)
            .multipart(file.into_form()?);
        Self::dispatch(request, url).await
    }

    fn json_request(&self, method: Method, url: &Url) -> RequestBuilder {
        self.http
            .request(method, url.clone())
            .basic_auth(&self.api_key, None::<&str>)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    async fn dispatch(request: RequestBuilder, url: Url) -> Result<ApiResponse> {
        let response = request.send().await.map_err(InsightlyError::HttpError)?;
        let response = Self::check_response(response, &url).await?;

        let bytes = response.bytes().await.map_err(InsightlyError::HttpError)?;
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(json) => Ok(ApiResponse::Json(json)),
            Err(_) => Ok(ApiResponse::Raw(bytes.to_vec())),
        }
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response, url: &Url) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| format!("HTTP {status}"));

        tracing::error!(url = %url, status = status.as_u16(), "Failed request");
        Err(InsightlyError::from_status(
            status.as_u16(),
            body,
            url.to_string(),
        ))
    }
}

fn render_base_url(template: &str, version: &str) -> Result<String> {
    let mut base_url = template.replace("{version}", version);
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    Url::parse(&base_url)?;
    Ok(base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = InsightlyClient::new("secret-key", DEFAULT_BASE_URL).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("InsightlyClient"));
        assert!(debug.contains("base_url"));
        // API key should not be in debug output
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_base_url_version_substitution() {
        let client = InsightlyClient::new("key", DEFAULT_BASE_URL).unwrap();
        assert_eq!(client.base_url(), "https://api.insight.ly/v2.3/");

        let client = client.with_version("2.2").unwrap();
        assert_eq!(client.version(), "2.2");
        assert_eq!(client.base_url(), "https://api.insight.ly/v2.2/");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = InsightlyClient::new("key", "https://api.insight.ly/v{version}").unwrap();
        let client2 = InsightlyClient::new("key", "https://api.insight.ly/v{version}/").unwrap();
        assert_eq!(client1.base_url(), client2.base_url());
    }

    #[test]
    fn test_url_for_strips_leading_slash() {
        let client = InsightlyClient::new("key", DEFAULT_BASE_URL).unwrap();
        let with_slash = client.url_for("/Contacts/1").unwrap();
        let without_slash = client.url_for("Contacts/1").unwrap();
        assert_eq!(with_slash, without_slash);
        assert_eq!(with_slash.as_str(), "https://api.insight.ly/v2.3/Contacts/1");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = InsightlyClient::new("key", "not a url");
        assert!(matches!(result, Err(InsightlyError::UrlError(_))));
    }

    #[test]
    fn test_raw_response_into_json_fails() {
        let raw = ApiResponse::Raw(Vec::new());
        assert!(raw.json().is_none());
        let result: Result<Value> = raw.into_json();
        assert!(matches!(result, Err(InsightlyError::UnexpectedResponse(_))));
    }
}
