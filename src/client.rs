use reqwest::{
  header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
  Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://localhost:7067";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self::new(DEFAULT_BASE_URL)
  }
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
    }
  }
}

/// Credentialed JSON client shared by every API module.
///
/// Clones share one connection pool and one cookie store, so a session cookie
/// set by `/auth/login` is sent by every module afterwards.
#[derive(Debug, Clone)]
pub struct HttpClient {
  base_url: String,
  http: reqwest::Client,
}

impl HttpClient {
  pub fn new(config: &ClientConfig) -> Result<Self, Error> {
    let base_url = normalize_base_url(&config.base_url)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let http = reqwest::Client::builder()
      .default_headers(headers)
      .cookie_store(true)
      .build()?;

    Ok(Self { base_url, http })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn endpoint(&self, path: &str) -> String {
    let path = path.trim();

    if path.starts_with('/') {
      format!("{}{}", self.base_url, path)
    } else {
      format!("{}/{}", self.base_url, path)
    }
  }

  pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
    self.send::<(), T>(Method::GET, path, None).await
  }

  pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<T, Error> {
    self.send(Method::POST, path, Some(body)).await
  }

  pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<T, Error> {
    self.send(Method::PUT, path, Some(body)).await
  }

  pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
    self.send::<(), T>(Method::DELETE, path, None).await
  }

  async fn send<B: Serialize, T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    body: Option<&B>,
  ) -> Result<T, Error> {
    let url = self.endpoint(path);
    log::debug!("{} {}", method, url);

    let mut request = self.http.request(method, &url);
    if let Some(body) = body {
      request = request.body(serde_json::to_vec(body)?);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
      return Err(Error::Http { status, body: text });
    }

    // Some endpoints (delete, logout) answer with an empty body.
    if text.trim().is_empty() {
      return Ok(serde_json::from_str("null")?);
    }

    Ok(serde_json::from_str(&text)?)
  }
}

fn normalize_base_url(base_url: &str) -> Result<String, Error> {
  let trimmed = base_url.trim().trim_end_matches('/');

  // Trailing slashes are gone, so a bare scheme ends up as `https:` here.
  if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
    return Err(Error::InvalidBaseUrl(base_url.to_string()));
  }

  Ok(trimmed.to_string())
}
