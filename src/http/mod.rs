use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use url::Url;

/// Query parameters of a request, as a JSON object.
pub type Params = Map<String, Value>;

const API_KEY_HEADER: &str = "X-Api-Key";

/// Authenticated JSON request/response channel to one server.
///
/// Every call either returns the parsed JSON body or a classified error:
/// [`Error::Transport`] when the request could not be sent,
/// [`Error::Server`] for a status of 400 or above, and [`Error::Decode`]
/// when the body is not JSON. Nothing is retried.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
        body: Option<&Value>,
    ) -> Result<Value>;

    /// Release the underlying session. Calling it more than once is harmless.
    fn close(&mut self);

    async fn get(&self, path: &str, params: Option<&Params>) -> Result<Value> {
        self.request(Method::GET, path, params, None).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::POST, path, None, body).await
    }

    async fn put(&self, path: &str, body: Option<&Value>, params: Option<&Params>) -> Result<Value> {
        self.request(Method::PUT, path, params, body).await
    }

    async fn delete(&self, path: &str, params: Option<&Params>) -> Result<Value> {
        self.request(Method::DELETE, path, params, None).await
    }
}

/// [`Transport`] over a persistent reqwest session.
pub struct HttpClient {
    client: Option<Client>,
    host_url: String,
    api_key: String,
    credentials: Option<(String, String)>,
}

impl HttpClient {
    /// Build a client for `host_url` (e.g. `http://192.168.0.5:7878`).
    ///
    /// Basic authentication is only used when both `username` and
    /// `password` are provided.
    pub fn new(
        host_url: &str,
        api_key: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        Url::parse(host_url)
            .map_err(|e| Error::client(format!("Invalid host url {}: {}", host_url, e)))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| Error::client("Invalid API key, it must be a printable ASCII string"))?;
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("cliarr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::client(format!("Failed to create HTTP client: {}", e)))?;

        let credentials = match (username, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.to_string(), pass.to_string()))
            }
            _ => None,
        };

        Ok(Self {
            client: Some(client),
            host_url: host_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            credentials,
        })
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn uses_basic_auth(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    fn build_url(&self, path: &str, params: Option<&Params>) -> Result<Url> {
        let raw = format!("{}{}", self.host_url, path);
        let mut url =
            Url::parse(&raw).map_err(|e| Error::client(format!("Invalid url {}: {}", raw, e)))?;

        let pairs = params.map(query_pairs).unwrap_or_default();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip(self, params, body))]
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.build_url(path, params)?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::client("HTTP session is closed"))?;

        debug!(url = %url, body = ?body, "Sending request");

        let mut request = client.request(method, url.clone());
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            Error::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| Error::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if status.as_u16() >= 400 {
            warn!("HTTP request failed with status: {}", status);
            return Err(Error::Server {
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        parse_body(url.as_str(), &text)
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("HTTP session to {} closed", self.host_url);
        }
    }
}

/// Flatten a parameter object into query pairs. Nulls are skipped and arrays
/// become repeated keys.
fn query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            Value::Array(values) => {
                pairs.extend(
                    values
                        .iter()
                        .filter_map(param_value)
                        .map(|v| (key.clone(), v)),
                );
            }
            other => {
                if let Some(v) = param_value(other) {
                    pairs.push((key.clone(), v));
                }
            }
        }
    }
    pairs
}

fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

// Servers answer some DELETE and command calls with an empty body.
fn parse_body(url: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| Error::Decode {
        url: url.to_string(),
        body: text.to_string(),
        message: e.to_string(),
    })
}
