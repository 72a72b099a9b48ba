//! The REST API client.

use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::api_client::ApiError;

/// The default URL of the REST API.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// A client for the finance REST API.
///
/// Cloning the client is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    /// The base URL of the resource endpoints, e.g. "http://localhost:8080/api".
    api_url: String,
    /// The base URL of the log-in and registration endpoints, e.g. "http://localhost:8080".
    auth_url: String,
}

#[derive(Serialize)]
struct LogInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

impl ApiClient {
    /// Create a client for the API served at `api_url`.
    ///
    /// The authentication endpoints live next to the API, so their base URL
    /// is `api_url` without the trailing "/api".
    pub fn new(api_url: &str) -> Self {
        let api_url = api_url.trim_end_matches('/').to_owned();
        let auth_url = api_url
            .strip_suffix("/api")
            .unwrap_or(&api_url)
            .to_owned();

        Self {
            http: reqwest::Client::new(),
            api_url,
            auth_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Exchange an email and password for a bearer token.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = self
            .http
            .post(format!("{}/auth/login", self.auth_url))
            .json(&LogInRequest { email, password });

        let TokenResponse { token } = send(request).await?.json().await?;

        Ok(token)
    }

    /// Create a new user account.
    pub async fn register<B: Serialize + ?Sized>(&self, body: &B) -> Result<(), ApiError> {
        let request = self
            .http
            .post(format!("{}/auth/register", self.auth_url))
            .json(body);

        send(request).await.map(|_| ())
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path)).bearer_auth(token);

        Ok(send(request).await?.json().await?)
    }

    /// GET `path` with `query` encoded as URL parameters and decode the JSON response.
    pub async fn get_with_query<T, Q>(
        &self,
        token: &str,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = serde_urlencoded::to_string(query)
            .map_err(|error| ApiError::Transport(format!("could not encode query: {error}")))?;
        let url = if query.is_empty() {
            self.url(path)
        } else {
            format!("{}?{query}", self.url(path))
        };
        let request = self.http.get(url).bearer_auth(token);

        Ok(send(request).await?.json().await?)
    }

    /// POST `body` as JSON to `path`, ignoring the response body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let request = self.http.post(self.url(path)).bearer_auth(token).json(body);

        send(request).await.map(|_| ())
    }

    /// PUT `body` as JSON to `path`, ignoring the response body.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let request = self.http.put(self.url(path)).bearer_auth(token).json(body);

        send(request).await.map(|_| ())
    }

    /// PUT `body` as JSON to `path` and decode the JSON response.
    pub async fn put_returning<T, B>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.put(self.url(path)).bearer_auth(token).json(body);

        Ok(send(request).await?.json().await?)
    }

    /// PATCH `path` without a body, e.g. to flag a record as read.
    pub async fn patch(&self, token: &str, path: &str) -> Result<(), ApiError> {
        let request = self.http.patch(self.url(path)).bearer_auth(token);

        send(request).await.map(|_| ())
    }

    /// DELETE the record at `path`.
    pub async fn delete(&self, token: &str, path: &str) -> Result<(), ApiError> {
        let request = self.http.delete(self.url(path)).bearer_auth(token);

        send(request).await.map(|_| ())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_owned();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!("API request to {url} failed with status {status}: {body}");

    Err(ApiError::from_status(status, &body))
}
