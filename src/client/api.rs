use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::client::error::ClientError;
use crate::config::ClientConfig;
use crate::model::{FoodUpdate, User};

/// Name of the screen template served under `/templates`.
pub const SCREEN_TEMPLATE: &str = "screen.tmpl";

/// Typed access to the server. Every call is bounded by the configured
/// connect and request timeouts.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_timeouts(
            &config.base_url,
            config.request_timeout(),
            config.connect_timeout(),
        )
    }

    pub fn with_timeouts(
        base_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|_| ClientError::InvalidUrl {
            url: base_url.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
            });
        }
        let http = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The screen template. A failure here is a configuration error.
    pub async fn fetch_template(&self) -> Result<String, ClientError> {
        let url = self.endpoint(&["templates", SCREEN_TEMPLATE]);
        let response = self.send(self.http.get(url.clone()), &url).await?;
        response
            .text()
            .await
            .map_err(|e| ClientError::transport(url.as_str(), e))
    }

    /// Content fragment for screen `name`.
    ///
    /// Never fails: on any error the returned text describes the problem
    /// and is shown in place of the fragment.
    pub async fn fetch_screen_content(&self, name: &str) -> String {
        let file = format!("{name}.inc");
        let url = self.endpoint(&["screens", &file]);
        match self.send(self.http.get(url.clone()), &url).await {
            Ok(response) => match response.text().await {
                Ok(text) => text,
                Err(err) => unavailable(&url, &err.to_string()),
            },
            Err(ClientError::Status { status, .. }) => format!(
                "Sorry, a {status} error occurred retrieving section data for: {url}"
            ),
            Err(err) => unavailable(&url, &err.to_string()),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let url = self.endpoint(&["users"]);
        self.json(self.http.get(url.clone()), &url).await
    }

    /// `Ok(None)` when the directory has no such user.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, ClientError> {
        let url = self.endpoint(&["user", id]);
        self.json(self.http.get(url.clone()), &url).await
    }

    /// Sends one food update and returns the server's copy of the user.
    pub async fn update_food(&self, update: &FoodUpdate) -> Result<User, ClientError> {
        let url = self.endpoint(&["user"]);
        self.json(self.http.put(url.clone()).json(update), &url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(url.as_str(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<T, ClientError> {
        let response = self.send(request, url).await?;
        response.json::<T>().await.map_err(|source| {
            if source.is_timeout() {
                ClientError::Timeout {
                    url: url.to_string(),
                }
            } else {
                ClientError::Decode {
                    url: url.to_string(),
                    source,
                }
            }
        })
    }
}

fn unavailable(url: &Url, reason: &str) -> String {
    format!("Sorry, section data for {url} could not be retrieved: {reason}")
}
