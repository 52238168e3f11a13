//! Mail.tm async client implementation.

use crate::models::{Account, Domain, HydraCollection, MessageDetail, MessageSummary, TokenResponse};
use crate::{Error, Result};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Async client for the Mail.tm temporary email service.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom
/// settings like the API endpoint, request timeout, proxies, and a custom
/// user agent. The client holds no per-account state; message and deletion
/// calls take the bearer token obtained from [`Client::get_token`].
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Mail.tm client with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtm_client::Client;
    /// # fn main() -> Result<(), mailtm_client::Error> {
    /// let client = Client::new()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// List the domains currently accepting new addresses.
    ///
    /// Inactive domains are filtered out; the service's ordering is kept.
    ///
    /// # Returns
    /// Domain names without the leading `@`, possibly empty.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtm_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailtm_client::Error> {
    /// let client = Client::new()?;
    /// for domain in client.list_domains().await? {
    ///     println!("@{domain}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_domains(&self) -> Result<Vec<String>> {
        debug!("fetching available domains");
        let response = self.http.get(self.url("/domains")).send().await?;
        let collection: HydraCollection<Domain> = Self::expect_json(response, StatusCode::OK).await?;
        Ok(collection
            .member
            .into_iter()
            .filter(|d| d.is_active)
            .map(|d| d.domain)
            .collect())
    }

    /// Create a mailbox account.
    ///
    /// # Arguments
    /// * `address` - The full email address (local part + domain)
    /// * `password` - The password to register for the mailbox
    ///
    /// # Returns
    /// The account object assigned by the service. An address that is
    /// already taken surfaces as [`Error::AddressTaken`]; any other
    /// non-201 status as [`Error::Status`].
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtm_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailtm_client::Error> {
    /// let client = Client::new()?;
    /// let account = client.create_account("myalias@example.com", "s3cret!Pw").await?;
    /// println!("{}", account.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_account(&self, address: &str, password: &str) -> Result<Account> {
        debug!(address, "creating account");
        let payload = json!({ "address": address, "password": password });
        let response = self
            .http
            .post(self.url("/accounts"))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json().await?),
            StatusCode::UNPROCESSABLE_ENTITY => Err(Error::AddressTaken),
            _ => Err(Self::status_error(response).await),
        }
    }

    /// Obtain a bearer token for an existing mailbox.
    ///
    /// # Arguments
    /// * `address` - The full email address
    /// * `password` - The password the mailbox was created with
    ///
    /// # Returns
    /// The token string required by the message and deletion endpoints.
    pub async fn get_token(&self, address: &str, password: &str) -> Result<String> {
        debug!(address, "requesting bearer token");
        let payload = json!({ "address": address, "password": password });
        let response = self
            .http
            .post(self.url("/token"))
            .json(&payload)
            .send()
            .await?;
        let token: TokenResponse = Self::expect_json(response, StatusCode::OK).await?;
        Ok(token.token)
    }

    /// List the messages in the mailbox the token belongs to.
    ///
    /// # Returns
    /// Message summaries in the service's order, typically newest first.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtm_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailtm_client::Error> {
    /// let client = Client::new()?;
    /// let token = client.get_token("myalias@example.com", "s3cret!Pw").await?;
    /// for msg in client.list_messages(&token).await? {
    ///     println!("{}: {}", msg.id, msg.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_messages(&self, token: &str) -> Result<Vec<MessageSummary>> {
        let response = self
            .http
            .get(self.url("/messages"))
            .bearer_auth(token)
            .send()
            .await?;
        let collection: HydraCollection<MessageSummary> =
            Self::expect_json(response, StatusCode::OK).await?;
        Ok(collection.member)
    }

    /// Fetch the full content of a specific message.
    ///
    /// # Arguments
    /// * `token` - Bearer token for the owning mailbox
    /// * `id` - The message ID from a [`MessageSummary`]
    pub async fn get_message(&self, token: &str, id: &str) -> Result<MessageDetail> {
        let response = self
            .http
            .get(self.url(&format!("/messages/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_json(response, StatusCode::OK).await
    }

    /// Delete a message from the mailbox.
    ///
    /// # Returns
    /// `true` exactly when the service answered 204; any other status is
    /// reported as `false`.
    pub async fn delete_message(&self, token: &str, id: &str) -> Result<bool> {
        let response = self
            .http
            .delete(self.url(&format!("/messages/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(response.status() == StatusCode::NO_CONTENT)
    }

    /// Delete the mailbox account itself.
    ///
    /// # Arguments
    /// * `token` - Bearer token for the account
    /// * `id` - The account ID assigned at creation
    ///
    /// # Returns
    /// `true` exactly when the service answered 204.
    pub async fn delete_account(&self, token: &str, id: &str) -> Result<bool> {
        debug!(id, "deleting account");
        let response = self
            .http
            .delete(self.url(&format!("/accounts/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(response.status() == StatusCode::NO_CONTENT)
    }

    /// Join a path onto the configured base URL.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a response expected to carry JSON at the given status.
    async fn expect_json<T: DeserializeOwned>(
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<T> {
        if response.status() == expected {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    /// Turn an unexpected response into [`Error::Status`], keeping the body.
    async fn status_error(response: reqwest::Response) -> Error {
        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Error::Status { code, body }
    }
}

const BASE_URL: &str = "https://api.mail.tm";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for configuring a Mail.tm client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    proxy: Option<String>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Official Mail.tm API endpoint
    /// - 10 second request timeout
    /// - No proxy
    /// - reqwest's default user agent
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            proxy: None,
            user_agent: None,
        }
    }

    /// Override the API endpoint URL.
    ///
    /// Useful for testing against a local mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailtm_client::Client;
    /// # fn main() -> Result<(), mailtm_client::Error> {
    /// let client = Client::builder()
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Client {
            http: builder.build()?,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            proxy: self.proxy,
        })
    }
}
