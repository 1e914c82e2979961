//! HTTP client for communicating with the CloudCoreo API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use coreo_core::api::{
    self, CloudAccount, CloudAccountCreateRequest, CreateTeamRequest, GitKey, RoleCreationInfo,
    Team, Token,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Normalize a server URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Operations the CLI performs against the CloudCoreo platform.
///
/// Commands only see this trait, so tests can substitute a recording mock
/// for the HTTP client.
#[async_trait]
pub trait CoreoApi: Send + Sync {
    async fn list_cloud_accounts(&self, team_id: &str) -> Result<Vec<CloudAccount>>;

    async fn get_cloud_account(&self, team_id: &str, cloud_id: &str) -> Result<CloudAccount>;

    async fn delete_cloud_account(&self, team_id: &str, cloud_id: &str) -> Result<()>;

    /// Fetch the trust details needed to provision a role for `request`.
    async fn get_role_creation_info(
        &self,
        team_id: &str,
        request: &CloudAccountCreateRequest,
    ) -> Result<RoleCreationInfo>;

    async fn create_cloud_account(
        &self,
        team_id: &str,
        request: &CloudAccountCreateRequest,
    ) -> Result<CloudAccount>;

    async fn get_team(&self, team_id: &str) -> Result<Team>;

    async fn create_team(&self, name: &str, description: &str) -> Result<Team>;

    async fn get_token(&self, token_id: &str) -> Result<Token>;

    async fn delete_token(&self, token_id: &str) -> Result<()>;

    async fn get_git_key(&self, team_id: &str, git_key_id: &str) -> Result<GitKey>;

    async fn delete_git_key(&self, team_id: &str, git_key_id: &str) -> Result<()>;
}

/// HTTP client for the CloudCoreo REST API.
///
/// Every request is authenticated with HTTP basic auth built from the API key
/// and secret. Failed requests are never retried: a transport or API error is
/// terminal for the invoking command.
///
/// # Examples
///
/// ```no_run
/// use coreoctl::client::{CoreoApi, CoreoClient};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = CoreoClient::new(
///     "https://app.cloudcoreo.com/api".to_string(),
///     "api-key".to_string(),
///     "api-secret".to_string(),
///     30,
/// )?;
///
/// let team = client.get_team("team-id").await?;
/// println!("Team: {}", team.team_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CoreoClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl CoreoClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://app.cloudcoreo.com/api")
    /// * `api_key` - API key of the active profile
    /// * `api_secret` - Secret key of the active profile
    /// * `timeout_secs` - Request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: String,
        api_key: String,
        api_secret: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("coreo/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(&base_url),
            api_key,
            api_secret,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Process an HTTP response and extract the API data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP status code indicates failure (4xx or 5xx)
    /// - The response body cannot be read
    /// - The JSON cannot be deserialized
    /// - The API returns an error response
    async fn handle_response<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", endpoint))?;

        if !status.is_success() {
            let error_msg = match status {
                StatusCode::NOT_FOUND => format!("Resource {} not found", endpoint),
                StatusCode::BAD_REQUEST => format!("Bad request to {}: {}", endpoint, text),
                StatusCode::UNAUTHORIZED => format!(
                    "Unauthorized access to {}, check your API key and secret",
                    endpoint
                ),
                StatusCode::FORBIDDEN => format!("Access forbidden to {}", endpoint),
                StatusCode::INTERNAL_SERVER_ERROR => {
                    format!("Server error at {}: {}", endpoint, text)
                }
                StatusCode::SERVICE_UNAVAILABLE => format!("Service unavailable at {}", endpoint),
                _ => format!("HTTP {} error at {}: {}", status, endpoint, text),
            };
            return Err(anyhow::anyhow!(error_msg));
        }

        let api_response: api::ApiResponse<T> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {}", endpoint))?;

        match api_response {
            api::ApiResponse::Success { data } => Ok(data),
            api::ApiResponse::Error { error } => {
                Err(anyhow::anyhow!("Server error at {}: {}", endpoint, error))
            }
        }
    }

    /// Authenticate and send a request, then decode the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        debug!(endpoint, "Sending API request");

        let response = request
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", endpoint))?;

        debug!(endpoint, status = %response.status(), "Received API response");
        Self::handle_response(response, endpoint).await
    }
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[async_trait]
impl CoreoApi for CoreoClient {
    async fn list_cloud_accounts(&self, team_id: &str) -> Result<Vec<CloudAccount>> {
        let endpoint = format!("teams/{}/cloud-accounts", encode(team_id));

        self.execute(&endpoint, self.client.get(self.url(&endpoint)))
            .await
    }

    async fn get_cloud_account(&self, team_id: &str, cloud_id: &str) -> Result<CloudAccount> {
        let endpoint = format!(
            "teams/{}/cloud-accounts/{}",
            encode(team_id),
            encode(cloud_id)
        );

        self.execute(&endpoint, self.client.get(self.url(&endpoint)))
            .await
    }

    async fn delete_cloud_account(&self, team_id: &str, cloud_id: &str) -> Result<()> {
        let endpoint = format!(
            "teams/{}/cloud-accounts/{}",
            encode(team_id),
            encode(cloud_id)
        );

        self.execute(&endpoint, self.client.delete(self.url(&endpoint)))
            .await
            .map(|_: ()| ())
    }

    async fn get_role_creation_info(
        &self,
        team_id: &str,
        request: &CloudAccountCreateRequest,
    ) -> Result<RoleCreationInfo> {
        let endpoint = format!("teams/{}/cloud-accounts/role-info", encode(team_id));

        self.execute(
            &endpoint,
            self.client.post(self.url(&endpoint)).json(request),
        )
        .await
    }

    async fn create_cloud_account(
        &self,
        team_id: &str,
        request: &CloudAccountCreateRequest,
    ) -> Result<CloudAccount> {
        let endpoint = format!("teams/{}/cloud-accounts", encode(team_id));

        self.execute(
            &endpoint,
            self.client.post(self.url(&endpoint)).json(request),
        )
        .await
    }

    async fn get_team(&self, team_id: &str) -> Result<Team> {
        let endpoint = format!("teams/{}", encode(team_id));

        self.execute(&endpoint, self.client.get(self.url(&endpoint)))
            .await
    }

    async fn create_team(&self, name: &str, description: &str) -> Result<Team> {
        let endpoint = "teams";
        let request = CreateTeamRequest {
            team_name: name.to_string(),
            team_description: description.to_string(),
        };

        self.execute(
            endpoint,
            self.client.post(self.url(endpoint)).json(&request),
        )
        .await
    }

    async fn get_token(&self, token_id: &str) -> Result<Token> {
        let endpoint = format!("tokens/{}", encode(token_id));

        self.execute(&endpoint, self.client.get(self.url(&endpoint)))
            .await
    }

    async fn delete_token(&self, token_id: &str) -> Result<()> {
        let endpoint = format!("tokens/{}", encode(token_id));

        self.execute(&endpoint, self.client.delete(self.url(&endpoint)))
            .await
            .map(|_: ()| ())
    }

    async fn get_git_key(&self, team_id: &str, git_key_id: &str) -> Result<GitKey> {
        let endpoint = format!(
            "teams/{}/git-keys/{}",
            encode(team_id),
            encode(git_key_id)
        );

        self.execute(&endpoint, self.client.get(self.url(&endpoint)))
            .await
    }

    async fn delete_git_key(&self, team_id: &str, git_key_id: &str) -> Result<()> {
        let endpoint = format!(
            "teams/{}/git-keys/{}",
            encode(team_id),
            encode(git_key_id)
        );

        self.execute(&endpoint, self.client.delete(self.url(&endpoint)))
            .await
            .map(|_: ()| ())
    }
}
