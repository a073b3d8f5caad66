use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, Result};
use crate::pagination::{derive_total_pages, LinkHeader, PAGE_SIZE};
use crate::types::{GitHubRepo, GitHubUser};
use reqwest::header::LINK;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// One page of a user's repositories together with its pagination data.
#[derive(Debug, Clone)]
pub struct RepoPage {
    pub repos: Vec<GitHubRepo>,
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Build `{base}/users/{login}[/{extra}...]` with every segment escaped.
    fn user_url(&self, login: &str, extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ExplorerError::ConfigError(format!("Bad base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("users")
            .push(login)
            .extend(extra);
        Ok(url)
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        debug!(%url, "GitHub request");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            reqwest::StatusCode::NOT_FOUND => {
                Err(ExplorerError::NotFound(format!("Resource not found: {}", url)))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(ExplorerError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the profile of `login`.
    pub async fn get_user(&self, login: &str) -> Result<GitHubUser> {
        let url = self.user_url(login, &[])?;
        let response = self.make_request(url).await?;
        Self::read_json(response).await
    }

    /// Fetch one page of `login`'s repositories, `PAGE_SIZE` entries per page.
    pub async fn list_repositories(&self, login: &str, page: u32) -> Result<RepoPage> {
        let mut url = self.user_url(login, &["repos"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("page", &page.to_string());

        let response = self.make_request(url).await?;

        let link = match response.headers().get(LINK) {
            Some(value) => {
                let raw = value.to_str().map_err(|e| {
                    ExplorerError::InvalidLinkHeader(format!("Non-ASCII link header: {}", e))
                })?;
                Some(LinkHeader::parse(raw)?)
            }
            None => None,
        };

        let repos: Vec<GitHubRepo> = Self::read_json(response).await?;
        let total_pages = derive_total_pages(link.as_ref(), page, repos.len())?;

        debug!(login, page, total_pages, count = repos.len(), "Fetched repository page");

        Ok(RepoPage {
            repos,
            page,
            total_pages,
        })
    }
}
