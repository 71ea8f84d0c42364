//! GitHub REST v3 issue tracker

use crate::{Issue, IssueTracker, Milestone, NewIssue, TrackerConfig, TrackerError, TrackerResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

const PER_PAGE: usize = 100;

/// `owner/name` of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    /// Parse `owner/name`; `None` for a bare name
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// GitHub client bound to one repository
pub struct GithubClient {
    config: TrackerConfig,
    client: Client,
    repository: RepositoryRef,
}

impl GithubClient {
    /// Bind to a known repository without any network access
    pub fn for_repository(config: TrackerConfig, repository: RepositoryRef) -> Self {
        Self {
            client: Client::new(),
            config,
            repository,
        }
    }

    /// Resolve `repo` and verify it exists.
    ///
    /// A bare name is looked up under the authenticated user; `owner/name`
    /// is used as given. Any other shape containing `/` is rejected without
    /// a request.
    pub async fn connect(config: TrackerConfig, repo: &str) -> TrackerResult<Self> {
        let repo = repo.trim();
        if repo.is_empty() {
            return Err(TrackerError::RepositoryNotFound(String::new()));
        }
        if repo.contains('/') && RepositoryRef::parse(repo).is_none() {
            return Err(TrackerError::RepositoryNotFound(repo.to_string()));
        }

        let mut client = Self::for_repository(config, RepositoryRef::new("", repo));
        let candidate = match RepositoryRef::parse(repo) {
            Some(parsed) => parsed,
            None => RepositoryRef::new(&client.authenticated_login().await?, repo),
        };

        let response = client
            .request(Method::GET, &format!("/repos/{}", candidate.full_name()))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TrackerError::RepositoryNotFound(candidate.full_name()));
        }
        let found: GithubRepository = check_status(response).await?.json().await?;

        client.repository = RepositoryRef::new(&found.owner.login, &found.name);
        debug!(repository = %client.repository, "repository resolved");
        Ok(client)
    }

    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_url, path);
        debug!("github {} {}", method, url);
        self.client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", &self.config.user_agent)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
    }

    async fn authenticated_login(&self) -> TrackerResult<String> {
        let response = self.request(Method::GET, "/user").send().await?;
        let user: GithubUser = check_status(response).await?.json().await?;
        Ok(user.login)
    }

    /// GET every page of a list endpoint
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        state: &str,
    ) -> TrackerResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;
        loop {
            let response = self
                .request(Method::GET, path)
                .query(&[
                    ("state", state.to_string()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?;
            let batch: Vec<T> = check_status(response).await?.json().await?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    fn repo_path(&self, suffix: &str) -> String {
        format!("/repos/{}/{}", self.repository.full_name(), suffix)
    }
}

#[async_trait]
impl IssueTracker for GithubClient {
    async fn list_milestones(&self) -> TrackerResult<Vec<Milestone>> {
        let milestones: Vec<GithubMilestone> = self.get_all_pages(&self.repo_path("milestones"), "open").await?;
        Ok(milestones
            .into_iter()
            .map(|m| Milestone {
                number: m.number,
                title: m.title,
            })
            .collect())
    }

    async fn list_issues(&self) -> TrackerResult<Vec<Issue>> {
        // Pull requests come back from this endpoint too; their titles count.
        let issues: Vec<GithubIssue> = self.get_all_pages(&self.repo_path("issues"), "all").await?;
        Ok(issues.into_iter().map(Issue::from).collect())
    }

    async fn create_issue(&self, issue: NewIssue) -> TrackerResult<Issue> {
        let response = self
            .request(Method::POST, &self.repo_path("issues"))
            .json(&issue)
            .send()
            .await?;
        let created: GithubIssue = check_status(response).await?.json().await?;
        Ok(created.into())
    }
}

async fn check_status(response: Response) -> TrackerResult<Response> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GithubErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        return Err(TrackerError::ApiError { status, message });
    }
    Ok(response)
}

#[derive(Deserialize)]
struct GithubUser {
    login: String,
}

#[derive(Deserialize)]
struct GithubRepository {
    name: String,
    owner: GithubUser,
}

#[derive(Deserialize)]
struct GithubMilestone {
    number: u64,
    title: String,
}

#[derive(Deserialize)]
struct GithubIssue {
    number: u64,
    title: String,
}

impl From<GithubIssue> for Issue {
    fn from(issue: GithubIssue) -> Self {
        Issue {
            number: issue.number,
            title: issue.title,
        }
    }
}

#[derive(Deserialize)]
struct GithubErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_ref_parse() {
        assert_eq!(
            RepositoryRef::parse("saasx/soc2-certification"),
            Some(RepositoryRef::new("saasx", "soc2-certification"))
        );
        assert_eq!(RepositoryRef::parse("soc2-certification"), None);
        assert_eq!(RepositoryRef::parse("/name"), None);
        assert_eq!(RepositoryRef::parse("a/b/c"), None);
    }

    #[test]
    fn test_repo_path() {
        let client = GithubClient::for_repository(
            TrackerConfig::new("token"),
            RepositoryRef::new("saasx", "soc2"),
        );
        assert_eq!(client.repo_path("issues"), "/repos/saasx/soc2/issues");
        assert_eq!(client.repository().to_string(), "saasx/soc2");
    }
}
