//! Blocking GitHub REST client.

use std::time::Duration;

use herald_core::env::process_env;
use herald_core::{RemoteError, RemoteService, Source};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{from_ureq, GithubError};
use crate::payload::{pull_request_number, CommentPayload, IssueComment, StatusPayload};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PAGE_SIZE: usize = 100;

/// GitHub client scoped to a single repository.
pub struct GithubClient {
    agent: ureq::Agent,
    endpoint: String,
    owner: String,
    repo: String,
    token: String,
}

#[derive(Deserialize)]
struct AuthenticatedUser {
    login: String,
}

impl GithubClient {
    /// Validate `source` and build a client for its repository.
    pub fn new(source: &Source) -> Result<Self, GithubError> {
        source.validate()?;
        let (owner, repo) = source.owner_and_name()?;
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("herald/", env!("CARGO_PKG_VERSION")))
            .build();
        Ok(Self {
            agent,
            endpoint: source.v3_endpoint(),
            owner: owner.to_owned(),
            repo: repo.to_owned(),
            token: source.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path.trim_start_matches('/'))
    }

    fn repo_url(&self, path: &str) -> String {
        self.url(&format!("repos/{}/{}/{}", self.owner, self.repo, path))
    }

    fn request(&self, method: &'static str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GithubError> {
        let response = self
            .request("GET", url)
            .call()
            .map_err(|e| from_ureq("GET", url, e))?;
        response.into_json().map_err(|source| GithubError::Decode {
            url: url.to_owned(),
            source,
        })
    }

    fn post_json<T: serde::Serialize>(&self, url: &str, body: &T) -> Result<(), GithubError> {
        self.request("POST", url)
            .send_json(body)
            .map_err(|e| from_ureq("POST", url, e))?;
        Ok(())
    }

    /// `POST /repos/{owner}/{repo}/statuses/{sha}`.
    pub fn create_status(&self, commit: &str, payload: &StatusPayload) -> Result<(), GithubError> {
        let url = self.repo_url(&format!("statuses/{commit}"));
        tracing::debug!("creating status {} on {commit}", payload.context);
        self.post_json(&url, payload)
    }

    /// Login of the account the access token belongs to.
    pub fn authenticated_login(&self) -> Result<String, GithubError> {
        let user: AuthenticatedUser = self.get_json(&self.url("user"))?;
        Ok(user.login)
    }

    /// Every comment on an issue or pull request, following pagination.
    pub fn list_issue_comments(&self, number: u64) -> Result<Vec<IssueComment>, GithubError> {
        let mut comments = Vec::new();
        for page in 1.. {
            let url = self.repo_url(&format!(
                "issues/{number}/comments?per_page={PAGE_SIZE}&page={page}"
            ));
            let batch: Vec<IssueComment> = self.get_json(&url)?;
            let last = batch.len() < PAGE_SIZE;
            comments.extend(batch);
            if last {
                break;
            }
        }
        Ok(comments)
    }

    /// `DELETE /repos/{owner}/{repo}/issues/comments/{id}`.
    pub fn delete_issue_comment(&self, id: u64) -> Result<(), GithubError> {
        let url = self.repo_url(&format!("issues/comments/{id}"));
        self.request("DELETE", &url)
            .call()
            .map_err(|e| from_ureq("DELETE", &url, e))?;
        Ok(())
    }
}

impl RemoteService for GithubClient {
    fn update_commit_status(
        &self,
        commit: &str,
        base_context: &str,
        context: &str,
        status: &str,
        target_url: &str,
        description: &str,
    ) -> Result<(), RemoteError> {
        let payload = StatusPayload::new(
            status,
            base_context,
            context,
            target_url,
            description,
            process_env,
        );
        self.create_status(commit, &payload)?;
        Ok(())
    }

    fn delete_previous_comments(&self, pr: &str) -> Result<(), RemoteError> {
        let number = pull_request_number(pr)?;
        let login = self.authenticated_login()?;
        let mut deleted = 0usize;
        for comment in self.list_issue_comments(number)? {
            if comment.authored_by(&login) {
                self.delete_issue_comment(comment.id)?;
                deleted += 1;
            }
        }
        tracing::debug!("deleted {deleted} comment(s) by {login} on #{number}");
        Ok(())
    }

    fn post_comment(&self, pr: &str, comment: &str) -> Result<(), RemoteError> {
        let number = pull_request_number(pr)?;
        let url = self.repo_url(&format!("issues/{number}/comments"));
        self.post_json(&url, &CommentPayload { body: comment })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(endpoint: Option<&str>) -> Source {
        Source {
            repository: "acme/widgets".into(),
            access_token: "t0ken".into(),
            v3_endpoint: endpoint.map(str::to_owned),
        }
    }

    #[test]
    fn builds_repository_urls_against_default_endpoint() {
        let client = GithubClient::new(&source(None)).expect("client");
        assert_eq!(
            client.repo_url("statuses/abc"),
            "https://api.github.com/repos/acme/widgets/statuses/abc"
        );
        assert_eq!(client.url("/user"), "https://api.github.com/user");
    }

    #[test]
    fn honours_enterprise_endpoint() {
        let client =
            GithubClient::new(&source(Some("https://ghe.example.com/api/v3"))).expect("client");
        assert_eq!(
            client.repo_url("issues/4/comments"),
            "https://ghe.example.com/api/v3/repos/acme/widgets/issues/4/comments"
        );
    }

    #[test]
    fn rejects_invalid_source() {
        let mut bad = source(None);
        bad.repository = "widgets".into();
        assert!(matches!(
            GithubClient::new(&bad),
            Err(GithubError::InvalidSource(_))
        ));
    }

    #[test]
    fn comment_calls_reject_non_numeric_pr_before_any_request() {
        let client = GithubClient::new(&source(Some("http://127.0.0.1:9/"))).expect("client");
        let err = client.post_comment("not-a-number", "hi").unwrap_err();
        assert_eq!(err.to_string(), "invalid pull request number 'not-a-number'");
        let err = client.delete_previous_comments("").unwrap_err();
        assert_eq!(err.to_string(), "invalid pull request number ''");
    }
}
