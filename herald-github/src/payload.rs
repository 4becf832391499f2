//! Request bodies and the defaults applied to them.

use serde::{Deserialize, Serialize};

use crate::error::GithubError;

pub const DEFAULT_BASE_CONTEXT: &str = "concourse-ci";
pub const DEFAULT_CONTEXT: &str = "status";

/// Body of `POST /repos/{owner}/{repo}/statuses/{sha}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPayload {
    pub state: String,
    pub target_url: String,
    pub description: String,
    pub context: String,
}

impl StatusPayload {
    /// Fill in defaults for empty inputs and lowercase the state.
    ///
    /// `lookup` resolves `ATC_EXTERNAL_URL` and `BUILD_ID` for the default
    /// target URL.
    pub fn new<F>(
        status: &str,
        base_context: &str,
        context: &str,
        target_url: &str,
        description: &str,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let state = status.to_ascii_lowercase();
        let base_context = non_empty_or(base_context, DEFAULT_BASE_CONTEXT);
        let context = non_empty_or(context, DEFAULT_CONTEXT);
        let target_url = if target_url.is_empty() {
            format!(
                "{}/builds/{}",
                lookup("ATC_EXTERNAL_URL").unwrap_or_default(),
                lookup("BUILD_ID").unwrap_or_default()
            )
        } else {
            target_url.to_owned()
        };
        let description = if description.is_empty() {
            format!("Concourse CI build {state}")
        } else {
            description.to_owned()
        };
        Self {
            state,
            target_url,
            description,
            context: format!("{base_context}/{context}"),
        }
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Body of `POST /repos/{owner}/{repo}/issues/{number}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPayload<'a> {
    pub body: &'a str,
}

/// The subset of an issue comment we read back.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub user: Option<Account>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
}

impl IssueComment {
    pub fn authored_by(&self, login: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.login == login)
    }
}

/// Parse a version's `pr` field into an issue number.
pub fn pull_request_number(pr: &str) -> Result<u64, GithubError> {
    match pr.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GithubError::InvalidPullRequest(pr.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ci_env(name: &str) -> Option<String> {
        match name {
            "ATC_EXTERNAL_URL" => Some("https://ci.example.com".to_owned()),
            "BUILD_ID" => Some("99".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn empty_fields_get_defaults() {
        let payload = StatusPayload::new("SUCCESS", "", "", "", "", ci_env);
        assert_eq!(
            payload,
            StatusPayload {
                state: "success".into(),
                target_url: "https://ci.example.com/builds/99".into(),
                description: "Concourse CI build success".into(),
                context: "concourse-ci/status".into(),
            }
        );
    }

    #[test]
    fn explicit_fields_are_kept() {
        let payload = StatusPayload::new(
            "pending",
            "ci",
            "unit-tests",
            "https://example.com/run/1",
            "running",
            ci_env,
        );
        assert_eq!(payload.context, "ci/unit-tests");
        assert_eq!(payload.target_url, "https://example.com/run/1");
        assert_eq!(payload.description, "running");
    }

    #[rstest]
    #[case("12", Some(12))]
    #[case(" 3 ", Some(3))]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("abc", None)]
    #[case("", None)]
    fn parses_pull_request_numbers(#[case] raw: &str, #[case] expected: Option<u64>) {
        assert_eq!(pull_request_number(raw).ok(), expected);
    }

    #[test]
    fn comment_authorship() {
        let comment: IssueComment =
            serde_json::from_str(r#"{"id":5,"user":{"login":"ci-bot"},"body":"x"}"#).unwrap();
        assert!(comment.authored_by("ci-bot"));
        assert!(!comment.authored_by("octocat"));
        let ghost: IssueComment = serde_json::from_str(r#"{"id":6,"user":null}"#).unwrap();
        assert!(!ghost.authored_by("ci-bot"));
    }
}
