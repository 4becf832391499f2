//! Documents exchanged with the CI system and the prior get step.
//!
//! Field names follow the resource's JSON wire format; optional fields are
//! omitted on output when absent so decoded documents re-encode unchanged.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::status::validate_status;

/// Default GitHub REST endpoint when `source.v3_endpoint` is not set.
pub const DEFAULT_V3_ENDPOINT: &str = "https://api.github.com/";

// ---------------------------------------------------------------------------
// Version / Metadata
// ---------------------------------------------------------------------------

/// The commit / pull-request pair a build ran against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Pull-request number, kept as the string the get step wrote.
    pub pr: String,
    /// Head commit SHA.
    pub commit: String,
    /// Commit timestamp, kept as written so the version echoes unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_review_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A single `{name, value}` metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

/// Ordered descriptive facts about a version. Passed through untouched.
///
/// A JSON `null` decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(pub Vec<MetadataField>);

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Option::<Vec<MetadataField>>::deserialize(deserializer)?;
        Ok(Metadata(fields.unwrap_or_default()))
    }
}

// ---------------------------------------------------------------------------
// Put parameters
// ---------------------------------------------------------------------------

/// Configuration for one put invocation (`params` in the request).
///
/// File fields are paths relative to the input directory and take precedence
/// over their literal counterparts, except for comments where both are posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PutParameters {
    pub path: String,
    pub base_context: String,
    pub context: String,
    pub target_url: String,
    pub description_file: String,
    pub description: String,
    pub status_file: String,
    pub status: String,
    pub comment_file: String,
    pub comment: String,
    pub delete_previous_comments: bool,
}

impl PutParameters {
    /// Reject an unknown literal status. An empty status is valid; a status
    /// file is checked only once its content has been read.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.status.is_empty() {
            return Ok(());
        }
        validate_status(&self.status).map(|_| ())
    }

    /// Whether a status update step will run.
    pub fn sets_status(&self) -> bool {
        !self.status.is_empty() || !self.status_file.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Resource-level configuration (`source` in the request).
///
/// Missing fields decode as empty and are reported by [`Source::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    pub repository: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v3_endpoint: Option<String>,
}

impl Source {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.repository.is_empty() {
            return Err(ValidationError::MissingSourceField("repository"));
        }
        if self.access_token.is_empty() {
            return Err(ValidationError::MissingSourceField("access_token"));
        }
        self.owner_and_name().map(|_| ())
    }

    /// Split `repository` into `(owner, name)`.
    pub fn owner_and_name(&self) -> Result<(&str, &str), ValidationError> {
        match self.repository.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok((owner, name))
            }
            _ => Err(ValidationError::InvalidRepository(self.repository.clone())),
        }
    }

    /// REST endpoint with a guaranteed trailing slash.
    pub fn v3_endpoint(&self) -> String {
        let endpoint = self
            .v3_endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_V3_ENDPOINT);
        if endpoint.ends_with('/') {
            endpoint.to_owned()
        } else {
            format!("{endpoint}/")
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Document read from stdin by the `out` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutRequest {
    pub source: Source,
    #[serde(default)]
    pub params: PutParameters,
}

/// Document written to stdout: the state that was acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutResponse {
    pub version: Version,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}
