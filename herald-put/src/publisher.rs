//! Put orchestration.
//!
//! ## Step order
//!
//! 1. Validate `params`.
//! 2. Load `version.json` from `<input>/<path>/.git/resource/`.
//! 3. Load `metadata.json` from the same directory.
//! 4. Set the commit status (when `status` or `status_file` is given).
//! 5. Delete previous comments (when `delete_previous_comments`).
//! 6. Post the literal `comment`.
//! 7. Post the content of `comment_file`.
//!
//! The first failure aborts the remaining steps. Nothing already sent is
//! rolled back and nothing is retried.
//!
//! `path` and every `*_file` parameter resolve inside the input directory;
//! root, prefix and `..` components are dropped.

use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;

use herald_core::env::{expand_with, process_env};
use herald_core::{validate_status, Metadata, PutParameters, PutResponse, RemoteService, Version};

use crate::error::{read_err, remote_err, PutError, RemoteStep};

/// `<input_dir>/<path>/.git/resource` — where the get step leaves its state.
pub fn resource_dir(input_dir: &Path, path: &str) -> PathBuf {
    within(input_dir, path).join(".git").join("resource")
}

/// Join `relative` under `input_dir`, keeping only its normal components.
pub fn within(input_dir: &Path, relative: &str) -> PathBuf {
    let mut joined = input_dir.to_path_buf();
    for component in Path::new(relative).components() {
        if let Component::Normal(part) = component {
            joined.push(part);
        }
    }
    joined
}

/// Run the put step against the live process environment.
pub fn publish<R>(
    params: &PutParameters,
    remote: &R,
    input_dir: &Path,
) -> Result<PutResponse, PutError>
where
    R: RemoteService + ?Sized,
{
    publish_with_env(params, remote, input_dir, process_env)
}

/// Run the put step, resolving allow-listed `$VAR` references with `lookup`.
pub fn publish_with_env<R, F>(
    params: &PutParameters,
    remote: &R,
    input_dir: &Path,
    lookup: F,
) -> Result<PutResponse, PutError>
where
    R: RemoteService + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    params.validate().map_err(PutError::InvalidParameters)?;
    let expand = |text: &str| expand_with(text, &lookup).into_owned();

    let state_dir = resource_dir(input_dir, &params.path);
    let version: Version = load_document("version", &state_dir.join("version.json"))?;
    let metadata: Metadata = load_document("metadata", &state_dir.join("metadata.json"))?;
    tracing::debug!("loaded version pr={} commit={}", version.pr, version.commit);

    if params.sets_status() {
        let mut status = params.status.clone();
        let mut description = params.description.clone();

        if !params.status_file.is_empty() {
            status = read_input("status file", input_dir, &params.status_file)?
                .trim()
                .to_owned();
            validate_status(&status).map_err(PutError::InvalidStatusFile)?;
        }
        if !params.description_file.is_empty() {
            description = read_input("description file", input_dir, &params.description_file)?;
        }

        let context = expand(&params.context);
        tracing::info!("setting status '{status}' on {}", version.commit);
        remote
            .update_commit_status(
                &version.commit,
                &params.base_context,
                &context,
                &status,
                &expand(&params.target_url),
                &description,
            )
            .map_err(remote_err(RemoteStep::SetStatus))?;
    }

    if params.delete_previous_comments {
        tracing::info!("deleting previous comments on pull request {}", version.pr);
        remote
            .delete_previous_comments(&version.pr)
            .map_err(remote_err(RemoteStep::DeletePreviousComments))?;
    }

    if !params.comment.is_empty() {
        tracing::info!("posting comment on pull request {}", version.pr);
        remote
            .post_comment(&version.pr, &expand(&params.comment))
            .map_err(remote_err(RemoteStep::PostComment))?;
    }

    if !params.comment_file.is_empty() {
        let comment = read_input("comment file", input_dir, &params.comment_file)?;
        if comment.is_empty() {
            tracing::debug!("comment file {} is empty; skipping", params.comment_file);
        } else {
            tracing::info!(
                "posting comment from {} on pull request {}",
                params.comment_file,
                version.pr
            );
            remote
                .post_comment(&version.pr, &expand(&comment))
                .map_err(remote_err(RemoteStep::PostComment))?;
        }
    }

    Ok(PutResponse { version, metadata })
}

fn load_document<T: DeserializeOwned>(what: &'static str, path: &Path) -> Result<T, PutError> {
    let content = std::fs::read(path).map_err(|e| read_err(what, path, e))?;
    serde_json::from_slice(&content).map_err(|source| PutError::Decode {
        what,
        path: path.to_path_buf(),
        source,
    })
}

fn read_input(what: &'static str, input_dir: &Path, relative: &str) -> Result<String, PutError> {
    let path = within(input_dir, relative);
    tracing::debug!("reading {what} {}", path.display());
    std::fs::read_to_string(&path).map_err(|e| read_err(what, path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_dir_is_under_git_directory() {
        assert_eq!(
            resource_dir(Path::new("/tmp/build"), "pull-request"),
            PathBuf::from("/tmp/build/pull-request/.git/resource")
        );
    }

    #[test]
    fn absolute_path_stays_inside_input_dir() {
        assert_eq!(
            resource_dir(Path::new("/tmp/build"), "/pull-request"),
            PathBuf::from("/tmp/build/pull-request/.git/resource")
        );
    }

    #[test]
    fn parent_components_are_dropped() {
        assert_eq!(
            within(Path::new("/in"), "../../etc/./passwd"),
            PathBuf::from("/in/etc/passwd")
        );
        assert_eq!(within(Path::new("/in"), "/etc/hostname"), PathBuf::from("/in/etc/hostname"));
    }

    #[test]
    fn empty_path_resolves_relative_to_input_dir() {
        assert_eq!(
            resource_dir(Path::new("/in"), ""),
            PathBuf::from("/in/.git/resource")
        );
    }
}
