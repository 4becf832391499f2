//! The capability the put step uses to mutate the hosting service.

/// Failure reported by a [`RemoteService`] implementation.
pub type RemoteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Side-effecting operations against the hosting service.
///
/// Implemented by the GitHub client and by in-memory doubles in tests. The
/// put step never constructs a concrete client itself.
pub trait RemoteService {
    /// Set a commit status. `context` is already environment-expanded.
    fn update_commit_status(
        &self,
        commit: &str,
        base_context: &str,
        context: &str,
        status: &str,
        target_url: &str,
        description: &str,
    ) -> Result<(), RemoteError>;

    /// Remove the comments this resource previously left on a pull request.
    fn delete_previous_comments(&self, pr: &str) -> Result<(), RemoteError>;

    /// Post a new pull-request comment.
    fn post_comment(&self, pr: &str, comment: &str) -> Result<(), RemoteError>;
}

