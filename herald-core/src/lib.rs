//! Herald core library — resource documents, status kinds, restricted
//! environment expansion and the remote-service seam.
//!
//! - [`types`] — version, metadata, put parameters, source config
//! - [`status`] — [`StatusKind`] and the allow-list check
//! - [`env`] — allow-listed `$VAR` expansion
//! - [`remote`] — [`RemoteService`], implemented by the GitHub client and test doubles
//! - [`error`] — [`ValidationError`]

pub mod env;
pub mod error;
pub mod remote;
pub mod status;
pub mod types;

pub use error::ValidationError;
pub use remote::{RemoteError, RemoteService};
pub use status::{validate_status, StatusKind};
pub use types::{Metadata, MetadataField, PutParameters, PutRequest, PutResponse, Source, Version};
