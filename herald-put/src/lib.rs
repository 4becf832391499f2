//! # herald-put
//!
//! The put step: load the version written by the get step, resolve the
//! configured status / description / comments, and apply them through a
//! [`RemoteService`](herald_core::RemoteService) in a fixed order.
//!
//! Call [`publish`] from the binary, or [`publish_with_env`] when the
//! environment used for `$VAR` expansion must be controlled.

pub mod error;
pub mod publisher;

pub use error::{ErrorKind, PutError, RemoteStep};
pub use publisher::{publish, publish_with_env, resource_dir, within};
