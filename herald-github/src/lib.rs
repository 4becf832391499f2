//! # herald-github
//!
//! [`RemoteService`](herald_core::RemoteService) over the GitHub REST v3 API.
//!
//! Build a [`GithubClient`] from the resource `source` and hand it to the put
//! step. All calls are blocking and made once; nothing is retried here.

pub mod client;
pub mod error;
pub mod payload;

pub use client::GithubClient;
pub use error::GithubError;
