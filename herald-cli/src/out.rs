//! `out <input-dir>` — apply status and comments for the fetched version.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use herald_core::{PutRequest, PutResponse};
use herald_github::GithubClient;

/// Set a commit status and manage pull-request comments.
#[derive(Parser, Debug)]
#[command(
    name = "out",
    version,
    about = "Set commit status and pull-request comments from a CI build",
    long_about = None,
)]
pub struct OutArgs {
    /// Directory holding the build's inputs (the get step's checkout and any
    /// status / description / comment files).
    pub input_dir: PathBuf,
}

impl OutArgs {
    pub fn run(self) -> Result<()> {
        let request = read_request(std::io::stdin().lock())?;
        let response = self.put(&request)?;
        write_response(std::io::stdout().lock(), &response)
    }

    fn put(&self, request: &PutRequest) -> Result<PutResponse> {
        let client = GithubClient::new(&request.source).context("invalid source configuration")?;
        tracing::info!(
            "put for {} from {}",
            request.source.repository,
            self.input_dir.display()
        );
        herald_put::publish(&request.params, &client, &self.input_dir)
            .context("put step failed")
    }
}

fn read_request(mut reader: impl Read) -> Result<PutRequest> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("failed to read request from stdin")?;
    serde_json::from_str(&raw).context("failed to parse request")
}

fn write_response(mut writer: impl Write, response: &PutResponse) -> Result<()> {
    serde_json::to_writer(&mut writer, response).context("failed to write response")?;
    writeln!(writer)?;
    Ok(())
}
