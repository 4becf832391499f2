//! Herald `out` — the put step of the pull-request resource.
//!
//! # Usage
//!
//! ```text
//! out <input-dir> < request.json > response.json
//! ```
//!
//! The request (`{"source": {...}, "params": {...}}`) arrives on stdin and the
//! response (`{"version": {...}, "metadata": [...]}`) goes to stdout. Logs go
//! to stderr; set `RUST_LOG` to change verbosity.

mod logging;
mod out;

use anyhow::Result;
use clap::Parser;

use out::OutArgs;

fn main() -> Result<()> {
    logging::init();
    let args = OutArgs::parse();
    args.run()
}
