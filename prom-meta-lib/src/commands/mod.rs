//! Command-line interface and orchestration for prom-meta
//!
//! # Execution Flow
//!
//! The `run` function parses command-line arguments using clap, builds a [`Config`]
//! from an optional TOML file plus explicit flags, and hands it to the export
//! pipeline:
//!
//! 1. Fetch the metadata set from the server's `/api/v1/metadata` endpoint
//! 2. Select the renderer for the configured format
//! 3. Render everything to the host's output stream
//!
//! The steps are strictly sequential. Any failure ends the run: the diagnostic goes
//! to the host's error stream and the host is asked to exit with status 1.

mod config;
mod export;
mod host;
mod run;

pub use config::Config;
pub use export::export;
pub use host::Host;
pub use run::run;
