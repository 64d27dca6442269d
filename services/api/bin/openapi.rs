//! Writes the OpenAPI document of the interview API.
//!
//! Usage: `openapi [OUTPUT]` (defaults to `openapi.json`).

use anyhow::Context;
use interview_api::router::ApiDoc;
use std::path::PathBuf;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("openapi.json"));

    let document = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialise the OpenAPI document")?;
    std::fs::write(&path, document)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("OpenAPI document written to {}", path.display());
    Ok(())
}
