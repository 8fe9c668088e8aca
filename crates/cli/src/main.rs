//! Host harness: classify a JSON usage export from the command line.
//!
//! Usage: `stockwise <usage.json>` (or `-` for stdin). Input is a JSON array
//! of item usage records; the report is printed as pretty JSON on stdout.

use std::io::Read;

use anyhow::Context;

use stockwise_abc::{AbcEngine, ClassificationRequest, ClassificationService, ItemUsage, TenantScope};
use stockwise_core::TenantId;

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
    }
}

fn main() -> anyhow::Result<()> {
    stockwise_observability::init_compact();

    let path = std::env::args()
        .nth(1)
        .context("usage: stockwise <usage.json | ->")?;

    let raw = read_input(&path)?;
    let items: Vec<ItemUsage> =
        serde_json::from_str(&raw).context("input must be a JSON array of item usage records")?;

    tracing::info!(items = items.len(), source = %path, "classifying usage export");

    let service = ClassificationService::new(TenantScope::Any, Box::new(AbcEngine::default()));
    let report = service.run(&ClassificationRequest::new(TenantId::new(), items))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
