//! Stats command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the stats command.
pub async fn run_stats(settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let stats = orchestrator.stats().await?;

    Output::header("Knowledge Base");
    Output::kv("Provider", &stats.provider);
    Output::kv("Embedding model", &stats.embedding_model);
    Output::kv("Documents", &stats.document_count.to_string());

    if stats.sources.is_empty() {
        println!();
        Output::info("Nothing indexed yet. Add texts with: raavan index <path>");
        return Ok(());
    }

    Output::header("Sources");
    for source in &stats.sources {
        Output::list_item(&format!(
            "{} ({}, {} chunks, indexed {})",
            source.title,
            source.source,
            source.chunk_count,
            source.indexed_at.format("%Y-%m-%d %H:%M")
        ));
    }

    Ok(())
}
