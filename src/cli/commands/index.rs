//! Index command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use std::path::Path;

/// Run the index command.
pub async fn run_index(path: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Index, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let path = Settings::expand_path(path);
    let orchestrator = Orchestrator::new(settings)?;
    if !orchestrator.has_knowledge_base() {
        anyhow::bail!("Knowledge base could not be opened; run 'raavan doctor'");
    }

    let spinner = Output::spinner(&format!("Indexing {}...", path.display()));
    let result = orchestrator.index_path(Path::new(&path)).await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            Output::error(&format!("Indexing failed: {}", e));
            return Err(e.into());
        }
    };

    Output::header("Indexed");
    for file in &report.files {
        Output::list_item(&format!("{} ({} chunks)", file.source, file.chunks));
    }
    println!();
    Output::success(&format!(
        "Indexed {} chunks from {} file(s)",
        report.total_chunks,
        report.files.len()
    ));

    Ok(())
}
