//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    model: Option<String>,
    top_k: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'raavan doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.llm.model = model;
    }
    if let Some(k) = top_k {
        settings.rag.top_k = k;
    }

    let mut orchestrator = Orchestrator::new(settings)?;
    if !orchestrator.has_knowledge_base() {
        Output::warning("No knowledge base available; Raavan will answer without context.");
    }

    let spinner = Output::spinner(&orchestrator.prompts().persona.thinking);
    let turn = orchestrator.ask(question).await;
    spinner.finish_and_clear();

    Output::answer(&turn);

    if turn.is_failed() {
        anyhow::bail!("question could not be answered");
    }
    Ok(())
}
