//! Doctor command - verify configuration and connectivity.

use crate::cli::Output;
use crate::config::Settings;
use crate::vector_store::{SqliteVectorStore, VectorStore};
use console::style;
use std::path::Path;
use std::time::Duration;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Raavan Doctor");
    println!();
    println!("Checking configuration and services...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let key_check = check_api_key(&settings.llm.api_key_env, settings.llm.api_key().as_deref());
    key_check.print();
    checks.push(key_check);

    let embed_check = check_embedding_endpoint(&settings.embedding.api_base).await;
    embed_check.print();
    checks.push(embed_check);

    println!();

    println!("{}", style("Knowledge Base").bold());
    let kb_checks = check_knowledge_base(settings).await;
    for check in &kb_checks {
        check.print();
    }
    checks.extend(kb_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before asking Raavan anything.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Raavan is ready to hold court.");
    }

    Ok(())
}

/// Check the completion API key without revealing it.
fn check_api_key(env_var: &str, key: Option<&str>) -> CheckResult {
    match key {
        Some(key) if key.chars().count() > 12 => {
            let head: String = key.chars().take(4).collect();
            let tail: String = key.chars().skip(key.chars().count() - 4).collect();
            CheckResult::ok(env_var, &format!("configured ({}...{})", head, tail))
        }
        Some(_) => CheckResult::warning(
            env_var,
            "set but unusually short",
            "Check the key at your provider's console",
        ),
        None => CheckResult::error(
            env_var,
            "not set",
            &format!("Set with: export {}='...' or add it to .env", env_var),
        ),
    }
}

/// Any HTTP response means the embeddings server is up.
async fn check_embedding_endpoint(api_base: &str) -> CheckResult {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(client) => client,
        Err(e) => return CheckResult::error("Embeddings", &e.to_string(), "Check TLS setup"),
    };

    match client.get(api_base).send().await {
        Ok(_) => CheckResult::ok("Embeddings", &format!("reachable at {}", api_base)),
        Err(e) => CheckResult::warning(
            "Embeddings",
            &format!("unreachable at {} ({})", api_base, e),
            "Start a sentence-transformers server or set embedding.api_base",
        ),
    }
}

async fn check_knowledge_base(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    match settings.vector_store.provider.as_str() {
        "sqlite" => {}
        "none" => {
            results.push(CheckResult::warning(
                "Vector store",
                "disabled",
                "Answers will have no retrieved context",
            ));
            return results;
        }
        other => {
            results.push(CheckResult::ok("Vector store", other));
            return results;
        }
    }

    let db_path = settings.sqlite_path();
    if !db_path.exists() {
        results.push(CheckResult::warning(
            "Database",
            &format!("{} (not created yet)", db_path.display()),
            "Create it with: raavan index <path>",
        ));
        return results;
    }

    let size = std::fs::metadata(&db_path)
        .map(|m| format_size(m.len()))
        .unwrap_or_else(|_| "unknown size".to_string());

    let count = match SqliteVectorStore::new(&db_path) {
        Ok(store) => store.document_count().await,
        Err(e) => Err(e),
    };

    results.push(match count {
        Ok(0) => CheckResult::warning(
            "Database",
            &format!("{} ({}, empty)", db_path.display(), size),
            "Index texts with: raavan index <path>",
        ),
        Ok(n) => CheckResult::ok(
            "Database",
            &format!("{} ({}, {} chunks)", db_path.display(), size, n),
        ),
        Err(e) => CheckResult::error(
            "Database",
            &format!("{} could not be opened: {}", db_path.display(), e),
            "Move the file aside and re-index",
        ),
    });

    results
}

fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning("Config file", "using defaults", "Create with: raavan init")
    }
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
