//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};
use std::path::Path;

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Raavan Setup");
    println!();
    println!("Welcome to the court of Lanka. Let's make sure everything is in order.\n");

    // Step 1: API key
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    let key_env = &settings.llm.api_key_env;
    if settings.llm.api_key().is_none() {
        Output::warning(&format!("{} is not set.", key_env));
        println!();
        println!("  Raavan needs a key for the chat-completion API at {}.", settings.llm.api_base);
        println!("  Set it in your shell or in a .env file next to where you run raavan:");
        println!("  {}", style(format!("{}=...", key_env)).green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'raavan init' again.");
            return Ok(());
        }
    } else {
        Output::success(&format!("{} is configured!", key_env));
    }

    println!();

    // Step 2: Directories
    println!("{}", style("Step 2: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    println!();

    // Step 3: Config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path.to_path_buf())?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("raavan doctor").cyan());
    println!("  {} Index the Ramayan", style("raavan index <path>").cyan());
    println!("  {} Ask a question", style("raavan ask \"<question>\"").cyan());
    println!("  {} Read your stars", style("raavan horoscope --name <n> --location <l>").cyan());
    println!();
    println!("For more help: {}", style("raavan --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
