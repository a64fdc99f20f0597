//! Interactive chat command.

use crate::cli::output::truncate_text;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use console::style;
use std::io::{self, BufRead, Write};

/// What the user typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum ChatInput<'a> {
    Empty,
    Exit,
    Clear,
    History,
    Help,
    Question(&'a str),
}

fn parse_input(line: &str) -> ChatInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }
    match line.to_ascii_lowercase().as_str() {
        "exit" | "quit" => ChatInput::Exit,
        "clear" => ChatInput::Clear,
        "history" => ChatInput::History,
        "help" => ChatInput::Help,
        _ => ChatInput::Question(line),
    }
}

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, mut settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'raavan doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.llm.model = model;
    }

    let mut orchestrator = Orchestrator::new(settings)?;
    let persona = orchestrator.prompts().persona.clone();

    println!("\n{}", style("👑 Raavan AI").bold().red());
    println!("{}\n", style("Type 'help' for commands, 'exit' to leave the court.").dim());

    if !orchestrator.has_knowledge_base() {
        Output::warning("No knowledge base available; Raavan will answer without context.");
    }
    if orchestrator.history().is_empty() {
        println!("{}\n", persona.welcome);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        match parse_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Exit => {
                Output::info("Go, mortal. Lanka's gates close behind you.");
                break;
            }
            ChatInput::Clear => {
                orchestrator.clear_history();
                Output::info("Conversation history cleared.");
            }
            ChatInput::History => {
                let history = orchestrator.history();
                if history.is_empty() {
                    Output::info("No questions asked yet.");
                } else {
                    Output::header("Chat History");
                    for (i, turn) in history.all().iter().enumerate() {
                        Output::history_item(i + 1, turn);
                    }
                    println!();
                }
            }
            ChatInput::Help => {
                Output::list_item("Ask any question about the Ramayan");
                Output::list_item("history  show this session's questions");
                Output::list_item("clear    forget this session");
                Output::list_item("exit     leave");
            }
            ChatInput::Question(question) => {
                let spinner = Output::spinner(&persona.thinking);
                let turn = orchestrator.ask(question).await;
                spinner.finish_and_clear();

                Output::answer(&turn);
                tracing::debug!("Answered '{}'", truncate_text(question, 100));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   \n"), ChatInput::Empty);
        assert_eq!(parse_input("QUIT\n"), ChatInput::Exit);
        assert_eq!(parse_input("exit"), ChatInput::Exit);
        assert_eq!(parse_input(" clear "), ChatInput::Clear);
        assert_eq!(parse_input("history"), ChatInput::History);
        assert_eq!(parse_input("help"), ChatInput::Help);
        assert_eq!(
            parse_input("  Who built the bridge to Lanka?\n"),
            ChatInput::Question("Who built the bridge to Lanka?")
        );
    }
}
