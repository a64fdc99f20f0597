//! CLI output formatting utilities.

use crate::astrology::format::{format_birth_datetime, format_heading, format_position};
use crate::astrology::{BirthQuery, Chart};
use crate::session::ChatTurn;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print Raavan's reply; failed turns in red.
    pub fn answer(turn: &ChatTurn) {
        if turn.is_failed() {
            println!("\n{}\n", style(&turn.answer).red());
        } else {
            println!("\n{} {}\n", style("Raavan:").red().bold(), turn.answer);
        }
    }

    /// Print one past turn, truncated.
    pub fn history_item(index: usize, turn: &ChatTurn) {
        println!(
            "  {} {}",
            style(format!("{}.", index)).dim(),
            style(truncate_text(&turn.question, 100)).bold()
        );
        println!("     {}", truncate_text(&turn.answer, 100));
    }

    /// Print a birth chart.
    pub fn chart(query: &BirthQuery, chart: &Chart) {
        println!(
            "\n{} {}",
            style("🌟 Horoscope for").green().bold(),
            style(query.name.trim()).bold()
        );
        Self::kv("📍 Place", query.location.trim());
        Self::kv("📅 Date & Time", &format_birth_datetime(&query.datetime));

        Self::header("🪐 Planetary Positions");
        for position in chart.iter() {
            println!("\n{}", style(format_heading(position)).bold());
            for line in format_position(position) {
                println!("  🔸 {}", line);
            }
        }
        println!();
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Collapse newlines and cut to at most `max_chars`, the trailing `...` included.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let text = text.replace('\n', " ");
    if text.chars().count() <= max_chars {
        text
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 100), "short");
        assert_eq!(truncate_text("line one\nline two", 100), "line one line two");

        let long = "a".repeat(150);
        let cut = truncate_text(&long, 100);
        assert_eq!(cut.len(), 100);
        assert_eq!(cut, format!("{}...", "a".repeat(97)));

        assert_eq!(truncate_text(&"a".repeat(101), 100).len(), 100);
        assert_eq!(truncate_text(&"a".repeat(100), 100), "a".repeat(100));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let hindi = "रावण".repeat(40);
        let cut = truncate_text(&hindi, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }
}
