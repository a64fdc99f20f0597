//! Splitting source texts into overlapping chunks for indexing.
//!
//! Paragraphs (runs of non-blank lines) are packed greedily up to a target size. A paragraph
//! longer than the target is split on word boundaries. Each chunk after the first starts with
//! the last few words of the previous one, so a sentence cut at a boundary is still retrievable.
//! The overlap shrinks to fit, so no chunk exceeds the target unless a single word does.

use crate::config::ChunkingSettings;
use crate::error::{RaavanError, Result};
use serde::{Deserialize, Serialize};

/// A chunk of a source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Text content of this chunk.
    pub content: String,
    /// Position of this chunk in the source.
    pub order: i32,
}

/// Paragraph-packing chunker. Sizes are counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    target_chars: usize,
    overlap_chars: usize,
}

impl TextChunker {
    pub fn new(target_chars: usize, overlap_chars: usize) -> Result<Self> {
        if target_chars == 0 {
            return Err(RaavanError::Config(
                "chunking.target_chars must be greater than zero".to_string(),
            ));
        }
        if overlap_chars >= target_chars {
            return Err(RaavanError::Config(format!(
                "chunking.overlap_chars ({}) must be smaller than chunking.target_chars ({})",
                overlap_chars, target_chars
            )));
        }
        Ok(Self {
            target_chars,
            overlap_chars,
        })
    }

    pub fn from_settings(settings: &ChunkingSettings) -> Result<Self> {
        Self::new(settings.target_chars, settings.overlap_chars)
    }

    /// Split `text` into chunks. Blank input yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        let pieces: Vec<String> = paragraphs(text)
            .into_iter()
            .flat_map(|p| split_words(&p, self.target_chars))
            .collect();

        let mut chunks = Vec::new();
        let mut current = String::new();

        for piece in pieces {
            if current.is_empty() {
                current = piece;
                continue;
            }

            if char_len(&current) + 2 + char_len(&piece) <= self.target_chars {
                current.push_str("\n\n");
                current.push_str(&piece);
                continue;
            }

            let budget = self
                .overlap_chars
                .min(self.target_chars.saturating_sub(char_len(&piece) + 1));
            let tail = overlap_tail(&current, budget).to_string();
            push_chunk(&mut chunks, std::mem::take(&mut current));
            current = if tail.is_empty() {
                piece
            } else {
                format!("{} {}", tail, piece)
            };
        }

        if !current.is_empty() {
            push_chunk(&mut chunks, current);
        }
        chunks
    }
}

fn push_chunk(chunks: &mut Vec<TextChunk>, content: String) {
    let order = chunks.len() as i32;
    chunks.push(TextChunk { content, order });
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Non-blank paragraphs with their lines joined by single spaces.
fn paragraphs(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");
    let mut out = Vec::new();
    let mut lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            if !lines.is_empty() {
                out.push(lines.join(" "));
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        out.push(lines.join(" "));
    }
    out
}

/// Pack words into pieces of at most `limit` characters. A single word longer than `limit`
/// becomes its own piece.
fn split_words(paragraph: &str, limit: usize) -> Vec<String> {
    if char_len(paragraph) <= limit {
        return vec![paragraph.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        if !current.is_empty() && char_len(&current) + 1 + char_len(word) > limit {
            pieces.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// The last `overlap` characters of `text`, moved forward to the next word boundary.
fn overlap_tail(text: &str, overlap: usize) -> &str {
    if overlap == 0 {
        return "";
    }
    let count = char_len(text);
    if count <= overlap {
        return text.trim();
    }

    let start = text
        .char_indices()
        .nth(count - overlap)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let tail = &text[start..];

    if text[..start].ends_with(char::is_whitespace) {
        return tail.trim();
    }
    match tail.find(char::is_whitespace) {
        Some(i) => tail[i..].trim(),
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(TextChunker::new(0, 0).is_err());
        assert!(TextChunker::new(100, 100).is_err());
        assert!(TextChunker::new(100, 150).is_err());
        assert!(TextChunker::new(100, 99).is_ok());
        assert!(TextChunker::from_settings(&ChunkingSettings::default()).is_ok());
    }

    #[test]
    fn test_blank_text_has_no_chunks() {
        let chunker = TextChunker::new(100, 10).unwrap();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("  \n\n\t\n").is_empty());
    }

    #[test]
    fn test_short_paragraphs_share_a_chunk() {
        let chunker = TextChunker::new(200, 20).unwrap();
        let chunks = chunker.chunk("Rama went to the forest.\r\nSita followed.\r\n\r\nLakshmana too.");

        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0].content,
            "Rama went to the forest. Sita followed.\n\nLakshmana too."
        );
        assert_eq!(chunks[0].order, 0);
    }

    #[test]
    fn test_overlap_starts_at_word_boundary() {
        let chunker = TextChunker::new(50, 10).unwrap();
        let text = "alpha beta gamma delta epsilon\n\nzeta eta theta iota kappa lambda";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "alpha beta gamma delta epsilon");
        assert_eq!(chunks[1].content, "epsilon zeta eta theta iota kappa lambda");
        assert_eq!(chunks[1].order, 1);
    }

    #[test]
    fn test_long_paragraph_split_on_words() {
        let chunker = TextChunker::new(80, 0).unwrap();
        let words: Vec<String> = (0..100).map(|i| format!("word{}", i)).collect();
        let text = words.join(" ");

        let chunks = chunker.chunk(&text);
        assert!(chunks.len() > 1);

        let expected: HashSet<&str> = words.iter().map(|w| w.as_str()).collect();
        let mut seen = Vec::new();
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 80);
            for word in chunk.content.split_whitespace() {
                assert!(expected.contains(word), "split word: {word}");
                seen.push(word.to_string());
            }
        }
        // no overlap configured, so every word appears exactly once and in order
        assert_eq!(seen, words);
    }

    #[test]
    fn test_overlap_never_pushes_chunk_past_target() {
        let chunker = TextChunker::new(60, 20).unwrap();
        let words: Vec<String> = (0..60).map(|i| format!("shloka{}", i)).collect();
        let text = format!("{}\n\nRavana spoke.\n\n{}", words[..30].join(" "), words[30..].join(" "));

        let chunks = chunker.chunk(&text);
        assert!(chunks.len() > 2);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 60, "{:?}", chunk.content);
        }
        // short pieces still carry an overlap tail
        assert!(chunks.iter().any(|c| c.content.ends_with("Ravana spoke.") && c.content.len() > 13));
    }

    #[test]
    fn test_orders_are_sequential() {
        let chunker = TextChunker::new(40, 8).unwrap();
        let text = (0..20)
            .map(|i| format!("Paragraph number {} of the epic.", i))
            .collect::<Vec<_>>()
            .join("\n\n");

        let chunks = chunker.chunk(&text);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i as i32);
            assert!(!chunk.content.trim().is_empty());
        }
    }

    #[test]
    fn test_overlap_tail_handles_multibyte() {
        assert_eq!(overlap_tail("राम सीता लक्ष्मण", 7), "लक्ष्मण");
        assert_eq!(overlap_tail("short", 10), "short");
        assert_eq!(overlap_tail("abcdefghij", 3), "");
    }
}
