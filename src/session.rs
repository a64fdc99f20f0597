//! Conversation history for one chat session.

use serde::{Deserialize, Serialize};

/// Whether a turn produced an answer or an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnOutcome {
    Answered,
    Failed,
}

/// One question and the reply shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    pub outcome: TurnOutcome,
}

impl ChatTurn {
    pub fn answered(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            outcome: TurnOutcome::Answered,
        }
    }

    /// A turn whose answer is a user-facing error message.
    pub fn failed(question: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: message.into(),
            outcome: TurnOutcome::Failed,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == TurnOutcome::Failed
    }
}

/// Ordered, append-only list of turns. Only [`SessionHistory::clear`] removes entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    turns: Vec<ChatTurn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// All turns, oldest first.
    pub fn all(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
