//! RAG (Retrieval-Augmented Generation) for answering questions about the Ramayan.
//!
//! Retrieval turns a question into a context string; the answer service sends the question,
//! the context and the persona prompt to a chat-completion endpoint.

pub mod answer;
pub mod context;

pub use answer::{build_messages, user_message, AnswerError, AnswerService, Answerer, ChatMessage, WARNING_MARKER};
pub use context::{join_chunks, ContextRetriever, RetrievedContext};
