//! Raavan - a Ramayan guide and birth chart calculator
//!
//! Ask questions about the Ramayan and get answers in the voice of Raavan, the king of Lanka,
//! grounded in passages retrieved from an indexed copy of the epic. A second tool computes the
//! zodiac positions of the Sun, Moon and planets for a birth date.
//!
//! # Architecture
//!
//! - `config` - Settings and the persona prompt
//! - `chunking` - Splitting source texts for indexing
//! - `embedding` - Embedding generation
//! - `vector_store` - Vector database abstraction and similarity search
//! - `rag` - Context retrieval and answer generation
//! - `session` - Per-session chat history
//! - `astrology` - Ephemeris and birth charts
//! - `orchestrator` - Ties the pieces together for the CLI and HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use raavan::config::Settings;
//! use raavan::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let mut orchestrator = Orchestrator::new(settings)?;
//!
//!     let turn = orchestrator.ask("Who built the bridge to Lanka?").await;
//!     println!("{}", turn.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod astrology;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod session;
pub mod vector_store;

pub use error::{RaavanError, Result};
