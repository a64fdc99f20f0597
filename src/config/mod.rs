//! Configuration module for Raavan.
//!
//! Handles loading and managing application settings and the persona prompt.

mod prompts;
mod settings;

pub use prompts::{PersonaPrompts, Prompts, OUT_OF_CONTEXT_REPLY};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, GeneralSettings, HoroscopeSettings, LlmSettings,
    PromptSettings, RagSettings, Settings, VectorStoreSettings,
};
