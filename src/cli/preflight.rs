//! Pre-flight checks before operations that call remote services.
//!
//! Catches a missing API key before a spinner starts, rather than as a failed turn.

use crate::astrology::{julian_day, MAX_JULIAN_DAY, MIN_JULIAN_DAY};
use crate::config::Settings;
use crate::error::{RaavanError, Result};
use chrono::Datelike;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Asking questions requires the completion API key.
    Ask,
    /// Indexing requires a configured vector store. `doctor` checks the embeddings endpoint.
    Index,
    /// Charts are computed locally; only the configured default birth date is checked.
    Horoscope,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ask => check_api_key(&settings.llm.api_key_env),
        Operation::Index => {
            if settings.vector_store.provider == "none" {
                return Err(RaavanError::Config(
                    "vector_store.provider is \"none\"; set it to \"sqlite\" to index files"
                        .to_string(),
                ));
            }
            Ok(())
        }
        Operation::Horoscope => {
            let date = settings.horoscope.default_birth_date;
            let jd = julian_day(date.year(), date.month(), date.day(), 12.0);
            if !(MIN_JULIAN_DAY..MAX_JULIAN_DAY).contains(&jd) {
                return Err(RaavanError::Config(format!(
                    "horoscope.default_birth_date {} is outside the supported years 1800 to 2050",
                    date
                )));
            }
            Ok(())
        }
    }
}

/// Check that the named environment variable holds a non-empty key.
fn check_api_key(env_var: &str) -> Result<()> {
    match std::env::var(env_var) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(RaavanError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            env_var, env_var
        ))),
        Err(_) => Err(RaavanError::Config(format!(
            "{} not set. Set it with: export {}='...' or add it to .env",
            env_var, env_var
        ))),
    }
}
