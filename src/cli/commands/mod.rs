//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod horoscope;
mod index;
mod init;
mod serve;
mod stats;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use horoscope::run_horoscope;
pub use index::run_index;
pub use init::run_init;
pub use serve::{router, run_serve, AppState};
pub use stats::run_stats;
