#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI log.
//!
//! This crate provides:
//! - Domain types (measurements, result records, categories, views)
//! - Metric engine (BMI, classification, ideal weight)
//! - Persistence (key-value backends, history store)
//! - Session orchestration for interactive hosts
//! - CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod engine;
pub mod storage;
pub mod history;
pub mod session;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{classify, compute_bmi, ideal_weight_label};
pub use storage::{JsonFileBackend, KvBackend, MemoryBackend};
pub use history::{HistoryStore, DEFAULT_HISTORY_KEY};
pub use session::{SessionController, SessionSnapshot};
pub use export::write_history_csv;
