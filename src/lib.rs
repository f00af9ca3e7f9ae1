//! Builds per-author conversational training data from a chat channel's history.
//!
//! A scraped, newest-first message dump is split into conversations, merged
//! into turns and paired into context/response records, one JSONL stream per
//! author.

pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod processing;
pub mod serving;
pub mod utils;

pub use config::{PipelineConfig, ScrapeConfig};
pub use error::PipelineError;
pub use models::{AuthorDataset, Conversation, RawMessage, TrainingRecord, Turn};
