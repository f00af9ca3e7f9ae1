mod conversation;
mod message;
mod record;
mod stats;

pub use conversation::{Conversation, Turn};
pub use message::{Author, Mention, RawMessage};
pub use record::{AuthorDataset, TrainingRecord};
pub use stats::{AuthorStats, PipelineStats, ScrapeProgress};
