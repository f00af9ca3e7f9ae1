use std::{path::PathBuf, time::Duration};

use crate::error::{PipelineError, Result};

pub const DEFAULT_GAP_THRESHOLD_MINUTES: i64 = 10;
/// One year.
pub const MAX_GAP_MINUTES: i64 = 60 * 24 * 365;
pub const MAX_PAGE_SIZE: u8 = 100;

/// Settings for turning a raw dump into per-author datasets.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// A non-reply message arriving more than this many minutes after the
    /// previous one opens a new conversation.
    pub gap_threshold_minutes: i64,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gap_threshold_minutes: DEFAULT_GAP_THRESHOLD_MINUTES,
            input_path: PathBuf::from("messages/all_messages.json"),
            output_dir: PathBuf::from("messages/user_messages"),
        }
    }
}

impl PipelineConfig {
    pub fn gap_threshold(&self) -> Result<chrono::Duration> {
        let minutes = self.gap_threshold_minutes;
        if !(0..=MAX_GAP_MINUTES).contains(&minutes) {
            return Err(PipelineError::InvalidGapThreshold(minutes));
        }
        chrono::Duration::try_minutes(minutes).ok_or(PipelineError::InvalidGapThreshold(minutes))
    }
}

/// Settings for pulling a channel's history.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub token: String,
    pub channel_id: u64,
    pub page_size: u8,
    pub page_delay: Duration,
    pub output_path: Option<PathBuf>,
}

impl ScrapeConfig {
    pub fn new(token: String, channel_id: u64) -> Self {
        Self {
            token,
            channel_id,
            page_size: MAX_PAGE_SIZE,
            page_delay: Duration::from_secs(1),
            output_path: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}
