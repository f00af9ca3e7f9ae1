use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AuthorStats {
    pub name: String,
    pub records: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub messages: usize,
    pub conversations: usize,
    pub turns: usize,
    pub records: usize,
    pub author_stats: Vec<AuthorStats>,
    pub time_taken: Duration,
    start_time: std::time::Instant,
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStats {
    pub fn new() -> Self {
        Self {
            messages: 0,
            conversations: 0,
            turns: 0,
            records: 0,
            author_stats: Vec::new(),
            time_taken: Duration::default(),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn add_conversation(&mut self, messages: usize, turns: usize) {
        self.conversations += 1;
        self.messages += messages;
        self.turns += turns;
        self.records += turns;
    }

    pub fn add_author(&mut self, name: &str, records: usize) {
        self.author_stats.push(AuthorStats {
            name: name.to_string(),
            records,
        });
    }

    pub fn finish(&mut self) {
        self.time_taken = self.start_time.elapsed();
    }

    /// Average number of messages per conversation.
    pub fn messages_per_conversation(&self) -> f64 {
        if self.conversations == 0 {
            return 0.0;
        }
        self.messages as f64 / self.conversations as f64
    }
}

/// Live counters for a scrape in progress.
#[derive(Debug, Default, Clone)]
pub struct ScrapeProgress {
    pub channel: String,
    pub pages: usize,
    pub messages: usize,
    pub elapsed: Duration,
    pub output_path: String,
}
