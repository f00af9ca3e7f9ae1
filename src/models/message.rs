use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PipelineError, Result};
use crate::utils::tokens::REPLY_MESSAGE_TYPE;

/// One scraped chat message, reduced to the fields the pipeline reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub kind: i64,
    pub author: Author,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mentions: Vec<Mention>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mention_everyone: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reactions: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub username: String,
}

impl RawMessage {
    pub fn is_reply(&self) -> bool {
        self.kind == REPLY_MESSAGE_TYPE
    }

    pub fn sent_at(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).map_err(|source| {
            PipelineError::InvalidTimestamp {
                message_id: self.id.clone(),
                timestamp: self.timestamp.clone(),
                source,
            }
        })
    }

    pub fn username(&self) -> &str {
        &self.author.username
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
