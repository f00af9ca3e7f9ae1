use std::{future::Future, path::PathBuf, time::Duration};

use anyhow::{Context as _, Result};
use futures::stream::{self, Stream, StreamExt};
use serenity::{
    all::{Http, Message, MessageId, ReactionType},
    builder::GetMessages,
    model::id::ChannelId,
};
use tokio::signal::ctrl_c;
use tracing::{info, warn};

use crate::config::ScrapeConfig;
use crate::display::Display;
use crate::models::{Author, Mention, RawMessage};
use crate::utils::file::{get_output_path, write_dump};

async fn fetch_messages(
    http: &Http,
    channel_id: ChannelId,
    before: Option<MessageId>,
    page_size: u8,
) -> Result<Vec<Message>> {
    let request = GetMessages::default().limit(page_size);
    let request = if let Some(id) = before {
        request.before(id)
    } else {
        request
    };

    channel_id
        .messages(http, request)
        .await
        .map_err(Into::into)
}

/// Channel history as pages of messages, newest first.
///
/// Each request asks for messages before the oldest one already seen. The
/// stream ends on an empty page, or right after yielding a request error.
pub fn history_pages(
    http: &Http,
    channel_id: ChannelId,
    page_size: u8,
) -> impl Stream<Item = Result<Vec<Message>>> + '_ {
    stream::unfold(Some(None), move |cursor: Option<Option<MessageId>>| async move {
        let before = cursor?;
        match fetch_messages(http, channel_id, before, page_size).await {
            Ok(page) if page.is_empty() => None,
            Ok(page) => {
                let next = page.last().map(|m| m.id);
                Some((Ok(page), Some(next)))
            }
            Err(e) => Some((Err(e), None)),
        }
    })
}

/// Keeps only the fields the dataset builder reads.
pub fn slim_message(message: &Message) -> RawMessage {
    let reactions = message
        .reactions
        .iter()
        .filter_map(|reaction| {
            let name = match &reaction.reaction_type {
                ReactionType::Custom { name, .. } => name.as_ref().map(|n| n.to_string()),
                ReactionType::Unicode(emoji) => Some(emoji.to_string()),
                _ => None,
            }?;
            Some((name, reaction.count))
        })
        .collect();

    RawMessage {
        id: message.id.to_string(),
        content: message.content.to_string(),
        timestamp: message.timestamp.to_string(),
        kind: i64::from(u8::from(message.kind)),
        author: Author {
            id: message.author.id.to_string(),
            username: message.author.name.to_string(),
            global_name: message.author.global_name.as_ref().map(|n| n.to_string()),
        },
        mentions: message
            .mentions
            .iter()
            .map(|user| Mention {
                id: user.id.to_string(),
                username: user.name.to_string(),
            })
            .collect(),
        mention_everyone: message.mention_everyone,
        reactions,
    }
}

/// Waits out the delay between page requests. Returns `false` when
/// `shutdown` completes first.
async fn pause<F>(delay: Duration, shutdown: &mut F) -> bool
where
    F: Future + Unpin,
{
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = shutdown => false,
    }
}

/// Pulls a channel's full history and writes it as a newest-first JSON array.
///
/// A failed request or Ctrl+C ends pagination early; whatever was collected
/// is still written.
pub async fn scrape_channel(config: &ScrapeConfig) -> Result<(Vec<RawMessage>, PathBuf)> {
    let http = Http::new(&config.token);
    let channel_id = ChannelId::new(config.channel_id);
    let output_path = config
        .output_path
        .clone()
        .unwrap_or_else(|| get_output_path(&channel_id.to_string()));

    info!(channel = %channel_id, output = %output_path.display(), "starting scrape");

    let mut display = Display::new(channel_id.to_string(), output_path.display().to_string());
    let mut dump = Vec::new();

    let pages = history_pages(&http, channel_id, config.page_size);
    tokio::pin!(pages);
    let shutdown = ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            page = pages.next() => {
                match page {
                    Some(Ok(messages)) => {
                        dump.extend(messages.iter().map(slim_message));
                        display.record_page(messages.len());
                        display.update()?;
                    }
                    Some(Err(e)) => {
                        warn!(channel = %channel_id, error = %e, "request failed, stopping pagination");
                        break;
                    }
                    None => break,
                }
            }
            _ = &mut shutdown => {
                display.show_shutdown_message()?;
                warn!(channel = %channel_id, "interrupted, saving collected messages");
                break;
            }
        }

        if !pause(config.page_delay, &mut shutdown).await {
            display.show_shutdown_message()?;
            warn!(channel = %channel_id, "interrupted, saving collected messages");
            break;
        }
    }

    write_dump(&dump, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    info!(messages = dump.len(), output = %output_path.display(), "scrape finished");

    Ok((dump, output_path))
}
