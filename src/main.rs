use std::{env, io::Read, path::PathBuf, time::Duration};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chat_mimic::{
    config::{DEFAULT_GAP_THRESHOLD_MINUTES, MAX_GAP_MINUTES, MAX_PAGE_SIZE, PipelineConfig, ScrapeConfig},
    display::print_summary,
    processing::{pipeline, scrape::scrape_channel},
    serving::{build_prompt, extract_response, format_reply, strip_trigger},
    utils::file::read_records,
};

#[derive(Parser, Debug)]
#[command(name = "chat-mimic")]
#[command(author, version, about = "Turn a chat channel's history into per-author training data")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download a channel's full history (token read from DISCORD_TOKEN)
    Scrape {
        #[arg(long)]
        channel_id: u64,

        /// Where to write the dump; defaults to a timestamped file name
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = MAX_PAGE_SIZE)]
        page_size: u8,

        /// Pause between page requests
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },

    /// Build per-author JSONL datasets from a dump
    Build {
        #[arg(long, default_value = "messages/all_messages.json")]
        input: PathBuf,

        #[arg(long, default_value = "messages/user_messages")]
        output_dir: PathBuf,

        /// Minutes of silence that end a conversation
        #[arg(
            long,
            default_value_t = DEFAULT_GAP_THRESHOLD_MINUTES,
            value_parser = clap::value_parser!(i64).range(0..=MAX_GAP_MINUTES)
        )]
        gap_minutes: i64,
    },

    /// Print the model prompt for a live message
    Prompt {
        text: String,

        /// Only answer messages starting with `$<username>`
        #[arg(long)]
        username: Option<String>,
    },

    /// Read generated text on stdin and print the reply
    Extract {
        /// Mention this user in the reply
        #[arg(long)]
        author: Option<String>,
    },

    /// Show what an author dataset file contains
    Inspect { file: PathBuf },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_mimic=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Scrape {
            channel_id,
            output,
            page_size,
            delay_ms,
        } => {
            let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN not found in environment")?;
            let mut config = ScrapeConfig::new(token, channel_id).with_page_size(page_size);
            config.page_delay = Duration::from_millis(delay_ms);
            config.output_path = output;

            let (dump, path) = scrape_channel(&config).await?;
            println!("\n🎉 Scraped {} messages into {}", dump.len(), path.display());
        }

        Command::Build {
            input,
            output_dir,
            gap_minutes,
        } => {
            let config = PipelineConfig {
                gap_threshold_minutes: gap_minutes,
                input_path: input,
                output_dir,
            };
            let (stats, written) = match pipeline::run(&config) {
                Ok(result) => result,
                Err(e) => {
                    error!("Dataset build failed: {:?}", e);
                    return Err(e);
                }
            };
            print_summary(&stats)?;
            println!("\n💾 {} files written to {}", written.len(), config.output_dir.display());
        }

        Command::Prompt { text, username } => {
            let text = match username.as_deref() {
                Some(username) => match strip_trigger(&text, username) {
                    Some(rest) => rest.to_string(),
                    None => {
                        info!(username, "message does not address the mimic");
                        return Ok(());
                    }
                },
                None => text,
            };
            println!("{}", build_prompt(&text));
        }

        Command::Extract { author } => {
            let mut decoded = String::new();
            std::io::stdin()
                .read_to_string(&mut decoded)
                .context("Failed to read generated text from stdin")?;
            let response = extract_response(&decoded).context("Generated text has no separator marker")?;
            match author {
                Some(author) => println!("{}", format_reply(&author, &response)),
                None => println!("{}", response),
            }
        }

        Command::Inspect { file } => {
            let records = read_records(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            println!("📁 {}: {} records", file.display(), records.len());
            if let Some(first) = records.first() {
                println!("{}", serde_json::to_string_pretty(first)?);
            }
        }
    }

    Ok(())
}
