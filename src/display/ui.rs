use std::io::{Write, stdout};
use std::time::Instant;

use anyhow::Result;
use colorful::{Colorful, RGB};
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{Clear, ClearType},
};

use crate::models::{PipelineStats, ScrapeProgress};

struct Palette {
    primary: RGB,
    success: RGB,
    warning: RGB,
    info: RGB,
    subtle: RGB,
}

impl Palette {
    fn new() -> Self {
        Self {
            primary: RGB::new(79, 70, 229),  // Indigo
            success: RGB::new(16, 185, 129), // Emerald
            warning: RGB::new(245, 158, 11), // Amber
            info: RGB::new(59, 130, 246),    // Blue
            subtle: RGB::new(107, 114, 128), // Gray
        }
    }
}

/// Live scrape panel, redrawn in place at the top of the terminal.
pub struct Display {
    pub progress: ScrapeProgress,
    start_time: Instant,
}

impl Display {
    pub fn new(channel: String, output_path: String) -> Self {
        Self {
            progress: ScrapeProgress {
                channel,
                output_path,
                ..ScrapeProgress::default()
            },
            start_time: Instant::now(),
        }
    }

    pub fn record_page(&mut self, messages: usize) {
        self.progress.pages += 1;
        self.progress.messages += messages;
        self.progress.elapsed = self.start_time.elapsed();
    }

    pub fn update(&mut self) -> Result<()> {
        let mut stdout = stdout();
        stdout.execute(cursor::SavePosition)?;
        stdout.execute(cursor::MoveTo(0, 0))?;
        stdout.execute(Clear(ClearType::FromCursorDown))?;

        render_progress(&mut stdout, &self.progress)?;

        stdout.execute(cursor::RestorePosition)?;
        Ok(())
    }

    pub fn show_shutdown_message(&mut self) -> Result<()> {
        let mut stdout = stdout();
        let msg = "⚠️  Interrupted, saving collected messages..."
            .color(RGB::new(231, 76, 60))
            .to_string();
        writeln!(stdout, "\n  {}\n", msg)?;
        Ok(())
    }
}

pub fn render_progress<W: Write>(out: &mut W, progress: &ScrapeProgress) -> Result<()> {
    let palette = Palette::new();
    writeln!(out, "\n  📥 Scraping #{}", progress.channel.to_string().color(palette.info))?;
    writeln!(out, "     ├─ 📄 Pages: {}", progress.pages.to_string().color(palette.primary))?;
    writeln!(out, "     ├─ 📨 Messages: {}", progress.messages.to_string().color(palette.success))?;
    writeln!(out, "     ├─ 💾 Output: {}", progress.output_path.to_string().color(palette.warning))?;

    let minutes = progress.elapsed.as_secs() / 60;
    let seconds = progress.elapsed.as_secs() % 60;
    writeln!(
        out,
        "     └─ ⏱️  Time: {}m {}s",
        minutes.to_string().color(palette.subtle),
        seconds.to_string().color(palette.subtle)
    )?;
    Ok(())
}

pub fn render_summary<W: Write>(out: &mut W, stats: &PipelineStats) -> Result<()> {
    let palette = Palette::new();
    writeln!(out, "\n📊 Dataset Statistics:")?;
    writeln!(out, "⏱️  Time taken: {:.2?}", stats.time_taken)?;
    writeln!(out, "💬 Messages: {}", stats.messages.to_string().color(palette.success))?;
    writeln!(
        out,
        "🗣️  Conversations: {} ({:.1} messages each)",
        stats.conversations.to_string().color(palette.primary),
        stats.messages_per_conversation()
    )?;
    writeln!(out, "🔁 Turns: {}", stats.turns.to_string().color(palette.info))?;
    writeln!(out, "🧾 Records: {}", stats.records.to_string().color(palette.warning))?;

    if stats.author_stats.is_empty() {
        writeln!(out, "\n{}", "No messages, nothing written".to_string().color(palette.subtle))?;
        return Ok(());
    }

    writeln!(out, "\n📋 Per-author breakdown:")?;
    for author in &stats.author_stats {
        let share = if stats.records > 0 {
            author.records as f64 / stats.records as f64 * 100.0
        } else {
            0.0
        };
        writeln!(
            out,
            "  ├─ {} {} records ({:.1}%)",
            author.name.to_string().color(palette.info),
            author.records.to_string().color(palette.success),
            share
        )?;
    }
    Ok(())
}

pub fn print_summary(stats: &PipelineStats) -> Result<()> {
    let mut stdout = stdout();
    render_summary(&mut stdout, stats)?;
    stdout.flush()?;
    Ok(())
}
