use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::models::{AuthorDataset, RawMessage, TrainingRecord};

/// Picks `{channel}_messages_{timestamp}.json`, adding a counter if taken.
pub fn get_output_path(channel_name: &str) -> PathBuf {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let base_path = format!("{}_messages_{}.json", channel_name, timestamp);

    let mut counter = 0;
    let mut path = PathBuf::from(&base_path);

    while path.exists() {
        counter += 1;
        path = PathBuf::from(format!("{}_messages_{}_({}).json", channel_name, timestamp, counter));
    }

    path
}

pub fn read_dump(path: &Path) -> Result<Vec<RawMessage>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_dump(messages: &[RawMessage], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, messages)?;
    writer.flush()?;
    Ok(())
}

/// File an author's records are written to.
pub fn author_path(output_dir: &Path, author: &str) -> Result<PathBuf> {
    let unsafe_name = author.is_empty()
        || author == "."
        || author == ".."
        || author.contains(['/', '\\']);
    if unsafe_name {
        return Err(PipelineError::UnsafeAuthorName(author.to_string()));
    }
    Ok(output_dir.join(format!("{}.jsonl", author)))
}

/// Writes one JSONL file per author, replacing any previous file for them.
///
/// Returns the paths written, in author order. Nothing is created for an
/// empty dataset.
pub fn write_dataset(dataset: &AuthorDataset, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if dataset.is_empty() {
        return Ok(Vec::new());
    }

    // Validate every name before touching the disk.
    let targets = dataset
        .iter()
        .map(|(author, records)| {
            author_path(output_dir, author).map(|path| (author, records, path))
        })
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(targets.len());
    for (author, records, path) in targets {
        let mut writer = BufWriter::new(File::create(&path)?);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        info!(author, records = records.len(), path = %path.display(), "wrote author dataset");
        written.push(path);
    }

    Ok(written)
}

pub fn read_records(path: &Path) -> Result<Vec<TrainingRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

/// The raw training strings a trainer consumes from an author file.
pub fn train_texts(path: &Path) -> Result<Vec<String>> {
    Ok(read_records(path)?.into_iter().map(|r| r.train).collect())
}
