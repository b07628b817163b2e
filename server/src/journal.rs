//! Append-only event journal
//!
//! Each line is `[<timestamp>] <message>`, written to
//! `<dir>/server-YYYY-MM-DD.log` for the UTC day of the line.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rover_relay_shared::RelayEvent;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{error, info};

pub struct EventJournal {
    dir: PathBuf,
}

impl EventJournal {
    /// Open a journal, creating the directory if needed
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Log file for a given day
    pub fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("server-{}.log", date.format("%Y-%m-%d")))
    }

    /// Append one line stamped with `at`
    pub async fn append(&self, at: DateTime<Utc>, message: &str) -> std::io::Result<()> {
        let line = format!(
            "[{}] {}\n",
            at.to_rfc3339_opts(SecondsFormat::Millis, true),
            message
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_for(at.date_naive()))
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }

    /// Append one line stamped with the current time
    pub async fn record(&self, message: &str) {
        if let Err(e) = self.append(Utc::now(), message).await {
            error!("[JOURNAL] Failed to write log line: {}", e);
        }
    }

    /// Write events until every sender is dropped
    pub async fn run(self, mut events: mpsc::UnboundedReceiver<RelayEvent>) {
        while let Some(event) = events.recv().await {
            self.record(&event.to_string()).await;
        }
        info!("[JOURNAL] Event stream closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");

        EventJournal::open(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_lines_go_to_dated_file() {
        let tmp = tempfile::tempdir().unwrap();
        let journal = EventJournal::open(tmp.path()).await.unwrap();

        let day_one = Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap();
        let day_two = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 1).unwrap();
        journal.append(day_one, "Camera HB received").await.unwrap();
        journal.append(day_one, "Command added: FORWARD").await.unwrap();
        journal.append(day_two, "Camera Status: Connected").await.unwrap();

        let first = std::fs::read_to_string(tmp.path().join("server-2024-05-01.log")).unwrap();
        assert_eq!(
            first,
            "[2024-05-01T23:59:59.000Z] Camera HB received\n\
             [2024-05-01T23:59:59.000Z] Command added: FORWARD\n"
        );

        let second = std::fs::read_to_string(tmp.path().join("server-2024-05-02.log")).unwrap();
        assert_eq!(second, "[2024-05-02T00:00:01.000Z] Camera Status: Connected\n");
    }

    #[tokio::test]
    async fn test_run_drains_events_until_closed() {
        let tmp = tempfile::tempdir().unwrap();
        let journal = EventJournal::open(tmp.path()).await.unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(RelayEvent::StopIssued).unwrap();
        tx.send(RelayEvent::QueueCleared { discarded: 4 }).unwrap();
        drop(tx);
        journal.run(rx).await;

        let mut contents = String::new();
        for entry in std::fs::read_dir(tmp.path()).unwrap() {
            contents.push_str(&std::fs::read_to_string(entry.unwrap().path()).unwrap());
        }
        assert!(contents.contains("No commands in queue, STOPPING ROVER"));
        assert!(contents.contains("CLEARING COMMAND QUEUE OF: 4 commands"));
    }
}
