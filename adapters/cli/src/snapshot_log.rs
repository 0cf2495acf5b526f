use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use treasure_hunt_session::{Commit, GamePersistence};

/// Appends every commit to a writer as one JSON document per line.
#[derive(Debug)]
pub(crate) struct SnapshotLog<W: Write + Send> {
    writer: W,
}

impl SnapshotLog<BufWriter<File>> {
    /// Opens `path` for appending, creating it when missing.
    pub(crate) fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open snapshot log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> SnapshotLog<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_line(&mut self, commit: &Commit) -> Result<()> {
        serde_json::to_writer(&mut self.writer, commit).context("failed to encode commit")?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> GamePersistence for SnapshotLog<W> {
    fn on_commit(&mut self, commit: &Commit) {
        if let Err(error) = self.write_line(commit) {
            tracing::error!(sequence = commit.sequence, "snapshot log write failed: {error:#}");
        }
    }
}
