//! Snapshot logs and replay
//!
//! A snapshot log is newline-separated snapshot strings, appended as the
//! search explores or as a game is played. [`Replay`] steps back and forth
//! through such a sequence.

use crate::error::Result;
use crate::position::Position;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Destination for explored positions
pub trait SnapshotSink {
    fn append(&mut self, position: &Position) -> Result<()>;
}

/// Append-only, newline-separated snapshot writer
pub struct SnapshotLog<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> SnapshotLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Append one raw snapshot line
    pub fn append_line(&mut self, snapshot: &str) -> Result<()> {
        writeln!(self.writer, "{snapshot}")?;
        self.written += 1;
        Ok(())
    }

    /// Lines written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl SnapshotLog<BufWriter<File>> {
    /// Open a log file for appending, creating it if needed
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SnapshotSink for SnapshotLog<W> {
    fn append(&mut self, position: &Position) -> Result<()> {
        self.append_line(&position.serialize())
    }
}

/// Read a snapshot log, skipping blank lines
pub fn read_snapshots(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut snapshots = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if !line.is_empty() {
            snapshots.push(line.to_string());
        }
    }
    Ok(snapshots)
}

/// Cursor over a sequence of snapshots
#[derive(Clone, Debug)]
pub struct Replay {
    snapshots: Vec<String>,
    index: usize,
}

impl Replay {
    pub fn new(snapshots: Vec<String>) -> Self {
        Self { snapshots, index: 0 }
    }

    /// Replay a game's own history
    pub fn from_history(position: &Position) -> Self {
        Self::new(position.history().to_vec())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.snapshots.len()
    }

    /// Advance one frame, stopping at the last
    pub fn step_forward(&mut self) -> usize {
        if !self.at_end() {
            self.index += 1;
        }
        self.index
    }

    /// Go back one frame, stopping at the first
    pub fn step_back(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Jump to a frame, clamped to the last one
    pub fn seek(&mut self, index: usize) -> usize {
        self.index = index.min(self.snapshots.len().saturating_sub(1));
        self.index
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshots.get(self.index).map(String::as_str)
    }

    /// Decode the current frame into a fresh position
    pub fn position(&self) -> Option<Result<Position>> {
        self.snapshot().map(Position::from_snapshot)
    }
}
