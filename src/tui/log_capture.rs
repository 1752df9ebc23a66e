//! In-memory sink for tracing output while the TUI owns the terminal.
//!
//! `LogBuffer` implements `MakeWriter`, so the fmt layer writes complete
//! lines into a bounded queue instead of stderr. The debug log pane drains
//! the queue on every frame.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

/// Lines held between two drains. The oldest are dropped first.
const CAPACITY: usize = 500;

#[derive(Default)]
struct Queue {
    lines: VecDeque<String>,
    /// Lines evicted before anyone drained them.
    dropped: usize,
}

/// Shared, bounded queue of log lines.
#[derive(Clone, Default)]
pub struct LogBuffer {
    queue: Arc<Mutex<Queue>>,
}

/// Result of a drain: new lines (oldest first) and how many were lost.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Drained {
    pub lines: Vec<String>,
    pub dropped: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means a writer panicked mid-push; the queue is
    /// still usable.
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, line: String) {
        let mut queue = self.lock();
        if queue.lines.len() >= CAPACITY {
            queue.lines.pop_front();
            queue.dropped += 1;
        }
        queue.lines.push_back(line);
    }

    /// Take everything queued so far.
    pub fn drain(&self) -> Drained {
        let mut queue = self.lock();
        Drained {
            lines: queue.lines.drain(..).collect(),
            dropped: std::mem::take(&mut queue.dropped),
        }
    }
}

/// Per-event writer handed out to the fmt layer. Splits on newlines and
/// pushes each complete line.
pub struct LineWriter {
    buffer: LogBuffer,
    partial: Vec<u8>,
}

impl LineWriter {
    fn push_complete_lines(&mut self) {
        while let Some(pos) = self.partial.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.partial.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]);
            self.buffer.push(text.trim_end_matches('\r').to_string());
        }
    }
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.partial.extend_from_slice(buf);
        self.push_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.partial.is_empty() {
            let text = String::from_utf8_lossy(&self.partial).into_owned();
            self.buffer.push(text);
            self.partial.clear();
        }
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            buffer: self.clone(),
            partial: Vec::new(),
        }
    }
}
