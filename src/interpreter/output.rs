//! Output sinks for `print`
//!
//! The interpreter never writes to stdout itself. It is handed a [`PrintSink`]
//! at construction and appends every piece of `print` output to it, in order.
//!
//! - Any `FnMut(&str)` closure is a sink
//! - [`StdoutSink`]: buffered, locked stdout for the command-line tool
//! - [`CaptureSink`]: collects output in memory, for tests and embedding

use std::cell::RefCell;
use std::io::{self, BufWriter, StdoutLock, Write};
use std::rc::Rc;

/// Destination of `print` output
pub trait PrintSink {
    fn write_str(&mut self, text: &str);

    /// Push out anything buffered. Called once when a run ends.
    fn flush(&mut self) {}
}

impl<F: FnMut(&str)> PrintSink for F {
    fn write_str(&mut self, text: &str) {
        self(text)
    }
}

/// Buffered standard output. Write errors are kept and reported by
/// [`StdoutSink::finish`] rather than interrupting the program.
pub struct StdoutSink {
    out: BufWriter<StdoutLock<'static>>,
    error: Option<io::Error>,
}

impl StdoutSink {
    pub fn new() -> Self {
        StdoutSink {
            out: BufWriter::new(io::stdout().lock()),
            error: None,
        }
    }

    /// Flush and return the first write error, if any.
    pub fn finish(mut self) -> io::Result<()> {
        PrintSink::flush(&mut self);
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintSink for StdoutSink {
    fn write_str(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            self.error = Some(err);
        }
    }

    fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            self.error.get_or_insert(err);
        }
    }
}

/// In-memory sink. Clones share one buffer, so a clone can be handed to the
/// interpreter and the original read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    buffer: Rc<RefCell<String>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }
}

impl PrintSink for CaptureSink {
    fn write_str(&mut self, text: &str) {
        self.buffer.borrow_mut().push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_sink_shares_buffer() {
        let capture = CaptureSink::new();
        let mut handle = capture.clone();
        handle.write_str("a");
        handle.write_str("b\n");
        assert_eq!(capture.contents(), "ab\n");
    }

    #[test]
    fn test_closure_sink() {
        let mut collected = Vec::new();
        {
            let mut sink = |text: &str| collected.push(text.to_string());
            sink.write_str("x");
            sink.write_str("y");
        }
        assert_eq!(collected, vec!["x", "y"]);
    }
}
