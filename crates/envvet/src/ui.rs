use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use crossterm::style::Stylize;

/// Terminal-facing logger for the debug dump.
///
/// Writes through a shared sink so hosts and tests can redirect the
/// output. Coloring is applied only when writing to a real terminal.
#[derive(Clone)]
pub struct Ui {
    use_color: bool,
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Ui {
    /// Ui writing to stderr, colored when stderr is a terminal.
    pub fn stderr() -> Self {
        Self {
            use_color: io::stderr().is_terminal(),
            sink: Arc::new(Mutex::new(Box::new(io::stderr()))),
        }
    }

    /// Ui writing to an arbitrary sink, uncolored.
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self {
            use_color: false,
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Ui writing to an in-memory buffer, plus a handle that reads it
    /// back.
    pub fn capture() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        let sink = SharedSink {
            buffer: Arc::clone(&captured.buffer),
        };
        (Self::with_sink(Box::new(sink)), captured)
    }

    /// Write one line. Write failures are ignored; the dump never alters
    /// control flow.
    pub fn log(&self, line: &str) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{line}");
        }
    }

    /// Cyan when color is on, unchanged otherwise.
    pub fn cyan(&self, text: &str) -> String {
        if self.use_color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Handle over a captured sink, for asserting on debug output.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }

    /// Written lines, without trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

struct SharedSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "failed to lock sink"))?;
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
