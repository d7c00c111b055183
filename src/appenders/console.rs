//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::Write;

/// Stream a console appender writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Captured by the Lambda runtime and forwarded to CloudWatch
    #[default]
    Stdout,
    Stderr,
}

/// Writes each rendered record to stdout (or stderr) in one `write_all`
#[derive(Debug, Default)]
pub struct ConsoleAppender {
    stream: ConsoleStream,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
        }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &[u8]) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().lock().write_all(record)?,
            ConsoleStream::Stderr => std::io::stderr().lock().write_all(record)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => std::io::stdout().flush()?,
            ConsoleStream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            ConsoleStream::Stdout => "console",
            ConsoleStream::Stderr => "console-stderr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_appender_streams() {
        let mut appender = ConsoleAppender::new();
        assert_eq!(appender.stream(), ConsoleStream::Stdout);
        assert_eq!(appender.name(), "console");
        appender.append(b"level=\"INFO\" msg=\"console test\"\n").unwrap();
        appender.flush().unwrap();

        let appender = ConsoleAppender::stderr();
        assert_eq!(appender.name(), "console-stderr");
    }
}
