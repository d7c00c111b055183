//! Appender over any `io::Write`

use crate::core::{Appender, Result};
use std::io::Write;

/// Forwards rendered records to an arbitrary writer
///
/// ```
/// use lambda_log_handler::appenders::WriterAppender;
/// use lambda_log_handler::Appender;
///
/// let mut appender = WriterAppender::new(Vec::new());
/// appender.append(b"msg=\"hi\"\n").unwrap();
/// assert_eq!(appender.into_inner(), b"msg=\"hi\"\n");
/// ```
#[derive(Debug)]
pub struct WriterAppender<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    pub fn named(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&mut self, record: &[u8]) -> Result<()> {
        self.writer.write_all(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_writer_appender_passes_bytes_through() {
        let mut appender = WriterAppender::named(Cursor::new(Vec::new()), "cursor");
        appender.append(b"a\n").unwrap();
        appender.append(b"b\n").unwrap();
        appender.flush().unwrap();

        assert_eq!(appender.name(), "cursor");
        assert_eq!(appender.get_ref().get_ref(), b"a\nb\n");
    }
}
