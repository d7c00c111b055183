//! Appender trait for rendered-record destinations

use super::error::Result;

/// Destination for rendered records.
///
/// `append` receives one complete record, newline included. Handlers call it
/// under their sink lock, so implementations need no synchronisation of their
/// own.
pub trait Appender: Send {
    fn append(&mut self, record: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
