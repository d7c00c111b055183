//! Log level definitions
//!
//! Severities are plain integers so that any value between the named tiers can
//! be expressed as a tier plus a signed offset (`WARN+2`, `TRACE-4`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const TRACE_DEBUG_OFFSET: i32 = 4;
const FATAL_ERROR_OFFSET: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogLevel(i32);

impl LogLevel {
    pub const TRACE: LogLevel = LogLevel(-4 - TRACE_DEBUG_OFFSET);
    pub const DEBUG: LogLevel = LogLevel(-4);
    pub const INFO: LogLevel = LogLevel(0);
    pub const WARN: LogLevel = LogLevel(4);
    pub const ERROR: LogLevel = LogLevel(8);
    pub const FATAL: LogLevel = LogLevel(8 + FATAL_ERROR_OFFSET);

    const TIERS: [(&'static str, LogLevel); 6] = [
        ("TRACE", LogLevel::TRACE),
        ("DEBUG", LogLevel::DEBUG),
        ("INFO", LogLevel::INFO),
        ("WARN", LogLevel::WARN),
        ("ERROR", LogLevel::ERROR),
        ("FATAL", LogLevel::FATAL),
    ];

    #[must_use]
    pub const fn new(value: i32) -> Self {
        LogLevel(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Level `delta` steps away from this one.
    #[must_use]
    pub const fn offset(self, delta: i32) -> Self {
        LogLevel(self.0.saturating_add(delta))
    }

    /// Decode a level name the way `AWS_LAMBDA_LOG_LEVEL` is interpreted.
    ///
    /// Case-insensitive, surrounding whitespace ignored. Anything unrecognized,
    /// including the empty string, is `INFO`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "trace" => LogLevel::TRACE,
            "debug" => LogLevel::DEBUG,
            "warn" => LogLevel::WARN,
            "error" => LogLevel::ERROR,
            "fatal" => LogLevel::FATAL,
            _ => LogLevel::INFO,
        }
    }

    /// The named tier this level falls in and its offset from that tier's base.
    #[must_use]
    pub fn tier(self) -> (&'static str, i32) {
        let (name, base) = match self.0 {
            v if v < LogLevel::DEBUG.0 => ("TRACE", LogLevel::TRACE),
            v if v < LogLevel::INFO.0 => ("DEBUG", LogLevel::DEBUG),
            v if v < LogLevel::WARN.0 => ("INFO", LogLevel::INFO),
            v if v < LogLevel::ERROR.0 => ("WARN", LogLevel::WARN),
            v if v < LogLevel::FATAL.0 => ("ERROR", LogLevel::ERROR),
            _ => ("FATAL", LogLevel::FATAL),
        };
        (name, self.0 - base.0)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, offset) = self.tier();
        if offset == 0 {
            f.write_str(name)
        } else {
            write!(f, "{}{:+}", name, offset)
        }
    }
}

/// Strict parse of an encoded level, offsets included (`"WARN+2"`, `"trace-4"`).
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (name, offset) = match trimmed.find(['+', '-']) {
            Some(idx) => {
                let offset = trimmed[idx..]
                    .parse::<i32>()
                    .map_err(|e| format!("Invalid level offset in '{}': {}", s, e))?;
                (&trimmed[..idx], offset)
            }
            None => (trimmed, 0),
        };

        LogLevel::TIERS
            .iter()
            .find(|(tier, _)| tier.eq_ignore_ascii_case(name))
            .map(|(_, base)| base.offset(offset))
            .ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_else(|_| LogLevel::from_name(&name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        let cases = [
            ("TRACE", LogLevel::DEBUG.offset(-4)),
            ("DEBUG", LogLevel::DEBUG),
            ("INFO", LogLevel::INFO),
            ("WARN", LogLevel::WARN),
            ("ERROR", LogLevel::ERROR),
            ("FATAL", LogLevel::ERROR.offset(4)),
            ("trace", LogLevel::TRACE),
            ("debug", LogLevel::DEBUG),
            ("info", LogLevel::INFO),
            ("Warn", LogLevel::WARN),
            (" error", LogLevel::ERROR),
            (" info ", LogLevel::INFO),
            ("", LogLevel::INFO),
            ("verbose", LogLevel::INFO),
        ];

        for (name, level) in cases {
            assert_eq!(LogLevel::from_name(name), level, "decoding {:?}", name);
        }
    }

    #[test]
    fn test_display() {
        let cases = [
            (LogLevel::DEBUG.offset(-8), "TRACE-4"),
            (LogLevel::DEBUG.offset(-4), "TRACE"),
            (LogLevel::DEBUG, "DEBUG"),
            (LogLevel::INFO, "INFO"),
            (LogLevel::WARN, "WARN"),
            (LogLevel::ERROR, "ERROR"),
            (LogLevel::ERROR.offset(4), "FATAL"),
            (LogLevel::ERROR.offset(8), "FATAL+4"),
            (LogLevel::INFO.offset(1), "INFO+1"),
            (LogLevel::ERROR.offset(3), "ERROR+3"),
        ];

        for (level, name) in cases {
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn test_warn_offset_round_trip() {
        assert_eq!(LogLevel::WARN.offset(2).to_string(), "WARN+2");
        assert_eq!(LogLevel::from_name("warn").to_string(), "WARN");
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("WARN+2".parse::<LogLevel>(), Ok(LogLevel::WARN.offset(2)));
        assert_eq!("trace-4".parse::<LogLevel>(), Ok(LogLevel::new(-12)));
        assert_eq!("fatal".parse::<LogLevel>(), Ok(LogLevel::FATAL));
        assert!("loud".parse::<LogLevel>().is_err());
        assert!("WARN+x".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::TRACE < LogLevel::DEBUG);
        assert!(LogLevel::DEBUG < LogLevel::INFO);
        assert!(LogLevel::WARN < LogLevel::ERROR);
        assert!(LogLevel::ERROR < LogLevel::FATAL);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&LogLevel::WARN.offset(1)).unwrap();
        assert_eq!(json, "\"WARN+1\"");

        let level: LogLevel = serde_json::from_str("\" debug \"").unwrap();
        assert_eq!(level, LogLevel::DEBUG);

        let level: LogLevel = serde_json::from_str("\"nonsense\"").unwrap();
        assert_eq!(level, LogLevel::INFO);
    }
}
