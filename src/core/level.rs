//! Log level definitions and the per-provider enabled-level set

use crate::core::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
}

impl LogLevel {
    /// All levels, in severity order. Useful for building level sets.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// The capitalized level name as written into log records ("Info", "Warning", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// The fixed set of levels a provider was configured to accept.
///
/// Membership is exact, not threshold-based: a provider enabled for
/// `{Info, Error}` rejects `Warning` even though it is more severe than
/// `Info`. An empty set is a configuration error, caught at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSet(u8);

impl LevelSet {
    /// Build a level set from the given levels.
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::InvalidConfiguration` when no levels are given;
    /// a provider that accepts nothing is misconfiguration, not a no-op.
    pub fn new<I: IntoIterator<Item = LogLevel>>(levels: I) -> Result<Self> {
        let mut bits = 0u8;
        for level in levels {
            bits |= level.bit();
        }
        if bits == 0 {
            return Err(LoggerError::config(
                "LevelSet",
                "no enabled log levels supplied",
            ));
        }
        Ok(LevelSet(bits))
    }

    /// A set containing every level.
    pub fn all() -> Self {
        LevelSet(LogLevel::ALL.iter().fold(0, |bits, l| bits | l.bit()))
    }

    #[inline]
    pub fn contains(&self, level: LogLevel) -> bool {
        self.0 & level.bit() != 0
    }

    pub fn levels(&self) -> Vec<LogLevel> {
        LogLevel::ALL
            .iter()
            .copied()
            .filter(|l| self.contains(*l))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::Info.as_str(), "Info");
        assert_eq!(LogLevel::Warning.to_string(), "Warning");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("info".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("Warning".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_empty_level_set_is_an_error() {
        let err = LevelSet::new([]).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_membership_is_exact_not_ordinal() {
        let set = LevelSet::new([LogLevel::Info, LogLevel::Error]).unwrap();
        assert!(set.contains(LogLevel::Info));
        assert!(set.contains(LogLevel::Error));
        // Warning is more severe than Info but was not enabled.
        assert!(!set.contains(LogLevel::Warning));
        assert!(!set.contains(LogLevel::Debug));
    }

    #[test]
    fn test_all_set() {
        let set = LevelSet::all();
        for level in LogLevel::ALL {
            assert!(set.contains(level));
        }
        assert_eq!(set.levels(), LogLevel::ALL.to_vec());
    }
}
