use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the audit engine crates.
#[derive(Debug, Error, Clone)]
pub enum AuditError {
    #[error("{message}")]
    Message { message: String },
}

impl AuditError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(pub String);

impl SnapshotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

/// WCAG conformance level of a success criterion.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum WcagLevel {
    A,
    AA,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
        }
    }
}

impl FromStr for WcagLevel {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(WcagLevel::A),
            "AA" => Ok(WcagLevel::AA),
            other => Err(AuditError::new(format!("unknown WCAG level: {other}"))),
        }
    }
}

/// Which levels a run covers.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub enum LevelFilter {
    A,
    AA,
    #[default]
    All,
}

impl LevelFilter {
    pub fn admits(&self, level: WcagLevel) -> bool {
        match self {
            LevelFilter::A => level == WcagLevel::A,
            LevelFilter::AA => level == WcagLevel::AA,
            LevelFilter::All => true,
        }
    }
}

impl FromStr for LevelFilter {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(LevelFilter::A),
            "aa" => Ok(LevelFilter::AA),
            "all" | "both" | "a+aa" => Ok(LevelFilter::All),
            other => Err(AuditError::new(format!("unknown level filter: {other}"))),
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// `true` when `self` is at least as severe as `floor`.
    pub fn at_least(&self, floor: Severity) -> bool {
        *self <= floor
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(AuditError::new(format!("unknown severity: {other}"))),
        }
    }
}

/// The four WCAG principle groups used to scope runs.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Principle {
    Perceivable,
    Operable,
    Understandable,
    Robust,
}

impl Principle {
    /// Principle of a criterion id such as `"2.4.7"`.
    pub fn of_criterion(criterion_id: &str) -> Option<Principle> {
        match criterion_id.split('.').next()? {
            "1" => Some(Principle::Perceivable),
            "2" => Some(Principle::Operable),
            "3" => Some(Principle::Understandable),
            "4" => Some(Principle::Robust),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Principle::Perceivable => "perceivable",
            Principle::Operable => "operable",
            Principle::Understandable => "understandable",
            Principle::Robust => "robust",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filter_admits_levels() {
        assert!(LevelFilter::All.admits(WcagLevel::A));
        assert!(LevelFilter::All.admits(WcagLevel::AA));
        assert!(LevelFilter::A.admits(WcagLevel::A));
        assert!(!LevelFilter::A.admits(WcagLevel::AA));
        assert!(!LevelFilter::AA.admits(WcagLevel::A));
    }

    #[test]
    fn severity_ordering_puts_high_first() {
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::High.at_least(Severity::Medium));
        assert!(!Severity::Low.at_least(Severity::Medium));
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
    }

    #[test]
    fn principle_from_criterion() {
        assert_eq!(Principle::of_criterion("1.1.1"), Some(Principle::Perceivable));
        assert_eq!(Principle::of_criterion("4.1.2"), Some(Principle::Robust));
        assert_eq!(Principle::of_criterion("x"), None);
        assert_eq!("both".parse::<LevelFilter>().unwrap(), LevelFilter::All);
    }
}
