//! Priority classification for billing records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A billing record priority level.
///
/// Priorities are an open string-valued classification defined by the billing
/// service (`low`, `medium` and `high` are the levels observed in practice).
/// The client forwards the value verbatim as a request parameter; validating
/// the level is the billing service's responsibility.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(String);

impl Priority {
    /// Create a priority from an arbitrary string value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The `low` priority level.
    #[must_use]
    pub fn low() -> Self {
        Self::new("low")
    }

    /// The `medium` priority level.
    #[must_use]
    pub fn medium() -> Self {
        Self::new("medium")
    }

    /// The `high` priority level.
    #[must_use]
    pub fn high() -> Self {
        Self::new("high")
    }

    /// Return the priority as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Priority {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels() {
        assert_eq!(Priority::low().as_str(), "low");
        assert_eq!(Priority::medium().as_str(), "medium");
        assert_eq!(Priority::high().as_str(), "high");
    }

    #[test]
    fn open_set_accepts_any_value() {
        let p = Priority::new("urgent");
        assert_eq!(p.as_str(), "urgent");
        assert_eq!(p.to_string(), "urgent");
    }

    #[test]
    fn transparent_serde() {
        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, Priority::high());
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"high\"");
    }
}
