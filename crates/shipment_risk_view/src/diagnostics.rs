//! Warning accumulation for the adapter.
//!
//! Sub-normalizers return a [`Normalized`] value carrying their own
//! diagnostics; the orchestrator folds them into one ordered list. No
//! helper writes into a shared side channel.

use std::fmt;

use serde::Serialize;

/// Where a deviation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Input not an object, or an empty-looking payload.
    Structural,
    /// No upstream source for a canonical field; a default was used.
    MissingField,
    /// Invalid date, negative loss metric, and similar value problems.
    UnitAnomaly,
    /// Cross-field contract broken (driver count, impact sum, ordering).
    ContractViolation,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::MissingField => "missing_field",
            Self::UnitAnomaly => "unit_anomaly",
            Self::ContractViolation => "contract_violation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: Category,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(Category::Structural, message)
    }

    #[must_use]
    pub fn missing(message: impl Into<String>) -> Self {
        Self::new(Category::MissingField, message)
    }

    #[must_use]
    pub fn anomaly(message: impl Into<String>) -> Self {
        Self::new(Category::UnitAnomaly, message)
    }

    #[must_use]
    pub fn contract(message: impl Into<String>) -> Self {
        Self::new(Category::ContractViolation, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A normalized value together with the deviations found producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Normalized<T> {
    #[must_use]
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Move the diagnostics into `sink` and hand back the value.
    pub fn merge_into(self, sink: &mut Vec<Diagnostic>) -> T {
        sink.extend(self.diagnostics);
        self.value
    }
}

/// Flatten diagnostics into the plain warning strings exposed in `meta`.
#[must_use]
pub fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}
