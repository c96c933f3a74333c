//! Shared value types and validation helpers for all record kinds.
//!
//! # Responsibility
//! - Define the priority scale, timestamp unit and record identity helpers.
//! - Own the validation error type used by every entity `validate()`.
//! - Normalize free-form inputs (tags, search text) in one place.
//!
//! # Invariants
//! - Timestamps are Unix epoch milliseconds.
//! - Record identifiers are UUIDv7, so creation order is visible in the id.
//! - Tags are stored as written, minus blanks and exact repeats; tag
//!   comparisons fold case.
//! - Only an empty search text matches everything; other text, whitespace
//!   included, is matched literally.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Unix epoch milliseconds.
pub type Timestamp = i64;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Urgency shared by projects and tasks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// All priorities from lowest to highest.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive timestamp window used by due-date filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateRange {
    pub fn contains(&self, value: Timestamp) -> bool {
        value >= self.start && value <= self.end
    }
}

/// Invariant violations detected by entity validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required text field is blank after trim.
    BlankField(&'static str),
    /// Project progress outside `0..=100`.
    ProgressOutOfRange(u8),
    /// End timestamp earlier than start timestamp.
    DateRangeReversed { start: Timestamp, end: Timestamp },
    /// Color tag is not `#RRGGBB`.
    InvalidColor(String),
    /// Email is not `local@domain.tld`.
    InvalidEmail(String),
    /// Hour estimate is negative or not finite.
    InvalidHours(&'static str),
    /// Attachment exceeds the configured upload limit.
    AttachmentTooLarge { size: u64, max: u64 },
    /// Task lists itself as a dependency.
    SelfDependency(Uuid),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::ProgressOutOfRange(value) => {
                write!(f, "progress {value} is outside the 0..=100 range")
            }
            Self::DateRangeReversed { start, end } => {
                write!(f, "end {end} must not be earlier than start {start}")
            }
            Self::InvalidColor(value) => write!(f, "invalid color tag `{value}`"),
            Self::InvalidEmail(value) => write!(f, "invalid email `{value}`"),
            Self::InvalidHours(field) => {
                write!(f, "`{field}` must be a finite, non-negative number")
            }
            Self::AttachmentTooLarge { size, max } => {
                write!(f, "attachment of {size} bytes exceeds limit of {max} bytes")
            }
            Self::SelfDependency(id) => write!(f, "task {id} cannot depend on itself"),
        }
    }
}

impl Error for ModelValidationError {}

/// Generates a fresh time-ordered record identifier.
pub fn new_record_id() -> Uuid {
    Uuid::now_v7()
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_hours(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ModelValidationError> {
    match value {
        Some(hours) if !hours.is_finite() || hours < 0.0 => {
            Err(ModelValidationError::InvalidHours(field))
        }
        _ => Ok(()),
    }
}

/// Comparison key for a tag: trimmed and lowercased, `None` when blank.
pub fn tag_key(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Drops blank tags and exact repeats, keeping the caller's spelling and order.
pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.into_iter()
        .filter(|tag| !tag.trim().is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Lowercased needle for case-insensitive containment, `None` when empty.
pub(crate) fn search_needle(text: Option<&str>) -> Option<String> {
    text.filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive substring test against an already-lowercased needle.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Keeps the first occurrence of each id, preserving order.
pub(crate) fn dedupe_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = BTreeSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_accepts_six_digit_tags_only() {
        assert!(is_hex_color("#3B82F6"));
        assert!(is_hex_color("#10b981"));
        assert!(!is_hex_color("3B82F6"));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn email_requires_local_part_and_domain() {
        assert!(is_email("sarah@example.com"));
        assert!(!is_email("sarah@"));
        assert!(!is_email("sarah example.com"));
    }

    #[test]
    fn dedupe_tags_keeps_spelling_and_drops_blanks() {
        let tags = vec![
            "Frontend".to_string(),
            "Frontend".to_string(),
            " ".to_string(),
            "API".to_string(),
            "api".to_string(),
        ];
        assert_eq!(dedupe_tags(tags), vec!["Frontend", "API", "api"]);
        assert_eq!(tag_key(" API "), Some("api".to_string()));
        assert_eq!(tag_key("  "), None);
    }

    #[test]
    fn search_needle_only_skips_empty_text() {
        assert_eq!(search_needle(Some("")), None);
        assert_eq!(search_needle(None), None);
        assert_eq!(search_needle(Some("  ")).as_deref(), Some("  "));
        assert_eq!(search_needle(Some(" Login")).as_deref(), Some(" login"));
    }

    #[test]
    fn require_hours_rejects_negative_and_nan() {
        assert!(require_hours("estimated_hours", Some(4.5)).is_ok());
        assert!(require_hours("estimated_hours", None).is_ok());
        assert_eq!(
            require_hours("actual_hours", Some(-1.0)),
            Err(ModelValidationError::InvalidHours("actual_hours"))
        );
        assert!(require_hours("actual_hours", Some(f64::NAN)).is_err());
    }

    #[test]
    fn dedupe_ids_keeps_first_occurrence_order() {
        let a = new_record_id();
        let b = new_record_id();
        assert_eq!(dedupe_ids(vec![b, a, b, a]), vec![b, a]);
    }
}
