use thiserror::Error;

use crate::condition::ConditionField;
use crate::rule::RuleAction;

/// Error produced when a condition value fails validation at construction.
///
/// No partial condition is ever constructed: the caller re-prompts for a
/// corrected value and parses again.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConditionError {
    /// The raw value was empty (or whitespace-only) for a field that
    /// requires text.
    #[error("{field} value must not be empty")]
    EmptyValue {
        /// Field whose value was missing.
        field: ConditionField,
    },
    /// An extension value carried a leading dot (`".pdf"` instead of
    /// `"pdf"`).
    #[error("file extension '{value}' must not start with a dot")]
    LeadingDot {
        /// The offending extension text.
        value: String,
    },
    /// A day count did not parse as a non-negative whole number.
    #[error("invalid day count '{value}': expected a non-negative whole number")]
    InvalidDays {
        /// The offending day-count text.
        value: String,
    },
    /// A size value did not parse as a magnitude with an optional unit
    /// suffix.
    #[error("invalid size '{value}': expected a size with an optional K/M/G/T suffix")]
    InvalidSize {
        /// The offending size text.
        value: String,
    },
    /// A size value carried a negative magnitude.
    #[error("invalid size '{value}': size must be non-negative")]
    NegativeSize {
        /// The offending size text.
        value: String,
    },
    /// A size value overflowed the supported byte range.
    #[error("invalid size '{value}': size exceeds the supported range")]
    SizeTooLarge {
        /// The offending size text.
        value: String,
    },
    /// A file kind was not part of the fixed vocabulary.
    #[error(
        "unknown file kind '{value}' (expected one of image, audio, video, document, \
         spreadsheet, presentation, archive, code)"
    )]
    UnknownKind {
        /// The offending kind text.
        value: String,
    },
    /// A source location was not part of the fixed vocabulary.
    #[error(
        "unknown source location '{value}' (expected one of desktop, downloads, documents, \
         pictures, music, home)"
    )]
    UnknownLocation {
        /// The offending location text.
        value: String,
    },
    /// A compound `extension:days` value was malformed.
    #[error("invalid extension age '{value}': expected 'extension:days'")]
    InvalidExtensionDays {
        /// The offending compound text.
        value: String,
    },
}

/// Error raised by rule-level validation at save time.
///
/// These are never raised mid-evaluation; the matching engine treats any
/// well-formed [`Rule`](crate::Rule) as total and simply never matches a
/// rule with no conditions.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RuleValidationError {
    /// The rule name was empty after trimming.
    #[error("rule name must not be empty")]
    EmptyName,
    /// The rule has no conditions and could never match any file.
    #[error("rule '{name}' has no conditions and can never match")]
    NoConditions {
        /// Name of the offending rule.
        name: String,
    },
    /// A move or copy rule does not target a folder destination.
    #[error("rule '{name}' ({action}) requires a destination folder")]
    MissingDestination {
        /// Name of the offending rule.
        name: String,
        /// Action that requires a folder destination.
        action: RuleAction,
    },
    /// A move or copy rule's folder destination carries no access grant.
    #[error("rule '{name}' destination '{display_name}' has no folder access grant")]
    MissingBookmark {
        /// Name of the offending rule.
        name: String,
        /// Display name of the handle-less destination.
        display_name: String,
    },
}
