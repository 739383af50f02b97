use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::error::ConditionError;
use crate::file::FileRecord;
use crate::kind::FileKind;
use crate::location::SourceLocation;
use crate::size::{SizeSpecError, format_bytes, parse_size_spec};

/// User-facing condition types offered by the rule editor.
///
/// [`Condition::parse`] takes a field plus the raw text the user typed and
/// produces a validated [`Condition`]. The field survives round trips:
/// [`Condition::field`] reports which editor row a condition belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionField {
    /// Exact (case-insensitive) extension match.
    FileExtension,
    /// Substring match on the file name.
    NameContains,
    /// Prefix match on the file name.
    NameStartsWith,
    /// Suffix match on the file name.
    NameEndsWith,
    /// Minimum age in days since creation.
    DateOlderThan,
    /// Minimum age in days since last modification.
    DateModifiedOlderThan,
    /// Minimum age in days since last access.
    DateAccessedOlderThan,
    /// Minimum size threshold.
    SizeLargerThan,
    /// Derived content classification.
    FileKind,
    /// Well-known folder the file was scanned from.
    SourceLocation,
}

impl ConditionField {
    /// Returns the editor label for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileExtension => "file extension",
            Self::NameContains => "name contains",
            Self::NameStartsWith => "name starts with",
            Self::NameEndsWith => "name ends with",
            Self::DateOlderThan => "days since creation",
            Self::DateModifiedOlderThan => "days since modified",
            Self::DateAccessedOlderThan => "days since last access",
            Self::SizeLargerThan => "minimum size",
            Self::FileKind => "file kind",
            Self::SourceLocation => "source location",
        }
    }
}

impl fmt::Display for ConditionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validated predicate over one file attribute.
///
/// Conditions are immutable once constructed; the rule editor replaces a
/// condition with a freshly parsed instance instead of mutating it in
/// place. Name and extension needles are stored lowercased so
/// [`matches`](Self::matches) compares without allocating.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// File extension equals the value (case-insensitive, no dot).
    FileExtension(String),
    /// File name contains the value (case-insensitive).
    NameContains(String),
    /// File name starts with the value (case-insensitive).
    NameStartsWith(String),
    /// File name ends with the value (case-insensitive).
    NameEndsWith(String),
    /// File was created at least this many days ago.
    DateOlderThan {
        /// Minimum age in whole days.
        days: u32,
    },
    /// File was last modified at least this many days ago.
    DateModifiedOlderThan {
        /// Minimum age in whole days.
        days: u32,
    },
    /// File was last accessed at least this many days ago.
    DateAccessedOlderThan {
        /// Minimum age in whole days.
        days: u32,
    },
    /// File has the extension and was created at least this many days ago.
    ///
    /// Parsed from the legacy `extension:days` compound form still accepted
    /// by the [`DateOlderThan`](ConditionField::DateOlderThan) field; the
    /// bare day count is the primary contract.
    ExtensionOlderThan {
        /// Extension the age threshold is scoped to (lowercase, no dot).
        extension: String,
        /// Minimum age in whole days.
        days: u32,
    },
    /// File is strictly larger than this many bytes.
    SizeLargerThan {
        /// Exclusive lower bound in bytes.
        bytes: u64,
    },
    /// File's derived kind equals the value.
    FileKind(FileKind),
    /// File was scanned from the given well-known folder.
    SourceLocation(SourceLocation),
}

impl Condition {
    /// Parses and validates raw editor text into a condition.
    ///
    /// The value is trimmed first. Each field applies its own validation;
    /// see [`ConditionError`] for the failure taxonomy. For
    /// [`ConditionField::DateOlderThan`], text containing `:` parses as the
    /// legacy `extension:days` compound form.
    ///
    /// # Examples
    ///
    /// ```
    /// use rules::{Condition, ConditionField};
    ///
    /// let ok = Condition::parse(ConditionField::FileExtension, "pdf");
    /// assert!(ok.is_ok());
    ///
    /// let err = Condition::parse(ConditionField::FileExtension, ".pdf");
    /// assert!(err.is_err());
    /// ```
    pub fn parse(field: ConditionField, raw: &str) -> Result<Self, ConditionError> {
        let trimmed = raw.trim();
        match field {
            ConditionField::FileExtension => Self::file_extension(trimmed),
            ConditionField::NameContains => Self::name_contains(trimmed),
            ConditionField::NameStartsWith => Self::name_starts_with(trimmed),
            ConditionField::NameEndsWith => Self::name_ends_with(trimmed),
            ConditionField::DateOlderThan => {
                if trimmed.contains(':') {
                    parse_extension_days(trimmed)
                } else {
                    parse_days(field, trimmed).map(|days| Self::DateOlderThan { days })
                }
            }
            ConditionField::DateModifiedOlderThan => {
                parse_days(field, trimmed).map(|days| Self::DateModifiedOlderThan { days })
            }
            ConditionField::DateAccessedOlderThan => {
                parse_days(field, trimmed).map(|days| Self::DateAccessedOlderThan { days })
            }
            ConditionField::SizeLargerThan => match parse_size_spec(trimmed) {
                Ok(bytes) => Ok(Self::SizeLargerThan { bytes }),
                Err(SizeSpecError::Empty) => Err(ConditionError::EmptyValue { field }),
                Err(SizeSpecError::Negative) => Err(ConditionError::NegativeSize {
                    value: trimmed.to_string(),
                }),
                Err(SizeSpecError::Invalid) => Err(ConditionError::InvalidSize {
                    value: trimmed.to_string(),
                }),
                Err(SizeSpecError::TooLarge) => Err(ConditionError::SizeTooLarge {
                    value: trimmed.to_string(),
                }),
            },
            ConditionField::FileKind => FileKind::from_name(trimmed)
                .map(Self::FileKind)
                .ok_or_else(|| ConditionError::UnknownKind {
                    value: trimmed.to_string(),
                }),
            ConditionField::SourceLocation => SourceLocation::from_name(trimmed)
                .map(Self::SourceLocation)
                .ok_or_else(|| ConditionError::UnknownLocation {
                    value: trimmed.to_string(),
                }),
        }
    }

    /// Creates an extension condition (`"pdf"`, never `".pdf"`).
    pub fn file_extension(value: impl AsRef<str>) -> Result<Self, ConditionError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConditionError::EmptyValue {
                field: ConditionField::FileExtension,
            });
        }
        if trimmed.starts_with('.') {
            return Err(ConditionError::LeadingDot {
                value: trimmed.to_string(),
            });
        }
        Ok(Self::FileExtension(trimmed.to_lowercase()))
    }

    /// Creates a name-contains condition.
    pub fn name_contains(value: impl AsRef<str>) -> Result<Self, ConditionError> {
        lowered_needle(value.as_ref(), ConditionField::NameContains).map(Self::NameContains)
    }

    /// Creates a name-starts-with condition.
    pub fn name_starts_with(value: impl AsRef<str>) -> Result<Self, ConditionError> {
        lowered_needle(value.as_ref(), ConditionField::NameStartsWith).map(Self::NameStartsWith)
    }

    /// Creates a name-ends-with condition.
    pub fn name_ends_with(value: impl AsRef<str>) -> Result<Self, ConditionError> {
        lowered_needle(value.as_ref(), ConditionField::NameEndsWith).map(Self::NameEndsWith)
    }

    /// Creates a creation-age condition.
    #[must_use]
    pub const fn date_older_than(days: u32) -> Self {
        Self::DateOlderThan { days }
    }

    /// Creates a modification-age condition.
    #[must_use]
    pub const fn date_modified_older_than(days: u32) -> Self {
        Self::DateModifiedOlderThan { days }
    }

    /// Creates an access-age condition.
    #[must_use]
    pub const fn date_accessed_older_than(days: u32) -> Self {
        Self::DateAccessedOlderThan { days }
    }

    /// Creates an extension-scoped creation-age condition.
    pub fn extension_older_than(
        extension: impl AsRef<str>,
        days: u32,
    ) -> Result<Self, ConditionError> {
        let trimmed = extension.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConditionError::EmptyValue {
                field: ConditionField::FileExtension,
            });
        }
        if trimmed.starts_with('.') {
            return Err(ConditionError::LeadingDot {
                value: trimmed.to_string(),
            });
        }
        Ok(Self::ExtensionOlderThan {
            extension: trimmed.to_lowercase(),
            days,
        })
    }

    /// Creates a size threshold condition from a raw byte count.
    #[must_use]
    pub const fn size_larger_than(bytes: u64) -> Self {
        Self::SizeLargerThan { bytes }
    }

    /// Creates a kind condition.
    #[must_use]
    pub const fn file_kind(kind: FileKind) -> Self {
        Self::FileKind(kind)
    }

    /// Creates a source-location condition.
    #[must_use]
    pub const fn source_location(location: SourceLocation) -> Self {
        Self::SourceLocation(location)
    }

    /// Returns the editor field this condition belongs to.
    #[must_use]
    pub const fn field(&self) -> ConditionField {
        match self {
            Self::FileExtension(_) => ConditionField::FileExtension,
            Self::NameContains(_) => ConditionField::NameContains,
            Self::NameStartsWith(_) => ConditionField::NameStartsWith,
            Self::NameEndsWith(_) => ConditionField::NameEndsWith,
            Self::DateOlderThan { .. } | Self::ExtensionOlderThan { .. } => {
                ConditionField::DateOlderThan
            }
            Self::DateModifiedOlderThan { .. } => ConditionField::DateModifiedOlderThan,
            Self::DateAccessedOlderThan { .. } => ConditionField::DateAccessedOlderThan,
            Self::SizeLargerThan { .. } => ConditionField::SizeLargerThan,
            Self::FileKind(_) => ConditionField::FileKind,
            Self::SourceLocation(_) => ConditionField::SourceLocation,
        }
    }

    /// Evaluates the condition against a file.
    ///
    /// Pure and allocation-free: name and extension needles were lowercased
    /// at construction and the record pre-lowercases its own fields, so the
    /// hot path is plain slice comparison. `now` is explicit so repeated
    /// evaluations of the same inputs return the same answer.
    #[must_use]
    pub fn matches(&self, file: &FileRecord, now: DateTime<Utc>) -> bool {
        match self {
            Self::FileExtension(extension) => file.extension() == extension,
            Self::NameContains(needle) => file.name_lower().contains(needle.as_str()),
            Self::NameStartsWith(needle) => file.name_lower().starts_with(needle.as_str()),
            Self::NameEndsWith(needle) => file.name_lower().ends_with(needle.as_str()),
            Self::DateOlderThan { days } => older_than(file.created(), *days, now),
            Self::DateModifiedOlderThan { days } => older_than(file.modified(), *days, now),
            Self::DateAccessedOlderThan { days } => older_than(file.accessed(), *days, now),
            Self::ExtensionOlderThan { extension, days } => {
                file.extension() == extension && older_than(file.created(), *days, now)
            }
            Self::SizeLargerThan { bytes } => file.size_bytes() > *bytes,
            Self::FileKind(kind) => file.kind() == Some(*kind),
            Self::SourceLocation(location) => file.source_location() == Some(*location),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileExtension(extension) => write!(f, "extension is \"{extension}\""),
            Self::NameContains(needle) => write!(f, "name contains \"{needle}\""),
            Self::NameStartsWith(needle) => write!(f, "name starts with \"{needle}\""),
            Self::NameEndsWith(needle) => write!(f, "name ends with \"{needle}\""),
            Self::DateOlderThan { days } => write!(f, "created more than {days} days ago"),
            Self::DateModifiedOlderThan { days } => {
                write!(f, "modified more than {days} days ago")
            }
            Self::DateAccessedOlderThan { days } => {
                write!(f, "last accessed more than {days} days ago")
            }
            Self::ExtensionOlderThan { extension, days } => {
                write!(f, "\"{extension}\" files created more than {days} days ago")
            }
            Self::SizeLargerThan { bytes } => write!(f, "larger than {}", format_bytes(*bytes)),
            Self::FileKind(kind) => write!(f, "kind is {kind}"),
            Self::SourceLocation(location) => write!(f, "located in {location}"),
        }
    }
}

fn lowered_needle(raw: &str, field: ConditionField) -> Result<String, ConditionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConditionError::EmptyValue { field });
    }
    Ok(trimmed.to_lowercase())
}

fn parse_days(field: ConditionField, raw: &str) -> Result<u32, ConditionError> {
    if raw.is_empty() {
        return Err(ConditionError::EmptyValue { field });
    }
    raw.parse::<u32>()
        .map_err(|_| ConditionError::InvalidDays {
            value: raw.to_string(),
        })
}

fn parse_extension_days(raw: &str) -> Result<Condition, ConditionError> {
    let Some((extension, days)) = raw.split_once(':') else {
        return Err(ConditionError::InvalidExtensionDays {
            value: raw.to_string(),
        });
    };

    let extension = extension.trim();
    let days = days.trim();
    if extension.is_empty() || days.is_empty() {
        return Err(ConditionError::InvalidExtensionDays {
            value: raw.to_string(),
        });
    }
    if extension.starts_with('.') {
        return Err(ConditionError::LeadingDot {
            value: extension.to_string(),
        });
    }

    let days = days
        .parse::<u32>()
        .map_err(|_| ConditionError::InvalidExtensionDays {
            value: raw.to_string(),
        })?;

    Ok(Condition::ExtensionOlderThan {
        extension: extension.to_lowercase(),
        days,
    })
}

fn older_than(timestamp: DateTime<Utc>, days: u32, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(timestamp) >= Duration::days(i64::from(days))
}
