#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rules` is the data model of the sweep file organizer's decision core:
//! validated single-attribute [`Condition`]s, AND/OR [`ConditionSet`]s with
//! an independent OR'd [`ExclusionSet`], and priority-ordered [`Rule`]s
//! that route matching files to a [`Destination`]. The crate owns all
//! construction-time validation so that evaluation - in the `engine`
//! crate - is total and never fails for well-formed inputs.
//!
//! # Design
//!
//! - [`Condition`] is a closed enum with one variant per file attribute.
//!   Matching is an exhaustive `match`; there is no runtime "unsupported
//!   condition" fallback, the compiler checks coverage.
//! - Conditions are immutable. The rule editor edits by replacing a slot
//!   with a freshly parsed instance ([`ConditionSet::replace`]), never by
//!   mutating in place.
//! - [`FileRecord`] precomputes everything predicates need (lowercased
//!   name and extension, [`FileKind`], [`SourceLocation`]) so per-condition
//!   evaluation performs no allocation.
//! - Priority is an explicit integer field on [`Rule`]; [`order_rules`]
//!   derives the canonical evaluation order and [`normalize_priorities`]
//!   rewrites the field after a UI reorder. Array position is never the
//!   source of truth.
//!
//! # Invariants
//!
//! - A [`ConditionSet`]'s operator is `Single` exactly when it holds at
//!   most one condition; adding a second promotes to `And` unless `Or` was
//!   chosen explicitly.
//! - An empty condition set never matches (the empty `And` is `false`, not
//!   vacuously true). [`Rule::validate`] rejects empty rules at save time
//!   so the engine never has to discover them.
//! - An empty exclusion set never excludes.
//! - Extension values never carry a leading dot; needles and extensions
//!   are stored lowercased.
//!
//! # Errors
//!
//! [`ConditionError`] reports malformed values at construction time; no
//! partial condition is ever built. [`RuleValidationError`] is raised by
//! the save-time validators. Matching itself is infallible.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use rules::{Condition, ConditionSet, FileRecord, KnownFolders, Rule, RuleAction};
//! use rules::{BookmarkHandle, Destination};
//!
//! let now = Utc::now();
//! let folders = KnownFolders::default();
//! let file = FileRecord::new("/tmp/invoice_march.pdf", 120_000, now, now, now, &folders);
//!
//! let rule = Rule::new(
//!     "Finance",
//!     ConditionSet::single(Condition::file_extension("pdf").unwrap()),
//!     RuleAction::Move,
//!     Destination::folder(BookmarkHandle::new(*b"grant"), "Documents/Finance"),
//! );
//!
//! assert!(rule.validate().is_ok());
//! assert!(rule.matches(&file, now));
//! ```
//!
//! # See also
//!
//! - `engine` for first-match-wins evaluation and overlap detection.
//! - `resolve` for destination resolvability checks.

mod condition;
mod destination;
mod error;
mod file;
mod kind;
mod location;
mod rule;
mod set;
mod size;

pub use condition::{Condition, ConditionField};
pub use destination::{BookmarkHandle, Destination};
pub use error::{ConditionError, RuleValidationError};
pub use file::FileRecord;
pub use kind::FileKind;
pub use location::{KnownFolders, SourceLocation};
pub use rule::{Rule, RuleAction, RuleId, normalize_priorities, order_rules};
pub use set::{CombineOp, ConditionSet, ExclusionSet};

#[cfg(test)]
mod tests;
