#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` turns a file and an ordered rule list into a routing decision.
//! It provides first-match-wins evaluation ([`evaluate`] and its snapshot
//! and batch variants), the advisory rule [`Overlap`] detector the rule
//! editor runs before a save, and an [`EvaluationTracer`] for aggregate
//! statistics over preview batches.
//!
//! # Design
//!
//! - Rules form a prioritized decision list, not a set of independent
//!   triggers: evaluation scans in ascending priority order and the first
//!   full match wins outright. Later, lower-priority rules never override
//!   an earlier match even when they look more specific.
//! - Every entry point is a pure function of its arguments; the explicit
//!   `now` parameter keeps age conditions deterministic. Nothing here holds
//!   shared mutable state, so calls may run from any thread as long as the
//!   caller does not mutate the snapshot mid-call.
//! - Overlap detection reasons over syntactic per-dimension profiles of
//!   each rule's conditions and never evaluates against real files. It is
//!   a best-effort heuristic: false negatives are acceptable, while the
//!   decidable dimensions (extensions, name affixes, kinds, locations)
//!   never produce false positives.
//!
//! # Invariants
//!
//! - Disabled rules never match and never participate in overlap
//!   detection.
//! - A rule with an empty condition set never matches any file.
//! - For a fixed file, rule list, and `now`, [`evaluate`] always returns
//!   the same outcome.
//! - Swapping the candidate and existing roles of two rules flips
//!   [`OverlapKind::Shadows`] into [`OverlapKind::ShadowedBy`].
//!
//! # Errors
//!
//! None. "No match" and "no overlaps" are ordinary results, and all inputs
//! reaching the engine were validated at construction by the `rules`
//! crate.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use engine::evaluate;
//! use rules::{
//!     BookmarkHandle, Condition, ConditionSet, Destination, FileRecord, KnownFolders, Rule,
//!     RuleAction, order_rules,
//! };
//!
//! let now = Utc::now();
//! let folders = KnownFolders::default();
//! let dest = |name: &str| Destination::folder(BookmarkHandle::new(*b"grant"), name);
//!
//! let mut rules = vec![
//!     Rule::new(
//!         "Invoices",
//!         ConditionSet::single(Condition::name_contains("invoice").unwrap()),
//!         RuleAction::Move,
//!         dest("Documents/Invoices"),
//!     )
//!     .with_priority(2),
//!     Rule::new(
//!         "Finance",
//!         ConditionSet::single(Condition::file_extension("pdf").unwrap()),
//!         RuleAction::Move,
//!         dest("Documents/Finance"),
//!     )
//!     .with_priority(1),
//! ];
//! order_rules(&mut rules);
//!
//! // Both rules match, but the priority-1 rule is evaluated first and wins.
//! let file = FileRecord::new("/tmp/invoice_march.pdf", 1, now, now, now, &folders);
//! let outcome = evaluate(&file, &rules, now);
//! assert_eq!(outcome.rule().map(rules::Rule::name), Some("Finance"));
//! ```
//!
//! # See also
//!
//! - `rules` for the condition and rule model the engine consumes.
//! - `resolve` for checking whether a winning rule's destination is
//!   actually usable.

mod evaluate;
mod overlap;
mod profile;
mod tracer;

pub use evaluate::{MatchOutcome, RuleMatch, evaluate, evaluate_all, evaluate_snapshot};
pub use overlap::{Overlap, OverlapKind, detect_overlaps};
pub use tracer::EvaluationTracer;
