#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `resolve` decides whether a rule's [`Destination`](rules::Destination)
//! is usable right now. A destination stored weeks ago may have gone stale
//! in several distinct ways - the security-scoped access grant was
//! revoked, the folder was deleted, or the rule was saved as a draft whose
//! folder was never confirmed - and each failure carries a different
//! remediation, so the classification keeps them apart.
//!
//! # Design
//!
//! - [`BookmarkResolver`] is the seam to the host platform's
//!   security-scoped bookmark API, treated as an opaque capability. The
//!   shipped [`PathBookmarks`] implementation backs handles with plain
//!   paths for portable hosts and tests.
//! - [`check_resolvability`] is a pure classification over its inputs plus
//!   a read-only filesystem probe. It never creates folders, never mutates
//!   access state, and never caches: resolvability is recomputed each time
//!   the rule editor or the organizer asks.
//! - The organizer reports unresolvable destinations with their reason
//!   string; a file is never silently skipped.
//!
//! # Errors
//!
//! Unresolvable destinations are classified results, not errors:
//! [`ResolvabilityStatus::Unresolvable`] carries an
//! [`UnresolvableReason`] with an actionable message. The only error type
//! is [`StaleBookmark`], returned by resolvers whose grant has lapsed.
//!
//! # Examples
//!
//! ```
//! use resolve::{PathBookmarks, UnresolvableReason, check_resolvability};
//! use rules::Destination;
//!
//! let mut bookmarks = PathBookmarks::new();
//! let handle = bookmarks.mint("/somewhere/that/never/existed");
//! let destination = Destination::folder(handle, "Sorted");
//!
//! let status = check_resolvability(&destination, &bookmarks);
//! assert_eq!(status.reason(), Some(UnresolvableReason::FolderMissing));
//! ```
//!
//! # See also
//!
//! - `rules` for the [`Destination`](rules::Destination) model.
//! - `engine` for the evaluation that selects a destination in the first
//!   place.

mod bookmark;
mod resolver;
mod status;

pub use bookmark::{BookmarkResolver, PathBookmarks, StaleBookmark};
pub use resolver::check_resolvability;
pub use status::{ResolvabilityStatus, UnresolvableReason};
