use std::fs;
use std::io;

use rules::Destination;

use crate::bookmark::BookmarkResolver;
use crate::status::{ResolvabilityStatus, UnresolvableReason};

/// Target name for resolver tracing events.
const RESOLVE_TARGET: &str = "sweep::resolve";

/// Classifies whether a destination is usable right now.
///
/// - `Trash` is always valid; delete rules ignore the destination.
/// - A placeholder folder (no access handle) reports
///   [`UnresolvableReason::AwaitingFolderPick`].
/// - A handle that no longer resolves reports
///   [`UnresolvableReason::AccessRevoked`].
/// - A resolved path that is gone reports
///   [`UnresolvableReason::FolderMissing`]; one that exists but is not a
///   directory reports [`UnresolvableReason::NotADirectory`].
///
/// The check is read-only: it never creates the folder, never mutates
/// access state, and caches nothing. It touches the filesystem, so callers
/// keep it off UI-responsive threads; it takes no locks.
///
/// # Examples
///
/// ```
/// use resolve::{PathBookmarks, ResolvabilityStatus, check_resolvability};
/// use rules::Destination;
///
/// let bookmarks = PathBookmarks::new();
/// let status = check_resolvability(&Destination::Trash, &bookmarks);
/// assert!(status.is_valid());
///
/// let draft = Destination::placeholder("Documents/Finance");
/// let status = check_resolvability(&draft, &bookmarks);
/// assert!(!status.is_valid());
/// ```
#[must_use]
pub fn check_resolvability(
    destination: &Destination,
    bookmarks: &impl BookmarkResolver,
) -> ResolvabilityStatus {
    let status = classify(destination, bookmarks);
    tracing::debug!(
        target: RESOLVE_TARGET,
        destination = %destination.display_name(),
        status = %status,
        "destination_checked"
    );
    status
}

fn classify(
    destination: &Destination,
    bookmarks: &impl BookmarkResolver,
) -> ResolvabilityStatus {
    let Destination::Folder { .. } = destination else {
        return ResolvabilityStatus::Valid;
    };

    let Some(handle) = destination.bookmark() else {
        return ResolvabilityStatus::Unresolvable(UnresolvableReason::AwaitingFolderPick);
    };

    let Ok(path) = bookmarks.resolve(handle) else {
        return ResolvabilityStatus::Unresolvable(UnresolvableReason::AccessRevoked);
    };

    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_dir() => ResolvabilityStatus::Valid,
        Ok(_) => ResolvabilityStatus::Unresolvable(UnresolvableReason::NotADirectory),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            ResolvabilityStatus::Unresolvable(UnresolvableReason::FolderMissing)
        }
        // Permission and other probe failures mean the grant no longer
        // confers access.
        Err(_) => ResolvabilityStatus::Unresolvable(UnresolvableReason::AccessRevoked),
    }
}
