use std::fmt;

/// Why a destination cannot currently be used.
///
/// The placeholder state ([`AwaitingFolderPick`](Self::AwaitingFolderPick))
/// is deliberately distinct from the stale state
/// ([`AccessRevoked`](Self::AccessRevoked)): the first asks the user to
/// pick the folder once, the second asks them to re-grant access they
/// previously held.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnresolvableReason {
    /// The stored access grant no longer resolves and must be re-granted.
    AccessRevoked,
    /// The granted folder resolved but no longer exists on disk.
    FolderMissing,
    /// The granted path resolved but is not a directory.
    NotADirectory,
    /// The destination is a draft placeholder; folder access has never
    /// been confirmed.
    AwaitingFolderPick,
}

impl UnresolvableReason {
    /// Returns the actionable message shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AccessRevoked => "destination folder requires re-granting access",
            Self::FolderMissing => "destination folder no longer exists",
            Self::NotADirectory => "destination path is not a folder",
            Self::AwaitingFolderPick => {
                "folder access must be confirmed via the folder picker before the rule can run"
            }
        }
    }
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Whether a destination is usable right now.
///
/// Computed on demand and never cached: folder access can be revoked and
/// folders deleted between any two checks, so a stored status would lie.
/// Unresolvable destinations are surfaced to the user with their reason,
/// never silently skipped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvabilityStatus {
    /// The destination resolves to a live, writable target.
    Valid,
    /// The destination cannot be used; the reason says what to do about
    /// it.
    Unresolvable(UnresolvableReason),
}

impl ResolvabilityStatus {
    /// Returns `true` when the destination is usable.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, when unresolvable.
    #[must_use]
    pub const fn reason(&self) -> Option<UnresolvableReason> {
        match self {
            Self::Valid => None,
            Self::Unresolvable(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for ResolvabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Unresolvable(reason) => reason.fmt(f),
        }
    }
}
