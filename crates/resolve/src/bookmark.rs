use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use rules::BookmarkHandle;

/// Error returned when a bookmark handle no longer resolves.
///
/// The only remediation is asking the user to re-grant folder access
/// through the picker; the resolver maps this onto
/// [`UnresolvableReason::AccessRevoked`](crate::UnresolvableReason::AccessRevoked).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("security-scoped bookmark is stale and must be re-granted")]
pub struct StaleBookmark;

/// The host platform's security-scoped bookmark capability.
///
/// Minting happens in the folder picker (outside this crate); resolving a
/// previously minted handle back to a live path happens here. Resolution
/// is read-only: implementations never create folders or mutate access
/// state.
pub trait BookmarkResolver {
    /// Resolves a handle to the folder path it was minted for.
    ///
    /// # Errors
    ///
    /// Returns [`StaleBookmark`] when the grant behind the handle has been
    /// revoked or the handle bytes no longer decode.
    fn resolve(&self, handle: &BookmarkHandle) -> Result<PathBuf, StaleBookmark>;
}

/// Portable bookmark store backed by plain paths.
///
/// Handles encode the granted folder's path as UTF-8; a handle resolves
/// only while its grant is registered. This is the implementation used on
/// hosts without a sandboxed bookmark facility and throughout the test
/// suites, where [`revoke`](Self::revoke) stands in for the user removing
/// access.
#[derive(Clone, Debug, Default)]
pub struct PathBookmarks {
    granted: HashSet<PathBuf>,
}

impl PathBookmarks {
    /// Creates an empty store with no grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants access to a folder and mints the handle for it.
    pub fn mint(&mut self, path: impl Into<PathBuf>) -> BookmarkHandle {
        let path = path.into();
        let handle = BookmarkHandle::new(path.to_string_lossy().into_owned().into_bytes());
        self.granted.insert(path);
        handle
    }

    /// Removes a grant; handles minted for it become stale.
    ///
    /// Returns `true` when the grant existed.
    pub fn revoke(&mut self, path: impl Into<PathBuf>) -> bool {
        self.granted.remove(&path.into())
    }

    /// Returns the number of live grants.
    #[must_use]
    pub fn granted_count(&self) -> usize {
        self.granted.len()
    }
}

impl BookmarkResolver for PathBookmarks {
    fn resolve(&self, handle: &BookmarkHandle) -> Result<PathBuf, StaleBookmark> {
        let text = std::str::from_utf8(handle.as_bytes()).map_err(|_| StaleBookmark)?;
        let path = PathBuf::from(text);
        if self.granted.contains(&path) {
            Ok(path)
        } else {
            Err(StaleBookmark)
        }
    }
}
