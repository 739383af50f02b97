use std::fmt;

/// Opaque security-scoped access token for a destination folder.
///
/// Minted by the host platform's bookmark facility when the user picks a
/// folder; this crate never interprets the bytes. Whether a handle still
/// resolves to a live folder is the resolver's concern, checked on demand
/// and never cached.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookmarkHandle(Vec<u8>);

impl BookmarkHandle {
    /// Wraps raw bookmark bytes.
    #[must_use]
    pub fn new(token: impl Into<Vec<u8>>) -> Self {
        Self(token.into())
    }

    /// Returns the raw bookmark bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` when the handle carries no bytes.
    ///
    /// Empty handles are treated like missing ones: a move or copy rule is
    /// not runnable until the folder picker grants a real token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where a matching rule routes a file.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Destination {
    /// A user-picked folder.
    ///
    /// `bookmark` is `None` for placeholder destinations produced by a rule
    /// draft whose folder access has not been confirmed yet; such rules
    /// validate as drafts but are not runnable.
    Folder {
        /// Security-scoped access token, absent for placeholders.
        bookmark: Option<BookmarkHandle>,
        /// Folder name shown in the rule editor.
        display_name: String,
    },
    /// The system trash; only meaningful for delete rules, which ignore
    /// the destination entirely.
    Trash,
}

impl Destination {
    /// Creates a folder destination with a confirmed access grant.
    #[must_use]
    pub fn folder(bookmark: BookmarkHandle, display_name: impl Into<String>) -> Self {
        Self::Folder {
            bookmark: Some(bookmark),
            display_name: display_name.into(),
        }
    }

    /// Creates a placeholder folder destination awaiting the folder picker.
    #[must_use]
    pub fn placeholder(display_name: impl Into<String>) -> Self {
        Self::Folder {
            bookmark: None,
            display_name: display_name.into(),
        }
    }

    /// Returns the display name (`"Trash"` for the trash destination).
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Folder { display_name, .. } => display_name,
            Self::Trash => "Trash",
        }
    }

    /// Returns the access handle, when present and non-empty.
    #[must_use]
    pub fn bookmark(&self) -> Option<&BookmarkHandle> {
        match self {
            Self::Folder {
                bookmark: Some(handle),
                ..
            } if !handle.is_empty() => Some(handle),
            _ => None,
        }
    }

    /// Returns `true` for a folder destination with no usable handle.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Folder { .. }) && self.bookmark().is_none()
    }

    /// Returns `true` for the trash destination.
    #[must_use]
    pub const fn is_trash(&self) -> bool {
        matches!(self, Self::Trash)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
