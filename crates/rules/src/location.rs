use std::fmt;
use std::path::{Path, PathBuf};

/// Well-known user folder a file was scanned from.
///
/// The vocabulary is fixed; rule editors present it as a picker and
/// [`SourceLocation::from_name`] rejects anything outside it. The concrete
/// folder paths behind the vocabulary come from a [`KnownFolders`] table.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SourceLocation {
    /// The user's desktop folder.
    Desktop,
    /// The user's downloads folder.
    Downloads,
    /// The user's documents folder.
    Documents,
    /// The user's pictures folder.
    Pictures,
    /// The user's music folder.
    Music,
    /// The user's home folder (matched only when no more specific folder
    /// contains the file).
    Home,
}

impl SourceLocation {
    /// All locations in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Desktop,
        Self::Downloads,
        Self::Documents,
        Self::Pictures,
        Self::Music,
        Self::Home,
    ];

    /// Parses a vocabulary word (`"downloads"`, `"desktop"`, ...) into a
    /// location.
    ///
    /// Matching is case-insensitive; unknown words yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "desktop" => Some(Self::Desktop),
            "downloads" => Some(Self::Downloads),
            "documents" => Some(Self::Documents),
            "pictures" => Some(Self::Pictures),
            "music" => Some(Self::Music),
            "home" => Some(Self::Home),
            _ => None,
        }
    }

    /// Returns the vocabulary word for this location.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Downloads => "downloads",
            Self::Documents => "documents",
            Self::Pictures => "pictures",
            Self::Music => "music",
            Self::Home => "home",
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete filesystem roots for the source-location vocabulary.
///
/// [`discover`](Self::discover) fills the table from the host's standard
/// folder layout; tests and embedded callers construct one manually via the
/// `with_*` builders. Unset folders simply never classify a file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KnownFolders {
    desktop: Option<PathBuf>,
    downloads: Option<PathBuf>,
    documents: Option<PathBuf>,
    pictures: Option<PathBuf>,
    music: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl KnownFolders {
    /// Discovers the host's standard user folders.
    #[must_use]
    pub fn discover() -> Self {
        Self {
            desktop: dirs::desktop_dir(),
            downloads: dirs::download_dir(),
            documents: dirs::document_dir(),
            pictures: dirs::picture_dir(),
            music: dirs::audio_dir(),
            home: dirs::home_dir(),
        }
    }

    /// Sets the desktop folder root.
    #[must_use]
    pub fn with_desktop(mut self, path: impl Into<PathBuf>) -> Self {
        self.desktop = Some(path.into());
        self
    }

    /// Sets the downloads folder root.
    #[must_use]
    pub fn with_downloads(mut self, path: impl Into<PathBuf>) -> Self {
        self.downloads = Some(path.into());
        self
    }

    /// Sets the documents folder root.
    #[must_use]
    pub fn with_documents(mut self, path: impl Into<PathBuf>) -> Self {
        self.documents = Some(path.into());
        self
    }

    /// Sets the pictures folder root.
    #[must_use]
    pub fn with_pictures(mut self, path: impl Into<PathBuf>) -> Self {
        self.pictures = Some(path.into());
        self
    }

    /// Sets the music folder root.
    #[must_use]
    pub fn with_music(mut self, path: impl Into<PathBuf>) -> Self {
        self.music = Some(path.into());
        self
    }

    /// Sets the home folder root.
    #[must_use]
    pub fn with_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.home = Some(path.into());
        self
    }

    /// Classifies a path into the source location containing it.
    ///
    /// Specific folders win over `home`: a file in `~/Downloads` classifies
    /// as `downloads` even though the downloads folder usually lives inside
    /// the home folder.
    #[must_use]
    pub fn locate(&self, path: &Path) -> Option<SourceLocation> {
        let specific = [
            (&self.desktop, SourceLocation::Desktop),
            (&self.downloads, SourceLocation::Downloads),
            (&self.documents, SourceLocation::Documents),
            (&self.pictures, SourceLocation::Pictures),
            (&self.music, SourceLocation::Music),
        ];

        for (root, location) in specific {
            if let Some(root) = root
                && path.starts_with(root)
            {
                return Some(location);
            }
        }

        match &self.home {
            Some(root) if path.starts_with(root) => Some(SourceLocation::Home),
            _ => None,
        }
    }
}
