use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::kind::FileKind;
use crate::location::{KnownFolders, SourceLocation};

/// Read-only metadata snapshot of a scanned file.
///
/// Records are built once per file and then evaluated against many rules,
/// so the derived fields every condition needs - the lowercased name and
/// extension, the [`FileKind`] classification, the [`SourceLocation`] - are
/// computed at construction. Condition predicates then run without
/// allocating, which keeps live-preview evaluation of a few thousand files
/// inside an interactive debounce window.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileRecord {
    name: String,
    name_lower: String,
    extension: String,
    size_bytes: u64,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    accessed: DateTime<Utc>,
    path: PathBuf,
    kind: Option<FileKind>,
    source_location: Option<SourceLocation>,
}

impl FileRecord {
    /// Builds a record from already-known metadata.
    ///
    /// The name and extension derive from the final path component; the
    /// extension is stored lowercased and dot-less (empty when the file has
    /// none). `folders` classifies the path into a source location.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        size_bytes: u64,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
        accessed: DateTime<Utc>,
        folders: &KnownFolders,
    ) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name_lower = name.to_lowercase();
        let extension = path
            .extension()
            .map(|extension| extension.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let kind = FileKind::from_extension(&extension);
        let source_location = folders.locate(&path);

        Self {
            name,
            name_lower,
            extension,
            size_bytes,
            created,
            modified,
            accessed,
            path,
            kind,
            source_location,
        }
    }

    /// Builds a record by reading size and timestamps from disk.
    ///
    /// Creation and access times fall back to the modification time on
    /// filesystems that do not report them.
    pub fn from_path(path: impl Into<PathBuf>, folders: &KnownFolders) -> io::Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path)?;
        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        let created = metadata
            .created()
            .map(DateTime::<Utc>::from)
            .unwrap_or(modified);
        let accessed = metadata
            .accessed()
            .map(DateTime::<Utc>::from)
            .unwrap_or(modified);

        Ok(Self::new(
            path,
            metadata.len(),
            created,
            modified,
            accessed,
            folders,
        ))
    }

    /// Returns the file name with its original casing.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lowercased file name used by name conditions.
    #[must_use]
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    /// Returns the lowercased, dot-less extension (empty when absent).
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns the last-modification timestamp.
    #[must_use]
    pub const fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Returns the last-access timestamp.
    #[must_use]
    pub const fn accessed(&self) -> DateTime<Utc> {
        self.accessed
    }

    /// Returns the full path the record was built from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the derived content classification, when the extension is
    /// recognized.
    #[must_use]
    pub const fn kind(&self) -> Option<FileKind> {
        self.kind
    }

    /// Returns the well-known folder containing the file, when one does.
    #[must_use]
    pub const fn source_location(&self) -> Option<SourceLocation> {
        self.source_location
    }
}
