use std::fmt;

/// Broad content classification derived from a file's extension.
///
/// The vocabulary is fixed: rule editors present it as a picker and
/// [`FileKind::from_name`] rejects anything outside it. Classification of a
/// concrete file happens once, at record construction, via
/// [`FileKind::from_extension`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FileKind {
    /// Raster and vector images, including camera raw formats.
    Image,
    /// Audio recordings and music files.
    Audio,
    /// Video containers.
    Video,
    /// Text-centric documents (PDF, word processing, plain text).
    Document,
    /// Tabular data and spreadsheet workbooks.
    Spreadsheet,
    /// Slide decks.
    Presentation,
    /// Compressed archives and disk images.
    Archive,
    /// Source code and markup.
    Code,
}

impl FileKind {
    /// All kinds in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Image,
        Self::Audio,
        Self::Video,
        Self::Document,
        Self::Spreadsheet,
        Self::Presentation,
        Self::Archive,
        Self::Code,
    ];

    /// Parses a vocabulary word (`"image"`, `"audio"`, ...) into a kind.
    ///
    /// Matching is case-insensitive; unknown words yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "image" => Some(Self::Image),
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            "document" => Some(Self::Document),
            "spreadsheet" => Some(Self::Spreadsheet),
            "presentation" => Some(Self::Presentation),
            "archive" => Some(Self::Archive),
            "code" => Some(Self::Code),
            _ => None,
        }
    }

    /// Classifies a lowercase, dot-less extension into a kind.
    ///
    /// Unrecognized extensions yield `None`; such files never match a kind
    /// condition.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&extension))
    }

    /// Returns the extensions classified under this kind.
    ///
    /// The tables are the decision source for
    /// [`from_extension`](Self::from_extension) and for the overlap
    /// detector's kind-versus-extension reasoning, so they are
    /// deliberately public.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => &[
                "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "heic", "heif", "svg",
                "raw", "ico",
            ],
            Self::Audio => &[
                "mp3", "wav", "aac", "flac", "ogg", "m4a", "wma", "aiff", "opus",
            ],
            Self::Video => &[
                "mp4", "mov", "avi", "mkv", "wmv", "flv", "webm", "m4v", "mpg", "mpeg",
            ],
            Self::Document => &["pdf", "doc", "docx", "txt", "rtf", "odt", "pages", "md", "tex"],
            Self::Spreadsheet => &["xls", "xlsx", "csv", "numbers", "ods", "tsv"],
            Self::Presentation => &["ppt", "pptx", "key", "odp"],
            Self::Archive => &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "dmg", "iso", "tgz"],
            Self::Code => &[
                "rs", "py", "js", "ts", "java", "c", "cpp", "h", "hpp", "go", "rb", "swift", "kt",
                "sh", "html", "css", "json", "xml", "yaml", "yml", "toml", "sql",
            ],
        }
    }

    /// Returns the vocabulary word for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Archive => "archive",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
