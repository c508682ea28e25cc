use std::fmt;
use std::path::Path;

use crate::models::EntityId;

/// One file picked by the user for a flat import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    pub name: String,
    pub content: String,
}

impl ImportedFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Hidden,
    /// Zero-byte entry without an extension, as emitted for directories by
    /// some folder pickers.
    Placeholder,
    InvalidName,
    NameCollision,
}

impl SkipReason {
    /// Hidden files and placeholders are dropped quietly; the rest are worth
    /// telling the user about.
    pub fn is_warning(self) -> bool {
        matches!(self, Self::InvalidName | Self::NameCollision)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "hidden file"),
            Self::Placeholder => write!(f, "directory placeholder"),
            Self::InvalidName => write!(f, "invalid name"),
            Self::NameCollision => write!(f, "a file with this name already exists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImport {
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: Vec<EntityId>,
    pub skipped: Vec<SkippedImport>,
}

impl ImportReport {
    pub fn warnings(&self) -> impl Iterator<Item = &SkippedImport> {
        self.skipped.iter().filter(|s| s.reason.is_warning())
    }
}

/// Entries the importer drops before touching the tree. Names are checked as
/// they will be stored, without surrounding whitespace.
pub fn pre_filter(file: &ImportedFile) -> Option<SkipReason> {
    let name = file.name.trim();
    if name.starts_with('.') {
        return Some(SkipReason::Hidden);
    }
    if file.content.is_empty() && Path::new(name).extension().is_none() {
        return Some(SkipReason::Placeholder);
    }
    None
}
