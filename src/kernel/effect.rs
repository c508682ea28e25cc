/// Work the store hands to collaborators outside the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The file tree's structure or content changed; a persistence layer may
    /// snapshot and store it.
    PersistWorkspace,
    Notify {
        level: NoticeLevel,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}
