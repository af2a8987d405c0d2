//! Status blocks rendered by every surface.

use serde::Serialize;

/// Severity of a status block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    /// The check passed.
    Success,
    /// Neutral information, such as a skipped policy.
    Info,
    /// Awaiting user action.
    Pending,
    /// Configuration problem that does not block the page.
    Warning,
    /// The check ran and failed.
    Failed,
    /// The check could not run.
    Error,
}

impl StatusLevel {
    /// Returns the glyph shown before the title.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info => "ℹ",
            Self::Pending | Self::Warning => "⚠",
            Self::Failed | Self::Error => "✗",
        }
    }
}

/// A short message with optional detail and an itemized list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBlock {
    level: StatusLevel,
    title: String,
    detail: Option<String>,
    items: Vec<String>,
}

impl StatusBlock {
    /// Creates a block with no detail or items.
    #[must_use]
    pub fn new(level: StatusLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            detail: None,
            items: Vec::new(),
        }
    }

    /// Creates a success block.
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(StatusLevel::Success, title)
    }

    /// Creates an info block.
    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(StatusLevel::Info, title)
    }

    /// Creates a pending block.
    #[must_use]
    pub fn pending(title: impl Into<String>) -> Self {
        Self::new(StatusLevel::Pending, title)
    }

    /// Creates a warning block.
    #[must_use]
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(StatusLevel::Warning, title)
    }

    /// Creates a failed block.
    #[must_use]
    pub fn failed(title: impl Into<String>) -> Self {
        Self::new(StatusLevel::Failed, title)
    }

    /// Creates an error block.
    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(StatusLevel::Error, title)
    }

    /// Adds a detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Adds itemized reasons.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.items.extend(items);
        self
    }

    /// Returns the severity.
    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the detail line, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the itemized reasons.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }
}
