//! Column layout of the single-view results table.

/// Semantic role of one column in the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Category links; not used by the row mapper.
    Category,
    /// Title link: text is the title, target the detail page.
    Title,
    /// Publish timestamp.
    PublishTime,
    /// Magnet link.
    Magnet,
    /// Human-readable size.
    Size,
    /// Seeder count.
    Seeders,
    /// Leecher count.
    Leechers,
}

impl ColumnRole {
    /// Lowercase label for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ColumnRole::Category => "category",
            ColumnRole::Title => "title",
            ColumnRole::PublishTime => "publish time",
            ColumnRole::Magnet => "magnet",
            ColumnRole::Size => "size",
            ColumnRole::Seeders => "seeders",
            ColumnRole::Leechers => "leechers",
        }
    }
}

/// Column order of the listing template.
///
/// A template change upstream should only ever require editing this
/// table, not the row mapper.
pub const RESULT_COLUMNS: &[ColumnRole] = &[
    ColumnRole::Category,
    ColumnRole::Title,
    ColumnRole::PublishTime,
    ColumnRole::Magnet,
    ColumnRole::Size,
    ColumnRole::Seeders,
    ColumnRole::Leechers,
];

/// Position of a role within [`RESULT_COLUMNS`].
pub fn column_index(role: ColumnRole) -> Option<usize> {
    RESULT_COLUMNS.iter().position(|r| *r == role)
}
