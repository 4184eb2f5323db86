//! Error types for migration generation.

/// Errors that can occur while turning a [`MigrationIntent`] into
/// statements.
///
/// Validation is fail-fast: no partial statement sequence is ever
/// returned alongside an error.
///
/// [`MigrationIntent`]: crate::spec::MigrationIntent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// A column has an empty name.
    #[error("Column at index {index} has no name")]
    MissingColumnName {
        /// Position of the column in the input list.
        index: usize,
    },

    /// A column has an empty type tag.
    #[error("Column '{column}' has no type")]
    MissingColumnType {
        /// Name of the offending column.
        column: String,
    },

    /// A column is flagged as a foreign key but carries no foreign key
    /// details.
    #[error("Column '{column}' is marked as a foreign key but has no foreign key details")]
    MissingForeignKey {
        /// Name of the offending column.
        column: String,
    },

    /// A foreign key is missing one of its required fields.
    #[error("Foreign key on column '{column}' is missing '{field}'")]
    MissingForeignKeyField {
        /// Name of the column the foreign key hangs off.
        column: String,
        /// The absent field (`references`, `on_update` or `on_delete`).
        field: &'static str,
    },
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
